mod common;

use admin_console::response::Paginated;
use admin_console::row::RowId;
use admin_console::service::SortOrder;
use admin_console::views::browser::{BrowserState, Column, EntityBrowser, LOADING, NO_RECORDS};
use admin_console::views::BrowserEvent;
use admin_console::{AppError, ResourceIdentity, Row, Transport};
use common::{page_json, settings, settings_without_debounce, MockTransport};
use reqwest::StatusCode;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

const PARTI: &str = "/api/admin/parti";

fn columns() -> Vec<Column> {
    vec![
        Column::new("PanNo", "Pan No"),
        Column::new("Parti", "Parti"),
        Column::new("created_at", "Created"),
    ]
}

fn parti_rows() -> Vec<serde_json::Value> {
    vec![
        json!({"ID": 1, "PanNo": "301", "Parti": "Ram Traders", "created_at": "2025-01-31"}),
        json!({"ID": 2, "PanNo": "302", "Parti": "Sita Suppliers", "created_at": "2025-02-01T08:30:00Z"}),
    ]
}

fn browser(mock: &Arc<MockTransport>, settings: &admin_console::ConsoleSettings) -> EntityBrowser {
    let transport: Arc<dyn Transport> = mock.clone();
    EntityBrowser::new(ResourceIdentity::new("Parti", PARTI), columns(), transport, settings)
}

#[tokio::test]
async fn first_fetch_sends_default_query() {
    let mock = MockTransport::new();
    mock.on("GET", PARTI, page_json(parti_rows(), 2, 1, 20));
    let mut b = browser(&mock, &settings());

    assert_eq!(b.placeholder(), Some(LOADING));
    assert!(b.sync().await);
    assert!(!b.sync().await);

    let calls = mock.calls_to("GET");
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].path, PARTI);
    assert_eq!(calls[0].param("page"), Some("1"));
    assert_eq!(calls[0].param("page_size"), Some("20"));
    assert_eq!(calls[0].param("order"), Some("asc"));
    assert_eq!(calls[0].param("sort"), None);
    assert_eq!(calls[0].param("q"), None);

    assert_eq!(b.state(), &BrowserState::Ready);
    assert_eq!(b.rows().len(), 2);
    assert_eq!(b.placeholder(), None);
    assert!(!b.show_pagination());
}

#[tokio::test]
async fn page_count_bounds_navigation() {
    let mock = MockTransport::new();
    mock.on("GET", PARTI, page_json(parti_rows(), 45, 1, 20));
    let mut b = browser(&mock, &settings());
    b.sync().await;

    assert_eq!(b.page_count(), 3);
    assert!(b.show_pagination());
    assert_eq!(b.total_caption(), "Total: 45");
    assert!(!b.can_prev());

    b.set_page(9);
    assert_eq!(b.page(), 3);
    assert!(!b.can_next());
    b.next_page();
    assert_eq!(b.page(), 3);
    assert_eq!(b.page_caption(), "Page 3 of 3");
    b.sync().await;
    assert_eq!(mock.last("GET").unwrap().param("page"), Some("3"));

    b.prev_page();
    assert_eq!(b.page(), 2);
    b.set_page(0);
    assert_eq!(b.page(), 1);
}

#[tokio::test]
async fn page_size_change_returns_to_first_page() {
    let mock = MockTransport::new();
    mock.on("GET", PARTI, page_json(parti_rows(), 45, 1, 20));
    let mut b = browser(&mock, &settings());
    b.sync().await;
    b.set_page(2);
    b.sync().await;

    b.set_page_size(50);
    assert_eq!(b.page(), 1);
    assert!(b.needs_fetch());
    b.sync().await;
    let last = mock.last("GET").unwrap();
    assert_eq!(last.param("page_size"), Some("50"));
    assert_eq!(last.param("page"), Some("1"));
}

#[tokio::test]
async fn header_click_toggles_or_switches_sort() {
    let mock = MockTransport::new();
    let mut b = browser(&mock, &settings());
    b.sync().await;

    b.toggle_sort("Parti");
    assert_eq!((b.sort(), b.order()), (Some("Parti"), SortOrder::Asc));
    assert!(b.is_loading());
    b.toggle_sort("Parti");
    assert_eq!((b.sort(), b.order()), (Some("Parti"), SortOrder::Desc));
    assert_eq!(b.header_label(&b.columns()[1]), "Parti ↓");
    assert_eq!(b.header_label(&b.columns()[0]), "Pan No");

    b.toggle_sort("PanNo");
    assert_eq!((b.sort(), b.order()), (Some("PanNo"), SortOrder::Asc));
    assert_eq!(b.header_label(&b.columns()[0]), "Pan No ↑");

    b.sync().await;
    let last = mock.last("GET").unwrap();
    assert_eq!(last.param("sort"), Some("PanNo"));
    assert_eq!(last.param("order"), Some("asc"));
    assert_eq!(mock.calls_to("GET").len(), 2);
}

#[tokio::test(start_paused = true)]
async fn search_applies_after_quiet_period_and_resets_page() {
    let mock = MockTransport::new();
    mock.on("GET", PARTI, page_json(parti_rows(), 45, 1, 20));
    let mut b = browser(&mock, &settings());
    b.sync().await;
    b.set_page(3);
    b.sync().await;

    let start = Instant::now();
    b.search_input("ra", start);
    b.search_input("ram", start + Duration::from_millis(100));
    assert_eq!(b.search().raw(), "ram");
    assert_eq!(b.search().applied(), "");
    assert!(!b.needs_fetch());

    b.poll_search(start + Duration::from_millis(350));
    assert_eq!(b.search().applied(), "");

    b.settle_search().await;
    assert_eq!(b.search().applied(), "ram");
    assert_eq!(b.page(), 1);
    assert!(b.needs_fetch());
    b.sync().await;
    let last = mock.last("GET").unwrap();
    assert_eq!(last.param("q"), Some("ram"));
    assert_eq!(last.param("page"), Some("1"));

    b.search_input("", Instant::now());
    assert_eq!(b.search().applied(), "");
    assert!(b.needs_fetch());
    b.sync().await;
    assert_eq!(mock.last("GET").unwrap().param("q"), None);
}

#[tokio::test]
async fn fetched_rows_are_filtered_by_cell_text() {
    let mock = MockTransport::new();
    mock.on("GET", PARTI, page_json(parti_rows(), 2, 1, 20));
    let mut b = browser(&mock, &settings_without_debounce());
    b.sync().await;

    b.search_input("SITA", Instant::now());
    assert_eq!(b.search().applied(), "SITA");
    b.sync().await;
    let visible = b.visible_rows();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].id(), RowId(2));

    b.search_input("2025-02", Instant::now());
    b.sync().await;
    let visible = b.visible_rows();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].id(), RowId(2));

    b.search_input("saturday", Instant::now());
    b.sync().await;
    assert!(b.visible_rows().is_empty(), "long-form date text is display only");

    b.search_input("nobody", Instant::now());
    b.sync().await;
    assert!(b.visible_rows().is_empty());
    assert_eq!(b.placeholder(), Some(NO_RECORDS));
}

#[tokio::test]
async fn iso_date_search_keeps_server_matches() {
    let mock = MockTransport::new();
    let base = "/api/admin/vat-stmt";
    mock.on("GET", base, page_json(vec![json!({"ID": 1, "due": "2025-01-31"})], 1, 1, 20));
    let transport: Arc<dyn Transport> = mock.clone();
    let columns = vec![
        Column::new("due", "Due"),
        Column::new("Payable", "Payable").with_render(|row: &Row| format!("Rs {}", row.get("ID"))),
    ];
    let mut b = EntityBrowser::new(ResourceIdentity::new("VAT", base), columns, transport, &settings_without_debounce());
    b.sync().await;

    b.search_input("2025-01", Instant::now());
    b.sync().await;
    assert_eq!(mock.last("GET").unwrap().param("q"), Some("2025-01"));
    assert_eq!(b.rows().len(), 1);
    assert_eq!(b.visible_rows().len(), 1);
    assert_eq!(b.cell_text(&b.rows()[0], &b.columns()[0]), "Friday, January 31, 2025");

    b.search_input("rs 1", Instant::now());
    b.sync().await;
    assert_eq!(b.visible_rows().len(), 1, "custom cells match on their rendered text");
}

#[tokio::test]
async fn cells_render_dates_and_custom_columns() {
    let mock = MockTransport::new();
    mock.on(
        "GET",
        "/api/admin/ranking",
        page_json(
            vec![json!({"ID": 1, "created_at": "2025-01-31", "ttlsale": 1500.0, "Remarks": null})],
            1,
            1,
            20,
        ),
    );
    let transport: Arc<dyn Transport> = mock.clone();
    let columns = vec![
        Column::new("created_at", "Created"),
        Column::new("ttlsale", "Total"),
        Column::new("Remarks", "Remarks"),
        Column::new("ttlsale", "Sale (Rs)").with_render(|row: &Row| format!("Rs {}", row.get("ttlsale"))),
    ];
    let mut b = EntityBrowser::new(ResourceIdentity::new("Ranking", "/api/admin/ranking"), columns, transport, &settings());
    b.sync().await;

    let row = b.rows()[0].clone();
    let cells: Vec<String> = b.columns().iter().map(|c| b.cell_text(&row, c)).collect();
    assert_eq!(cells, vec!["Friday, January 31, 2025", "1500", "", "Rs 1500.0"]);
}

#[tokio::test]
async fn only_the_latest_request_is_applied() {
    let mock = MockTransport::new();
    let mut b = browser(&mock, &settings());

    let first = b.begin_fetch();
    b.toggle_sort("Parti");
    let second = b.begin_fetch();
    assert!(second.seq() > first.seq());
    assert_eq!(second.query().sort.as_deref(), Some("Parti"));

    let fresh: Paginated<Row> = serde_json::from_value(page_json(parti_rows(), 2, 1, 20)).unwrap();
    let stale: Paginated<Row> = serde_json::from_value(page_json(vec![json!({"ID": 9})], 1, 1, 20)).unwrap();

    assert!(b.apply_response(&second, Ok(fresh)));
    assert!(!b.apply_response(&first, Ok(stale)));
    assert_eq!(b.rows().len(), 2);
    assert!(b.find_row(RowId(9)).is_none());

    let late_error = AppError::from_status(StatusCode::BAD_GATEWAY, None);
    assert!(!b.apply_response(&first, Err(late_error)));
    assert_eq!(b.state(), &BrowserState::Ready);
}

#[tokio::test]
async fn fetch_failure_shows_error_until_next_change() {
    let mock = MockTransport::new();
    mock.fail("GET", PARTI, StatusCode::INTERNAL_SERVER_ERROR, "");
    mock.on("GET", PARTI, page_json(parti_rows(), 2, 1, 20));
    let mut b = browser(&mock, &settings());

    b.sync().await;
    assert_eq!(b.error(), Some("Internal Server Error"));

    b.toggle_sort("PanNo");
    assert_eq!(b.state(), &BrowserState::Loading);
    b.sync().await;
    assert_eq!(b.error(), None);
    assert_eq!(b.rows().len(), 2);
}

#[tokio::test]
async fn delete_asks_for_confirmation_then_refetches() {
    let mock = MockTransport::new();
    mock.on("GET", PARTI, page_json(parti_rows(), 2, 1, 20));
    let mut b = browser(&mock, &settings());
    b.sync().await;

    b.request_delete(RowId(2));
    assert_eq!(b.pending_delete(), Some(RowId(2)));
    b.cancel_delete();
    assert_eq!(b.pending_delete(), None);
    b.confirm_delete().await.unwrap();
    assert!(mock.calls_to("DELETE").is_empty());

    b.request_delete(RowId(2));
    b.confirm_delete().await.unwrap();
    assert_eq!(mock.last("DELETE").unwrap().path, "/api/admin/parti/2");
    assert_eq!(b.pending_delete(), None);
    assert_eq!(mock.calls_to("GET").len(), 2);
}

#[tokio::test]
async fn failed_delete_keeps_the_list() {
    let mock = MockTransport::new();
    mock.on("GET", PARTI, page_json(parti_rows(), 2, 1, 20));
    mock.fail("DELETE", "/api/admin/parti/1", StatusCode::CONFLICT, "Parti has open VAT statements");
    let mut b = browser(&mock, &settings());
    b.sync().await;

    b.request_delete(RowId(1));
    let err = b.confirm_delete().await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::CONFLICT));
    assert_eq!(b.pending_delete(), None);
    assert_eq!(b.action_error(), Some("Parti has open VAT statements"));
    assert_eq!(b.rows().len(), 2);
    assert_eq!(b.state(), &BrowserState::Ready);
    assert_eq!(mock.calls_to("GET").len(), 1);
}

#[tokio::test]
async fn edit_event_carries_the_row() {
    let mock = MockTransport::new();
    mock.on("GET", PARTI, page_json(parti_rows(), 2, 1, 20));
    let mut b = browser(&mock, &settings());
    b.sync().await;

    match b.edit(RowId(1)) {
        Some(BrowserEvent::Edit(row)) => assert_eq!(row.get_str("Parti"), Some("Ram Traders")),
        other => panic!("unexpected {other:?}"),
    }
    assert!(b.edit(RowId(42)).is_none());
    assert_eq!(b.add(), BrowserEvent::Add);
}

#[tokio::test]
async fn invalidate_refetches_from_first_page() {
    let mock = MockTransport::new();
    mock.on("GET", PARTI, page_json(parti_rows(), 45, 1, 20));
    let mut b = browser(&mock, &settings());
    b.sync().await;
    b.toggle_sort("Parti");
    b.set_page(2);
    b.sync().await;

    b.invalidate();
    assert_eq!(b.generation(), 1);
    b.sync().await;
    let last = mock.last("GET").unwrap();
    assert_eq!(last.param("page"), Some("1"));
    assert_eq!(last.param("sort"), Some("Parti"));
}
