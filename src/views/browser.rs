//! Generic entity browser: a paginated, sortable, searchable table bound to one resource.
//!
//! The browser owns list state only. User intents (`toggle_sort`, `set_page`,
//! `search_input`, ...) mutate controls and mark the list stale; the caller's
//! event loop then awaits [`EntityBrowser::sync`], which issues exactly one
//! collection GET. Add and edit are returned as [`BrowserEvent`]s for the
//! owning page to handle.
//!
//! Responses are gated by request sequence: only the answer to the most
//! recently issued request is applied, so a slow stale response can never
//! overwrite a fresher one.

use crate::config::{ConsoleSettings, ResourceIdentity};
use crate::error::AppError;
use crate::format::{format_cell, stringify};
use crate::response::Paginated;
use crate::row::{Row, RowId};
use crate::service::{CrudService, ListQuery, SortOrder};
use crate::transport::Transport;
use crate::views::search::SearchBox;
use std::fmt;
use std::sync::Arc;
use tokio::time::Instant;

pub type RenderFn = Arc<dyn Fn(&Row) -> String + Send + Sync>;
pub type RowIdFn = fn(&Row) -> RowId;

pub const NO_RECORDS: &str = "No records";
pub const LOADING: &str = "Loading...";

/// Table column. `key` addresses a row field unless `render` is set, in which case it only names
/// the sort key.
#[derive(Clone)]
pub struct Column {
    pub key: String,
    pub label: String,
    render: Option<RenderFn>,
}

impl Column {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            render: None,
        }
    }

    pub fn with_render(mut self, render: impl Fn(&Row) -> String + Send + Sync + 'static) -> Self {
        self.render = Some(Arc::new(render));
        self
    }

    pub fn has_custom_render(&self) -> bool {
        self.render.is_some()
    }

    /// Custom render first, then date detection / stringification of `row[key]`.
    pub fn render_cell(&self, row: &Row) -> String {
        match &self.render {
            Some(render) => render(row),
            None => format_cell(row.get(&self.key)),
        }
    }
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("render", &self.render.as_ref().map(|_| "fn"))
            .finish()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BrowserState {
    Loading,
    Ready,
    /// Page-level error banner text.
    Error(String),
}

/// Row actions the owning page must handle.
#[derive(Clone, Debug, PartialEq)]
pub enum BrowserEvent {
    Add,
    Edit(Row),
}

/// One issued collection request. Apply its response with [`EntityBrowser::apply_response`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchTicket {
    seq: u64,
    query: ListQuery,
}

impl FetchTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn query(&self) -> &ListQuery {
        &self.query
    }
}

pub struct EntityBrowser {
    resource: ResourceIdentity,
    columns: Vec<Column>,
    transport: Arc<dyn Transport>,
    row_id: RowIdFn,

    page: u64,
    page_size: u64,
    sort: Option<String>,
    order: SortOrder,
    search: SearchBox,

    state: BrowserState,
    snapshot: Option<Paginated<Row>>,
    stale: bool,
    issued: u64,
    generation: u64,

    delete_confirm: Option<RowId>,
    action_error: Option<String>,
}

impl EntityBrowser {
    pub fn new(
        resource: ResourceIdentity,
        columns: Vec<Column>,
        transport: Arc<dyn Transport>,
        settings: &ConsoleSettings,
    ) -> Self {
        Self {
            resource,
            columns,
            transport,
            row_id: Row::id,
            page: 1,
            page_size: settings.page_size.max(1),
            sort: None,
            order: SortOrder::Asc,
            search: SearchBox::new(settings.search_debounce),
            state: BrowserState::Loading,
            snapshot: None,
            stale: true,
            issued: 0,
            generation: 0,
            delete_confirm: None,
            action_error: None,
        }
    }

    pub fn with_row_id(mut self, row_id: RowIdFn) -> Self {
        self.row_id = row_id;
        self
    }

    pub fn title(&self) -> &str {
        &self.resource.title
    }

    pub fn resource(&self) -> &ResourceIdentity {
        &self.resource
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn transport(&self) -> Arc<dyn Transport> {
        Arc::clone(&self.transport)
    }

    pub fn state(&self) -> &BrowserState {
        &self.state
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            BrowserState::Error(msg) => Some(msg.as_str()),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.state == BrowserState::Loading
    }

    pub fn snapshot(&self) -> Option<&Paginated<Row>> {
        self.snapshot.as_ref()
    }

    /// Bumped by every [`invalidate`](Self::invalidate).
    pub fn generation(&self) -> u64 {
        self.generation
    }

    // ---- controls -------------------------------------------------------

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    pub fn sort(&self) -> Option<&str> {
        self.sort.as_deref()
    }

    pub fn order(&self) -> SortOrder {
        self.order
    }

    pub fn search(&self) -> &SearchBox {
        &self.search
    }

    /// Parameters the next collection GET will carry.
    pub fn query(&self) -> ListQuery {
        let q = self.search.applied();
        ListQuery {
            page: self.page,
            page_size: self.page_size,
            order: self.order,
            sort: self.sort.clone(),
            q: (!q.is_empty()).then(|| q.to_string()),
        }
    }

    /// Same key flips the order; another key becomes active ascending.
    pub fn toggle_sort(&mut self, key: &str) {
        if self.sort.as_deref() == Some(key) {
            self.order = self.order.flipped();
        } else {
            self.sort = Some(key.to_string());
            self.order = SortOrder::Asc;
        }
        self.mark_stale();
    }

    /// Go to a 1-based page, clamped to the page count of the last response.
    pub fn set_page(&mut self, page: u64) {
        let mut page = page.max(1);
        if self.snapshot.is_some() {
            page = page.min(self.page_count().max(1));
        }
        if page != self.page {
            self.page = page;
            self.mark_stale();
        }
    }

    pub fn can_prev(&self) -> bool {
        self.page > 1
    }

    pub fn can_next(&self) -> bool {
        self.page < self.page_count()
    }

    pub fn next_page(&mut self) {
        if self.can_next() {
            self.set_page(self.page + 1);
        }
    }

    pub fn prev_page(&mut self) {
        if self.can_prev() {
            self.set_page(self.page - 1);
        }
    }

    /// Changing the page size returns to the first page.
    pub fn set_page_size(&mut self, page_size: u64) {
        let page_size = page_size.max(1);
        if page_size != self.page_size {
            self.page_size = page_size;
            self.page = 1;
            self.mark_stale();
        }
    }

    /// Keystroke in the search box.
    pub fn search_input(&mut self, text: impl Into<String>, now: Instant) {
        if self.search.input(text, now) {
            self.on_search_applied();
        }
    }

    /// Apply a pending search whose quiet period has passed by `now`.
    pub fn poll_search(&mut self, now: Instant) {
        if self.search.poll(now) {
            self.on_search_applied();
        }
    }

    /// Sleep until the pending search applies.
    pub async fn settle_search(&mut self) {
        if self.search.settle().await {
            self.on_search_applied();
        }
    }

    fn on_search_applied(&mut self) {
        self.page = 1;
        self.mark_stale();
    }

    /// Force a fresh fetch from the first page, keeping sort, search and page size.
    pub fn invalidate(&mut self) {
        self.generation += 1;
        self.page = 1;
        self.mark_stale();
    }

    fn mark_stale(&mut self) {
        self.stale = true;
        self.state = BrowserState::Loading;
    }

    // ---- fetching -------------------------------------------------------

    pub fn needs_fetch(&self) -> bool {
        self.stale
    }

    /// Issue a request for the current controls. Supersedes every earlier ticket.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.issued += 1;
        self.stale = false;
        self.state = BrowserState::Loading;
        FetchTicket {
            seq: self.issued,
            query: self.query(),
        }
    }

    /// Apply a response. Returns `false` (and changes nothing) when a newer request was issued
    /// after `ticket`.
    pub fn apply_response(&mut self, ticket: &FetchTicket, result: Result<Paginated<Row>, AppError>) -> bool {
        if ticket.seq != self.issued {
            tracing::debug!(
                base_path = %self.resource.base_path,
                seq = ticket.seq,
                latest = self.issued,
                "dropping stale list response"
            );
            return false;
        }
        match result {
            Ok(page) => {
                self.snapshot = Some(page);
                self.state = BrowserState::Ready;
            }
            Err(e) => {
                tracing::warn!(base_path = %self.resource.base_path, error = %e, "list fetch failed");
                self.state = BrowserState::Error(e.user_message());
            }
        }
        true
    }

    /// Fetch if anything changed since the last request. Returns whether a response was applied.
    pub async fn sync(&mut self) -> bool {
        if !self.stale {
            return false;
        }
        let ticket = self.begin_fetch();
        let result = CrudService::list(self.transport.as_ref(), &self.resource, &ticket.query).await;
        self.apply_response(&ticket, result)
    }

    /// Unconditional refetch with the current controls.
    pub async fn refresh(&mut self) -> bool {
        self.mark_stale();
        self.sync().await
    }

    // ---- rows -----------------------------------------------------------

    pub fn rows(&self) -> &[Row] {
        self.snapshot.as_ref().map(|p| p.items.as_slice()).unwrap_or(&[])
    }

    /// Fetched rows narrowed by the applied search, in case the server ignored `q`.
    pub fn visible_rows(&self) -> Vec<&Row> {
        let term = self.search.applied().to_lowercase();
        self.rows()
            .iter()
            .filter(|row| term.is_empty() || self.row_matches(row, &term))
            .collect()
    }

    /// Custom-rendered columns match on their text, the rest on the raw value (ISO dates, not
    /// the long form).
    fn row_matches(&self, row: &Row, term_lower: &str) -> bool {
        self.columns.iter().any(|col| {
            let text = if col.has_custom_render() {
                col.render_cell(row)
            } else {
                stringify(row.get(&col.key))
            };
            text.to_lowercase().contains(term_lower)
        })
    }

    pub fn row_id(&self, row: &Row) -> RowId {
        (self.row_id)(row)
    }

    pub fn find_row(&self, id: RowId) -> Option<&Row> {
        self.rows().iter().find(|r| self.row_id(r) == id)
    }

    pub fn cell_text(&self, row: &Row, column: &Column) -> String {
        column.render_cell(row)
    }

    /// Column label with an arrow on the active sort column.
    pub fn header_label(&self, column: &Column) -> String {
        if self.sort.as_deref() == Some(column.key.as_str()) {
            let arrow = match self.order {
                SortOrder::Asc => "↑",
                SortOrder::Desc => "↓",
            };
            format!("{} {}", column.label, arrow)
        } else {
            column.label.clone()
        }
    }

    /// "Loading..." before the first response, "No records" for an empty result.
    pub fn placeholder(&self) -> Option<&'static str> {
        if self.snapshot.is_none() && self.is_loading() {
            Some(LOADING)
        } else if self.snapshot.is_some() && self.visible_rows().is_empty() {
            Some(NO_RECORDS)
        } else {
            None
        }
    }

    // ---- pagination captions -------------------------------------------

    pub fn total(&self) -> u64 {
        self.snapshot.as_ref().map(|p| p.total).unwrap_or(0)
    }

    pub fn page_count(&self) -> u64 {
        self.snapshot.as_ref().map(|p| p.page_count()).unwrap_or(0)
    }

    /// The pagination bar is drawn only when there is more than one page.
    pub fn show_pagination(&self) -> bool {
        self.page_count() > 1
    }

    pub fn total_caption(&self) -> String {
        format!("Total: {}", self.total())
    }

    pub fn page_caption(&self) -> String {
        format!("Page {} of {}", self.page, self.page_count())
    }

    // ---- row actions ----------------------------------------------------

    pub fn add(&self) -> BrowserEvent {
        BrowserEvent::Add
    }

    pub fn edit(&self, id: RowId) -> Option<BrowserEvent> {
        self.find_row(id).cloned().map(BrowserEvent::Edit)
    }

    /// First step of a delete: remember the target and ask for confirmation.
    pub fn request_delete(&mut self, id: RowId) {
        self.delete_confirm = Some(id);
        self.action_error = None;
    }

    pub fn pending_delete(&self) -> Option<RowId> {
        self.delete_confirm
    }

    pub fn cancel_delete(&mut self) {
        self.delete_confirm = None;
    }

    /// Inline error from the last row action.
    pub fn action_error(&self) -> Option<&str> {
        self.action_error.as_deref()
    }

    /// Second step: DELETE the confirmed row, then refetch. On failure the confirmation is
    /// dismissed, the error is kept for display and the current list stays as it was.
    pub async fn confirm_delete(&mut self) -> Result<(), AppError> {
        let Some(id) = self.delete_confirm.take() else {
            return Ok(());
        };
        match CrudService::delete(self.transport.as_ref(), &self.resource, id).await {
            Ok(()) => {
                self.action_error = None;
                self.refresh().await;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(base_path = %self.resource.base_path, id = %id, error = %e, "delete failed");
                self.action_error = Some(e.user_message());
                Err(e)
            }
        }
    }
}

impl fmt::Debug for EntityBrowser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityBrowser")
            .field("resource", &self.resource)
            .field("page", &self.page)
            .field("page_size", &self.page_size)
            .field("sort", &self.sort)
            .field("order", &self.order)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
