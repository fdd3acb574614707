//! Example consumer: prints the admin menu, or the first page of one entity.
//!
//! Run from repo root: `cargo run -p example-consumer -- parti`
//! Configure with `ADMIN_API_URL`, `ADMIN_ENTITIES_PATH` (see `sample/entities.json`).

use admin_console::{AdminRouter, AppState, ConsoleSettings, IdentityCache, RoutedPage};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("admin_console=info")),
        )
        .init();

    let settings = ConsoleSettings::from_env()?;
    let identity = IdentityCache::from_settings(&settings);
    match identity.get().await {
        Some(user) => tracing::info!(user = %user.user_name, right = %user.right, "signed in"),
        None => tracing::info!("no cached user"),
    }

    let state = AppState::from_settings(settings).await?;
    let router = AdminRouter::new(state.clone());

    let Some(segment) = std::env::args().nth(1) else {
        for link in state.registry().nav_links() {
            println!("{:<28} {:<8} {}", link.href, link.kind.as_str(), link.title);
        }
        return Ok(());
    };

    match router.route(&format!("/admin/{segment}"))? {
        RoutedPage::Routes(listing) => {
            for row in listing.rows() {
                println!("{:<20} {:<8} {:<24} {}", row.path, row.kind, row.title, row.base_path);
            }
            println!("{}", listing.range_caption());
        }
        RoutedPage::Entity(mut page) => {
            let browser = page.browser_mut();
            browser.sync().await;
            if let Some(err) = browser.error() {
                return Err(err.to_string().into());
            }
            let headers: Vec<String> = browser.columns().iter().map(|c| browser.header_label(c)).collect();
            println!("{}", headers.join(" | "));
            for row in browser.visible_rows() {
                let cells: Vec<String> = browser.columns().iter().map(|c| browser.cell_text(row, c)).collect();
                println!("{}", cells.join(" | "));
            }
            if let Some(placeholder) = browser.placeholder() {
                println!("{placeholder}");
            }
            println!("{}  {}", browser.total_caption(), browser.page_caption());
        }
    }
    Ok(())
}
