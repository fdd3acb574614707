//! Console routing: `/admin/<segment>` to the page that serves it.
//!
//! Custom entries get their built-in page when one exists and fall back to
//! the generic page otherwise; generic entries always get the generic page.
//! `/admin/routes` (and `/admin` itself) lists every route.

use crate::config::{RouteKind, ADMIN_ROUTE_PREFIX, ROUTES_SEGMENT};
use crate::error::AppError;
use crate::state::AppState;
use crate::views::{custom_layout, EntityPage, RoutesPage};

pub enum RoutedPage {
    Routes(RoutesPage),
    Entity(Box<EntityPage>),
}

impl RoutedPage {
    pub fn title(&self) -> &str {
        match self {
            RoutedPage::Routes(_) => "Admin Routes",
            RoutedPage::Entity(page) => &page.resource().title,
        }
    }
}

#[derive(Clone)]
pub struct AdminRouter {
    state: AppState,
}

impl AdminRouter {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Build the page for a console URL path. Query strings and trailing slashes are ignored.
    pub fn route(&self, url_path: &str) -> Result<RoutedPage, AppError> {
        let segment = admin_segment(url_path).ok_or_else(|| AppError::NotFound(url_path.to_string()))?;
        if segment.is_empty() || segment == ROUTES_SEGMENT {
            return Ok(RoutedPage::Routes(RoutesPage::new(self.state.registry())));
        }

        let registry = self.state.registry();
        let entry = registry
            .entity_by_path(segment)
            .ok_or_else(|| AppError::NotFound(format!("no admin page at '{segment}'")))?;
        let transport = self.state.transport.clone();
        let settings = &self.state.settings;

        let page = match (entry.kind, custom_layout(&entry.path)) {
            (RouteKind::Custom, Some((columns, schema))) => {
                EntityPage::new(entry.resource(), columns, schema, transport, settings)
            }
            (RouteKind::Custom, None) => {
                tracing::debug!(path = %entry.path, "no built-in page, using generic");
                EntityPage::generic(entry.resource(), transport, settings)
            }
            (RouteKind::Generic, _) => EntityPage::generic(entry.resource(), transport, settings),
        };
        Ok(RoutedPage::Entity(Box::new(page)))
    }
}

/// `"/admin/parti/?x=1"` -> `Some("parti")`, `"/admin"` -> `Some("")`, anything outside `/admin` -> `None`.
fn admin_segment(url_path: &str) -> Option<&str> {
    let path = url_path.split(['?', '#']).next().unwrap_or_default();
    let rest = path.strip_prefix(ADMIN_ROUTE_PREFIX)?;
    if !(rest.is_empty() || rest.starts_with('/')) {
        return None;
    }
    let rest = rest.trim_matches('/');
    (!rest.contains('/')).then_some(rest)
}
