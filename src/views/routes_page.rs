//! Listing of every admin route, paginated over the registry in memory.

use crate::config::{EntityRegistry, EntityRoute};

pub const ROWS_PER_PAGE_OPTIONS: [usize; 4] = [10, 25, 50, 100];
pub const DEFAULT_ROWS_PER_PAGE: usize = 25;

/// One rendered line of the routes table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteRow {
    pub path: String,
    pub href: String,
    pub title: String,
    pub base_path: String,
    pub kind: &'static str,
}

impl From<&EntityRoute> for RouteRow {
    fn from(route: &EntityRoute) -> Self {
        Self {
            path: route.path.clone(),
            href: route.href(),
            title: route.title.clone(),
            base_path: route.base_path.clone(),
            kind: route.kind.as_str(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct RoutesPage {
    registry: EntityRegistry,
    /// 0-based.
    page: usize,
    rows_per_page: usize,
}

impl RoutesPage {
    pub fn new(registry: EntityRegistry) -> Self {
        Self {
            registry,
            page: 0,
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn rows_per_page(&self) -> usize {
        self.rows_per_page
    }

    pub fn total(&self) -> usize {
        self.registry.len()
    }

    pub fn page_count(&self) -> usize {
        self.total().div_ceil(self.rows_per_page)
    }

    /// Clamped to the last page.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.min(self.page_count().saturating_sub(1));
    }

    /// Only the listed options are accepted; any change returns to the first page.
    pub fn set_rows_per_page(&mut self, rows: usize) -> bool {
        if !ROWS_PER_PAGE_OPTIONS.contains(&rows) {
            return false;
        }
        self.rows_per_page = rows;
        self.page = 0;
        true
    }

    pub fn rows(&self) -> Vec<RouteRow> {
        self.registry
            .slice(self.page, self.rows_per_page)
            .iter()
            .map(RouteRow::from)
            .collect()
    }

    /// "11-20 of 42" style caption.
    pub fn range_caption(&self) -> String {
        let total = self.total();
        if total == 0 {
            return "0 of 0".to_string();
        }
        let from = self.page * self.rows_per_page + 1;
        let to = (from + self.rows_per_page - 1).min(total);
        format!("{from}-{to} of {total}")
    }
}
