//! Paginated list envelope returned by collection endpoints.

use serde::{Deserialize, Serialize};

/// One page of a collection: `{ items, total, page, page_size, pages }`. `page` is 1-based.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    #[serde(default)]
    pub total: u64,
    #[serde(default = "first_page")]
    pub page: u64,
    #[serde(default)]
    pub page_size: u64,
    #[serde(default)]
    pub pages: u64,
}

fn first_page() -> u64 {
    1
}

impl<T> Paginated<T> {
    pub fn empty(page_size: u64) -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            page: 1,
            page_size,
            pages: 0,
        }
    }

    /// Page count, recomputed from `total` and `page_size` when the server left `pages` at zero.
    pub fn page_count(&self) -> u64 {
        if self.pages > 0 {
            self.pages
        } else {
            page_count(self.total, self.page_size)
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            page_size: self.page_size,
            pages: self.pages,
        }
    }
}

/// `ceil(total / page_size)`; zero when either is zero.
pub fn page_count(total: u64, page_size: u64) -> u64 {
    if page_size == 0 {
        0
    } else {
        total.div_ceil(page_size)
    }
}
