//! Resolved registry: custom and generic entities merged into one ordered route list.

use crate::config::ADMIN_ROUTE_PREFIX;
use std::collections::HashMap;
use std::fmt;

/// Whether an entity has a bespoke page or is served by the generic page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RouteKind {
    Custom,
    Generic,
}

impl RouteKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RouteKind::Custom => "custom",
            RouteKind::Generic => "generic",
        }
    }
}

impl fmt::Display for RouteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The collection a page is bound to: human title plus API base path.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ResourceIdentity {
    pub title: String,
    pub base_path: String,
}

impl ResourceIdentity {
    pub fn new(title: impl Into<String>, base_path: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            base_path: base_path.into().trim_end_matches('/').to_string(),
        }
    }

    /// `<base_path>/<id>`.
    pub fn item_path(&self, id: impl fmt::Display) -> String {
        format!("{}/{}", self.base_path, id)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntityRoute {
    /// Route segment under `/admin/`.
    pub path: String,
    pub title: String,
    pub base_path: String,
    pub kind: RouteKind,
}

impl EntityRoute {
    pub fn href(&self) -> String {
        format!("{}/{}", ADMIN_ROUTE_PREFIX, self.path)
    }

    pub fn resource(&self) -> ResourceIdentity {
        ResourceIdentity::new(self.title.clone(), self.base_path.clone())
    }
}

/// Navigation menu entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavLink {
    pub href: String,
    pub title: String,
    pub kind: RouteKind,
}

#[derive(Clone, Debug, Default)]
pub struct EntityRegistry {
    entries: Vec<EntityRoute>,
    index_by_path: HashMap<String, usize>,
}

impl EntityRegistry {
    /// Build from already-merged entries. Later duplicates of a path are ignored.
    pub fn from_entries(entries: impl IntoIterator<Item = EntityRoute>) -> Self {
        let mut out = Self::default();
        for entry in entries {
            if out.index_by_path.contains_key(&entry.path) {
                tracing::warn!(path = %entry.path, kind = %entry.kind, "duplicate admin route ignored");
                continue;
            }
            out.index_by_path.insert(entry.path.clone(), out.entries.len());
            out.entries.push(entry);
        }
        out
    }

    /// Custom entries first, then generic.
    pub fn entries(&self) -> &[EntityRoute] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entity_by_path(&self, path: &str) -> Option<&EntityRoute> {
        self.index_by_path.get(path).map(|&i| &self.entries[i])
    }

    pub fn nav_links(&self) -> Vec<NavLink> {
        self.entries
            .iter()
            .map(|e| NavLink {
                href: e.href(),
                title: e.title.clone(),
                kind: e.kind,
            })
            .collect()
    }

    pub fn of_kind(&self, kind: RouteKind) -> impl Iterator<Item = &EntityRoute> {
        self.entries.iter().filter(move |e| e.kind == kind)
    }

    /// Client-side slice for the routes listing; `page` is 0-based.
    pub fn slice(&self, page: usize, rows_per_page: usize) -> &[EntityRoute] {
        let start = page.saturating_mul(rows_per_page).min(self.entries.len());
        let end = start.saturating_add(rows_per_page).min(self.entries.len());
        &self.entries[start..end]
    }
}
