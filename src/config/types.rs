//! Raw config types matching the registry JSON file and the environment settings.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// API prefix that custom entities derive their base path from.
pub const API_ADMIN_PREFIX: &str = "/api/admin";
/// Console prefix for routed pages.
pub const ADMIN_ROUTE_PREFIX: &str = "/admin";
/// Segment of the all-routes listing; no entity may use it.
pub const ROUTES_SEGMENT: &str = "routes";

/// Entity with a bespoke page. `base_path` defaults to `/api/admin/<path>`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CustomEntityConfig {
    pub path: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub base_path: Option<String>,
}

/// Entity rendered entirely from registry data by the generic page.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenericEntityConfig {
    pub path: String,
    pub title: String,
    pub base_path: String,
}

/// Registry file: custom entities first, then generic ones, each list in file order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistryConfig {
    #[serde(default)]
    pub custom: Vec<CustomEntityConfig>,
    #[serde(default)]
    pub generic: Vec<GenericEntityConfig>,
}

impl RegistryConfig {
    /// The console's built-in custom pages and no generic entities.
    pub fn builtin() -> Self {
        Self {
            custom: default_custom_entities(),
            generic: Vec::new(),
        }
    }
}

/// Custom pages the console ships with, in menu order.
pub fn default_custom_entities() -> Vec<CustomEntityConfig> {
    [
        ("staff-details", "Staff"),
        ("login-tracker", "Login Tracker"),
        ("attendance", "Attendance"),
        ("ver-files", "Ver Files"),
        ("ranking", "Ranking"),
        ("vat-stmt", "VAT Statement"),
        ("parti", "Parti"),
        ("daily-works", "Daily Works"),
    ]
    .into_iter()
    .map(|(path, title)| CustomEntityConfig {
        path: path.to_string(),
        title: Some(title.to_string()),
        base_path: None,
    })
    .collect()
}

/// Runtime settings, usually read from the environment.
#[derive(Clone, Debug, PartialEq)]
pub struct ConsoleSettings {
    /// Scheme and host the API paths are joined onto.
    pub api_base_url: String,
    /// Rows per page requested by the browser.
    pub page_size: u64,
    /// Quiet period before typed search is applied.
    pub search_debounce: Duration,
    pub request_timeout: Duration,
    /// Registry JSON; `None` uses the built-in custom list only.
    pub entities_path: Option<PathBuf>,
    pub identity_path: Option<PathBuf>,
}

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_PAGE_SIZE: u64 = 20;
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 300;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.into(),
            page_size: DEFAULT_PAGE_SIZE,
            search_debounce: Duration::from_millis(DEFAULT_SEARCH_DEBOUNCE_MS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            entities_path: None,
            identity_path: None,
        }
    }
}
