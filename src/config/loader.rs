//! Load the registry from a JSON file and settings from the environment; resolve into routes.

use crate::config::resolved::{EntityRegistry, EntityRoute, RouteKind};
use crate::config::types::*;
use crate::case::segment_title;
use crate::error::ConfigError;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Merge custom and generic entries into one ordered registry.
///
/// Never fails: a generic entry whose path collides with a custom one is
/// dropped, custom first. Use [`crate::config::validate`] to reject such files.
pub fn resolve(config: &RegistryConfig) -> EntityRegistry {
    let custom = config.custom.iter().map(|c| EntityRoute {
        path: c.path.clone(),
        title: c.title.clone().unwrap_or_else(|| segment_title(&c.path)),
        base_path: c
            .base_path
            .clone()
            .unwrap_or_else(|| format!("{}/{}", API_ADMIN_PREFIX, c.path)),
        kind: RouteKind::Custom,
    });
    let generic = config.generic.iter().map(|g| EntityRoute {
        path: g.path.clone(),
        title: g.title.clone(),
        base_path: g.base_path.clone(),
        kind: RouteKind::Generic,
    });
    EntityRegistry::from_entries(custom.chain(generic))
}

/// Read a registry file. An empty or missing `custom` list falls back to the built-in pages.
pub async fn load_registry_file(path: &Path) -> Result<RegistryConfig, ConfigError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ConfigError::Load(format!("{}: {}", path.display(), e)))?;
    parse_registry(&text)
}

pub fn parse_registry(text: &str) -> Result<RegistryConfig, ConfigError> {
    let mut config: RegistryConfig =
        serde_json::from_str(text).map_err(|e| ConfigError::Load(e.to_string()))?;
    if config.custom.is_empty() {
        config.custom = default_custom_entities();
    }
    Ok(config)
}

/// Registry for the given settings: the file when configured, the built-in list otherwise.
pub async fn load_registry(settings: &ConsoleSettings) -> Result<EntityRegistry, ConfigError> {
    let config = match &settings.entities_path {
        Some(path) => load_registry_file(path).await?,
        None => RegistryConfig::builtin(),
    };
    let registry = resolve(&config);
    tracing::info!(
        routes = registry.len(),
        custom = config.custom.len(),
        generic = config.generic.len(),
        "admin registry loaded"
    );
    Ok(registry)
}

impl ConsoleSettings {
    /// Read `ADMIN_*` variables, loading `.env` first when present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup; unset keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let api_base_url = non_empty("ADMIN_API_URL")
            .map(|v| v.trim_end_matches('/').to_string())
            .unwrap_or(defaults.api_base_url);
        let page_size = match non_empty("ADMIN_PAGE_SIZE") {
            Some(v) => parse_positive("ADMIN_PAGE_SIZE", &v)?,
            None => defaults.page_size,
        };
        let search_debounce = match non_empty("ADMIN_SEARCH_DEBOUNCE_MS") {
            Some(v) => Duration::from_millis(parse_u64("ADMIN_SEARCH_DEBOUNCE_MS", &v)?),
            None => defaults.search_debounce,
        };
        let request_timeout = match non_empty("ADMIN_HTTP_TIMEOUT_SECS") {
            Some(v) => Duration::from_secs(parse_positive("ADMIN_HTTP_TIMEOUT_SECS", &v)?),
            None => defaults.request_timeout,
        };

        Ok(Self {
            api_base_url,
            page_size,
            search_debounce,
            request_timeout,
            entities_path: non_empty("ADMIN_ENTITIES_PATH").map(PathBuf::from),
            identity_path: non_empty("ADMIN_IDENTITY_PATH").map(PathBuf::from),
        })
    }
}

fn parse_u64(key: &str, value: &str) -> Result<u64, ConfigError> {
    value
        .parse()
        .map_err(|_| ConfigError::Load(format!("{key} must be a non-negative integer, got '{value}'")))
}

fn parse_positive(key: &str, value: &str) -> Result<u64, ConfigError> {
    match parse_u64(key, value)? {
        0 => Err(ConfigError::Load(format!("{key} must be greater than zero"))),
        n => Ok(n),
    }
}
