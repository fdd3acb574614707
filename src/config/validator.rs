//! Strict registry validation. Optional: `resolve` itself never rejects a config.

use crate::config::{RegistryConfig, ROUTES_SEGMENT};
use crate::error::ConfigError;
use std::collections::HashSet;

pub fn validate(config: &RegistryConfig) -> Result<(), ConfigError> {
    let mut path_segments = HashSet::new();

    let custom = config
        .custom
        .iter()
        .map(|c| (c.path.as_str(), c.title.as_deref(), c.base_path.as_deref()));
    let generic = config
        .generic
        .iter()
        .map(|g| (g.path.as_str(), Some(g.title.as_str()), Some(g.base_path.as_str())));

    for (path, title, base_path) in custom.chain(generic) {
        if path.is_empty() || path.contains('/') || path.chars().any(char::is_whitespace) {
            return Err(ConfigError::Validation(format!("invalid path segment '{path}'")));
        }
        if path == ROUTES_SEGMENT {
            return Err(ConfigError::Validation(format!("'{path}' is reserved")));
        }
        if !path_segments.insert(path) {
            return Err(ConfigError::DuplicatePathSegment(path.to_string()));
        }
        if title.is_some_and(|t| t.trim().is_empty()) {
            return Err(ConfigError::Validation(format!("empty title for '{path}'")));
        }
        if let Some(base) = base_path {
            if !base.starts_with('/') {
                return Err(ConfigError::Validation(format!(
                    "base path for '{path}' must start with '/', got '{base}'"
                )));
            }
        }
    }

    Ok(())
}
