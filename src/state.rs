//! Shared console state. The registry is reloadable so new entities appear without restart.

use crate::config::{load_registry, ConsoleSettings, EntityRegistry};
use crate::error::AppError;
use crate::transport::{HttpTransport, Transport};
use std::sync::{Arc, RwLock};

#[derive(Clone)]
pub struct AppState {
    pub transport: Arc<dyn Transport>,
    pub registry: Arc<RwLock<EntityRegistry>>,
    pub settings: ConsoleSettings,
}

impl AppState {
    pub fn new(transport: Arc<dyn Transport>, registry: EntityRegistry, settings: ConsoleSettings) -> Self {
        Self {
            transport,
            registry: Arc::new(RwLock::new(registry)),
            settings,
        }
    }

    /// HTTP transport and the registry named by `settings`.
    pub async fn from_settings(settings: ConsoleSettings) -> Result<Self, AppError> {
        let transport = HttpTransport::from_settings(&settings)?;
        let registry = load_registry(&settings).await?;
        Ok(Self::new(Arc::new(transport), registry, settings))
    }

    /// Copy of the current registry.
    pub fn registry(&self) -> EntityRegistry {
        match self.registry.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Re-read the registry file and swap it in. Returns the new route count.
    pub async fn reload_registry(&self) -> Result<usize, AppError> {
        let fresh = load_registry(&self.settings).await?;
        let count = fresh.len();
        match self.registry.write() {
            Ok(mut guard) => *guard = fresh,
            Err(poisoned) => *poisoned.into_inner() = fresh,
        }
        tracing::info!(routes = count, "admin registry reloaded");
        Ok(count)
    }
}
