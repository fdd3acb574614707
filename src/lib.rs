//! Admin console core: registry-driven entity browser, form modal and pages over a REST API.

pub mod case;
pub mod config;
pub mod error;
pub mod format;
pub mod identity;
pub mod response;
pub mod routes;
pub mod row;
pub mod service;
pub mod state;
pub mod transport;
pub mod views;

pub use config::{load_registry, resolve, validate, ConsoleSettings, EntityRegistry, EntityRoute, RegistryConfig, ResourceIdentity, RouteKind};
pub use error::{AppError, ConfigError};
pub use identity::{CachedUser, IdentityCache};
pub use response::Paginated;
pub use routes::{AdminRouter, RoutedPage};
pub use row::{Row, RowId};
pub use service::CrudService;
pub use state::AppState;
pub use transport::{HttpTransport, Transport};
pub use views::{EntityBrowser, EntityPage, FormModal, RoutesPage};
