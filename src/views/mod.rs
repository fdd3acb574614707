pub mod browser;
pub mod catalog;
pub mod form;
pub mod modal;
pub mod page;
pub mod routes_page;
pub mod search;

pub use browser::{BrowserEvent, BrowserState, Column, EntityBrowser, FetchTicket};
pub use catalog::custom_layout;
pub use form::{Draft, DraftField, EditSource, FieldKind, FieldSpec, FormSchema};
pub use modal::{FormModal, ModalAction};
pub use page::{default_generic_columns, EntityPage, NO_EXTRA_FIELDS};
pub use routes_page::{RouteRow, RoutesPage, ROWS_PER_PAGE_OPTIONS};
pub use search::SearchBox;
