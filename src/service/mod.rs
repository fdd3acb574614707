//! Resource operations and draft coercion shared by the views.

pub mod coerce;
pub mod crud;

pub use coerce::{lenient_number, lenient_number_value};
pub use crud::{CrudService, ListQuery, SortOrder};
