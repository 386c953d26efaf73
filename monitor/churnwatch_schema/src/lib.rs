// Field schema and form state for the churnwatch customer exit monitor
pub mod domain;
pub mod field;
pub mod form;
pub mod record;
pub mod selection;

pub use domain::*;
pub use field::*;
pub use form::*;
pub use record::*;
pub use selection::*;
