//! Backend implementations for JSON-serialized artifacts

pub mod column_transformer;
pub mod logistic;

pub use column_transformer::{CategoricalColumn, ColumnTransformer, HandleUnknown, NumericColumn};
pub use logistic::LogisticRegression;
