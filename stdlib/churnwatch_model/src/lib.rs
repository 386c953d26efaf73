//! Artifact contracts and backends for churnwatch
//!
//! Defines the `Preprocessor` and `Classifier` contracts the monitor depends
//! on, the tabular row / feature matrix types they exchange, and JSON-backed
//! implementations (a fitted column transformer and a logistic regression).

pub mod artifact;
pub mod backend;
pub mod backends;
pub mod tabular;

pub use artifact::{load_classifier, load_preprocessor};
pub use backend::{ArtifactError, Classifier, Preprocessor};
pub use backends::{ColumnTransformer, LogisticRegression};
pub use tabular::{CellValue, FeatureMatrix, TabularRow};
