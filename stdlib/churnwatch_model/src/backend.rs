//! Contracts for the two opaque artifacts the monitor depends on.

use std::path::PathBuf;

use thiserror::Error;

use crate::tabular::{FeatureMatrix, TabularRow};

/// Errors raised while loading or running an artifact.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("cannot read artifact '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse artifact '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid artifact: {0}")]
    Invalid(String),
    #[error("shape mismatch: expected {expected} values, got {actual}")]
    Shape { expected: usize, actual: usize },
    #[error("input is missing column '{0}'")]
    MissingColumn(String),
    #[error("column '{column}' must hold {expected}")]
    ColumnType {
        column: String,
        expected: &'static str,
    },
    #[error("column '{column}' has unknown category '{value}'")]
    UnknownCategory { column: String, value: String },
}

/// A fitted feature transformation: named tabular rows in, numeric matrix out.
///
/// Implementations are immutable once loaded; `transform` must not change any
/// internal state so one instance can serve any number of requests.
pub trait Preprocessor: Send + Sync {
    fn transform(&self, rows: &[TabularRow]) -> Result<FeatureMatrix, ArtifactError>;

    /// Column names the transformation was fitted on.
    fn feature_names_in(&self) -> Vec<String>;

    /// Width of each transformed row, when known up front.
    fn n_features_out(&self) -> Option<usize> {
        None
    }
}

/// A fitted classifier returning one label per matrix row.
pub trait Classifier: Send + Sync {
    fn predict(&self, features: &FeatureMatrix) -> Result<Vec<i64>, ArtifactError>;

    fn name(&self) -> &str;

    /// Expected width of each input row, when known up front.
    fn n_features_in(&self) -> Option<usize> {
        None
    }
}
