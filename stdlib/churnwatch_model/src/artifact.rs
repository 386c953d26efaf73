//! Loading fitted artifacts from JSON files.

use std::fs::read_to_string;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::backend::ArtifactError;
use crate::backends::{ColumnTransformer, LogisticRegression};

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let text = read_to_string(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ArtifactError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load and check a fitted column transformer.
pub fn load_preprocessor(path: impl AsRef<Path>) -> Result<ColumnTransformer, ArtifactError> {
    let path = path.as_ref();
    let pre: ColumnTransformer = read_json(path)?;
    pre.validate()?;
    log::info!(
        "loaded preprocessor from {} ({} input columns, {} features)",
        path.display(),
        pre.numeric.len() + pre.categorical.len(),
        pre.output_width()
    );
    Ok(pre)
}

/// Load and check a fitted logistic regression classifier.
pub fn load_classifier(path: impl AsRef<Path>) -> Result<LogisticRegression, ArtifactError> {
    let path = path.as_ref();
    let model: LogisticRegression = read_json(path)?;
    model.validate()?;
    log::info!(
        "loaded classifier '{}' from {} ({} coefficients)",
        model.name,
        path.display(),
        model.coefficients.len()
    );
    Ok(model)
}
