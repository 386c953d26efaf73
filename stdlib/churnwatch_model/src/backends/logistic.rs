//! Binary logistic regression: label = classes[1] when sigmoid(w·x + b) >= threshold

use serde::{Deserialize, Serialize};

use crate::backend::{ArtifactError, Classifier};
use crate::tabular::FeatureMatrix;

fn default_threshold() -> f64 {
    0.5
}

fn default_classes() -> Vec<i64> {
    vec![0, 1]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegression {
    pub name: String,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    #[serde(default = "default_classes")]
    pub classes: Vec<i64>,
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

impl LogisticRegression {
    pub fn new(name: impl Into<String>, coefficients: Vec<f64>, intercept: f64) -> Self {
        Self {
            name: name.into(),
            coefficients,
            intercept,
            classes: default_classes(),
            threshold: default_threshold(),
        }
    }

    pub fn validate(&self) -> Result<(), ArtifactError> {
        if self.coefficients.is_empty() {
            return Err(ArtifactError::Invalid("model has no coefficients".into()));
        }
        if self.classes.len() != 2 {
            return Err(ArtifactError::Invalid(format!(
                "binary model needs exactly 2 classes, found {}",
                self.classes.len()
            )));
        }
        let params_finite = self
            .coefficients
            .iter()
            .chain(std::iter::once(&self.intercept))
            .all(|w| w.is_finite());
        if !params_finite {
            return Err(ArtifactError::Invalid("model has non-finite parameters".into()));
        }
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(ArtifactError::Invalid(format!(
                "threshold {} outside [0, 1]",
                self.threshold
            )));
        }
        Ok(())
    }

    /// Positive-class probability for every row.
    pub fn predict_proba(&self, features: &FeatureMatrix) -> Result<Vec<f64>, ArtifactError> {
        if features.cols() != self.coefficients.len() {
            return Err(ArtifactError::Shape {
                expected: self.coefficients.len(),
                actual: features.cols(),
            });
        }
        Ok(features
            .iter_rows()
            .map(|x| {
                let z = x
                    .iter()
                    .zip(self.coefficients.iter())
                    .map(|(x, w)| x * w)
                    .sum::<f64>()
                    + self.intercept;
                1.0 / (1.0 + (-z).exp())
            })
            .collect())
    }
}

impl Classifier for LogisticRegression {
    fn predict(&self, features: &FeatureMatrix) -> Result<Vec<i64>, ArtifactError> {
        let (negative, positive) = match self.classes.as_slice() {
            [neg, pos] => (*neg, *pos),
            other => {
                return Err(ArtifactError::Invalid(format!(
                    "binary model needs exactly 2 classes, found {}",
                    other.len()
                )))
            }
        };
        Ok(self
            .predict_proba(features)?
            .into_iter()
            .map(|p| if p >= self.threshold { positive } else { negative })
            .collect())
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn n_features_in(&self) -> Option<usize> {
        Some(self.coefficients.len())
    }
}
