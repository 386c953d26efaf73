//! Fitted column transformer: standard-scaled numeric columns followed by
//! one-hot encoded categorical columns.

use serde::{Deserialize, Serialize};

use crate::backend::{ArtifactError, Preprocessor};
use crate::tabular::{CellValue, FeatureMatrix, TabularRow};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericColumn {
    pub column: String,
    pub mean: f64,
    pub scale: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandleUnknown {
    #[default]
    Error,
    /// Unseen categories encode as an all-zero block.
    Ignore,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalColumn {
    pub column: String,
    pub categories: Vec<CellValue>,
    #[serde(default)]
    pub handle_unknown: HandleUnknown,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ColumnTransformer {
    #[serde(default)]
    pub numeric: Vec<NumericColumn>,
    #[serde(default)]
    pub categorical: Vec<CategoricalColumn>,
}

impl ColumnTransformer {
    /// Check the fitted parameters are usable.
    pub fn validate(&self) -> Result<(), ArtifactError> {
        if self.numeric.is_empty() && self.categorical.is_empty() {
            return Err(ArtifactError::Invalid("preprocessor has no columns".into()));
        }
        for n in &self.numeric {
            if !n.mean.is_finite() || !n.scale.is_finite() {
                return Err(ArtifactError::Invalid(format!(
                    "numeric column '{}' has non-finite parameters",
                    n.column
                )));
            }
        }
        for c in &self.categorical {
            if c.categories.is_empty() {
                return Err(ArtifactError::Invalid(format!(
                    "categorical column '{}' has no categories",
                    c.column
                )));
            }
        }
        let mut seen = std::collections::HashSet::new();
        for name in self.feature_names_in() {
            if !seen.insert(name.clone()) {
                return Err(ArtifactError::Invalid(format!("column '{name}' listed twice")));
            }
        }
        Ok(())
    }

    pub fn output_width(&self) -> usize {
        self.numeric.len()
            + self
                .categorical
                .iter()
                .map(|c| c.categories.len())
                .sum::<usize>()
    }

    fn encode_row(&self, row: &TabularRow, out: &mut Vec<f64>) -> Result<(), ArtifactError> {
        for n in &self.numeric {
            let cell = row
                .get(&n.column)
                .ok_or_else(|| ArtifactError::MissingColumn(n.column.clone()))?;
            let x = cell.as_f64().ok_or_else(|| ArtifactError::ColumnType {
                column: n.column.clone(),
                expected: "a number",
            })?;
            let scale = if n.scale == 0.0 { 1.0 } else { n.scale };
            out.push((x - n.mean) / scale);
        }
        for c in &self.categorical {
            let cell = row
                .get(&c.column)
                .ok_or_else(|| ArtifactError::MissingColumn(c.column.clone()))?;
            let hit = c.categories.iter().position(|k| k.same_category(cell));
            if hit.is_none() && c.handle_unknown == HandleUnknown::Error {
                return Err(ArtifactError::UnknownCategory {
                    column: c.column.clone(),
                    value: cell.to_string(),
                });
            }
            out.extend((0..c.categories.len()).map(|i| if Some(i) == hit { 1.0 } else { 0.0 }));
        }
        Ok(())
    }
}

impl Preprocessor for ColumnTransformer {
    fn transform(&self, rows: &[TabularRow]) -> Result<FeatureMatrix, ArtifactError> {
        let width = self.output_width();
        let mut data = Vec::with_capacity(rows.len() * width);
        for row in rows {
            self.encode_row(row, &mut data)?;
        }
        FeatureMatrix::new(rows.len(), width, data)
    }

    fn feature_names_in(&self) -> Vec<String> {
        self.numeric
            .iter()
            .map(|n| n.column.clone())
            .chain(self.categorical.iter().map(|c| c.column.clone()))
            .collect()
    }

    fn n_features_out(&self) -> Option<usize> {
        Some(self.output_width())
    }
}
