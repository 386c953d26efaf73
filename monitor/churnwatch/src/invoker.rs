//! Inference request assembly and label mapping.

use std::fmt;

use churnwatch_model::{ArtifactError, Classifier, Preprocessor, TabularRow};
use churnwatch_schema::{CustomerRecord, FieldKey};
use serde::Serialize;
use thiserror::Error;

/// Inference could not produce a label. Never mapped to a default category.
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("preprocessor rejected the input row: {0}")]
    Transform(#[source] ArtifactError),
    #[error("model failed to predict: {0}")]
    Predict(#[source] ArtifactError),
    #[error("model returned {actual} labels for {expected} row")]
    LabelCount { expected: usize, actual: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskCategory {
    Low,
    High,
}

impl RiskCategory {
    /// Label `1` means churn; anything else is treated as retain.
    pub fn from_label(label: i64) -> Self {
        if label == 1 {
            RiskCategory::High
        } else {
            RiskCategory::Low
        }
    }

    pub fn headline(&self) -> &'static str {
        match self {
            RiskCategory::Low => "Low Risk",
            RiskCategory::High => "High Risk",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            RiskCategory::Low => "This customer is likely to stay.",
            RiskCategory::High => "This customer is likely to churn.",
        }
    }
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.headline(), self.message())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PredictionResult {
    pub label: i64,
    pub category: RiskCategory,
}

impl PredictionResult {
    pub fn from_label(label: i64) -> Self {
        Self {
            label,
            category: RiskCategory::from_label(label),
        }
    }
}

/// Lay out a record as the single named row the preprocessor was fitted on.
pub fn assemble_row(record: &CustomerRecord) -> TabularRow {
    let col = |key: FieldKey| key.column();
    TabularRow::new()
        .with(col(FieldKey::Gender), record.gender.as_str())
        .with(col(FieldKey::Senior), record.senior_citizen.code())
        .with(col(FieldKey::Partner), record.partner.as_str())
        .with(col(FieldKey::Dependents), record.dependents.as_str())
        .with(col(FieldKey::Tenure), i64::from(record.tenure))
        .with(col(FieldKey::Phone), record.phone_service.as_str())
        .with(col(FieldKey::Multiline), record.multiple_lines.as_str())
        .with(col(FieldKey::Internet), record.internet_service.as_str())
        .with(col(FieldKey::OnlineSec), record.online_security.as_str())
        .with(col(FieldKey::OnlineBackup), record.online_backup.as_str())
        .with(col(FieldKey::DeviceProtect), record.device_protection.as_str())
        .with(col(FieldKey::TechSupport), record.tech_support.as_str())
        .with(col(FieldKey::StreamTv), record.streaming_tv.as_str())
        .with(col(FieldKey::StreamMovies), record.streaming_movies.as_str())
        .with(col(FieldKey::Contract), record.contract.as_str())
        .with(col(FieldKey::Paperless), record.paperless_billing.as_str())
        .with(col(FieldKey::PaymentMethod), record.payment_method.as_str())
        .with(col(FieldKey::MonthlyCharges), record.monthly_charges)
        .with(col(FieldKey::TotalCharges), record.total_charges)
}

/// Run one record through the preprocessor and classifier.
pub fn infer(
    preprocessor: &dyn Preprocessor,
    classifier: &dyn Classifier,
    record: &CustomerRecord,
) -> Result<PredictionResult, InferenceError> {
    let row = assemble_row(record);
    log::debug!("assembled inference row with {} columns", row.len());

    let features = preprocessor
        .transform(std::slice::from_ref(&row))
        .map_err(InferenceError::Transform)?;
    let labels = classifier
        .predict(&features)
        .map_err(InferenceError::Predict)?;

    match labels.as_slice() {
        [label] => Ok(PredictionResult::from_label(*label)),
        other => Err(InferenceError::LabelCount {
            expected: 1,
            actual: other.len(),
        }),
    }
}
