//! Shared fixtures for the churnwatch integration tests.

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use churnwatch_model::{ArtifactError, Classifier, FeatureMatrix, Preprocessor, TabularRow};
use churnwatch_schema::{FieldKey, FormState};

/// Raw values for a complete, valid customer: monthly "45.67",
/// total "1234.56", tenure 12. Neighbouring yes/no answers alternate.
pub const SCENARIO_A: [(FieldKey, &str); 19] = [
    (FieldKey::Gender, "Male"),
    (FieldKey::Senior, "0"),
    (FieldKey::Partner, "Yes"),
    (FieldKey::Dependents, "No"),
    (FieldKey::Tenure, "12"),
    (FieldKey::Phone, "Yes"),
    (FieldKey::Multiline, "No"),
    (FieldKey::Internet, "DSL"),
    (FieldKey::OnlineSec, "Yes"),
    (FieldKey::OnlineBackup, "No"),
    (FieldKey::DeviceProtect, "Yes"),
    (FieldKey::TechSupport, "No"),
    (FieldKey::StreamTv, "Yes"),
    (FieldKey::StreamMovies, "No"),
    (FieldKey::Contract, "One year"),
    (FieldKey::Paperless, "Yes"),
    (FieldKey::PaymentMethod, "Bank transfer (automatic)"),
    (FieldKey::MonthlyCharges, "45.67"),
    (FieldKey::TotalCharges, "1234.56"),
];

pub fn fill(values: &[(FieldKey, &str)]) -> FormState {
    let mut form = FormState::new();
    for (key, raw) in values {
        form.set(*key, raw).expect("fixture value is in domain");
    }
    form
}

pub fn scenario_a() -> FormState {
    fill(&SCENARIO_A)
}

/// Path to a file in the shipped `artifacts/` directory.
pub fn shipped_artifact(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../artifacts")
        .join(name)
}

/// Preprocessor double that records every row it is handed and emits a
/// one-column matrix of zeros.
#[derive(Clone, Default)]
pub struct RecordingPreprocessor {
    pub calls: Arc<AtomicUsize>,
    pub rows: Arc<Mutex<Vec<TabularRow>>>,
}

impl RecordingPreprocessor {
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn seen_rows(&self) -> Vec<TabularRow> {
        self.rows.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

impl Preprocessor for RecordingPreprocessor {
    fn transform(&self, rows: &[TabularRow]) -> Result<FeatureMatrix, ArtifactError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut seen) = self.rows.lock() {
            seen.extend(rows.iter().cloned());
        }
        FeatureMatrix::new(rows.len(), 1, vec![0.0; rows.len()])
    }

    fn feature_names_in(&self) -> Vec<String> {
        FieldKey::ALL.iter().map(|k| k.column().to_string()).collect()
    }
}

/// Classifier double that answers with fixed labels, or fails.
pub enum FixedClassifier {
    Labels(Vec<i64>),
    Fails(&'static str),
}

impl FixedClassifier {
    pub fn one(label: i64) -> Self {
        FixedClassifier::Labels(vec![label])
    }
}

impl Classifier for FixedClassifier {
    fn predict(&self, _features: &FeatureMatrix) -> Result<Vec<i64>, ArtifactError> {
        match self {
            FixedClassifier::Labels(labels) => Ok(labels.clone()),
            FixedClassifier::Fails(msg) => Err(ArtifactError::Invalid((*msg).to_string())),
        }
    }

    fn name(&self) -> &str {
        "fixed"
    }
}
