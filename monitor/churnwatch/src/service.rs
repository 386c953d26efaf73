//! The long-lived inference service and the per-submission pipeline.

use churnwatch_model::{load_classifier, load_preprocessor, ArtifactError, Classifier, Preprocessor};
use churnwatch_schema::{CustomerRecord, FormState};
use churnwatch_validate::{ValidationError, Validator};
use serde::Serialize;

use crate::config::ServiceConfig;
use crate::invoker::{infer, InferenceError, PredictionResult};

/// Terminal state of one submission.
#[derive(Debug)]
pub enum SubmissionOutcome {
    /// Validation failed; nothing was sent to the artifacts.
    Invalid(ValidationError),
    Predicted(PredictionResult),
    InferenceFailed(InferenceError),
}

/// Serializable summary of a `SubmissionOutcome`.
///
/// `prediction` is present only for `predicted`, `invalid` only for the two
/// validation statuses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutcomeReport {
    pub status: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prediction: Option<PredictionResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invalid: Option<ValidationError>,
}

impl SubmissionOutcome {
    pub fn message(&self) -> String {
        match self {
            SubmissionOutcome::Invalid(e) => e.to_string(),
            SubmissionOutcome::Predicted(p) => p.category.to_string(),
            SubmissionOutcome::InferenceFailed(e) => e.to_string(),
        }
    }

    pub fn prediction(&self) -> Option<&PredictionResult> {
        match self {
            SubmissionOutcome::Predicted(p) => Some(p),
            _ => None,
        }
    }

    pub fn report(&self) -> OutcomeReport {
        match self {
            SubmissionOutcome::Invalid(e) => OutcomeReport {
                status: match e {
                    ValidationError::MissingSelection { .. } => "missing_selection",
                    ValidationError::InvalidNumber { .. } => "invalid_number",
                },
                message: e.to_string(),
                prediction: None,
                invalid: Some(e.clone()),
            },
            SubmissionOutcome::Predicted(p) => OutcomeReport {
                status: "predicted",
                message: p.category.to_string(),
                prediction: Some(*p),
                invalid: None,
            },
            SubmissionOutcome::InferenceFailed(e) => OutcomeReport {
                status: "inference_failed",
                message: e.to_string(),
                prediction: None,
                invalid: None,
            },
        }
    }
}

/// Fitted artifacts plus the validator, created once and shared read-only by
/// every submission.
pub struct ChurnService {
    preprocessor: Box<dyn Preprocessor>,
    classifier: Box<dyn Classifier>,
    validator: Validator,
}

impl ChurnService {
    pub fn new(preprocessor: Box<dyn Preprocessor>, classifier: Box<dyn Classifier>) -> Self {
        Self {
            preprocessor,
            classifier,
            validator: Validator::new(),
        }
    }

    /// Load both artifacts and check that they fit together.
    pub fn load(config: &ServiceConfig) -> Result<Self, ArtifactError> {
        let preprocessor = load_preprocessor(&config.preprocessor_path)?;
        let classifier = load_classifier(&config.model_path)?;
        if let (Some(out), Some(expected)) =
            (preprocessor.n_features_out(), classifier.n_features_in())
        {
            if out != expected {
                return Err(ArtifactError::Shape {
                    expected,
                    actual: out,
                });
            }
        }
        Ok(Self::new(Box::new(preprocessor), Box::new(classifier)))
    }

    pub fn classifier_name(&self) -> &str {
        self.classifier.name()
    }

    pub fn feature_names_in(&self) -> Vec<String> {
        self.preprocessor.feature_names_in()
    }

    /// Score an already validated record.
    pub fn predict(&self, record: &CustomerRecord) -> Result<PredictionResult, InferenceError> {
        infer(self.preprocessor.as_ref(), self.classifier.as_ref(), record)
    }

    /// Validate the form and, when complete, score it.
    pub fn submit(&self, form: &FormState) -> SubmissionOutcome {
        let record = match self.validator.check(form) {
            Ok(record) => record,
            Err(e) => {
                log::warn!("submission blocked: {e} ({:?})", e.fields());
                return SubmissionOutcome::Invalid(e);
            }
        };
        match self.predict(&record) {
            Ok(prediction) => {
                log::info!(
                    "prediction label={} category={}",
                    prediction.label,
                    prediction.category.headline()
                );
                SubmissionOutcome::Predicted(prediction)
            }
            Err(e) => {
                log::error!("inference failed: {e}");
                SubmissionOutcome::InferenceFailed(e)
            }
        }
    }
}

impl std::fmt::Debug for ChurnService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChurnService")
            .field("classifier", &self.classifier.name())
            .field("features_in", &self.preprocessor.feature_names_in().len())
            .finish()
    }
}
