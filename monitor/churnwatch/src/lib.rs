//! Predictive Customer Exit Monitor.
//!
//! Collects a customer's details, validates them, and asks a fitted
//! preprocessor and classifier whether the customer is likely to churn.

pub mod config;
pub mod input;
pub mod invoker;
pub mod service;
pub mod session;

pub use config::{ArtifactPaths, ConfigError, ConfigFile, ServiceConfig};
pub use input::{form_from_json, InputError};
pub use invoker::{assemble_row, infer, InferenceError, PredictionResult, RiskCategory};
pub use service::{ChurnService, OutcomeReport, SubmissionOutcome};
pub use session::FormSession;
