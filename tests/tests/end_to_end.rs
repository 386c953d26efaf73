use churnwatch::{
    form_from_json, ChurnService, InferenceError, RiskCategory, ServiceConfig, SubmissionOutcome,
};
use churnwatch_model::{ArtifactError, ColumnTransformer, TabularRow};
use churnwatch_schema::{FieldKey, FormState};
use churnwatch_validate::ValidationError;
use pretty_assertions::assert_eq;
use tests::{fill, scenario_a, shipped_artifact, FixedClassifier, RecordingPreprocessor, SCENARIO_A};

fn service_with(label: FixedClassifier) -> (ChurnService, RecordingPreprocessor) {
    let pre = RecordingPreprocessor::default();
    let service = ChurnService::new(Box::new(pre.clone()), Box::new(label));
    (service, pre)
}

fn shipped_service() -> ChurnService {
    let config = ServiceConfig::new(
        shipped_artifact("churn_model.json"),
        shipped_artifact("preprocessor.json"),
    );
    ChurnService::load(&config).expect("shipped artifacts load")
}

#[test]
fn scenario_a_churn_label_maps_to_high_risk() {
    let (service, pre) = service_with(FixedClassifier::one(1));
    let outcome = service.submit(&scenario_a());

    let prediction = outcome.prediction().expect("prediction");
    assert_eq!(prediction.category, RiskCategory::High);
    assert_eq!(outcome.message(), "High Risk: This customer is likely to churn.");

    assert_eq!(pre.call_count(), 1);
    let rows = pre.seen_rows();
    assert_eq!(rows, vec![scenario_a_row()]);
    let columns: Vec<&str> = rows[0].columns().collect();
    let expected: Vec<&str> = FieldKey::ALL.iter().map(|k| k.column()).collect();
    assert_eq!(columns, expected);
}

/// The row the preprocessor must receive for `SCENARIO_A`.
fn scenario_a_row() -> TabularRow {
    TabularRow::new()
        .with("gender", "Male")
        .with("SeniorCitizen", 0i64)
        .with("Partner", "Yes")
        .with("Dependents", "No")
        .with("tenure", 12i64)
        .with("PhoneService", "Yes")
        .with("MultipleLines", "No")
        .with("InternetService", "DSL")
        .with("OnlineSecurity", "Yes")
        .with("OnlineBackup", "No")
        .with("DeviceProtection", "Yes")
        .with("TechSupport", "No")
        .with("StreamingTV", "Yes")
        .with("StreamingMovies", "No")
        .with("Contract", "One year")
        .with("PaperlessBilling", "Yes")
        .with("PaymentMethod", "Bank transfer (automatic)")
        .with("MonthlyCharges", 45.67)
        .with("TotalCharges", 1234.56)
}

#[test]
fn every_scenario_a_cell_reaches_the_preprocessor() {
    let (service, pre) = service_with(FixedClassifier::one(0));
    service.submit(&scenario_a());
    let rows = pre.seen_rows();
    let expected = scenario_a_row();
    for key in FieldKey::ALL {
        assert_eq!(
            rows[0].get(key.column()),
            expected.get(key.column()),
            "{key} carried the wrong value"
        );
    }
}

#[test]
fn scenario_b_retain_label_maps_to_low_risk() {
    let (service, _) = service_with(FixedClassifier::one(0));
    let outcome = service.submit(&scenario_a());
    assert_eq!(
        outcome.prediction().map(|p| p.category),
        Some(RiskCategory::Low)
    );
    assert_eq!(outcome.message(), "Low Risk: This customer is likely to stay.");
}

#[test]
fn scenario_c_unselected_gender_never_reaches_inference() {
    let (service, pre) = service_with(FixedClassifier::one(1));
    let mut form = scenario_a();
    form.unset(FieldKey::Gender);

    match service.submit(&form) {
        SubmissionOutcome::Invalid(ValidationError::MissingSelection { fields }) => {
            assert_eq!(fields, vec![FieldKey::Gender]);
        }
        other => panic!("expected missing selection, got {other:?}"),
    }
    assert_eq!(pre.call_count(), 0);
}

#[test]
fn scenario_d_bad_monthly_charge_never_reaches_inference() {
    let (service, pre) = service_with(FixedClassifier::one(1));
    let mut form = scenario_a();
    form.set(FieldKey::MonthlyCharges, "not-a-number").unwrap();

    let outcome = service.submit(&form);
    match &outcome {
        SubmissionOutcome::Invalid(ValidationError::InvalidNumber { fields }) => {
            assert_eq!(fields, &vec![FieldKey::MonthlyCharges]);
        }
        other => panic!("expected invalid number, got {other:?}"),
    }
    assert_eq!(outcome.report().status, "invalid_number");
    assert_eq!(pre.call_count(), 0);
}

#[test]
fn missing_selection_is_reported_before_bad_numbers() {
    let (service, _) = service_with(FixedClassifier::one(1));
    let mut form = scenario_a();
    form.unset(FieldKey::Contract);
    form.set(FieldKey::TotalCharges, "abc").unwrap();
    assert!(matches!(
        service.submit(&form),
        SubmissionOutcome::Invalid(ValidationError::MissingSelection { .. })
    ));
}

#[test]
fn reset_matches_a_fresh_session() {
    let mut form = scenario_a();
    form.reset();
    assert_eq!(form, FormState::new());
    for key in FieldKey::categorical() {
        assert!(form.is_unselected(key), "{key} should be unselected");
    }
    assert_eq!(form.tenure, 0);
    assert_eq!(form.monthly_charges, "");
    assert_eq!(form.total_charges, "");
}

#[test]
fn classifier_failure_is_a_distinct_outcome() {
    let (service, _) = service_with(FixedClassifier::Fails("weights unreadable"));
    let outcome = service.submit(&scenario_a());
    match &outcome {
        SubmissionOutcome::InferenceFailed(InferenceError::Predict(ArtifactError::Invalid(msg))) => {
            assert_eq!(msg, "weights unreadable");
        }
        other => panic!("expected inference failure, got {other:?}"),
    }
    assert!(outcome.prediction().is_none());
    assert_eq!(outcome.report().status, "inference_failed");
}

#[test]
fn preprocessor_rejection_is_a_distinct_outcome() {
    let pre: ColumnTransformer = serde_json::from_str(
        r#"{"numeric": [], "categorical": [{"column": "Region", "categories": ["North", "South"]}]}"#,
    )
    .unwrap();
    let service = ChurnService::new(Box::new(pre), Box::new(FixedClassifier::one(1)));
    match service.submit(&scenario_a()) {
        SubmissionOutcome::InferenceFailed(InferenceError::Transform(
            ArtifactError::MissingColumn(column),
        )) => assert_eq!(column, "Region"),
        other => panic!("expected transform failure, got {other:?}"),
    }
}

#[test]
fn extra_labels_are_not_silently_truncated() {
    let (service, _) = service_with(FixedClassifier::Labels(vec![1, 0]));
    assert!(matches!(
        service.submit(&scenario_a()),
        SubmissionOutcome::InferenceFailed(InferenceError::LabelCount { actual: 2, .. })
    ));
}

#[test]
fn service_is_reused_across_submissions() {
    let (service, pre) = service_with(FixedClassifier::one(0));
    let form = scenario_a();
    for _ in 0..3 {
        assert!(service.submit(&form).prediction().is_some());
    }
    assert_eq!(pre.call_count(), 3);
}

#[test]
fn shipped_artifacts_flag_a_high_risk_customer() {
    let service = shipped_service();
    let form = fill(&[
        (FieldKey::Gender, "Female"),
        (FieldKey::Senior, "1"),
        (FieldKey::Partner, "No"),
        (FieldKey::Dependents, "No"),
        (FieldKey::Tenure, "2"),
        (FieldKey::Phone, "Yes"),
        (FieldKey::Multiline, "No"),
        (FieldKey::Internet, "Fiber optic"),
        (FieldKey::OnlineSec, "No"),
        (FieldKey::OnlineBackup, "No"),
        (FieldKey::DeviceProtect, "No"),
        (FieldKey::TechSupport, "No"),
        (FieldKey::StreamTv, "Yes"),
        (FieldKey::StreamMovies, "Yes"),
        (FieldKey::Contract, "Month-to-month"),
        (FieldKey::Paperless, "Yes"),
        (FieldKey::PaymentMethod, "Electronic check"),
        (FieldKey::MonthlyCharges, "95.5"),
        (FieldKey::TotalCharges, "191.0"),
    ]);
    let outcome = service.submit(&form);
    assert_eq!(outcome.prediction().map(|p| p.label), Some(1));
    assert_eq!(service.classifier_name(), "logistic_regression_churn_model");
}

#[test]
fn shipped_artifacts_clear_a_loyal_customer() {
    let service = shipped_service();
    let outcome = service.submit(
        &form_from_json(
            r#"{
                "gender": "Male", "senior": "0", "partner": "Yes", "dependents": "Yes",
                "tenure": 60, "phone": "Yes", "multiline": "No", "internet": "DSL",
                "online_sec": "Yes", "online_backup": "Yes", "device_protect": "Yes",
                "tech_support": "Yes", "stream_tv": "No", "stream_movies": "No",
                "contract": "Two year", "paperless": "No",
                "payment_method": "Credit card (automatic)",
                "monthly_charges": "65", "total_charges": "3900"
            }"#,
        )
        .unwrap(),
    );
    assert_eq!(outcome.prediction().map(|p| p.category), Some(RiskCategory::Low));
}

#[test]
fn json_input_matches_form_built_by_hand() {
    let json = serde_json::Value::Object(
        SCENARIO_A
            .iter()
            .map(|(k, v)| (k.column().to_string(), serde_json::Value::from(*v)))
            .collect(),
    );
    let form = form_from_json(&json.to_string()).unwrap();
    assert_eq!(form, scenario_a());
}

#[test]
fn json_gender_prompt_counts_as_missing_selection() {
    let (service, pre) = service_with(FixedClassifier::one(1));
    let mut json: serde_json::Map<String, serde_json::Value> = SCENARIO_A
        .iter()
        .map(|(k, v)| (k.column().to_string(), serde_json::Value::from(*v)))
        .collect();
    json.insert("gender".into(), "Select your gender".into());

    let form = form_from_json(&serde_json::Value::Object(json).to_string()).unwrap();
    let outcome = service.submit(&form);
    match &outcome {
        SubmissionOutcome::Invalid(ValidationError::MissingSelection { fields }) => {
            assert_eq!(fields, &vec![FieldKey::Gender]);
        }
        other => panic!("expected missing selection, got {other:?}"),
    }
    assert_eq!(outcome.report().status, "missing_selection");
    assert_eq!(pre.call_count(), 0);
}

#[test]
fn missing_artifact_file_fails_to_load() {
    let dir = tempfile::tempdir().unwrap();
    let config = ServiceConfig::new(
        dir.path().join("missing.json"),
        shipped_artifact("preprocessor.json"),
    );
    assert!(matches!(
        ChurnService::load(&config),
        Err(ArtifactError::Io { .. })
    ));
}
