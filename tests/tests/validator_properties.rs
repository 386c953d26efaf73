use churnwatch_schema::{CustomerRecord, FieldKey, FieldKind, FormState, Selection};
use churnwatch_validate::{validate, ValidationError};
use proptest::prelude::*;
use tests::scenario_a;

fn domain(key: FieldKey) -> &'static [&'static str] {
    match key.spec().kind {
        FieldKind::Categorical { domain, .. } => domain,
        _ => &[],
    }
}

fn chosen<T: Copy>(sel: &Selection<T>) -> T {
    *sel.value().expect("dropdown is filled")
}

/// The record a complete form should turn into, built field by field.
fn expected_record(form: &FormState, monthly: f64, total: f64) -> CustomerRecord {
    CustomerRecord {
        gender: chosen(&form.gender),
        senior_citizen: chosen(&form.senior_citizen),
        partner: chosen(&form.partner),
        dependents: chosen(&form.dependents),
        tenure: form.tenure,
        phone_service: chosen(&form.phone_service),
        multiple_lines: chosen(&form.multiple_lines),
        internet_service: chosen(&form.internet_service),
        online_security: chosen(&form.online_security),
        online_backup: chosen(&form.online_backup),
        device_protection: chosen(&form.device_protection),
        tech_support: chosen(&form.tech_support),
        streaming_tv: chosen(&form.streaming_tv),
        streaming_movies: chosen(&form.streaming_movies),
        contract: chosen(&form.contract),
        paperless_billing: chosen(&form.paperless_billing),
        payment_method: chosen(&form.payment_method),
        monthly_charges: monthly,
        total_charges: total,
    }
}

/// A form with every dropdown drawn from its domain, a random tenure and
/// well-formed charges.
fn valid_form() -> impl Strategy<Value = (FormState, f64, f64)> {
    let picks: Vec<BoxedStrategy<&'static str>> = FieldKey::categorical()
        .map(|k| proptest::sample::select(domain(k)).boxed())
        .collect();
    (picks, 0u32..=72, 0.0f64..10_000.0, 0.0f64..100_000.0).prop_map(
        |(values, tenure, monthly, total)| {
            let mut form = FormState::new();
            for (key, raw) in FieldKey::categorical().zip(values) {
                form.set(key, raw).unwrap();
            }
            form.tenure = tenure;
            form.monthly_charges = format!(" {monthly} ");
            form.total_charges = total.to_string();
            (form, monthly, total)
        },
    )
}

proptest! {
    #[test]
    fn complete_forms_validate_to_matching_records((form, monthly, total) in valid_form()) {
        let record = validate(&form).unwrap();
        prop_assert_eq!(record, expected_record(&form, monthly, total));
    }

    #[test]
    fn any_unselected_dropdown_is_reported(
        (form, _, _) in valid_form(),
        cleared in proptest::sample::subsequence(FieldKey::categorical().collect::<Vec<_>>(), 1..=16),
    ) {
        let mut form = form;
        for key in &cleared {
            form.unset(*key);
        }
        // Break a charge too: dropdowns are reported first regardless.
        form.monthly_charges = "oops".into();
        match validate(&form) {
            Err(ValidationError::MissingSelection { fields }) => prop_assert_eq!(fields, cleared),
            other => prop_assert!(false, "expected missing selection, got {:?}", other),
        }
    }

    #[test]
    fn unparseable_charges_are_rejected(bad in "[a-zA-Z$,]{1,8}|-[1-9][0-9]{0,3}|NaN|inf") {
        let mut form = scenario_a();
        form.total_charges = bad;
        match validate(&form) {
            Err(ValidationError::InvalidNumber { fields }) => {
                prop_assert_eq!(fields, vec![FieldKey::TotalCharges]);
            }
            other => prop_assert!(false, "expected invalid number, got {:?}", other),
        }
    }

    #[test]
    fn validation_is_repeatable((form, _, _) in valid_form()) {
        let before = form.clone();
        let first = validate(&form);
        let second = validate(&form);
        prop_assert_eq!(first, second);
        prop_assert_eq!(form, before);
    }
}
