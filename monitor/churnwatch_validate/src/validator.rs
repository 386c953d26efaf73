//! Turns a raw `FormState` into a complete `CustomerRecord`, or explains why it can't.
//!
//! Checks run in two batches. Every dropdown is checked first and all
//! unselected fields are reported together; only when all dropdowns are set
//! are the two charge boxes parsed, again reported together.

use churnwatch_schema::{CustomerRecord, FieldKey, FormState, Selection};
use serde::Serialize;
use thiserror::Error;

/// Why a form could not be turned into a record. Both cases are user-correctable.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationError {
    /// One or more dropdowns still show their "Select ..." prompt.
    #[error("Please fill out all dropdowns (don't leave any \"Select ...\" fields).")]
    MissingSelection { fields: Vec<FieldKey> },
    /// One or both charge boxes do not hold a usable amount.
    #[error("Please enter valid numbers for Monthly and Total Charges.")]
    InvalidNumber { fields: Vec<FieldKey> },
}

impl ValidationError {
    /// Fields the user needs to fix, in form order.
    pub fn fields(&self) -> &[FieldKey] {
        match self {
            ValidationError::MissingSelection { fields }
            | ValidationError::InvalidNumber { fields } => fields,
        }
    }
}

/// Parse a charge box. Surrounding whitespace is ignored; the amount must be
/// finite and non-negative.
pub fn parse_charge(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}

fn pick<T>(sel: Selection<T>, field: FieldKey, missing: &mut Vec<FieldKey>) -> Option<T> {
    let value = sel.into_option();
    if value.is_none() {
        missing.push(field);
    }
    value
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Validator;

impl Validator {
    pub fn new() -> Self {
        Validator
    }

    /// Validate the current form contents. Pure: the form is not modified and
    /// repeated calls on the same form give the same answer.
    pub fn check(&self, form: &FormState) -> Result<CustomerRecord, ValidationError> {
        let mut missing = Vec::new();
        let picked = (
            pick(form.gender, FieldKey::Gender, &mut missing),
            pick(form.senior_citizen, FieldKey::Senior, &mut missing),
            pick(form.partner, FieldKey::Partner, &mut missing),
            pick(form.dependents, FieldKey::Dependents, &mut missing),
            pick(form.phone_service, FieldKey::Phone, &mut missing),
            pick(form.multiple_lines, FieldKey::Multiline, &mut missing),
            pick(form.internet_service, FieldKey::Internet, &mut missing),
            pick(form.online_security, FieldKey::OnlineSec, &mut missing),
            pick(form.online_backup, FieldKey::OnlineBackup, &mut missing),
            pick(form.device_protection, FieldKey::DeviceProtect, &mut missing),
            pick(form.tech_support, FieldKey::TechSupport, &mut missing),
            pick(form.streaming_tv, FieldKey::StreamTv, &mut missing),
            pick(form.streaming_movies, FieldKey::StreamMovies, &mut missing),
            pick(form.contract, FieldKey::Contract, &mut missing),
            pick(form.paperless_billing, FieldKey::Paperless, &mut missing),
            pick(form.payment_method, FieldKey::PaymentMethod, &mut missing),
        );
        let (
            Some(gender),
            Some(senior_citizen),
            Some(partner),
            Some(dependents),
            Some(phone_service),
            Some(multiple_lines),
            Some(internet_service),
            Some(online_security),
            Some(online_backup),
            Some(device_protection),
            Some(tech_support),
            Some(streaming_tv),
            Some(streaming_movies),
            Some(contract),
            Some(paperless_billing),
            Some(payment_method),
        ) = picked
        else {
            log::debug!("form rejected, unselected fields: {missing:?}");
            return Err(ValidationError::MissingSelection { fields: missing });
        };

        let monthly = parse_charge(&form.monthly_charges);
        let total = parse_charge(&form.total_charges);
        let (Some(monthly_charges), Some(total_charges)) = (monthly, total) else {
            let fields: Vec<FieldKey> = [
                (FieldKey::MonthlyCharges, monthly),
                (FieldKey::TotalCharges, total),
            ]
            .into_iter()
            .filter(|(_, v)| v.is_none())
            .map(|(k, _)| k)
            .collect();
            log::debug!("form rejected, unparseable charges: {fields:?}");
            return Err(ValidationError::InvalidNumber { fields });
        };

        log::debug!("form accepted");
        Ok(CustomerRecord {
            gender,
            senior_citizen,
            partner,
            dependents,
            tenure: form.tenure,
            phone_service,
            multiple_lines,
            internet_service,
            online_security,
            online_backup,
            device_protection,
            tech_support,
            streaming_tv,
            streaming_movies,
            contract,
            paperless_billing,
            payment_method,
            monthly_charges,
            total_charges,
        })
    }
}

/// Shorthand for `Validator::new().check(form)`.
pub fn validate(form: &FormState) -> Result<CustomerRecord, ValidationError> {
    Validator::new().check(form)
}
