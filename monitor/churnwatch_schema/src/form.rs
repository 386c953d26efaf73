// Raw, user-editable state of the customer form.

use thiserror::Error;

use crate::domain::{
    Contract, DomainError, Gender, InternetService, PaymentMethod, SeniorCitizen, YesNo,
};
use crate::field::{FieldKey, FieldKind};
use crate::selection::Selection;

/// Rejected form edit. The form keeps its previous value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("unknown field '{0}'")]
    UnknownField(String),
    #[error("invalid value for {field}: {source}")]
    InvalidValue {
        field: FieldKey,
        #[source]
        source: DomainError,
    },
    #[error("invalid value for {field}: '{value}' is not a whole number of months >= 0")]
    InvalidTenure { field: FieldKey, value: String },
}

/// Current contents of every input. Categorical inputs start `Unselected`,
/// tenure starts at 0 and both charge boxes start empty.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormState {
    pub gender: Selection<Gender>,
    pub senior_citizen: Selection<SeniorCitizen>,
    pub partner: Selection<YesNo>,
    pub dependents: Selection<YesNo>,
    pub tenure: u32,
    pub phone_service: Selection<YesNo>,
    pub multiple_lines: Selection<YesNo>,
    pub internet_service: Selection<InternetService>,
    pub online_security: Selection<YesNo>,
    pub online_backup: Selection<YesNo>,
    pub device_protection: Selection<YesNo>,
    pub tech_support: Selection<YesNo>,
    pub streaming_tv: Selection<YesNo>,
    pub streaming_movies: Selection<YesNo>,
    pub contract: Selection<Contract>,
    pub paperless_billing: Selection<YesNo>,
    pub payment_method: Selection<PaymentMethod>,
    pub monthly_charges: String,
    pub total_charges: String,
}

fn choose<T>(field: FieldKey, raw: &str) -> Result<Selection<T>, FieldError>
where
    T: std::str::FromStr<Err = DomainError>,
{
    raw.parse::<T>()
        .map(Selection::Value)
        .map_err(|source| FieldError::InvalidValue { field, source })
}

fn shown<T: std::fmt::Display>(field: FieldKey, sel: &Selection<T>) -> String {
    match sel {
        Selection::Value(v) => v.to_string(),
        Selection::Unselected => match field.spec().kind {
            FieldKind::Categorical { prompt, .. } => prompt.to_string(),
            _ => String::new(),
        },
    }
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `raw` into the field's type and store it.
    ///
    /// Categorical values must match a domain entry (case-insensitive). Tenure
    /// must be a non-negative integer. Charges are kept verbatim; they are only
    /// checked when the form is validated.
    pub fn set(&mut self, field: FieldKey, raw: &str) -> Result<(), FieldError> {
        match field {
            FieldKey::Gender => self.gender = choose(field, raw)?,
            FieldKey::Senior => self.senior_citizen = choose(field, raw)?,
            FieldKey::Partner => self.partner = choose(field, raw)?,
            FieldKey::Dependents => self.dependents = choose(field, raw)?,
            FieldKey::Tenure => {
                self.tenure = raw
                    .trim()
                    .parse::<u32>()
                    .map_err(|_| FieldError::InvalidTenure {
                        field,
                        value: raw.trim().to_string(),
                    })?
            }
            FieldKey::Phone => self.phone_service = choose(field, raw)?,
            FieldKey::Multiline => self.multiple_lines = choose(field, raw)?,
            FieldKey::Internet => self.internet_service = choose(field, raw)?,
            FieldKey::OnlineSec => self.online_security = choose(field, raw)?,
            FieldKey::OnlineBackup => self.online_backup = choose(field, raw)?,
            FieldKey::DeviceProtect => self.device_protection = choose(field, raw)?,
            FieldKey::TechSupport => self.tech_support = choose(field, raw)?,
            FieldKey::StreamTv => self.streaming_tv = choose(field, raw)?,
            FieldKey::StreamMovies => self.streaming_movies = choose(field, raw)?,
            FieldKey::Contract => self.contract = choose(field, raw)?,
            FieldKey::Paperless => self.paperless_billing = choose(field, raw)?,
            FieldKey::PaymentMethod => self.payment_method = choose(field, raw)?,
            FieldKey::MonthlyCharges => self.monthly_charges = raw.to_string(),
            FieldKey::TotalCharges => self.total_charges = raw.to_string(),
        }
        Ok(())
    }

    /// Return a single field to its default.
    pub fn unset(&mut self, field: FieldKey) {
        let fresh = FormState::new();
        match field {
            FieldKey::Gender => self.gender = fresh.gender,
            FieldKey::Senior => self.senior_citizen = fresh.senior_citizen,
            FieldKey::Partner => self.partner = fresh.partner,
            FieldKey::Dependents => self.dependents = fresh.dependents,
            FieldKey::Tenure => self.tenure = fresh.tenure,
            FieldKey::Phone => self.phone_service = fresh.phone_service,
            FieldKey::Multiline => self.multiple_lines = fresh.multiple_lines,
            FieldKey::Internet => self.internet_service = fresh.internet_service,
            FieldKey::OnlineSec => self.online_security = fresh.online_security,
            FieldKey::OnlineBackup => self.online_backup = fresh.online_backup,
            FieldKey::DeviceProtect => self.device_protection = fresh.device_protection,
            FieldKey::TechSupport => self.tech_support = fresh.tech_support,
            FieldKey::StreamTv => self.streaming_tv = fresh.streaming_tv,
            FieldKey::StreamMovies => self.streaming_movies = fresh.streaming_movies,
            FieldKey::Contract => self.contract = fresh.contract,
            FieldKey::Paperless => self.paperless_billing = fresh.paperless_billing,
            FieldKey::PaymentMethod => self.payment_method = fresh.payment_method,
            FieldKey::MonthlyCharges => self.monthly_charges = fresh.monthly_charges,
            FieldKey::TotalCharges => self.total_charges = fresh.total_charges,
        }
    }

    /// Clear every input back to its unselected/default state.
    pub fn reset(&mut self) {
        *self = FormState::new();
    }

    /// Whether a categorical field still shows its prompt. Always false for
    /// the numeric fields.
    pub fn is_unselected(&self, field: FieldKey) -> bool {
        match field {
            FieldKey::Gender => !self.gender.is_selected(),
            FieldKey::Senior => !self.senior_citizen.is_selected(),
            FieldKey::Partner => !self.partner.is_selected(),
            FieldKey::Dependents => !self.dependents.is_selected(),
            FieldKey::Phone => !self.phone_service.is_selected(),
            FieldKey::Multiline => !self.multiple_lines.is_selected(),
            FieldKey::Internet => !self.internet_service.is_selected(),
            FieldKey::OnlineSec => !self.online_security.is_selected(),
            FieldKey::OnlineBackup => !self.online_backup.is_selected(),
            FieldKey::DeviceProtect => !self.device_protection.is_selected(),
            FieldKey::TechSupport => !self.tech_support.is_selected(),
            FieldKey::StreamTv => !self.streaming_tv.is_selected(),
            FieldKey::StreamMovies => !self.streaming_movies.is_selected(),
            FieldKey::Contract => !self.contract.is_selected(),
            FieldKey::Paperless => !self.paperless_billing.is_selected(),
            FieldKey::PaymentMethod => !self.payment_method.is_selected(),
            FieldKey::Tenure | FieldKey::MonthlyCharges | FieldKey::TotalCharges => false,
        }
    }

    /// The field as the user sees it; unselected dropdowns show their prompt.
    pub fn display_value(&self, field: FieldKey) -> String {
        match field {
            FieldKey::Gender => shown(field, &self.gender),
            FieldKey::Senior => shown(field, &self.senior_citizen),
            FieldKey::Partner => shown(field, &self.partner),
            FieldKey::Dependents => shown(field, &self.dependents),
            FieldKey::Tenure => self.tenure.to_string(),
            FieldKey::Phone => shown(field, &self.phone_service),
            FieldKey::Multiline => shown(field, &self.multiple_lines),
            FieldKey::Internet => shown(field, &self.internet_service),
            FieldKey::OnlineSec => shown(field, &self.online_security),
            FieldKey::OnlineBackup => shown(field, &self.online_backup),
            FieldKey::DeviceProtect => shown(field, &self.device_protection),
            FieldKey::TechSupport => shown(field, &self.tech_support),
            FieldKey::StreamTv => shown(field, &self.streaming_tv),
            FieldKey::StreamMovies => shown(field, &self.streaming_movies),
            FieldKey::Contract => shown(field, &self.contract),
            FieldKey::Paperless => shown(field, &self.paperless_billing),
            FieldKey::PaymentMethod => shown(field, &self.payment_method),
            FieldKey::MonthlyCharges => self.monthly_charges.clone(),
            FieldKey::TotalCharges => self.total_charges.clone(),
        }
    }
}
