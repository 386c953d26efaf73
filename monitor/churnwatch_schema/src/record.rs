use crate::domain::{Contract, Gender, InternetService, PaymentMethod, SeniorCitizen, YesNo};

/// A complete customer description, ready for inference.
///
/// Every categorical attribute holds a real domain value and both charges are
/// finite, non-negative amounts. Built from a `FormState` by the validator.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerRecord {
    pub gender: Gender,
    pub senior_citizen: SeniorCitizen,
    pub partner: YesNo,
    pub dependents: YesNo,
    pub tenure: u32,
    pub phone_service: YesNo,
    pub multiple_lines: YesNo,
    pub internet_service: InternetService,
    pub online_security: YesNo,
    pub online_backup: YesNo,
    pub device_protection: YesNo,
    pub tech_support: YesNo,
    pub streaming_tv: YesNo,
    pub streaming_movies: YesNo,
    pub contract: Contract,
    pub paperless_billing: YesNo,
    pub payment_method: PaymentMethod,
    pub monthly_charges: f64,
    pub total_charges: f64,
}
