// Static description of the 19 form fields, in form order.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::domain::{Contract, Gender, InternetService, PaymentMethod, SeniorCitizen, YesNo};
use crate::form::FieldError;

/// Identifies one input of the customer form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKey {
    Gender,
    Senior,
    Partner,
    Dependents,
    Tenure,
    Phone,
    Multiline,
    Internet,
    OnlineSec,
    OnlineBackup,
    DeviceProtect,
    TechSupport,
    StreamTv,
    StreamMovies,
    Contract,
    Paperless,
    PaymentMethod,
    MonthlyCharges,
    TotalCharges,
}

/// What kind of input a field is and how it starts out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldKind {
    /// A dropdown. `prompt` is shown while nothing is chosen and is never a legal value.
    Categorical {
        prompt: &'static str,
        domain: &'static [&'static str],
    },
    Integer { default: u32 },
    /// Free text parsed as a floating point amount on submit.
    NumericText { placeholder: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    pub key: FieldKey,
    /// Column name the preprocessor expects for this field.
    pub column: &'static str,
    pub label: &'static str,
    #[serde(flatten)]
    pub kind: FieldKind,
}

const fn categorical(
    key: FieldKey,
    column: &'static str,
    label: &'static str,
    prompt: &'static str,
    domain: &'static [&'static str],
) -> FieldSpec {
    FieldSpec {
        key,
        column,
        label,
        kind: FieldKind::Categorical { prompt, domain },
    }
}

/// All fields, indexed by `FieldKey as usize`.
pub const FIELD_SPECS: [FieldSpec; 19] = [
    categorical(FieldKey::Gender, "gender", "Gender", "Select your gender", Gender::LABELS),
    categorical(
        FieldKey::Senior,
        "SeniorCitizen",
        "Senior Citizen",
        "Select senior-citizen status",
        SeniorCitizen::LABELS,
    ),
    categorical(FieldKey::Partner, "Partner", "Partner", "Select partner status", YesNo::LABELS),
    categorical(
        FieldKey::Dependents,
        "Dependents",
        "Dependents",
        "Select dependents status",
        YesNo::LABELS,
    ),
    FieldSpec {
        key: FieldKey::Tenure,
        column: "tenure",
        label: "Tenure (months)",
        kind: FieldKind::Integer { default: 0 },
    },
    categorical(
        FieldKey::Phone,
        "PhoneService",
        "Phone Service",
        "Select Phone Service",
        YesNo::LABELS,
    ),
    categorical(
        FieldKey::Multiline,
        "MultipleLines",
        "Multiple Lines",
        "Select Multiple Lines",
        YesNo::LABELS,
    ),
    categorical(
        FieldKey::Internet,
        "InternetService",
        "Internet Service",
        "Select Internet Service",
        InternetService::LABELS,
    ),
    categorical(
        FieldKey::OnlineSec,
        "OnlineSecurity",
        "Online Security",
        "Select Online Security",
        YesNo::LABELS,
    ),
    categorical(
        FieldKey::OnlineBackup,
        "OnlineBackup",
        "Online Backup",
        "Select Online Backup",
        YesNo::LABELS,
    ),
    categorical(
        FieldKey::DeviceProtect,
        "DeviceProtection",
        "Device Protection",
        "Select Device Protection",
        YesNo::LABELS,
    ),
    categorical(
        FieldKey::TechSupport,
        "TechSupport",
        "Tech Support",
        "Select Tech Support",
        YesNo::LABELS,
    ),
    categorical(
        FieldKey::StreamTv,
        "StreamingTV",
        "Streaming TV",
        "Select Streaming TV",
        YesNo::LABELS,
    ),
    categorical(
        FieldKey::StreamMovies,
        "StreamingMovies",
        "Streaming Movies",
        "Select Streaming Movies",
        YesNo::LABELS,
    ),
    categorical(
        FieldKey::Contract,
        "Contract",
        "Contract",
        "Select contract term",
        Contract::LABELS,
    ),
    categorical(
        FieldKey::Paperless,
        "PaperlessBilling",
        "Paperless Billing",
        "Select paperless billing",
        YesNo::LABELS,
    ),
    categorical(
        FieldKey::PaymentMethod,
        "PaymentMethod",
        "Payment Method",
        "Select payment method",
        PaymentMethod::LABELS,
    ),
    FieldSpec {
        key: FieldKey::MonthlyCharges,
        column: "MonthlyCharges",
        label: "Monthly Charges ($)",
        kind: FieldKind::NumericText {
            placeholder: "e.g. 45.67",
        },
    },
    FieldSpec {
        key: FieldKey::TotalCharges,
        column: "TotalCharges",
        label: "Total Charges ($)",
        kind: FieldKind::NumericText {
            placeholder: "e.g. 1234.56",
        },
    },
];

impl FieldKey {
    pub const ALL: [FieldKey; 19] = [
        FieldKey::Gender,
        FieldKey::Senior,
        FieldKey::Partner,
        FieldKey::Dependents,
        FieldKey::Tenure,
        FieldKey::Phone,
        FieldKey::Multiline,
        FieldKey::Internet,
        FieldKey::OnlineSec,
        FieldKey::OnlineBackup,
        FieldKey::DeviceProtect,
        FieldKey::TechSupport,
        FieldKey::StreamTv,
        FieldKey::StreamMovies,
        FieldKey::Contract,
        FieldKey::Paperless,
        FieldKey::PaymentMethod,
        FieldKey::MonthlyCharges,
        FieldKey::TotalCharges,
    ];

    pub fn spec(self) -> &'static FieldSpec {
        &FIELD_SPECS[self as usize]
    }

    /// Short key used on the command line and in JSON input, e.g. `online_sec`.
    pub fn as_str(self) -> &'static str {
        match self {
            FieldKey::Gender => "gender",
            FieldKey::Senior => "senior",
            FieldKey::Partner => "partner",
            FieldKey::Dependents => "dependents",
            FieldKey::Tenure => "tenure",
            FieldKey::Phone => "phone",
            FieldKey::Multiline => "multiline",
            FieldKey::Internet => "internet",
            FieldKey::OnlineSec => "online_sec",
            FieldKey::OnlineBackup => "online_backup",
            FieldKey::DeviceProtect => "device_protect",
            FieldKey::TechSupport => "tech_support",
            FieldKey::StreamTv => "stream_tv",
            FieldKey::StreamMovies => "stream_movies",
            FieldKey::Contract => "contract",
            FieldKey::Paperless => "paperless",
            FieldKey::PaymentMethod => "payment_method",
            FieldKey::MonthlyCharges => "monthly_charges",
            FieldKey::TotalCharges => "total_charges",
        }
    }

    pub fn column(self) -> &'static str {
        self.spec().column
    }

    pub fn label(self) -> &'static str {
        self.spec().label
    }

    pub fn is_categorical(self) -> bool {
        matches!(self.spec().kind, FieldKind::Categorical { .. })
    }

    /// The 16 dropdown fields, in form order.
    /// The "Select ..." text shown while a dropdown is unselected.
    pub fn prompt(self) -> Option<&'static str> {
        match self.spec().kind {
            FieldKind::Categorical { prompt, .. } => Some(prompt),
            _ => None,
        }
    }

    pub fn categorical() -> impl Iterator<Item = FieldKey> {
        Self::ALL.into_iter().filter(|k| k.is_categorical())
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldKey {
    type Err = FieldError;

    /// Accepts the short key or the row column name, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|k| {
                k.as_str().eq_ignore_ascii_case(wanted) || k.column().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| FieldError::UnknownField(wanted.to_string()))
    }
}
