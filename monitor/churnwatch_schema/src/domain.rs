// Enumerated domains for the categorical customer attributes.
// Each domain lists only legal values; "nothing chosen yet" lives in `Selection`.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A raw value that does not belong to the domain it was parsed against.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{value}' is not a valid {domain} (expected one of: {expected})")]
pub struct DomainError {
    pub domain: &'static str,
    pub value: String,
    pub expected: String,
}

macro_rules! domain_enum {
    (
        $(#[$meta:meta])*
        $name:ident ($domain:literal) {
            $($variant:ident => $display:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant,)+
        }

        impl $name {
            /// Every legal value, in display order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];
            /// Display strings for `ALL`, same order.
            pub const LABELS: &'static [&'static str] = &[$($display),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $display,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str().eq_ignore_ascii_case(wanted))
                    .ok_or_else(|| DomainError {
                        domain: $domain,
                        value: wanted.to_string(),
                        expected: Self::LABELS.join(", "),
                    })
            }
        }
    };
}

domain_enum! {
    Gender ("gender") {
        Female => "Female",
        Male => "Male",
    }
}

domain_enum! {
    /// Encoded as the integers 0 and 1 in the inference row.
    SeniorCitizen ("senior-citizen status") {
        No => "0",
        Yes => "1",
    }
}

domain_enum! {
    /// Shared by every plain yes/no attribute (partner, dependents, add-on services, billing).
    YesNo ("yes/no answer") {
        Yes => "Yes",
        No => "No",
    }
}

domain_enum! {
    InternetService ("internet service") {
        Dsl => "DSL",
        FiberOptic => "Fiber optic",
        No => "No",
    }
}

domain_enum! {
    Contract ("contract term") {
        MonthToMonth => "Month-to-month",
        OneYear => "One year",
        TwoYear => "Two year",
    }
}

domain_enum! {
    PaymentMethod ("payment method") {
        ElectronicCheck => "Electronic check",
        MailedCheck => "Mailed check",
        BankTransfer => "Bank transfer (automatic)",
        CreditCard => "Credit card (automatic)",
    }
}

impl SeniorCitizen {
    pub fn code(&self) -> i64 {
        match self {
            SeniorCitizen::No => 0,
            SeniorCitizen::Yes => 1,
        }
    }
}
