//! One-shot form input: a JSON object mapping field keys to values.

use std::collections::HashSet;

use churnwatch_schema::{FieldError, FieldKey, FormState};
use serde_json::Value as JsonValue;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("input is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("input must be a JSON object of field names to values")]
    NotAnObject,
    #[error("field '{0}' must be a string or a number")]
    UnsupportedValue(String),
    #[error("field '{0}' is given more than once")]
    DuplicateField(FieldKey),
    #[error(transparent)]
    Field(#[from] FieldError),
}

/// Build a form from JSON such as `{"gender": "Female", "tenure": 12, "monthly_charges": "45.67"}`.
///
/// Keys may be short field keys or row column names, but each field may
/// appear only once. Fields that are absent, `null`, or hold their own
/// "Select ..." prompt stay unselected, so an incomplete object still yields
/// a form that validation will reject.
pub fn form_from_json(text: &str) -> Result<FormState, InputError> {
    let value: JsonValue = serde_json::from_str(text)?;
    let obj = value.as_object().ok_or(InputError::NotAnObject)?;

    let mut form = FormState::new();
    let mut seen = HashSet::new();
    for (name, v) in obj {
        let key: FieldKey = name.parse()?;
        if !seen.insert(key) {
            return Err(InputError::DuplicateField(key));
        }
        let raw = match v {
            JsonValue::Null => continue,
            JsonValue::String(s) => s.clone(),
            JsonValue::Number(n) => n.to_string(),
            _ => return Err(InputError::UnsupportedValue(name.clone())),
        };
        if key
            .prompt()
            .is_some_and(|prompt| prompt.eq_ignore_ascii_case(raw.trim()))
        {
            continue;
        }
        form.set(key, &raw)?;
    }
    Ok(form)
}
