//! Line-oriented form session: edit fields, reset, submit.

use churnwatch_schema::{FieldKey, FieldKind, FormState};
use churnwatch_validate::ValidationError;

use crate::service::{ChurnService, SubmissionOutcome};

pub const TITLE: &str = "Predictive Customer Exit Monitor";
pub const INTRO: &str = "Enter customer details to predict whether they are likely to churn.";

#[derive(Debug)]
pub struct FormSession<'a> {
    service: &'a ChurnService,
    form: FormState,
}

impl<'a> FormSession<'a> {
    pub fn new(service: &'a ChurnService) -> Self {
        Self {
            service,
            form: FormState::new(),
        }
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn prompt(&self) -> &'static str {
        "churnwatch> "
    }

    /// Handle one input line. Returns the lines to print and whether the
    /// session should end.
    pub fn handle_line(&mut self, line: &str) -> (Vec<String>, bool) {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return (Vec::new(), false);
        }
        if trimmed.starts_with(':') {
            return self.handle_command(trimmed);
        }

        if let Some(rest) = trimmed.strip_prefix("unset ") {
            return (self.unset(rest.trim()), false);
        }
        if let Some(rest) = trimmed.strip_prefix("set ") {
            let rest = rest.trim();
            return match rest.split_once(char::is_whitespace) {
                Some((field, value)) => (self.set(field, value.trim()), false),
                None => (vec!["error: usage: set <field> <value>".to_string()], false),
            };
        }
        if let Some((field, value)) = trimmed.split_once('=') {
            return (self.set(field.trim(), value.trim()), false);
        }
        (
            vec![format!(
                "error: unrecognized input '{trimmed}' (try :help)"
            )],
            false,
        )
    }

    fn handle_command(&mut self, cmd: &str) -> (Vec<String>, bool) {
        match cmd {
            ":help" => (
                vec![
                    "commands: :show, :fields, :reset, :submit, :help, :quit".to_string(),
                    "edit: set <field> <value> | <field> = <value> | unset <field>".to_string(),
                ],
                false,
            ),
            ":q" | ":quit" | ":exit" => (Vec::new(), true),
            ":show" => (self.show(), false),
            ":fields" => (fields_help(), false),
            ":reset" => {
                self.form.reset();
                (vec!["all inputs cleared".to_string()], false)
            }
            ":submit" => (self.submit(), false),
            other => (vec![format!("error: unknown command '{other}'")], false),
        }
    }

    fn set(&mut self, field: &str, value: &str) -> Vec<String> {
        let key = match field.parse::<FieldKey>() {
            Ok(k) => k,
            Err(e) => return vec![format!("error: {e}")],
        };
        match self.form.set(key, value) {
            Ok(()) => vec![format!("{}: {}", key.label(), self.form.display_value(key))],
            Err(e) => {
                log::warn!("rejected edit: {e}");
                vec![format!("error: {e}")]
            }
        }
    }

    fn unset(&mut self, field: &str) -> Vec<String> {
        match field.parse::<FieldKey>() {
            Ok(key) => {
                self.form.unset(key);
                vec![format!("{}: {}", key.label(), self.form.display_value(key))]
            }
            Err(e) => vec![format!("error: {e}")],
        }
    }

    fn show(&self) -> Vec<String> {
        FieldKey::ALL
            .iter()
            .map(|&key| format!("{:<20} {}", key.label(), self.form.display_value(key)))
            .collect()
    }

    fn submit(&self) -> Vec<String> {
        let outcome = self.service.submit(&self.form);
        let mut out = Vec::new();
        match &outcome {
            SubmissionOutcome::Invalid(e @ ValidationError::MissingSelection { fields }) => {
                out.push(format!("warning: {e}"));
                let names: Vec<&str> = fields.iter().map(|k| k.label()).collect();
                out.push(format!("missing: {}", names.join(", ")));
            }
            SubmissionOutcome::Invalid(e) => out.push(format!("error: {e}")),
            SubmissionOutcome::Predicted(p) => out.push(p.category.to_string()),
            SubmissionOutcome::InferenceFailed(e) => out.push(format!("inference error: {e}")),
        }
        out
    }
}

/// One line per field: key, label and accepted values.
pub fn fields_help() -> Vec<String> {
    FieldKey::ALL
        .iter()
        .map(|key| {
            let spec = key.spec();
            let accepts = match spec.kind {
                FieldKind::Categorical { domain, .. } => domain.join(" | "),
                FieldKind::Integer { default } => {
                    format!("whole number of months (default {default})")
                }
                FieldKind::NumericText { placeholder } => format!("amount, {placeholder}"),
            };
            format!("{:<15} {:<20} {}", key.as_str(), spec.label, accepts)
        })
        .collect()
}
