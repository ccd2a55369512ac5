//! # Forms
//!
//! Field values with per-field validation rules, touched tracking and a
//! submit gate. Errors show for a field once it has been blurred or the
//! form has been submitted.

use std::collections::{BTreeMap, BTreeSet};

use super::validation::ValidationResult;

type Check = Box<dyn Fn(&str) -> ValidationResult + Send + Sync>;

/// One check on one field. Rules for a field run in order; the first
/// failure wins.
pub struct ValidationRule {
    field: String,
    check: Check,
}

impl ValidationRule {
    /// Rule from a predicate and a fixed message.
    pub fn new(
        field: impl Into<String>,
        predicate: impl Fn(&str) -> bool + Send + Sync + 'static,
        message: impl Into<String>,
    ) -> Self {
        let message = message.into();
        Self {
            field: field.into(),
            check: Box::new(move |value| {
                if predicate(value) {
                    ValidationResult::ok()
                } else {
                    ValidationResult::err(message.clone())
                }
            }),
        }
    }

    /// Rule from a validator that produces its own message.
    pub fn check(
        field: impl Into<String>,
        validator: impl Fn(&str) -> ValidationResult + Send + Sync + 'static,
    ) -> Self {
        Self {
            field: field.into(),
            check: Box::new(validator),
        }
    }
}

pub struct Form {
    initial: BTreeMap<String, String>,
    values: BTreeMap<String, String>,
    errors: BTreeMap<String, String>,
    touched: BTreeSet<String>,
    rules: Vec<ValidationRule>,
    is_submitting: bool,
}

impl std::fmt::Debug for Form {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Form")
            .field("values", &self.values.keys().collect::<Vec<_>>())
            .field("errors", &self.errors)
            .field("touched", &self.touched)
            .field("is_submitting", &self.is_submitting)
            .finish()
    }
}

impl Form {
    /// Form with the given fields, all initially empty.
    pub fn new(fields: &[&str], rules: Vec<ValidationRule>) -> Self {
        let initial: BTreeMap<String, String> = fields
            .iter()
            .map(|f| (f.to_string(), String::new()))
            .collect();
        Self {
            values: initial.clone(),
            initial,
            errors: BTreeMap::new(),
            touched: BTreeSet::new(),
            rules,
            is_submitting: false,
        }
    }

    pub fn value(&self, field: &str) -> &str {
        self.values.get(field).map(String::as_str).unwrap_or("")
    }

    pub fn values(&self) -> &BTreeMap<String, String> {
        &self.values
    }

    /// Error currently shown for a field
    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors
            .get(field)
            .map(String::as_str)
            .filter(|e| !e.is_empty())
    }

    pub fn is_touched(&self, field: &str) -> bool {
        self.touched.contains(field)
    }

    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    /// First failing rule's message for `value`, if any.
    pub fn validate_field(&self, field: &str, value: &str) -> Option<String> {
        self.rules
            .iter()
            .filter(|rule| rule.field == field)
            .find_map(|rule| (rule.check)(value).into_result().err())
    }

    /// Revalidate every field; true when all pass.
    pub fn validate(&mut self) -> bool {
        let errors: BTreeMap<String, String> = self
            .values
            .iter()
            .filter_map(|(field, value)| {
                self.validate_field(field, value)
                    .map(|error| (field.clone(), error))
            })
            .collect();
        let valid = errors.is_empty();
        self.errors = errors;
        valid
    }

    pub fn change(&mut self, field: &str, value: impl Into<String>) {
        let value = value.into();
        if self.touched.contains(field) {
            let error = self.validate_field(field, &value).unwrap_or_default();
            self.errors.insert(field.to_string(), error);
        }
        self.values.insert(field.to_string(), value);
    }

    pub fn blur(&mut self, field: &str) {
        self.touched.insert(field.to_string());
        let error = self
            .validate_field(field, self.value(field))
            .unwrap_or_default();
        self.errors.insert(field.to_string(), error);
    }

    /// Touch every field and validate. When valid, marks the form as
    /// submitting and hands the values to `on_submit`.
    pub fn submit<R>(&mut self, on_submit: impl FnOnce(&BTreeMap<String, String>) -> R) -> Option<R> {
        self.touched = self.values.keys().cloned().collect();
        if !self.validate() {
            return None;
        }
        self.is_submitting = true;
        Some(on_submit(&self.values))
    }

    /// Submission finished (successfully or not)
    pub fn finish_submit(&mut self) {
        self.is_submitting = false;
    }

    pub fn reset(&mut self) {
        self.values = self.initial.clone();
        self.errors.clear();
        self.touched.clear();
        self.is_submitting = false;
    }
}
