use serde::Serialize;
use std::collections::BTreeMap;
use validator::{ValidationError, ValidationErrors};

use crate::models::speciality::Speciality;

pub const NON_FIELD_ERRORS: &str = "__all__";
pub const REQUIRED: &str = "This field is required.";
pub const NOT_A_NUMBER: &str = "Enter a whole number.";

/// Field name to messages, in field order. Non-field errors live under
/// [`NON_FIELD_ERRORS`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormErrors(BTreeMap<String, Vec<String>>);

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_validation(result: Result<(), ValidationErrors>) -> Self {
        match result {
            Ok(()) => Self::new(),
            Err(errors) => errors.into(),
        }
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn add_non_field(&mut self, message: impl Into<String>) {
        self.add(NON_FIELD_ERRORS, message);
    }

    /// A blank value (empty or whitespace only) replaces whatever else was
    /// reported for the field with the single "required" message.
    pub fn require(&mut self, field: &str, value: &str) -> bool {
        if value.trim().is_empty() {
            self.0.insert(field.to_string(), vec![REQUIRED.to_string()]);
            return false;
        }
        true
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn finish<T>(self, value: T) -> Result<T, FormErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }

    /// Parses an integer field. `None` means absent-and-optional or invalid;
    /// invalid values leave a message behind.
    pub fn integer(&mut self, field: &str, raw: &str, min: i32, required: bool) -> Option<i32> {
        let raw = raw.trim();
        if raw.is_empty() {
            if required {
                self.add(field, REQUIRED);
            }
            return None;
        }
        match raw.parse::<i32>() {
            Ok(value) if value < min => {
                self.add(
                    field,
                    format!("Ensure this value is greater than or equal to {}.", min),
                );
                None
            }
            Ok(value) => Some(value),
            Err(_) => {
                self.add(field, NOT_A_NUMBER);
                None
            }
        }
    }

    /// Resolves a speciality select value against the stored specialities.
    pub fn speciality(&mut self, field: &str, code: &str, choices: &[Speciality]) -> Option<i64> {
        if !self.require(field, code) {
            return None;
        }
        match choices.iter().find(|speciality| speciality.code == code) {
            Some(speciality) => Some(speciality.id),
            None => {
                self.add(field, invalid_choice(code));
                None
            }
        }
    }

    /// Parses a required select value. `parse` accepts only the codes the
    /// form offers.
    pub fn choice<T>(
        &mut self,
        field: &str,
        raw: &str,
        parse: impl Fn(&str) -> Option<T>,
    ) -> Option<T> {
        if !self.require(field, raw) {
            return None;
        }
        match parse(raw) {
            Some(value) => Some(value),
            None => {
                self.add(field, invalid_choice(raw));
                None
            }
        }
    }
}

/// Submitted text is compared and stored without surrounding whitespace.
pub fn strip(value: &str) -> String {
    value.trim().to_string()
}

/// Result of a form submission that reached the service layer. Storage
/// failures travel separately as `crate::error::Error`.
#[derive(Debug)]
pub enum Submitted<T> {
    Saved(T),
    Invalid(FormErrors),
}

pub fn invalid_choice(value: &str) -> String {
    format!(
        "Select a valid choice. {} is not one of the available choices.",
        value
    )
}

fn describe(error: &ValidationError) -> String {
    if let Some(message) = &error.message {
        return message.to_string();
    }
    match &*error.code {
        "email" => "Enter a valid email address.".to_string(),
        "url" => "Enter a valid URL.".to_string(),
        "length" => "Ensure this value has a valid length.".to_string(),
        "range" => "Ensure this value is within the allowed range.".to_string(),
        other => format!("Invalid value ({}).", other),
    }
}

impl From<ValidationErrors> for FormErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut out = FormErrors::new();
        for (field, field_errors) in errors.field_errors() {
            let field = field.to_string();
            for error in field_errors.iter() {
                out.add(&field, describe(error));
            }
        }
        out
    }
}
