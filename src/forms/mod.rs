//! Form definitions backing the dashboard's creation and edit modals.
//!
//! Every form is deserialized from the urlencoded body, then converted into a
//! typed payload with `TryFrom`. Conversion checks every field and reports all
//! failures at once, keyed by field name, so the modal can show them next to
//! the inputs.

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;
use validator::ValidationErrors;

use crate::domain::types::TypeConstraintError;

pub mod codigo_descuento;
pub mod convenio;
pub mod empresa;
pub mod pasajero;

/// Date format produced by `<input type="date">`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid fields: {0}")]
    Fields(FieldErrors),
}

impl FormError {
    /// Per-field messages, whichever way the form was rejected.
    pub fn into_field_errors(self) -> FieldErrors {
        match self {
            FormError::Validation(errors) => FieldErrors::from(&errors),
            FormError::Fields(errors) => errors,
        }
    }
}

/// Validation messages keyed by form field name.
///
/// Only the first message recorded for a field is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Keeps `result`'s value, or records `message` for `field` and drops it.
    pub fn check<T>(
        &mut self,
        field: &str,
        result: Result<T, TypeConstraintError>,
        message: &str,
    ) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                log::debug!("Rejected form field {field}: {err}");
                self.add(field, message);
                None
            }
        }
    }

    /// Fails with [`FormError::Fields`] when any message was recorded.
    pub fn finish(self) -> Result<(), FormError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(FormError::Fields(self))
        }
    }
}

impl Display for FieldErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, message) in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

impl From<&ValidationErrors> for FieldErrors {
    fn from(errors: &ValidationErrors) -> Self {
        let mut fields = FieldErrors::new();
        for (field, errs) in errors.field_errors() {
            for err in errs {
                let message = err
                    .message
                    .as_ref()
                    .map(|message| message.to_string())
                    .unwrap_or_else(|| "Valor inválido".to_string());
                fields.add(field.as_ref(), message);
            }
        }
        fields
    }
}

/// Trims an optional input, treating blank values as absent.
pub(crate) fn non_blank(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// Parses a `YYYY-MM-DD` date, recording `message` for `field` on failure.
pub(crate) fn parse_date(
    errors: &mut FieldErrors,
    field: &str,
    value: &str,
    message: &str,
) -> Option<NaiveDate> {
    match NaiveDate::parse_from_str(value.trim(), DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(_) => {
            errors.add(field, message);
            None
        }
    }
}

/// Parses a whole number of pesos, accepting thousands separators.
pub(crate) fn parse_amount(value: &str) -> Option<i64> {
    let digits: String = value
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| !matches!(c, '.' | ',' | ' '))
        .collect();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}
