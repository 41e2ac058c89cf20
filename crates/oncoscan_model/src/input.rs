//! Free-text form input and fail-fast numeric parsing

use crate::features::{feature_names, lookup, DEFAULT_FIELD_TEXT};
use thiserror::Error;

/// Errors raised while reading the form
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Invalid input for {feature}. Please enter a number.")]
    NotANumber { feature: String, raw: String },
    #[error("Unknown feature: {0}")]
    UnknownFeature(String),
    #[error("expected {expected} fields, got {actual}")]
    FieldCount { expected: usize, actual: usize },
}

/// Parse one field. Surrounding whitespace is ignored; NaN and infinities
/// are rejected along with anything that is not a number.
pub fn parse_field(feature: &str, raw: &str) -> Result<f64, InputError> {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(InputError::NotANumber {
            feature: feature.to_string(),
            raw: raw.to_string(),
        }),
    }
}

/// Parse all fields in order, stopping at the first invalid one.
pub fn parse_fields<S: AsRef<str>>(names: &[String], raw: &[S]) -> Result<Vec<f64>, InputError> {
    if names.len() != raw.len() {
        return Err(InputError::FieldCount {
            expected: names.len(),
            actual: raw.len(),
        });
    }
    names
        .iter()
        .zip(raw.iter())
        .map(|(name, text)| parse_field(name, text.as_ref()))
        .collect()
}

/// The form: one raw text per feature, in feature order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormInput {
    names: Vec<String>,
    values: Vec<String>,
}

impl FormInput {
    /// A form over the given feature names with every field at `0.0`
    pub fn new(names: Vec<String>) -> Self {
        let values = vec![DEFAULT_FIELD_TEXT.to_string(); names.len()];
        Self { names, values }
    }

    /// A form over the canonical 30 features
    pub fn with_default_features() -> Self {
        Self::new(feature_names())
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.position(name).map(|i| self.values[i].as_str())
    }

    /// Replace the text of one field
    pub fn set(&mut self, name: &str, text: impl Into<String>) -> Result<(), InputError> {
        let idx = self
            .position(name)
            .ok_or_else(|| InputError::UnknownFeature(name.to_string()))?;
        self.values[idx] = text.into();
        Ok(())
    }

    /// Parse every field; the first non-numeric one halts the run
    pub fn parse(&self) -> Result<Vec<f64>, InputError> {
        parse_fields(&self.names, &self.values)
    }

    /// Exact column name first, then the catalogue spelling of `name`
    fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name).or_else(|| {
            let canonical = &lookup(name)?.name;
            self.names.iter().position(|n| n == canonical)
        })
    }
}
