//! Min-max normalization against reference-dataset bounds

use log::{debug, warn};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum NormalizeError {
    #[error("feature '{feature}' has min == max ({value}); cannot rescale")]
    DegenerateFeature { feature: String, value: f64 },
    #[error("feature '{feature}' has min {min} greater than max {max}")]
    InvertedBounds { feature: String, min: f64, max: f64 },
    #[error("feature '{0}' has a non-finite bound")]
    NonFiniteBound(String),
    #[error("bounds length mismatch: {names} names, {mins} mins, {maxs} maxs")]
    ShapeMismatch {
        names: usize,
        mins: usize,
        maxs: usize,
    },
    #[error("input length {actual} != bounds length {expected}")]
    LengthMismatch { expected: usize, actual: usize },
}

/// Per-feature (min, max) pairs, in feature order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizationBounds {
    names: Vec<String>,
    min: Vec<f64>,
    max: Vec<f64>,
}

/// One row of [`NormalizationBounds::iter`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureBound<'a> {
    pub name: &'a str,
    pub min: f64,
    pub max: f64,
}

impl NormalizationBounds {
    /// Build bounds, rejecting any feature whose range is empty or inverted.
    pub fn new(names: Vec<String>, min: Vec<f64>, max: Vec<f64>) -> Result<Self, NormalizeError> {
        if names.len() != min.len() || names.len() != max.len() {
            return Err(NormalizeError::ShapeMismatch {
                names: names.len(),
                mins: min.len(),
                maxs: max.len(),
            });
        }
        for ((name, &lo), &hi) in names.iter().zip(min.iter()).zip(max.iter()) {
            if !lo.is_finite() || !hi.is_finite() {
                return Err(NormalizeError::NonFiniteBound(name.clone()));
            }
            if lo > hi {
                return Err(NormalizeError::InvertedBounds {
                    feature: name.clone(),
                    min: lo,
                    max: hi,
                });
            }
            if lo == hi {
                return Err(NormalizeError::DegenerateFeature {
                    feature: name.clone(),
                    value: lo,
                });
            }
        }
        debug!("normalization bounds ready for {} features", names.len());
        Ok(Self { names, min, max })
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn min(&self) -> &[f64] {
        &self.min
    }

    pub fn max(&self) -> &[f64] {
        &self.max
    }

    pub fn iter(&self) -> impl Iterator<Item = FeatureBound<'_>> {
        self.names
            .iter()
            .zip(self.min.iter().zip(self.max.iter()))
            .map(|(name, (&min, &max))| FeatureBound {
                name: name.as_str(),
                min,
                max,
            })
    }

    /// Rescale `(v - min) / (max - min)` elementwise. Values outside the
    /// reference range are not clamped.
    pub fn normalize(&self, raw: &[f64]) -> Result<Vec<f64>, NormalizeError> {
        self.check_len(raw)?;
        for name in self.out_of_range(raw) {
            warn!("{name} lies outside the reference range; normalized value will leave [0, 1]");
        }
        Ok(raw
            .iter()
            .zip(self.min.iter().zip(self.max.iter()))
            .map(|(v, (lo, hi))| (v - lo) / (hi - lo))
            .collect())
    }

    /// Names of features whose raw value falls below min or above max
    pub fn out_of_range<'a>(&'a self, raw: &[f64]) -> Vec<&'a str> {
        self.iter()
            .zip(raw.iter())
            .filter(|(b, &v)| v < b.min || v > b.max)
            .map(|(b, _)| b.name)
            .collect()
    }

    fn check_len(&self, raw: &[f64]) -> Result<(), NormalizeError> {
        if raw.len() != self.len() {
            return Err(NormalizeError::LengthMismatch {
                expected: self.len(),
                actual: raw.len(),
            });
        }
        Ok(())
    }
}
