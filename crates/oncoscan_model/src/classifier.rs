//! Logistic-regression forward pass: z = w·x + b, p = sigmoid(z)

use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::read_to_string;
use std::path::Path;
use thiserror::Error;

/// Probabilities strictly above this are malignant
pub const DECISION_THRESHOLD: f64 = 0.5;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("cannot read model file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("malformed model file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid model parameters: {0}")]
    InvalidParameters(String),
    #[error("input length {actual} != weights length {expected}")]
    InputLength { expected: usize, actual: usize },
}

/// Logistic function.
///
/// Saturates in `f64`: the result is exactly `1.0` once `z` exceeds about 37
/// and exactly `0.0` below about -709.8, where `exp(-z)` overflows.
pub fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Diagnosis {
    Benign,
    Malignant,
}

impl Diagnosis {
    pub fn from_probability(p: f64) -> Self {
        if p > DECISION_THRESHOLD {
            Diagnosis::Malignant
        } else {
            Diagnosis::Benign
        }
    }

    /// Single-letter code used by the reference dataset
    pub fn code(&self) -> char {
        match self {
            Diagnosis::Benign => 'B',
            Diagnosis::Malignant => 'M',
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "B" => Some(Diagnosis::Benign),
            "M" => Some(Diagnosis::Malignant),
            _ => None,
        }
    }

    pub fn is_malignant(&self) -> bool {
        matches!(self, Diagnosis::Malignant)
    }
}

impl fmt::Display for Diagnosis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnosis::Benign => write!(f, "Benign (Non-cancerous)"),
            Diagnosis::Malignant => write!(f, "Malignant (Cancerous)"),
        }
    }
}

/// Outcome of one forward pass
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction {
    pub z: f64,
    pub probability: f64,
    pub diagnosis: Diagnosis,
}

impl Prediction {
    pub fn from_score(z: f64) -> Self {
        let probability = sigmoid(z);
        Self {
            z,
            probability,
            diagnosis: Diagnosis::from_probability(probability),
        }
    }

    /// Raw malignancy probability as a percentage, whatever the class.
    pub fn confidence_percent(&self) -> f64 {
        self.probability * 100.0
    }

    pub fn confidence_label(&self) -> String {
        format!("{:.2}%", self.confidence_percent())
    }
}

/// A weight list as exported either flat or as an (n, 1) column
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum WeightRepr {
    Flat(Vec<f64>),
    Column(Vec<Vec<f64>>),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum BiasRepr {
    Scalar(f64),
    Nested(Vec<Vec<f64>>),
}

#[derive(Debug, Clone, Deserialize)]
struct ModelFile {
    weight: WeightRepr,
    bias: BiasRepr,
}

/// Weight vector plus scalar bias
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogisticModel {
    weight: Vec<f64>,
    bias: f64,
}

impl LogisticModel {
    pub fn new(weight: Vec<f64>, bias: f64) -> Result<Self, ModelError> {
        if weight.is_empty() {
            return Err(ModelError::InvalidParameters("weight vector is empty".into()));
        }
        if let Some(i) = weight.iter().position(|w| !w.is_finite()) {
            return Err(ModelError::InvalidParameters(format!(
                "weight[{i}] is not finite"
            )));
        }
        if !bias.is_finite() {
            return Err(ModelError::InvalidParameters("bias is not finite".into()));
        }
        Ok(Self { weight, bias })
    }

    pub fn from_json(text: &str) -> Result<Self, ModelError> {
        let file: ModelFile = serde_json::from_str(text)?;
        let weight = match file.weight {
            WeightRepr::Flat(w) => w,
            WeightRepr::Column(rows) => {
                if rows.iter().any(|r| r.len() != 1) {
                    return Err(ModelError::InvalidParameters(
                        "weight must be a flat list or an (n, 1) column".into(),
                    ));
                }
                rows.into_iter().flatten().collect()
            }
        };
        let bias = match file.bias {
            BiasRepr::Scalar(b) => b,
            BiasRepr::Nested(rows) => match rows.as_slice() {
                [row] if row.len() == 1 => row[0],
                _ => {
                    return Err(ModelError::InvalidParameters(
                        "bias must be a scalar or a 1x1 array".into(),
                    ))
                }
            },
        };
        Self::new(weight, bias)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let text = read_to_string(path).map_err(|source| ModelError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let model = Self::from_json(&text)?;
        debug!(
            "loaded model from {} ({} weights, bias {})",
            path.display(),
            model.weight.len(),
            model.bias
        );
        Ok(model)
    }

    pub fn weight(&self) -> &[f64] {
        &self.weight
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }

    pub fn len(&self) -> usize {
        self.weight.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weight.is_empty()
    }

    /// Linear score `w·x + b`
    pub fn score(&self, features: &[f64]) -> Result<f64, ModelError> {
        if features.len() != self.weight.len() {
            return Err(ModelError::InputLength {
                expected: self.weight.len(),
                actual: features.len(),
            });
        }
        let dot: f64 = features
            .iter()
            .zip(self.weight.iter())
            .map(|(x, w)| x * w)
            .sum();
        Ok(dot + self.bias)
    }

    pub fn predict(&self, features: &[f64]) -> Result<Prediction, ModelError> {
        Ok(Prediction::from_score(self.score(features)?))
    }
}
