//! Reference dataset loader
//!
//! Reads the tabular breast-cancer dataset, drops the identifier, label and
//! unnamed filler columns, and keeps the feature columns in file order.

use crate::classifier::Diagnosis;
use crate::features::feature_names;
use crate::normalize::{NormalizationBounds, NormalizeError};
use log::{debug, info, warn};
use std::fs::read_to_string;
use std::path::Path;
use thiserror::Error;

pub const ID_COLUMN: &str = "id";
pub const LABEL_COLUMN: &str = "diagnosis";

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("cannot read dataset {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("dataset has no header row")]
    MissingHeader,
    #[error("dataset is missing required column '{0}'")]
    MissingColumn(String),
    #[error("dataset has no feature columns")]
    NoFeatures,
    #[error("dataset has no rows")]
    Empty,
    #[error("line {line}: expected {expected} cells, found {found}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("line {line}: column '{column}' has non-numeric value '{value}'")]
    InvalidCell {
        line: usize,
        column: String,
        value: String,
    },
    #[error("line {line}: unknown diagnosis label '{value}'")]
    InvalidLabel { line: usize, value: String },
    #[error(transparent)]
    Bounds(#[from] NormalizeError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnRole {
    Dropped,
    Label,
    Feature,
}

fn role_of(name: &str) -> ColumnRole {
    if name == LABEL_COLUMN {
        ColumnRole::Label
    } else if name == ID_COLUMN || name.is_empty() || name.starts_with("Unnamed:") {
        ColumnRole::Dropped
    } else {
        ColumnRole::Feature
    }
}

/// Split one CSV record; double-quoted cells may contain commas and `""`.
fn split_record(line: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut cur = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                cur.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => cells.push(std::mem::take(&mut cur)),
            _ => cur.push(ch),
        }
    }
    cells.push(cur);
    cells.iter_mut().for_each(|c| *c = c.trim().to_string());
    cells
}

/// Label text as read, checked only when labels are asked for
#[derive(Debug, Clone, PartialEq)]
struct LabelCell {
    line: usize,
    raw: String,
}

/// Feature matrix and labels of the reference dataset
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceDataset {
    feature_names: Vec<String>,
    rows: Vec<Vec<f64>>,
    labels: Option<Vec<LabelCell>>,
}

impl ReferenceDataset {
    /// Parse the CSV text. Labels are kept as text; only the feature
    /// columns must be valid here.
    pub fn parse(text: &str) -> Result<Self, DatasetError> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(i, l)| (i + 1, l.trim_end_matches('\r')))
            .filter(|(_, l)| !l.trim().is_empty());

        let (_, header_line) = lines.next().ok_or(DatasetError::MissingHeader)?;
        let header = split_record(header_line);
        let roles: Vec<ColumnRole> = header.iter().map(|h| role_of(h)).collect();

        let label_idx = roles.iter().position(|r| *r == ColumnRole::Label);
        let feature_idx: Vec<usize> = roles
            .iter()
            .enumerate()
            .filter(|(_, r)| **r == ColumnRole::Feature)
            .map(|(i, _)| i)
            .collect();
        if feature_idx.is_empty() {
            return Err(DatasetError::NoFeatures);
        }
        let feature_names: Vec<String> = feature_idx.iter().map(|&i| header[i].clone()).collect();

        let mut rows = Vec::new();
        let mut labels = Vec::new();
        for (line, record) in lines {
            let mut cells = split_record(record);
            // a trailing comma adds one empty cell past the header
            if cells.len() == header.len() + 1 && cells.last().is_some_and(|c| c.is_empty()) {
                cells.pop();
            }
            if cells.len() != header.len() {
                return Err(DatasetError::RaggedRow {
                    line,
                    expected: header.len(),
                    found: cells.len(),
                });
            }
            let mut row = Vec::with_capacity(feature_idx.len());
            for &i in &feature_idx {
                let value = cells[i]
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| DatasetError::InvalidCell {
                        line,
                        column: header[i].clone(),
                        value: cells[i].clone(),
                    })?;
                row.push(value);
            }
            rows.push(row);
            if let Some(idx) = label_idx {
                labels.push(LabelCell {
                    line,
                    raw: std::mem::take(&mut cells[idx]),
                });
            }
        }
        if rows.is_empty() {
            return Err(DatasetError::Empty);
        }
        debug!(
            "parsed reference dataset: {} rows x {} features",
            rows.len(),
            feature_names.len()
        );
        Ok(Self {
            feature_names,
            rows,
            labels: label_idx.map(|_| labels),
        })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let text = read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let ds = Self::parse(&text)?;
        if !ds.matches_catalogue() {
            warn!(
                "{} columns differ from the standard 30-feature layout; using file order",
                path.display()
            );
        }
        info!("loaded {} reference rows from {}", ds.len(), path.display());
        Ok(ds)
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Decode the `M` / `B` labels, failing on the first other value
    pub fn labels(&self) -> Result<Vec<Diagnosis>, DatasetError> {
        let cells = self
            .labels
            .as_ref()
            .ok_or_else(|| DatasetError::MissingColumn(LABEL_COLUMN.to_string()))?;
        cells
            .iter()
            .map(|c| {
                Diagnosis::from_code(&c.raw).ok_or_else(|| DatasetError::InvalidLabel {
                    line: c.line,
                    value: c.raw.clone(),
                })
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// True when the columns are exactly the standard 30 features in order
    pub fn matches_catalogue(&self) -> bool {
        self.feature_names == feature_names()
    }

    /// Column-wise min and max over all rows
    pub fn bounds(&self) -> Result<NormalizationBounds, DatasetError> {
        let n = self.feature_names.len();
        let mut min = vec![f64::INFINITY; n];
        let mut max = vec![f64::NEG_INFINITY; n];
        for row in &self.rows {
            for (j, &v) in row.iter().enumerate() {
                min[j] = min[j].min(v);
                max[j] = max[j].max(v);
            }
        }
        Ok(NormalizationBounds::new(
            self.feature_names.clone(),
            min,
            max,
        )?)
    }
}
