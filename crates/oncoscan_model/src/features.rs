//! Feature catalogue for the Wisconsin Diagnostic Breast Cancer measurements
//!
//! Ten base measurements are recorded per tumor, each summarised three ways
//! (mean, standard error, worst), giving 30 features in a fixed column order.

use lazy_static::lazy_static;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Number of features the classifier consumes
pub const FEATURE_COUNT: usize = 30;

/// Text every form field starts with
pub const DEFAULT_FIELD_TEXT: &str = "0.0";

/// Base measurements with their plain-language descriptions
pub const MEASUREMENTS: [(&str, &str); 10] = [
    ("radius", "Average distance from center to edge"),
    ("texture", "Variation in pixel intensities"),
    ("perimeter", "Average perimeter of tumor"),
    ("area", "Size of tumor area"),
    ("smoothness", "Edge smoothness"),
    ("compactness", "Compact shape of tumor"),
    ("concavity", "Depth of concave portions"),
    ("concave points", "Number of concave points"),
    ("symmetry", "Symmetry of tumor"),
    ("fractal_dimension", "Complexity of tumor boundary"),
];

/// How a base measurement is summarised across the cell nuclei of a sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FeatureGroup {
    Mean,
    StandardError,
    Worst,
}

impl FeatureGroup {
    pub const ALL: [FeatureGroup; 3] = [
        FeatureGroup::Mean,
        FeatureGroup::StandardError,
        FeatureGroup::Worst,
    ];

    /// Column suffix used by the reference dataset
    pub fn suffix(&self) -> &'static str {
        match self {
            FeatureGroup::Mean => "mean",
            FeatureGroup::StandardError => "se",
            FeatureGroup::Worst => "worst",
        }
    }

    pub fn summary(&self) -> &'static str {
        match self {
            FeatureGroup::Mean => "Average of each measurement over the sample",
            FeatureGroup::StandardError => {
                "Measure of uncertainty/variance in the mean features"
            }
            FeatureGroup::Worst => {
                "Maximum abnormal values; the most severe observations seen in the tumor"
            }
        }
    }
}

impl fmt::Display for FeatureGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureGroup::Mean => write!(f, "Mean Features"),
            FeatureGroup::StandardError => write!(f, "Standard Error Features"),
            FeatureGroup::Worst => write!(f, "Worst Features"),
        }
    }
}

/// One entry of the catalogue
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureInfo {
    pub index: usize,
    pub name: String,
    pub measurement: &'static str,
    pub group: FeatureGroup,
    pub description: &'static str,
}

lazy_static! {
    static ref CATALOGUE: Vec<FeatureInfo> = {
        let mut out = Vec::with_capacity(FEATURE_COUNT);
        for group in FeatureGroup::ALL {
            for (measurement, description) in MEASUREMENTS {
                out.push(FeatureInfo {
                    index: out.len(),
                    name: format!("{measurement}_{}", group.suffix()),
                    measurement,
                    group,
                    description,
                });
            }
        }
        out
    };
    static ref INDEX_BY_NAME: HashMap<String, usize> = CATALOGUE
        .iter()
        .map(|info| (fold_name(&info.name), info.index))
        .collect();
}

/// All 30 features in dataset column order
pub fn catalogue() -> &'static [FeatureInfo] {
    &CATALOGUE
}

/// Canonical feature names in dataset column order
pub fn feature_names() -> Vec<String> {
    CATALOGUE.iter().map(|info| info.name.clone()).collect()
}

fn fold_name(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| match c {
            ' ' | '-' => '_',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}

/// Look up a feature by its column name, e.g. `concave points_worst`.
/// Case, spaces, hyphens and underscores are interchangeable, so
/// `concave_points_worst` and `Concave-Points_Worst` match too.
pub fn lookup(name: &str) -> Option<&'static FeatureInfo> {
    INDEX_BY_NAME.get(&fold_name(name)).map(|&idx| &CATALOGUE[idx])
}
