//! Breast tumor classification over the 30 Wisconsin diagnostic features
//!
//! Raw measurements are min-max normalized against bounds derived from a
//! reference dataset, then scored by a logistic-regression model
//! (`p = sigmoid(w·x + b)`). Probabilities strictly above 0.5 are malignant.

pub mod classifier;
pub mod dataset;
pub mod features;
pub mod input;
pub mod metrics;
pub mod normalize;
pub mod pipeline;

pub use classifier::{
    sigmoid, Diagnosis, LogisticModel, ModelError, Prediction, DECISION_THRESHOLD,
};
pub use dataset::{DatasetError, ReferenceDataset};
pub use features::{
    catalogue, feature_names, lookup, FeatureGroup, FeatureInfo, FEATURE_COUNT,
};
pub use input::{parse_field, parse_fields, FormInput, InputError};
pub use metrics::{ConfusionMatrix, Evaluation};
pub use normalize::{FeatureBound, NormalizationBounds, NormalizeError};
pub use pipeline::{ClassifierError, TumorClassifier};
