//! Normalizer and logistic model assembled into one classifier

use crate::classifier::{LogisticModel, ModelError, Prediction};
use crate::dataset::{DatasetError, ReferenceDataset};
use crate::input::{FormInput, InputError};
use crate::metrics::{ConfusionMatrix, Evaluation};
use crate::normalize::{NormalizationBounds, NormalizeError};
use log::{debug, info};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("model has {weights} weights but bounds cover {bounds} features")]
    FeatureCountMismatch { weights: usize, bounds: usize },
    #[error("form fields do not match the reference features")]
    FormMismatch,
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Normalize(#[from] NormalizeError),
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error(transparent)]
    Dataset(#[from] DatasetError),
}

impl ClassifierError {
    /// True for errors caused by what the user typed rather than by startup data
    pub fn is_user_input(&self) -> bool {
        matches!(self, ClassifierError::Input(_))
    }
}

/// Immutable model parameters plus normalization bounds
#[derive(Debug, Clone)]
pub struct TumorClassifier {
    model: LogisticModel,
    bounds: NormalizationBounds,
}

impl TumorClassifier {
    pub fn new(model: LogisticModel, bounds: NormalizationBounds) -> Result<Self, ClassifierError> {
        if model.len() != bounds.len() {
            return Err(ClassifierError::FeatureCountMismatch {
                weights: model.len(),
                bounds: bounds.len(),
            });
        }
        Ok(Self { model, bounds })
    }

    /// Load the model file and derive bounds from the reference dataset.
    /// Returns the dataset as well so callers can evaluate against it.
    pub fn load(
        model_path: impl AsRef<Path>,
        dataset_path: impl AsRef<Path>,
    ) -> Result<(Self, ReferenceDataset), ClassifierError> {
        let model = LogisticModel::load(model_path)?;
        let dataset = ReferenceDataset::load(dataset_path)?;
        let bounds = dataset.bounds()?;
        let classifier = Self::new(model, bounds)?;
        info!(
            "classifier ready: {} features, bias {}",
            classifier.feature_count(),
            classifier.model.bias()
        );
        Ok((classifier, dataset))
    }

    pub fn model(&self) -> &LogisticModel {
        &self.model
    }

    pub fn bounds(&self) -> &NormalizationBounds {
        &self.bounds
    }

    pub fn feature_count(&self) -> usize {
        self.bounds.len()
    }

    pub fn feature_names(&self) -> &[String] {
        self.bounds.names()
    }

    /// An empty form over this classifier's features
    pub fn blank_form(&self) -> FormInput {
        FormInput::new(self.feature_names().to_vec())
    }

    /// Normalize raw measurements and run the forward pass
    pub fn classify(&self, raw: &[f64]) -> Result<Prediction, ClassifierError> {
        let normalized = self.bounds.normalize(raw)?;
        let prediction = self.model.predict(&normalized)?;
        debug!(
            "z = {:.6}, p = {:.6} -> {:?}",
            prediction.z, prediction.probability, prediction.diagnosis
        );
        Ok(prediction)
    }

    /// Parse every field (halting at the first invalid one), then classify
    pub fn classify_form(&self, form: &FormInput) -> Result<Prediction, ClassifierError> {
        if form.names() != self.feature_names() {
            return Err(ClassifierError::FormMismatch);
        }
        let raw = form.parse()?;
        self.classify(&raw)
    }

    /// Score every reference row against its recorded label. This is the
    /// only place the label column has to hold valid `M` / `B` codes.
    pub fn evaluate(&self, dataset: &ReferenceDataset) -> Result<Evaluation, ClassifierError> {
        let labels = dataset.labels()?;
        let mut confusion = ConfusionMatrix::default();
        for (row, label) in dataset.rows().iter().zip(labels) {
            let prediction = self.classify(row)?;
            confusion.record(prediction.diagnosis, label);
        }
        Ok(Evaluation::from(confusion))
    }
}
