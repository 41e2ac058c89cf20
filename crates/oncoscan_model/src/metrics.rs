//! Confusion-matrix metrics with malignant as the positive class

use crate::classifier::Diagnosis;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ConfusionMatrix {
    pub true_positive: u64,
    pub false_positive: u64,
    pub true_negative: u64,
    pub false_negative: u64,
}

impl ConfusionMatrix {
    pub fn from_pairs(predicted: &[Diagnosis], actual: &[Diagnosis]) -> Self {
        let mut m = Self::default();
        for (p, y) in predicted.iter().zip(actual.iter()) {
            m.record(*p, *y);
        }
        m
    }

    pub fn record(&mut self, predicted: Diagnosis, actual: Diagnosis) {
        match (predicted.is_malignant(), actual.is_malignant()) {
            (true, true) => self.true_positive += 1,
            (true, false) => self.false_positive += 1,
            (false, true) => self.false_negative += 1,
            (false, false) => self.true_negative += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.true_positive + self.false_positive + self.true_negative + self.false_negative
    }
}

fn ratio(num: u64, denom: u64) -> f64 {
    if denom == 0 {
        0.0
    } else {
        num as f64 / denom as f64
    }
}

/// Summary of scoring the reference rows
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Evaluation {
    pub confusion: ConfusionMatrix,
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

impl From<ConfusionMatrix> for Evaluation {
    fn from(c: ConfusionMatrix) -> Self {
        let accuracy = ratio(c.true_positive + c.true_negative, c.total());
        let precision = ratio(c.true_positive, c.true_positive + c.false_positive);
        let recall = ratio(c.true_positive, c.true_positive + c.false_negative);
        let f1 = if precision + recall == 0.0 {
            0.0
        } else {
            2.0 * precision * recall / (precision + recall)
        };
        Self {
            confusion: c,
            accuracy,
            precision,
            recall,
            f1,
        }
    }
}
