//! Text and JSON rendering of command results

use oncoscan_model::{
    catalogue, Diagnosis, Evaluation, FeatureGroup, NormalizationBounds, Prediction,
    ReferenceDataset,
};
use serde_json::{json, Value as JsonValue};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Text,
    Json,
}

impl OutputMode {
    pub fn from_flag(json: bool) -> Self {
        if json {
            OutputMode::Json
        } else {
            OutputMode::Text
        }
    }
}

pub fn prediction_json(p: &Prediction) -> JsonValue {
    json!({
        "diagnosis": p.diagnosis,
        "label": p.diagnosis.to_string(),
        "malignant": p.diagnosis.is_malignant(),
        "probability": p.probability,
        "confidence_percent": p.confidence_percent(),
        "z": p.z,
    })
}

pub fn prediction_text(p: &Prediction) -> String {
    let verdict = match p.diagnosis {
        Diagnosis::Malignant => "[!] The tumor is likely Malignant (Cancerous).",
        Diagnosis::Benign => "[ok] The tumor is likely Benign (Non-cancerous).",
    };
    format!(
        "Prediction Result\n{verdict}\nConfidence Score: {}\n",
        p.confidence_label()
    )
}

pub fn render_prediction(p: &Prediction, mode: OutputMode) -> String {
    match mode {
        OutputMode::Text => prediction_text(p),
        OutputMode::Json => format!("{}\n", prediction_json(p)),
    }
}

/// Feature descriptions grouped as mean / standard error / worst
pub fn describe_text() -> String {
    let mut out = String::from("Input Feature Descriptions\n");
    for group in FeatureGroup::ALL {
        out.push_str(&format!("\n{group}: {}\n", group.summary()));
        for info in catalogue().iter().filter(|i| i.group == group) {
            out.push_str(&format!("  {:<26} {}\n", info.name, info.description));
        }
    }
    out
}

pub fn render_bounds(bounds: &NormalizationBounds, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => {
            let rows: Vec<JsonValue> = bounds
                .iter()
                .map(|b| json!({ "feature": b.name, "min": b.min, "max": b.max }))
                .collect();
            format!("{}\n", JsonValue::Array(rows))
        }
        OutputMode::Text => {
            let mut out = format!("{:<26} {:>14} {:>14}\n", "feature", "min", "max");
            for b in bounds.iter() {
                out.push_str(&format!("{:<26} {:>14.6} {:>14.6}\n", b.name, b.min, b.max));
            }
            out
        }
    }
}

pub fn render_evaluation(
    eval: &Evaluation,
    dataset: &ReferenceDataset,
    mode: OutputMode,
) -> String {
    let c = &eval.confusion;
    let benign = c.true_negative + c.false_positive;
    let malignant = c.true_positive + c.false_negative;
    match mode {
        OutputMode::Json => format!(
            "{}\n",
            json!({
                "rows": dataset.len(),
                "benign": benign,
                "malignant": malignant,
                "evaluation": eval,
            })
        ),
        OutputMode::Text => {
            format!(
                "Evaluated {} reference rows ({benign} benign, {malignant} malignant)\n\
                 TP {}  FP {}  TN {}  FN {}\n\
                 accuracy  {:.4}\n\
                 precision {:.4}\n\
                 recall    {:.4}\n\
                 f1        {:.4}\n",
                dataset.len(),
                c.true_positive,
                c.false_positive,
                c.true_negative,
                c.false_negative,
                eval.accuracy,
                eval.precision,
                eval.recall,
                eval.f1
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_prediction_shows_two_decimal_confidence() {
        let p = Prediction::from_score(0.0);
        let text = prediction_text(&p);
        assert!(text.contains("Benign (Non-cancerous)"));
        assert!(text.contains("Confidence Score: 50.00%"));
    }

    #[test]
    fn json_prediction_carries_raw_probability() {
        let p = Prediction::from_score(2.0);
        let v = prediction_json(&p);
        assert_eq!(v["diagnosis"], "Malignant");
        assert_eq!(v["malignant"], true);
        assert_eq!(v["probability"].as_f64(), Some(p.probability));
    }

    #[test]
    fn describe_lists_every_feature_once() {
        let text = describe_text();
        for info in catalogue() {
            assert_eq!(text.matches(&format!("  {:<26} ", info.name)).count(), 1);
        }
        assert!(text.contains("Standard Error Features"));
    }

    #[test]
    fn bounds_json_is_an_array_in_feature_order() {
        let bounds = NormalizationBounds::new(
            vec!["radius_mean".into(), "texture_mean".into()],
            vec![6.981, 9.71],
            vec![28.11, 39.28],
        )
        .unwrap();
        let out = render_bounds(&bounds, OutputMode::Json);
        let v: JsonValue = serde_json::from_str(&out).unwrap();
        assert_eq!(v[0]["feature"], "radius_mean");
        assert_eq!(v[1]["max"].as_f64(), Some(39.28));
    }
}
