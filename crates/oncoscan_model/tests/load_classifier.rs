mod util;

use oncoscan_model::{
    ClassifierError, DatasetError, Diagnosis, ModelError, NormalizeError, TumorClassifier,
    FEATURE_COUNT,
};
use pretty_assertions::assert_eq;
use util::fixtures::{model_json, reference_csv, write};

#[test]
fn load_and_classify_from_disk() {
    let _ = env_logger::builder().is_test(true).try_init();
    let tmp = tempfile::tempdir().expect("tmpdir");
    let model = write(tmp.path(), "model.json", &model_json(&[1.0; FEATURE_COUNT], -15.0));
    let data = write(tmp.path(), "data.csv", &reference_csv(&["B", "M", "B"]));

    let (classifier, dataset) = TumorClassifier::load(&model, &data).expect("load");
    assert_eq!(classifier.feature_count(), FEATURE_COUNT);
    assert!(dataset.matches_catalogue());
    assert_eq!(classifier.bounds().min()[0], 0.0);
    assert_eq!(classifier.bounds().max()[0], 2.0);

    // every column at its max normalizes to 1.0 -> z = 30 - 15
    let top: Vec<f64> = classifier.bounds().max().to_vec();
    let p = classifier.classify(&top).expect("classify");
    assert!((p.z - 15.0).abs() < 1e-9);
    assert_eq!(p.diagnosis, Diagnosis::Malignant);

    // every column at its min normalizes to 0.0 -> z = -15
    let bottom: Vec<f64> = classifier.bounds().min().to_vec();
    let p = classifier.classify(&bottom).expect("classify");
    assert_eq!(p.diagnosis, Diagnosis::Benign);
    assert_eq!(p.confidence_label(), "0.00%");
}

#[test]
fn form_defaults_flow_through_the_pipeline() {
    let tmp = tempfile::tempdir().expect("tmpdir");
    let model = write(tmp.path(), "model.json", &model_json(&[0.0; FEATURE_COUNT], 0.0));
    let data = write(tmp.path(), "data.csv", &reference_csv(&["B", "M"]));
    let (classifier, _) = TumorClassifier::load(&model, &data).expect("load");

    let mut form = classifier.blank_form();
    form.set("radius_mean", " 1.5 ").expect("known field");
    let p = classifier.classify_form(&form).expect("classify");
    assert_eq!(p.probability, 0.5);
    assert_eq!(p.diagnosis, Diagnosis::Benign);

    form.set("symmetry_worst", "abc").expect("known field");
    let err = classifier.classify_form(&form).expect_err("must halt");
    assert_eq!(
        err.to_string(),
        "Invalid input for symmetry_worst. Please enter a number."
    );
}

#[test]
fn evaluate_counts_against_labels() {
    let tmp = tempfile::tempdir().expect("tmpdir");
    // positive weights: later rows have larger values, so z grows with the row index
    let mut weight = vec![0.0; FEATURE_COUNT];
    weight[0] = 4.0;
    let model = write(tmp.path(), "model.json", &model_json(&weight, -2.0));
    let data = write(tmp.path(), "data.csv", &reference_csv(&["B", "B", "M", "M", "B"]));
    let (classifier, dataset) = TumorClassifier::load(&model, &data).expect("load");

    // radius_mean spans 0..=4, normalized i/4, z = i - 2 -> malignant for rows 3 and 4
    let eval = classifier.evaluate(&dataset).expect("evaluate");
    assert_eq!(eval.confusion.true_positive, 1);
    assert_eq!(eval.confusion.false_positive, 1);
    assert_eq!(eval.confusion.true_negative, 2);
    assert_eq!(eval.confusion.false_negative, 1);
    assert!((eval.accuracy - 0.6).abs() < 1e-12);
}

#[test]
fn unrecognized_labels_load_and_fail_only_on_evaluate() {
    let tmp = tempfile::tempdir().expect("tmpdir");
    let model = write(tmp.path(), "model.json", &model_json(&[0.5; FEATURE_COUNT], -1.0));
    let data = write(
        tmp.path(),
        "data.csv",
        &reference_csv(&["benign", "malignant", "B"]),
    );
    let (classifier, dataset) = TumorClassifier::load(&model, &data).expect("load");
    assert!(classifier.classify(classifier.bounds().max()).is_ok());

    let err = classifier.evaluate(&dataset).expect_err("labels are not M/B");
    assert!(matches!(
        err,
        ClassifierError::Dataset(DatasetError::InvalidLabel { line: 2, ref value }) if value == "benign"
    ));
}

#[test]
fn weight_and_bounds_length_mismatch_is_a_startup_error() {
    let tmp = tempfile::tempdir().expect("tmpdir");
    let model = write(tmp.path(), "model.json", &model_json(&[1.0; 29], 0.0));
    let data = write(tmp.path(), "data.csv", &reference_csv(&["B", "M"]));
    let err = TumorClassifier::load(&model, &data).expect_err("mismatch");
    assert!(matches!(
        err,
        ClassifierError::FeatureCountMismatch {
            weights: 29,
            bounds: 30
        }
    ));
}

#[test]
fn single_row_dataset_has_degenerate_bounds() {
    let tmp = tempfile::tempdir().expect("tmpdir");
    let model = write(tmp.path(), "model.json", &model_json(&[1.0; FEATURE_COUNT], 0.0));
    let data = write(tmp.path(), "data.csv", &reference_csv(&["M"]));
    let err = TumorClassifier::load(&model, &data).expect_err("degenerate");
    match err {
        ClassifierError::Dataset(DatasetError::Bounds(NormalizeError::DegenerateFeature {
            feature,
            ..
        })) => assert_eq!(feature, "radius_mean"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_files_are_reported() {
    let tmp = tempfile::tempdir().expect("tmpdir");
    let data = write(tmp.path(), "data.csv", &reference_csv(&["B", "M"]));
    let err = TumorClassifier::load(tmp.path().join("nope.json"), &data).expect_err("missing");
    assert!(matches!(err, ClassifierError::Model(ModelError::Io { .. })));

    let model = write(tmp.path(), "model.json", &model_json(&[1.0; FEATURE_COUNT], 0.0));
    let err = TumorClassifier::load(&model, tmp.path().join("nope.csv")).expect_err("missing");
    assert!(matches!(err, ClassifierError::Dataset(DatasetError::Io { .. })));
}
