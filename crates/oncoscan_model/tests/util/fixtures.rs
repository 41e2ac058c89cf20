use oncoscan_model::feature_names;
use std::path::{Path, PathBuf};

/// Reference CSV in the layout of the public dataset export: quoted header,
/// id and diagnosis first, a trailing comma producing an unnamed column.
/// Feature j of row i is `i + j`, so column j spans `[j, j + rows - 1]`.
pub fn reference_csv(labels: &[&str]) -> String {
    let names = feature_names();
    let mut out = String::from("\"id\",\"diagnosis\"");
    for n in &names {
        out.push_str(&format!(",\"{n}\""));
    }
    out.push_str(",\n");
    for (i, label) in labels.iter().enumerate() {
        out.push_str(&format!("{},{}", 900_000 + i, label));
        for j in 0..names.len() {
            out.push_str(&format!(",{}", (i + j) as f64));
        }
        out.push_str(",\n");
    }
    out
}

pub fn model_json(weight: &[f64], bias: f64) -> String {
    serde_json::json!({ "weight": weight, "bias": bias }).to_string()
}

pub fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("write fixture");
    path
}
