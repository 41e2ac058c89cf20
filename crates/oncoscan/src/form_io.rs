//! Filling the form from `--set` pairs, a TOML input file or an interactive prompt

use oncoscan_model::{parse_field, FormInput, InputError};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormError {
    #[error("cannot read input file {path}: {source}")]
    Io {
        path: String,
        source: io::Error,
    },
    #[error("invalid input file {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
    #[error("input file value for '{0}' must be a string or a number")]
    UnsupportedValue(String),
    #[error("prompt failed: {0}")]
    Prompt(#[from] io::Error),
    #[error(transparent)]
    Input(#[from] InputError),
}

/// Parse a `NAME=VALUE` pair from the command line. Names may contain spaces.
pub fn parse_assignment(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{s}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing feature name in '{s}'"));
    }
    Ok((name.to_string(), value.to_string()))
}

/// Apply `name = value` entries from a TOML table. Values stay as text so
/// validation happens at classification time, like typed form fields.
pub fn apply_toml(form: &mut FormInput, text: &str, path: &str) -> Result<(), FormError> {
    let table: toml::Table = toml::from_str(text).map_err(|source| FormError::Parse {
        path: path.to_string(),
        source,
    })?;
    for (name, value) in table {
        let text = match value {
            toml::Value::String(s) => s,
            toml::Value::Integer(i) => i.to_string(),
            toml::Value::Float(f) => f.to_string(),
            _ => return Err(FormError::UnsupportedValue(name)),
        };
        form.set(&name, text)?;
    }
    Ok(())
}

pub fn apply_file(form: &mut FormInput, path: &Path) -> Result<(), FormError> {
    let text = fs::read_to_string(path).map_err(|source| FormError::Io {
        path: path.display().to_string(),
        source,
    })?;
    apply_toml(form, &text, &path.display().to_string())
}

pub fn apply_assignments(
    form: &mut FormInput,
    pairs: &[(String, String)],
) -> Result<(), InputError> {
    for (name, value) in pairs {
        form.set(name, value.clone())?;
    }
    Ok(())
}

/// Ask for each field in order. An empty line keeps the current text; end of
/// input keeps the rest. The first non-numeric answer stops the prompt.
pub fn prompt_form<R: BufRead, W: Write>(
    form: &mut FormInput,
    mut reader: R,
    mut writer: W,
) -> Result<(), FormError> {
    let names = form.names().to_vec();
    for name in &names {
        let current = form.get(name).unwrap_or_default().to_string();
        write!(writer, "{name} [{current}]: ")?;
        writer.flush()?;

        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            writeln!(writer)?;
            break;
        }
        let answer = line.trim();
        if answer.is_empty() {
            continue;
        }
        parse_field(name, answer)?;
        form.set(name, answer)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn small_form() -> FormInput {
        FormInput::new(vec!["radius_mean".into(), "concave points_mean".into()])
    }

    #[test]
    fn assignment_splits_on_first_equals() {
        assert_eq!(
            parse_assignment("concave points_mean=0.1").unwrap(),
            ("concave points_mean".to_string(), "0.1".to_string())
        );
        assert_eq!(
            parse_assignment("a=b=c").unwrap(),
            ("a".to_string(), "b=c".to_string())
        );
        assert!(parse_assignment("radius_mean").is_err());
        assert!(parse_assignment("=1").is_err());
    }

    #[test]
    fn toml_values_become_field_text() {
        let mut form = small_form();
        apply_toml(
            &mut form,
            "radius_mean = 17\n\"concave points_mean\" = \"0.147\"\n",
            "input.toml",
        )
        .unwrap();
        assert_eq!(form.get("radius_mean"), Some("17"));
        assert_eq!(form.get("concave points_mean"), Some("0.147"));
    }

    #[test]
    fn toml_rejects_unknown_feature_and_tables() {
        let mut form = small_form();
        assert!(matches!(
            apply_toml(&mut form, "radius = 1.0\n", "x"),
            Err(FormError::Input(InputError::UnknownFeature(_)))
        ));
        assert!(matches!(
            apply_toml(&mut form, "radius_mean = [1.0]\n", "x"),
            Err(FormError::UnsupportedValue(_))
        ));
    }

    #[test]
    fn prompt_keeps_defaults_on_empty_lines() {
        let mut form = small_form();
        let mut out = Vec::new();
        prompt_form(&mut form, Cursor::new("\n0.2\n"), &mut out).unwrap();
        assert_eq!(form.values(), &["0.0", "0.2"]);
        let shown = String::from_utf8(out).unwrap();
        assert!(shown.contains("radius_mean [0.0]: "));
        assert!(shown.contains("concave points_mean [0.0]: "));
    }

    #[test]
    fn prompt_stops_at_first_invalid_answer() {
        let mut form = small_form();
        let err = prompt_form(&mut form, Cursor::new("oops\n0.2\n"), Vec::new()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid input for radius_mean. Please enter a number."
        );
        assert_eq!(form.get("concave points_mean"), Some("0.0"));
    }

    #[test]
    fn prompt_stops_quietly_at_end_of_input() {
        let mut form = small_form();
        prompt_form(&mut form, Cursor::new("12.5\n"), Vec::new()).unwrap();
        assert_eq!(form.values(), &["12.5", "0.0"]);
    }
}
