use thiserror::Error;

/// Failure to turn raw spec text into a [`crate::openapi::ParsedSpec`].
#[derive(Debug, Error)]
pub enum SpecParseError {
    /// Neither parser accepted the text. The YAML message is the one shown,
    /// since YAML is tried last.
    #[error("spec is neither valid JSON nor YAML: {yaml}")]
    Syntax {
        json: serde_json::Error,
        yaml: serde_yaml::Error,
    },
    /// Parsed fine, but the root is `null`, a scalar or a sequence.
    #[error("spec root must be an object, found {found}")]
    InvalidRoot { found: &'static str },
}

/// Failure to parse a JSON sample, with the path where parsing stopped.
#[derive(Debug, Error)]
pub enum SampleParseError {
    #[error("at JSON path {path} → {source}")]
    Syntax {
        path: String,
        source: serde_json::Error,
    },
}

/// Human-readable kind of a JSON value, for error messages.
pub(crate) fn kind_name(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
