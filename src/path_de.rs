use serde_json::Value;

use crate::error::SampleParseError;

/// Parse a JSON sample with JSON-path context in error messages.
pub fn parse_sample_text(src: &str) -> Result<Value, SampleParseError> {
    let de = &mut serde_json::Deserializer::from_str(src);
    serde_path_to_error::deserialize::<_, Value>(de).map_err(into_sample_error)
}

pub fn parse_sample_slice(bytes: &[u8]) -> Result<Value, SampleParseError> {
    let de = &mut serde_json::Deserializer::from_slice(bytes);
    serde_path_to_error::deserialize::<_, Value>(de).map_err(into_sample_error)
}

fn into_sample_error(err: serde_path_to_error::Error<serde_json::Error>) -> SampleParseError {
    let path = err.path().to_string();
    SampleParseError::Syntax { path, source: err.into_inner() }
}
