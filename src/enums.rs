//! Named sets of string literals, consulted while walking string samples.
//!
//! Either handed in by the caller, or discovered by scanning the sample for
//! fields whose value is a non-empty array of non-blank strings.

use indexmap::IndexMap;
use serde_json::Value;

use crate::ir::Declaration;

/// Enum name → ordered member values.
pub type EnumsMap = IndexMap<String, Vec<String>>;

#[derive(Debug, Clone, Default)]
pub struct EnumRegistry {
    entries: EnumsMap,
}

impl EnumRegistry {
    /// Caller-supplied enums, trusted as-is.
    pub fn explicit(map: &EnumsMap) -> Self {
        Self { entries: map.clone() }
    }

    /// Scan the whole sample for inline enums.
    pub fn discover(value: &Value) -> Self {
        let mut entries = EnumsMap::new();
        collect_inline(value, &mut entries);
        Self { entries }
    }

    /// Explicit map when given, discovery otherwise. The two never mix.
    pub fn for_sample(value: &Value, explicit: Option<&EnumsMap>) -> Self {
        match explicit {
            Some(map) => Self::explicit(map),
            None => Self::discover(value),
        }
    }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
    pub fn len(&self) -> usize { self.entries.len() }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn values(&self, name: &str) -> Option<&[String]> {
        self.entries.get(name).map(Vec::as_slice)
    }

    /// First enum (registry order) whose name matches `key`, and whose
    /// values contain `sample` case-insensitively when a sample is given.
    ///
    /// Names match when their alphanumeric, lower-cased forms are equal or
    /// one ends with the other, so `status` finds `UserStatus`.
    pub fn pick(&self, key: &str, sample: Option<&str>) -> Option<&str> {
        let key_norm = normalize(key);
        let sample = sample.filter(|s| !s.is_empty()).map(str::to_lowercase);
        self.entries
            .iter()
            .find(|(name, values)| {
                let name_norm = normalize(name);
                let name_matches = name_norm == key_norm
                    || key_norm.ends_with(&name_norm)
                    || name_norm.ends_with(&key_norm);
                if !name_matches {
                    return false;
                }
                match &sample {
                    Some(s) => values.iter().any(|v| v.to_lowercase() == *s),
                    None => true,
                }
            })
            .map(|(name, _)| name.as_str())
    }

    /// One enum declaration per registered entry, in registry order.
    pub fn declarations(&self) -> Vec<Declaration> {
        self.entries
            .iter()
            .map(|(name, values)| Declaration::enumeration(name.clone(), values.clone()))
            .collect()
    }
}

/// Extract the reserved top-level `"enums"` key of a sample, if it is a
/// well-formed map of string arrays.
pub fn enums_from_sample(value: &Value) -> Option<EnumsMap> {
    let raw = value.get("enums")?;
    match serde_json::from_value::<EnumsMap>(raw.clone()) {
        Ok(map) => Some(map),
        Err(error) => {
            tracing::warn!(%error, "ignoring malformed \"enums\" key; falling back to discovery");
            None
        }
    }
}

fn normalize(s: &str) -> String {
    s.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

fn as_enum_values(value: &Value) -> Option<Vec<String>> {
    let items = value.as_array()?;
    if items.is_empty() {
        return None;
    }
    let mut out: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        let s = item.as_str().filter(|s| !s.trim().is_empty())?;
        if !out.iter().any(|seen| seen == s) {
            out.push(s.to_string());
        }
    }
    Some(out)
}

fn collect_inline(node: &Value, out: &mut EnumsMap) {
    match node {
        Value::Object(map) => {
            for (key, val) in map {
                if let Some(values) = as_enum_values(val) {
                    // a later field of the same name wins but keeps its slot
                    out.insert(key.clone(), values);
                } else {
                    collect_inline(val, out);
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_inline(item, out);
            }
        }
        _ => {}
    }
}
