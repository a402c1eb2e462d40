use indexmap::IndexMap;
use serde_json::{Map, Value};

/// Per-key evidence gathered across sibling objects.
#[derive(Debug, Default)]
pub struct MergedField<'a> {
    pub values: Vec<&'a Value>,
    pub optional: bool,
}

/// Shape unification: every key seen in any object, in first-seen order,
/// with all values observed for it. A key is optional iff some sibling
/// omitted it.
pub fn merge_object_shapes<'a>(objects: &[&'a Map<String, Value>]) -> IndexMap<&'a str, MergedField<'a>> {
    let mut merged: IndexMap<&'a str, MergedField<'a>> = IndexMap::new();
    for obj in objects {
        for (key, val) in obj.iter() {
            merged.entry(key.as_str()).or_default().values.push(val);
        }
    }
    for field in merged.values_mut() {
        field.optional = field.values.len() < objects.len();
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn objects(v: &Value) -> Vec<&Map<String, Value>> {
        v.as_array().unwrap().iter().map(|x| x.as_object().unwrap()).collect()
    }

    #[test]
    fn missing_keys_become_optional() {
        let v = json!([{ "a": 1 }, { "a": 2, "b": "x" }, { "b": null, "a": 3 }]);
        let merged = merge_object_shapes(&objects(&v));
        let keys: Vec<_> = merged.keys().copied().collect();
        assert_eq!(keys, ["a", "b"]);
        assert!(!merged["a"].optional);
        assert_eq!(merged["a"].values.len(), 3);
        assert!(merged["b"].optional);
        assert_eq!(merged["b"].values, [&json!("x"), &Value::Null]);
    }

    #[test]
    fn single_object_is_fully_required() {
        let v = json!([{ "x": true, "y": [] }]);
        let merged = merge_object_shapes(&objects(&v));
        assert!(merged.values().all(|f| !f.optional));
    }
}
