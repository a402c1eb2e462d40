//! OpenAPI/Swagger schema node → inline TypeScript type.
//!
//! Unlike the sample walker this never extracts named declarations: object
//! shapes stay inline. The only side effect is name allocation for `$ref`s.

use serde_json::{Map, Value};

use crate::ir::{Field, Literal, Primitive, Ty};
use crate::naming::NameAllocator;

/// Resolve one schema node. Rules, in priority order:
/// `$ref`, `enum`, `oneOf`, `anyOf`, `allOf`, primitive `type`, `array`,
/// then everything else as an (often empty) object literal.
pub fn resolve(schema: &Value, names: &mut NameAllocator) -> Ty {
    if !is_truthy(schema) {
        return Ty::primitive(Primitive::Unknown);
    }
    let empty = Map::new();
    let node = schema.as_object().unwrap_or(&empty);

    // dangling refs are fine: the name is derived, not looked up
    if let Some(pointer) = node.get("$ref").and_then(Value::as_str).filter(|s| !s.is_empty()) {
        return Ty::named(names.allocate_ref(pointer));
    }

    if let Some(values) = node.get("enum").and_then(Value::as_array) {
        let members = values.iter().map(|v| Ty::Literal { literal: literal(v) }).collect();
        return Ty::Union { members };
    }

    if let Some(members) = list(node, "oneOf").or_else(|| list(node, "anyOf")) {
        let members = members.iter().map(|m| resolve(m, names)).collect();
        return Ty::Union { members };
    }
    if let Some(members) = list(node, "allOf") {
        let members = members.iter().map(|m| resolve(m, names)).collect();
        return Ty::Intersection { members };
    }

    match node.get("type").and_then(Value::as_str) {
        Some("string") => Ty::primitive(Primitive::String),
        Some("integer" | "number") => Ty::primitive(Primitive::Number),
        Some("boolean") => Ty::primitive(Primitive::Boolean),
        Some("array") => {
            let items = node.get("items").filter(|v| is_truthy(v));
            let item = match items {
                Some(items) => resolve(items, names),
                None => resolve(&Value::Object(Map::new()), names),
            };
            Ty::array(item)
        }
        // "object", unknown types and type-less schemas all land here
        _ => object_literal(node, names),
    }
}

fn object_literal(node: &Map<String, Value>, names: &mut NameAllocator) -> Ty {
    let required: Vec<&str> = node
        .get("required")
        .and_then(Value::as_array)
        .map(|r| r.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();

    let mut fields = Vec::new();
    if let Some(properties) = node.get("properties").and_then(Value::as_object) {
        for (key, prop) in properties {
            fields.push(Field {
                name: key.clone(),
                ty: resolve(prop, names),
                optional: !required.contains(&key.as_str()),
            });
        }
    }

    let index = match node.get("additionalProperties") {
        Some(Value::Bool(true)) => Some(Box::new(Ty::primitive(Primitive::Unknown))),
        Some(extra) if is_truthy(extra) => Some(Box::new(resolve(extra, names))),
        _ => None,
    };

    Ty::Object { fields, index }
}

fn list<'a>(node: &'a Map<String, Value>, key: &str) -> Option<&'a Vec<Value>> {
    node.get(key).and_then(Value::as_array)
}

fn literal(value: &Value) -> Literal {
    match value {
        Value::String(s) => Literal::String(s.clone()),
        Value::Number(n) => Literal::Number(n.to_string()),
        Value::Bool(b) => Literal::Boolean(*b),
        Value::Null => Literal::Null,
        other => Literal::Json(other.to_string()),
    }
}

/// JavaScript truthiness: `null`, `false`, `0`, `NaN` and `""` are falsy,
/// every array and object is truthy.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
