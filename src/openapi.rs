//! OpenAPI / Swagger documents → TypeScript type aliases.
//!
//! Pipeline:
//! 1. Parse: spec text (JSON, else YAML) → `ParsedSpec`
//! 2. Resolve: each named schema → inline `Ty` (refs become allocated names)
//! 3. Emit: one `export type Name = ...;` per schema, in table order
pub mod resolve;
pub mod yaml;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::emit::join_declarations;
use crate::error::{kind_name, SpecParseError};
use crate::ir::Declaration;
use crate::naming::NameAllocator;

pub const NO_SCHEMAS: &str = "// no schemas";
const UNKNOWN_VERSION: &str = "unknown";

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// Where the schema table was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SchemaSource {
    /// OpenAPI 3.x `components.schemas`
    Components,
    /// Swagger 2.0 `definitions`
    Definitions,
    None,
}

impl SchemaSource {
    /// `$ref` prefix that points into this table.
    pub const fn pointer_prefix(self) -> &'static str {
        match self {
            SchemaSource::Components => "#/components/schemas/",
            SchemaSource::Definitions => "#/definitions/",
            SchemaSource::None => "#/",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedSpec {
    pub raw: Value,
    pub schemas: Map<String, Value>,
    pub paths: Option<Map<String, Value>>,
    pub version: String,
    pub source: SchemaSource,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedTypes {
    pub code: String,
    pub schema_count: usize,
    pub path_count: usize,
    pub declarations: Vec<Declaration>,
}

// ————————————————————————————————————————————————————————————————————————————
// PARSING
// ————————————————————————————————————————————————————————————————————————————

/// Parse spec text as JSON, falling back to YAML.
pub fn parse_openapi_text(text: &str) -> Result<ParsedSpec, SpecParseError> {
    let raw = match serde_json::from_str::<Value>(text) {
        Ok(raw) => raw,
        Err(json) => {
            tracing::debug!(error = %json, "spec is not JSON, trying YAML");
            match serde_yaml::from_str::<serde_yaml::Value>(text) {
                Ok(doc) => yaml::yaml_to_json(doc),
                Err(yaml) => return Err(SpecParseError::Syntax { json, yaml }),
            }
        }
    };
    parse_openapi_value(raw)
}

/// Extract schemas, paths and version from an already-parsed document.
pub fn parse_openapi_value(raw: Value) -> Result<ParsedSpec, SpecParseError> {
    if !raw.is_object() {
        return Err(SpecParseError::InvalidRoot { found: kind_name(&raw) });
    }

    let version = ["openapi", "swagger"]
        .iter()
        .filter_map(|key| raw.get(*key))
        .find(|v| resolve::is_truthy(v))
        .map(|v| match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .unwrap_or_else(|| UNKNOWN_VERSION.to_string());

    // first non-null candidate decides, even if it turns out unusable
    let table = [
        (SchemaSource::Components, raw.pointer("/components/schemas")),
        (SchemaSource::Definitions, raw.get("definitions")),
    ]
    .into_iter()
    .find_map(|(source, v)| v.filter(|v| !v.is_null()).map(|v| (source, v)));
    let (source, schemas) = match table {
        Some((source, Value::Object(map))) => (source, map.clone()),
        _ => (SchemaSource::None, Map::new()),
    };

    let paths = raw.get("paths").and_then(Value::as_object).cloned();

    Ok(ParsedSpec { raw, schemas, paths, version, source })
}

// ————————————————————————————————————————————————————————————————————————————
// GENERATION
// ————————————————————————————————————————————————————————————————————————————

pub fn generate_types_from_schemas(spec: &ParsedSpec) -> GeneratedTypes {
    let mut names = NameAllocator::identifier();
    let prefix = spec.source.pointer_prefix();

    let mut declarations = Vec::with_capacity(spec.schemas.len());
    for (name, schema) in &spec.schemas {
        // declared under its own `$ref` key so refs to it reuse the name
        let type_name = names.allocate_keyed(&format!("{prefix}{name}"), name);
        let ty = resolve::resolve(schema, &mut names);
        declarations.push(Declaration::alias(type_name, ty));
    }

    let code = if declarations.is_empty() {
        NO_SCHEMAS.to_string()
    } else {
        join_declarations(&declarations)
    };
    let path_count = spec.paths.as_ref().map_or(0, Map::len);

    tracing::debug!(
        version = %spec.version,
        schemas = spec.schemas.len(),
        paths = path_count,
        "generated types from spec"
    );
    GeneratedTypes {
        code,
        schema_count: spec.schemas.len(),
        path_count,
        declarations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_openapi3_json() {
        let spec = parse_openapi_text(
            r#"{"openapi":"3.0.1","paths":{"/a":{},"/b":{}},"components":{"schemas":{"A":{"type":"string"}}}}"#,
        )
        .unwrap();
        assert_eq!(spec.version, "3.0.1");
        assert_eq!(spec.source, SchemaSource::Components);
        assert_eq!(spec.schemas.len(), 1);
        assert_eq!(spec.paths.as_ref().unwrap().len(), 2);
    }

    #[test]
    fn parses_swagger2_yaml() {
        let text = "swagger: '2.0'\npaths:\n  /pets:\n    get:\n      responses:\n        200:\n          description: ok\ndefinitions:\n  Pet:\n    type: object\n";
        let spec = parse_openapi_text(text).unwrap();
        assert_eq!(spec.version, "2.0");
        assert_eq!(spec.source, SchemaSource::Definitions);
        assert!(spec.schemas.contains_key("Pet"));
        assert_eq!(spec.raw.pointer("/paths/~1pets/get/responses/200/description"), Some(&json!("ok")));
    }

    #[test]
    fn missing_version_and_tables() {
        let spec = parse_openapi_value(json!({ "info": {} })).unwrap();
        assert_eq!(spec.version, "unknown");
        assert_eq!(spec.source, SchemaSource::None);
        assert!(spec.schemas.is_empty());
        assert!(spec.paths.is_none());

        let blank = parse_openapi_value(json!({ "openapi": "", "swagger": 2 })).unwrap();
        assert_eq!(blank.version, "2");
    }

    #[test]
    fn components_take_precedence_over_definitions() {
        let spec = parse_openapi_value(json!({
            "components": { "schemas": { "A": {} } },
            "definitions": { "B": {} }
        }))
        .unwrap();
        assert_eq!(spec.schemas.keys().collect::<Vec<_>>(), ["A"]);

        let null_components = parse_openapi_value(json!({
            "components": { "schemas": null },
            "definitions": { "B": {} }
        }))
        .unwrap();
        assert_eq!(null_components.source, SchemaSource::Definitions);
    }

    #[test]
    fn rejects_garbage_and_non_objects() {
        let err = parse_openapi_text("not json and not: valid: yaml: :").unwrap_err();
        assert!(matches!(err, SpecParseError::Syntax { .. }), "{err}");

        for (text, found) in [("[1, 2]", "array"), ("42", "number"), ("null", "null"), ("just words", "string")] {
            match parse_openapi_text(text) {
                Err(SpecParseError::InvalidRoot { found: got }) => assert_eq!(got, found, "{text:?}"),
                other => panic!("{text:?} gave {other:?}"),
            }
        }
        assert!(parse_openapi_text("").is_err());
    }

    #[test]
    fn refs_and_declarations_share_names() {
        let spec = parse_openapi_value(json!({
            "openapi": "3.0.0",
            "components": { "schemas": {
                "A": { "properties": { "b": { "$ref": "#/components/schemas/B" } }, "required": ["b"] },
                "B": { "type": "string" }
            } }
        }))
        .unwrap();
        let out = generate_types_from_schemas(&spec);
        assert_eq!(out.code, "export type A = { b: B; };\n\nexport type B = string;");
        assert_eq!(out.schema_count, 2);
        assert_eq!(out.path_count, 0);
    }

    #[test]
    fn colliding_identifiers_are_numbered() {
        let spec = parse_openapi_value(json!({
            "definitions": {
                "Pet-Owner": { "type": "string" },
                "PetOwner": { "type": "number" },
                "Uses": { "properties": { "x": { "$ref": "#/definitions/PetOwner" } } }
            }
        }))
        .unwrap();
        let out = generate_types_from_schemas(&spec);
        let names: Vec<_> = out.declarations.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["PetOwner", "PetOwner2", "Uses"]);
        assert!(out.code.ends_with("export type Uses = { x?: PetOwner2; };"), "{}", out.code);
    }

    #[test]
    fn dangling_refs_are_kept() {
        let spec = parse_openapi_value(json!({
            "components": { "schemas": { "A": { "$ref": "#/components/schemas/Missing" } } }
        }))
        .unwrap();
        assert_eq!(generate_types_from_schemas(&spec).code, "export type A = Missing;");
    }

    #[test]
    fn empty_table_gets_placeholder() {
        let spec = parse_openapi_value(json!({ "openapi": "3.1.0", "paths": { "/x": {} } })).unwrap();
        let out = generate_types_from_schemas(&spec);
        assert_eq!(out.code, NO_SCHEMAS);
        assert_eq!(out.schema_count, 0);
        assert_eq!(out.path_count, 1);
        assert!(out.declarations.is_empty());
    }

    #[test]
    fn report_serializes_camel_case() {
        let spec = parse_openapi_value(json!({ "definitions": { "Id": { "type": "integer" } } })).unwrap();
        let report = serde_json::to_value(generate_types_from_schemas(&spec)).unwrap();
        assert_eq!(report["schemaCount"], 1);
        assert_eq!(report["code"], "export type Id = number;");
        assert_eq!(report["declarations"][0]["name"], "Id");
    }
}
