//! Sample-based generation: infer TypeScript declarations from one JSON value.
//!
//! Walking rules, in priority order:
//! - `null` → `null`; strings → matching enum, else `Date` for ISO dates, else `string`
//! - numbers → `number`; booleans → `boolean`
//! - `[]` → `unknown[]`
//! - arrays of plain objects → one merged `<Name>Item` interface (shape unification)
//! - other arrays → deduplicated union of element types
//! - objects → one interface per object, keys in input order
//!
//! Declarations accumulate child-before-parent; rendering reverses them.
pub mod shape;
pub mod str;

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::emit::{render_sample_module, Emit};
use crate::enums::{EnumRegistry, EnumsMap};
use crate::ir::{Declaration, Field, Primitive, Ty};
use crate::naming::NameAllocator;

const DEFAULT_ROOT: &str = "Root";

// ------------------------------ Context ---------------------------------- //

/// Call-scoped state, threaded by `&mut` through every recursive step.
#[derive(Debug)]
pub struct GenerationContext {
    pub names: NameAllocator,
    pub enums: EnumRegistry,
}

impl GenerationContext {
    /// Enum names are reserved up front; interfaces never shadow them.
    pub fn new(enums: EnumRegistry) -> Self {
        let mut names = NameAllocator::pascal();
        for name in enums.names() {
            names.reserve(name);
        }
        Self { names, enums }
    }
}

/// Result of inferring one node: its type plus the declarations it produced,
/// in creation order.
#[derive(Debug, Clone, PartialEq)]
pub struct Inferred {
    pub ty: Ty,
    pub declarations: Vec<Declaration>,
}

impl Inferred {
    fn leaf(ty: Ty) -> Self {
        Self { ty, declarations: Vec::new() }
    }
}

/// Complete output of a sample generation call, before text rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleOutput {
    pub root: String,
    pub enums: Vec<Declaration>,
    pub declarations: Vec<Declaration>,
}

impl SampleOutput {
    pub fn render(&self) -> String {
        render_sample_module(&self.enums, &self.declarations)
    }
}

// ------------------------------ Front API -------------------------------- //

pub fn infer_sample(value: &Value, root_name: &str, enums: Option<&EnumsMap>) -> SampleOutput {
    let root_name = if root_name.is_empty() { DEFAULT_ROOT } else { root_name };
    let mut ctx = GenerationContext::new(EnumRegistry::for_sample(value, enums));

    let Inferred { ty, mut declarations } = infer(value, root_name, &mut ctx);
    let root = match ty.as_ref_name() {
        Some(name) => name.to_string(),
        None => {
            // primitive or array root: name it through an alias
            let name = ctx.names.allocate(root_name);
            declarations.push(Declaration::alias(name.clone(), ty));
            name
        }
    };

    tracing::debug!(
        %root,
        declarations = declarations.len(),
        enums = ctx.enums.len(),
        "inferred sample declarations"
    );
    SampleOutput { root, enums: ctx.enums.declarations(), declarations }
}

pub fn generate_interfaces(value: &Value, root_name: &str, enums: Option<&EnumsMap>) -> String {
    infer_sample(value, root_name, enums).render()
}

// ------------------------------- Walker ---------------------------------- //

pub fn infer(value: &Value, candidate: &str, ctx: &mut GenerationContext) -> Inferred {
    match value {
        Value::Null => Inferred::leaf(Ty::primitive(Primitive::Null)),
        Value::String(s) => Inferred::leaf(infer_string(s, candidate, ctx)),
        Value::Number(_) => Inferred::leaf(Ty::primitive(Primitive::Number)),
        Value::Bool(_) => Inferred::leaf(Ty::primitive(Primitive::Boolean)),
        Value::Array(items) => infer_array(items, candidate, ctx),
        Value::Object(map) => infer_object(map, candidate, ctx),
    }
}

fn infer_string(s: &str, candidate: &str, ctx: &GenerationContext) -> Ty {
    if !ctx.enums.is_empty() {
        if let Some(name) = ctx.enums.pick(candidate, Some(s)) {
            return Ty::named(name);
        }
    }
    if str::looks_like_date(s) {
        Ty::primitive(Primitive::Date)
    } else {
        Ty::primitive(Primitive::String)
    }
}

fn infer_array(items: &[Value], candidate: &str, ctx: &mut GenerationContext) -> Inferred {
    if items.is_empty() {
        return Inferred::leaf(Ty::array(Ty::primitive(Primitive::Unknown)));
    }

    let objects: Option<Vec<&Map<String, Value>>> = items.iter().map(Value::as_object).collect();
    if let Some(objects) = objects {
        return infer_object_array(&objects, candidate, ctx);
    }

    let item_name = format!("{candidate}Item");
    let Inferred { ty, declarations } = union_of(items.iter(), &item_name, ctx);
    Inferred { ty: Ty::array(ty), declarations }
}

fn infer_object_array(
    objects: &[&Map<String, Value>],
    candidate: &str,
    ctx: &mut GenerationContext,
) -> Inferred {
    let name = ctx.names.allocate(&format!("{candidate}Item"));
    let merged = shape::merge_object_shapes(objects);

    let mut declarations = Vec::new();
    let mut fields = Vec::with_capacity(merged.len());
    for (key, field) in merged {
        let inferred = union_of(field.values.into_iter(), key, ctx);
        declarations.extend(inferred.declarations);
        fields.push(Field { name: key.to_string(), ty: inferred.ty, optional: field.optional });
    }

    declarations.push(Declaration::interface(name.clone(), fields));
    Inferred { ty: Ty::array(Ty::named(name)), declarations }
}

fn infer_object(map: &Map<String, Value>, candidate: &str, ctx: &mut GenerationContext) -> Inferred {
    let name = ctx.names.allocate(candidate);

    let mut declarations = Vec::new();
    let mut fields = Vec::with_capacity(map.len());
    for (key, val) in map {
        let inferred = infer(val, key, ctx);
        declarations.extend(inferred.declarations);
        // optionality only ever comes from shape unification
        fields.push(Field { name: key.clone(), ty: inferred.ty, optional: false });
    }

    declarations.push(Declaration::interface(name.clone(), fields));
    Inferred { ty: Ty::named(name), declarations }
}

/// Infer each value under the same candidate name and join the distinct
/// results (by rendered text) into a union.
fn union_of<'a, I>(values: I, candidate: &str, ctx: &mut GenerationContext) -> Inferred
where
    I: Iterator<Item = &'a Value>,
{
    let mut distinct: IndexMap<String, Ty> = IndexMap::new();
    let mut declarations = Vec::new();
    for value in values {
        let inferred = infer(value, candidate, ctx);
        declarations.extend(inferred.declarations);
        distinct.entry(inferred.ty.emit()).or_insert(inferred.ty);
    }

    let mut members: Vec<Ty> = distinct.into_values().collect();
    let ty = if members.len() == 1 {
        members.remove(0)
    } else {
        Ty::Union { members }
    };
    Inferred { ty, declarations }
}

// ------------------------------- Tests ----------------------------------- //
