// Strongly-typed IR for TypeScript emission. No serde_json::Value here.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Primitive {
    String,
    Number,
    Boolean,
    Null,
    Date,
    Unknown,
    Never,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Literal {
    String(String),
    Number(String),          // JSON text of the number, kept verbatim
    Boolean(bool),
    Null,
    Json(String),            // arrays/objects listed as enum members
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Ty {
    Primitive { primitive: Primitive },
    Ref { name: String },
    Array { item: Box<Ty> },
    Union { members: Vec<Ty> },
    Intersection { members: Vec<Ty> },
    Object {
        fields: Vec<Field>,
        index: Option<Box<Ty>>,  // `[key: string]: T`
    },
    Literal { literal: Literal },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    pub name: String,
    pub ty: Ty,
    pub optional: bool,
}

/// One named, emittable unit of output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Declaration {
    pub name: String,
    pub kind: DeclarationKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum DeclarationKind {
    Interface { fields: Vec<Field> },
    Enum { members: Vec<String> },
    TypeAlias { ty: Ty },
}

impl Ty {
    pub const fn primitive(primitive: Primitive) -> Self {
        Ty::Primitive { primitive }
    }
    pub fn named(name: impl Into<String>) -> Self {
        Ty::Ref { name: name.into() }
    }
    pub fn array(item: Ty) -> Self {
        Ty::Array { item: Box::new(item) }
    }
    pub fn as_ref_name(&self) -> Option<&str> {
        match self {
            Ty::Ref { name } => Some(name),
            _ => None,
        }
    }
    /// Peel one-member unions/intersections, which render as their member.
    pub fn collapsed(&self) -> &Ty {
        match self {
            Ty::Union { members } | Ty::Intersection { members } if members.len() == 1 => {
                members[0].collapsed()
            }
            other => other,
        }
    }
    /// Unions and intersections of two or more members (after collapsing)
    /// need parentheses when nested under `[]` or another operator.
    pub fn is_compound(&self) -> bool {
        match self.collapsed() {
            Ty::Union { members } | Ty::Intersection { members } => members.len() > 1,
            _ => false,
        }
    }
}

impl Declaration {
    pub fn interface(name: String, fields: Vec<Field>) -> Self {
        Self { name, kind: DeclarationKind::Interface { fields } }
    }
    pub fn enumeration(name: String, members: Vec<String>) -> Self {
        Self { name, kind: DeclarationKind::Enum { members } }
    }
    pub fn alias(name: String, ty: Ty) -> Self {
        Self { name, kind: DeclarationKind::TypeAlias { ty } }
    }
}
