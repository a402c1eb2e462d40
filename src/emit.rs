//! TypeScript text emission via the `Emit` trait.
//!
//! Every IR node renders itself; the module-level helpers join declarations
//! into final source text for the two generators.

use crate::ir::{Declaration, DeclarationKind, Field, Literal, Primitive, Ty};

/// Convert an IR node into its TypeScript source form.
pub trait Emit {
    fn emit(&self) -> String;
}

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

impl Emit for Primitive {
    fn emit(&self) -> String {
        match self {
            Primitive::String => "string",
            Primitive::Number => "number",
            Primitive::Boolean => "boolean",
            Primitive::Null => "null",
            Primitive::Date => "Date",
            Primitive::Unknown => "unknown",
            Primitive::Never => "never",
        }
        .to_string()
    }
}

impl Emit for Literal {
    fn emit(&self) -> String {
        match self {
            Literal::String(s) => string_literal(s),
            Literal::Number(n) | Literal::Json(n) => n.clone(),
            Literal::Boolean(b) => b.to_string(),
            Literal::Null => "null".to_string(),
        }
    }
}

impl Emit for Ty {
    fn emit(&self) -> String {
        match self {
            Ty::Primitive { primitive } => primitive.emit(),
            Ty::Ref { name } => name.clone(),
            Ty::Literal { literal } => literal.emit(),
            Ty::Array { item } => {
                if item.is_compound() {
                    format!("({})[]", item.emit())
                } else {
                    format!("{}[]", item.emit())
                }
            }
            Ty::Union { members } => match members.as_slice() {
                [] => Primitive::Never.emit(),
                [only] => only.emit(),
                _ => members.iter().map(Emit::emit).collect::<Vec<_>>().join(" | "),
            },
            Ty::Intersection { members } => match members.as_slice() {
                [] => Primitive::Unknown.emit(),
                [only] => only.emit(),
                _ => members
                    .iter()
                    .map(|m| {
                        if matches!(m.collapsed(), Ty::Union { .. }) && m.is_compound() {
                            format!("({})", m.emit())
                        } else {
                            m.emit()
                        }
                    })
                    .collect::<Vec<_>>()
                    .join(" & "),
            },
            Ty::Object { fields, index } => {
                if fields.is_empty() && index.is_none() {
                    return "{}".to_string();
                }
                let mut out = String::from("{ ");
                for field in fields {
                    out.push_str(&field.emit());
                    out.push_str("; ");
                }
                if let Some(value) = index {
                    out.push_str(&format!("[key: string]: {}; ", value.emit()));
                }
                out.push('}');
                out
            }
        }
    }
}

impl Emit for Field {
    fn emit(&self) -> String {
        let opt = if self.optional { "?" } else { "" };
        format!("{}{}: {}", quote_if_needed(&self.name), opt, self.ty.emit())
    }
}

// ————————————————————————————————————————————————————————————————————————————
// DECLARATIONS
// ————————————————————————————————————————————————————————————————————————————

impl Emit for Declaration {
    fn emit(&self) -> String {
        match &self.kind {
            DeclarationKind::Interface { fields } => {
                if fields.is_empty() {
                    return format!("export interface {} {{}}", self.name);
                }
                let lines = fields
                    .iter()
                    .map(|f| format!("  {};", f.emit()))
                    .collect::<Vec<_>>();
                format!("export interface {} {{\n{}\n}}", self.name, lines.join("\n"))
            }
            DeclarationKind::Enum { members } => {
                if members.is_empty() {
                    return format!("export enum {} {{}}", self.name);
                }
                let lines = members
                    .iter()
                    .map(|m| format!("  {} = {},", quote_if_needed(m), string_literal(m)))
                    .collect::<Vec<_>>();
                format!("export enum {} {{\n{}\n}}", self.name, lines.join("\n"))
            }
            DeclarationKind::TypeAlias { ty } => {
                format!("export type {} = {};", self.name, ty.emit())
            }
        }
    }
}

/// Join declarations in the given order, separated by blank lines.
pub fn join_declarations<'a, I>(decls: I) -> String
where
    I: IntoIterator<Item = &'a Declaration>,
{
    decls.into_iter().map(Emit::emit).collect::<Vec<_>>().join("\n\n")
}

/// Sample-generator layout: enum block first (registry order), then the
/// declaration list reversed, so parents print before the children they
/// were built from.
pub fn render_sample_module(enums: &[Declaration], declarations: &[Declaration]) -> String {
    let enums_block = if enums.is_empty() {
        String::new()
    } else {
        format!("{}\n\n", join_declarations(enums))
    };
    format!("{enums_block}{}", join_declarations(declarations.iter().rev()))
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

/// Property and enum-member names that are not plain identifiers must be quoted.
pub fn needs_quoting(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        None => true,
        Some(first) if !(first.is_ascii_alphabetic() || first == '_' || first == '$') => true,
        Some(_) => !chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$'),
    }
}

pub fn quote_if_needed(name: &str) -> String {
    if needs_quoting(name) {
        string_literal(name)
    } else {
        name.to_string()
    }
}

/// Double-quoted literal with JSON escaping (control characters included).
pub fn string_literal(s: &str) -> String {
    serde_json::Value::String(s.to_string()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prim(p: Primitive) -> Ty {
        Ty::primitive(p)
    }

    #[test]
    fn arrays_parenthesize_compound_items() {
        let single = Ty::array(prim(Primitive::String));
        assert_eq!(single.emit(), "string[]");

        let union = Ty::array(Ty::Union {
            members: vec![prim(Primitive::String), prim(Primitive::Number)],
        });
        assert_eq!(union.emit(), "(string | number)[]");

        let lone = Ty::array(Ty::Union { members: vec![Ty::named("A")] });
        assert_eq!(lone.emit(), "A[]");
    }

    #[test]
    fn degenerate_unions_and_intersections() {
        assert_eq!(Ty::Union { members: vec![] }.emit(), "never");
        assert_eq!(Ty::Intersection { members: vec![] }.emit(), "unknown");
        let nested = Ty::Intersection {
            members: vec![
                Ty::named("A"),
                Ty::Union { members: vec![Ty::named("B"), Ty::named("C")] },
            ],
        };
        assert_eq!(nested.emit(), "A & (B | C)");
    }

    #[test]
    fn single_member_wrappers_keep_inner_grouping() {
        let either = Ty::Union { members: vec![prim(Primitive::String), prim(Primitive::Number)] };
        let wrapped_union = Ty::array(Ty::Intersection { members: vec![either.clone()] });
        assert_eq!(wrapped_union.emit(), "(string | number)[]");

        let both = Ty::Intersection { members: vec![Ty::named("A"), Ty::named("B")] };
        let wrapped_both = Ty::array(Ty::Union { members: vec![both] });
        assert_eq!(wrapped_both.emit(), "(A & B)[]");

        let mixed = Ty::Intersection {
            members: vec![Ty::named("A"), Ty::Intersection { members: vec![either] }],
        };
        assert_eq!(mixed.emit(), "A & (string | number)");
    }

    #[test]
    fn control_characters_are_escaped() {
        assert_eq!(Literal::String("line1\nline2".into()).emit(), r#""line1\nline2""#);
        assert_eq!(Literal::String("tab\there".into()).emit(), r#""tab\there""#);
        let en = Declaration::enumeration("E".into(), vec!["a\nb".into()]);
        assert_eq!(en.emit(), "export enum E {\n  \"a\\nb\" = \"a\\nb\",\n}");
        assert!(!en.emit().contains("a\nb"));
    }

    #[test]
    fn inline_objects_render_on_one_line() {
        let empty = Ty::Object { fields: vec![], index: None };
        assert_eq!(empty.emit(), "{}");

        let obj = Ty::Object {
            fields: vec![
                Field { name: "id".into(), ty: prim(Primitive::Number), optional: false },
                Field { name: "first-name".into(), ty: prim(Primitive::String), optional: true },
            ],
            index: Some(Box::new(prim(Primitive::Unknown))),
        };
        assert_eq!(
            obj.emit(),
            r#"{ id: number; "first-name"?: string; [key: string]: unknown; }"#
        );
    }

    #[test]
    fn declarations_render() {
        let iface = Declaration::interface(
            "User".into(),
            vec![Field { name: "id".into(), ty: prim(Primitive::Number), optional: false }],
        );
        assert_eq!(iface.emit(), "export interface User {\n  id: number;\n}");
        assert_eq!(Declaration::interface("Empty".into(), vec![]).emit(), "export interface Empty {}");

        let en = Declaration::enumeration("Status".into(), vec!["ACTIVE".into(), "in-progress".into()]);
        assert_eq!(
            en.emit(),
            "export enum Status {\n  ACTIVE = \"ACTIVE\",\n  \"in-progress\" = \"in-progress\",\n}"
        );

        let alias = Declaration::alias("Id".into(), prim(Primitive::String));
        assert_eq!(alias.emit(), "export type Id = string;");
    }

    #[test]
    fn literals_escape() {
        assert_eq!(Literal::String("say \"hi\"".into()).emit(), r#""say \"hi\"""#);
        assert_eq!(Literal::Number("1.5".into()).emit(), "1.5");
        assert_eq!(Literal::Null.emit(), "null");
    }

    #[test]
    fn quoting_rules() {
        assert!(!needs_quoting("foo"));
        assert!(!needs_quoting("_foo$1"));
        assert!(needs_quoting(""));
        assert!(needs_quoting("1abc"));
        assert!(needs_quoting("a-b"));
    }
}
