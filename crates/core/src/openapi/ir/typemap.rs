//! Property description to TypeScript type.
//!
//! The mapper is pure: shapes it cannot express come back as `unknown` plus
//! an entry in [`TypeMapping::unsupported`], and the caller decides how to
//! report them.

use indexmap::IndexSet;

use crate::openapi::spec::{Primitive, PropDescription};

use super::naming::to_type_name;
use super::types::{TsPrimitive, TsType};

/// Result of mapping one property description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeMapping {
    /// The TypeScript type expression.
    pub ty: TsType,
    /// Referenced schema names, deduplicated, in first-appearance order.
    pub refs: IndexSet<String>,
    /// Raw renderings of every shape that mapped to `unknown`.
    pub unsupported: Vec<String>,
}

/// Map a property description to a type expression and its references.
pub fn map_type(prop: &PropDescription) -> TypeMapping {
    let mut refs = IndexSet::new();
    let mut unsupported = Vec::new();
    let ty = map_inner(prop, &mut refs, &mut unsupported);
    TypeMapping {
        ty,
        refs,
        unsupported,
    }
}

fn map_inner(
    prop: &PropDescription,
    refs: &mut IndexSet<String>,
    unsupported: &mut Vec<String>,
) -> TsType {
    match prop {
        PropDescription::Trivial(trivial) => TsType::Primitive(match trivial.kind {
            Primitive::String => TsPrimitive::String,
            Primitive::Integer | Primitive::Number => TsPrimitive::Number,
            Primitive::Boolean => TsPrimitive::Boolean,
            Primitive::Null => TsPrimitive::Null,
        }),
        PropDescription::Array(items) => {
            TsType::Array(Box::new(map_inner(items, refs, unsupported)))
        }
        PropDescription::Ref(r) => {
            let name = r.name();
            refs.insert(name.to_string());
            TsType::Ref(to_type_name(name))
        }
        PropDescription::AnyOf(members) => {
            let mut types: Vec<TsType> = members
                .iter()
                .map(|m| map_inner(m, refs, unsupported))
                .collect();
            match types.len() {
                0 => {
                    unsupported.push(prop.describe());
                    TsType::Primitive(TsPrimitive::Unknown)
                }
                1 => types.remove(0),
                _ => TsType::Union(types),
            }
        }
        PropDescription::Unsupported(_) => {
            unsupported.push(prop.describe());
            TsType::Primitive(TsPrimitive::Unknown)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use serde_json::json;

    use super::super::emit::Emit;
    use super::*;

    fn mapped(value: serde_json::Value) -> (String, Vec<String>, usize) {
        let mapping = map_type(&PropDescription::classify(value));
        (
            mapping.ty.emit(),
            mapping.refs.into_iter().collect(),
            mapping.unsupported.len(),
        )
    }

    #[test]
    fn test_primitives() {
        assert_eq!(mapped(json!({ "type": "string" })).0, "string");
        assert_eq!(mapped(json!({ "type": "integer" })).0, "number");
        assert_eq!(mapped(json!({ "type": "number", "format": "float" })).0, "number");
        assert_eq!(mapped(json!({ "type": "boolean" })).0, "boolean");
        assert_eq!(mapped(json!({ "type": "null" })).0, "null");
    }

    #[test]
    fn test_array_of_ref() {
        let (ty, refs, unsupported) = mapped(json!({
            "type": "array",
            "items": { "$ref": "#/components/schemas/DocumentRecord" }
        }));
        assert_eq!(ty, "DocumentRecord[]");
        assert_eq!(refs, ["DocumentRecord"]);
        assert_eq!(unsupported, 0);
    }

    #[test]
    fn test_any_of_union() {
        let (ty, refs, _) = mapped(json!({
            "anyOf": [
                { "$ref": "#/components/schemas/User" },
                { "$ref": "#/components/schemas/Team" },
                { "$ref": "#/components/schemas/User" },
                { "type": "null" }
            ]
        }));
        assert_eq!(ty, "User | Team | User | null");
        assert_eq!(refs, ["User", "Team"]);
    }

    #[test]
    fn test_array_of_union_parenthesized() {
        let (ty, _, _) = mapped(json!({
            "type": "array",
            "items": { "anyOf": [{ "type": "string" }, { "type": "null" }] }
        }));
        assert_eq!(ty, "(string | null)[]");
    }

    #[test]
    fn test_single_member_any_of() {
        let (ty, refs, _) = mapped(json!({ "anyOf": [{ "$ref": "#/components/schemas/Item" }] }));
        assert_eq!(ty, "Item");
        assert_eq!(refs, ["Item"]);
    }

    #[test]
    fn test_unsupported_is_unknown() {
        let (ty, refs, unsupported) = mapped(json!({ "type": "object" }));
        assert_eq!(ty, "unknown");
        assert!(refs.is_empty());
        assert_eq!(unsupported, 1);

        let (ty, _, unsupported) = mapped(json!({
            "type": "array",
            "items": { "oneOf": [{ "type": "string" }] }
        }));
        assert_eq!(ty, "unknown[]");
        assert_eq!(unsupported, 1);
    }

    #[test]
    fn test_ref_identifier_is_sanitized() {
        let (ty, refs, _) = mapped(json!({
            "type": "array",
            "items": { "$ref": "#/components/schemas/Item-Output" }
        }));
        assert_eq!(ty, "ItemOutput[]");
        // The raw name is kept for the import path
        assert_eq!(refs, ["Item-Output"]);
    }
}
