//! Schema components to type modules.
//!
//! One module per entry of `components.schemas`, in document order:
//! objects become interfaces, enums become string literal unions, anything
//! else becomes a placeholder module plus a warning.

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::openapi::spec::{EnumSchema, ObjectSchema, SchemaDesc};

use super::naming::to_type_name;
use super::typemap::map_type;
use super::types::{
    TsImport, TsLiteral, TsModule, TsProp, TsStmt, TsType, TsTypeDef, TypeDefKind,
};
use super::GENERATED_HEADER;

/// Build one module per schema, keyed by schema name.
///
/// The key stays the raw component name (it becomes the file stem); the type
/// inside is declared under [`to_type_name`].
pub fn schema_modules(
    schemas: &IndexMap<String, SchemaDesc>,
    diagnostics: &mut Diagnostics,
) -> Vec<(String, TsModule)> {
    let mut declared: HashMap<String, &str> = HashMap::new();
    for name in schemas.keys() {
        let ident = to_type_name(name);
        if let Some(first) = declared.get(&ident) {
            diagnostics.warn(
                DiagnosticKind::NameCollision,
                format!("schema {name}"),
                format!("type name '{ident}' is also used by schema {first}"),
            );
        } else {
            declared.insert(ident, name);
        }
    }

    schemas
        .iter()
        .map(|(name, schema)| (name.clone(), schema_module(name, schema, diagnostics)))
        .collect()
}

/// `import {ItemOutput} from '<dir>/Item-Output'`
pub fn schema_import(name: &str, dir: &str) -> TsImport {
    TsImport {
        items: vec![to_type_name(name)],
        from: format!("{dir}/{name}"),
    }
}

fn schema_module(name: &str, schema: &SchemaDesc, diagnostics: &mut Diagnostics) -> TsModule {
    let mut module = TsModule {
        header: vec![GENERATED_HEADER.to_string()],
        ..TsModule::default()
    };

    match schema {
        SchemaDesc::Object(object) => {
            let (imports, def) = object_interface(name, object, diagnostics);
            module.import_groups.push(imports);
            module.types.push(def);
        }
        SchemaDesc::Enum(values) => module.types.push(enum_alias(name, values)),
        SchemaDesc::Unsupported(raw) => {
            diagnostics.warn(
                DiagnosticKind::UnsupportedSchema,
                format!("schema {name}"),
                format!("neither an object nor an enum: {raw}"),
            );
            module.statements.push(TsStmt::Comment("No content".to_string()));
        }
    }

    module
}

fn object_interface(
    name: &str,
    object: &ObjectSchema,
    diagnostics: &mut Diagnostics,
) -> (Vec<TsImport>, TsTypeDef) {
    let mut refs = indexmap::IndexSet::new();
    let mut properties = Vec::with_capacity(object.properties.len());

    for (prop_name, prop) in &object.properties {
        let mapping = map_type(prop);
        for raw in &mapping.unsupported {
            diagnostics.warn(
                DiagnosticKind::UnsupportedProperty,
                format!("schema {name}"),
                format!("property '{prop_name}' has unsupported shape {raw}, typed as unknown"),
            );
        }
        refs.extend(mapping.refs);
        properties.push(TsProp {
            name: prop_name.clone(),
            ty: mapping.ty,
            optional: !object.is_required(prop_name),
        });
    }

    let imports = refs
        .into_iter()
        .filter(|r| r != name)
        .map(|r| schema_import(&r, "."))
        .collect();

    let def = TsTypeDef {
        name: to_type_name(name),
        kind: TypeDefKind::Interface { properties },
    };
    (imports, def)
}

fn enum_alias(name: &str, schema: &EnumSchema) -> TsTypeDef {
    let members: Vec<TsType> = schema
        .values
        .iter()
        .map(|v| TsType::Literal(TsLiteral::String(v.clone())))
        .collect();
    TsTypeDef {
        name: to_type_name(name),
        kind: TypeDefKind::TypeAlias {
            ty: TsType::Union(members),
        },
    }
}
