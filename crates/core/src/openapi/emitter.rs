//! TypeScript code emitter for API descriptions.
//!
//! This module is a thin wrapper around the IR-based code generation.
//! The pipeline is:
//! 1. Parse: JSON/YAML -> ApiDescription
//! 2. Normalize: ApiDescription -> schema modules and ServiceIR
//! 3. Codegen: ServiceIR -> TsModule (TypeScript AST)
//! 4. Emit: TsModule -> String (via Emit trait)
//!
//! Rendering is pure and happens in memory; writing the files is the
//! caller's job.

use std::path::PathBuf;

use crate::config::RenderOptions;
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::openapi::ir::{
    Emit, codegen_defaults, codegen_service, normalize_services, schema_modules,
};
use crate::openapi::spec::ApiDescription;

/// File name of the constants module.
pub const DEFAULTS_FILE: &str = "defaults.ts";
/// Subdirectory holding one module per schema component.
pub const SCHEMAS_DIR: &str = "schemas";
/// Subdirectory holding one module per service.
pub const SERVICES_DIR: &str = "services";

/// One rendered file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Path relative to the output root.
    pub path: PathBuf,
    /// Full file contents.
    pub contents: String,
}

/// Everything a run produces before touching the filesystem.
#[derive(Debug, Clone, Default)]
pub struct Rendered {
    /// Files in write order: constants, schemas, services.
    pub files: Vec<GeneratedFile>,
    /// Problems found while rendering.
    pub diagnostics: Diagnostics,
}

impl Rendered {
    /// Contents of the file at `path` (relative to the output root).
    pub fn file(&self, path: &str) -> Option<&str> {
        self.files
            .iter()
            .find(|f| f.path == PathBuf::from(path))
            .map(|f| f.contents.as_str())
    }
}

/// Render the whole client for `doc`.
pub fn render(doc: &ApiDescription, options: &RenderOptions) -> Rendered {
    let mut diagnostics = Diagnostics::new();

    for (location, reference) in doc.dangling_refs() {
        diagnostics.warn(
            DiagnosticKind::UnresolvedReference,
            location,
            format!(
                "'{}' does not point to a component schema, emitted as '{}'",
                reference.reference,
                reference.name()
            ),
        );
    }

    let mut files = vec![GeneratedFile {
        path: PathBuf::from(DEFAULTS_FILE),
        contents: codegen_defaults(options).emit(),
    }];

    for (name, module) in schema_modules(&doc.components.schemas, &mut diagnostics) {
        files.push(GeneratedFile {
            path: PathBuf::from(SCHEMAS_DIR).join(format!("{name}.ts")),
            contents: module.emit(),
        });
    }

    for service in normalize_services(doc, options, &mut diagnostics) {
        files.push(GeneratedFile {
            path: PathBuf::from(SERVICES_DIR).join(format!("{}.ts", service.module_name)),
            contents: codegen_service(&service).emit(),
        });
    }

    Rendered { files, diagnostics }
}
