//! Schema-driven API client generator.
//!
//! `apigen-core` reads an OpenAPI-style description (JSON or YAML, from a URL
//! or a file) and writes a TypeScript client next to the consuming app:
//!
//! - `defaults.ts`: base-URL resolver and the shared HTTP client instance
//! - `schemas/<Name>.ts`: one interface or literal union per component schema
//! - `services/<Tag>Service.ts`: one function per operation, grouped by tag
//!
//! ```no_run
//! # async fn demo() -> Result<(), apigen_core::GenerateError> {
//! use apigen_core::{Generator, GeneratorConfig, RenderOptions};
//!
//! let config = GeneratorConfig {
//!     input: "http://localhost:8000/openapi.json".into(),
//!     output: "src/client".into(),
//!     render: RenderOptions::default(),
//! };
//! let report = Generator::new(config).run().await?;
//! for diagnostic in &report.diagnostics {
//!     eprintln!("{diagnostic}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod diagnostics;
mod error;
pub mod fetch;
pub mod generator;
pub mod openapi;
pub mod writer;

pub use config::{ConfigFile, GeneratorConfig, QueryWithBodyPolicy, RenderOptions};
pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics, Severity};
pub use error::{ConfigError, GenerateError};
pub use generator::{GenerationReport, Generator, check};
pub use openapi::{GeneratedFile, Rendered, render};
