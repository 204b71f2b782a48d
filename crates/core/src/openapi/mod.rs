//! API description to TypeScript client generator.
//!
//! This module parses OpenAPI-style descriptions and generates TypeScript with:
//! - One type module per component schema (interfaces and literal unions)
//! - One service module per tag, with a client function per operation
//! - A constants module with the base-URL resolver and the shared client

mod emitter;
mod ir;
pub mod spec;

pub use emitter::{
    DEFAULTS_FILE, GeneratedFile, Rendered, SCHEMAS_DIR, SERVICES_DIR, render,
};
pub use ir::GENERATED_HEADER;
