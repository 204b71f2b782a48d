//! Intermediate Representation for API description to TypeScript generation.
//!
//! This module defines a three-layer architecture:
//! 1. Service IR: normalized operations grouped into modules
//! 2. TypeScript AST IR: types, expressions, statements, functions, modules
//! 3. Emission: AST to TypeScript code strings via the `Emit` trait
//!
//! The separation allows:
//! - All description corner cases resolved in normalization
//! - Code generation builds structured AST (testable)
//! - Emission is purely mechanical string building
//!
//! ## Module Structure
//!
//! - `types`: TypeScript AST IR (TsType, TsExpr, TsStmt, TsFunction, TsModule)
//! - `typemap`: property description -> TsType plus referenced schemas
//! - `naming`: summaries and tags -> identifiers
//! - `schemas`: component schemas -> type modules
//! - `api`: service IR (ServiceIR, OperationIR, ParamIR, BodyIR)
//! - `normalize`: description -> service IR
//! - `codegen`: service IR -> TypeScript AST, plus the constants module
//! - `emit`: TypeScript AST -> code strings (via Emit trait)
//! - `utils`: common utilities shared across modules

mod api;
mod codegen;
mod emit;
mod naming;
mod normalize;
mod schemas;
mod typemap;
mod types;
mod utils;

/// First line of every generated file.
pub const GENERATED_HEADER: &str = "This file is autogenerated, do not edit directly.";

// Re-export the main entry points
pub use codegen::{codegen_defaults, codegen_service};
pub use emit::Emit;
pub use normalize::normalize_services;
pub use schemas::schema_modules;
