//! API-level IR for normalized operations.
//!
//! This module defines the intermediate representation for service modules:
//! - ServiceIR: one module per tag
//! - OperationIR: a request or download-link function
//! - ParamIR / BodyIR / ResponseIR: its signature and payloads
//!
//! Every decision about the source document (success response, body kind,
//! query policy, naming) is made before this IR is built; codegen only
//! lowers it.

use indexmap::IndexSet;

use crate::openapi::spec::HttpMethod;

use super::types::TsType;

/// One service module.
#[derive(Debug, Clone)]
pub struct ServiceIR {
    /// Module name (e.g. "GlossaryService")
    pub module_name: String,
    /// Operations in document order
    pub operations: Vec<OperationIR>,
}

impl ServiceIR {
    /// Referenced schema names across all operations, in first-appearance order.
    pub fn refs(&self) -> IndexSet<String> {
        self.operations
            .iter()
            .flat_map(|op| op.refs.iter().cloned())
            .collect()
    }
}

/// What kind of function an operation becomes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    /// `async (...): Promise<T>` calling the shared client
    Request,
    /// Synchronous `(...): string` returning the download URL
    DownloadLink,
}

/// Normalized API operation
#[derive(Debug, Clone)]
pub struct OperationIR {
    /// Unique function name within the module
    pub name: String,
    pub kind: OperationKind,
    pub method: HttpMethod,
    /// URL template split into static and interpolated parts
    pub url: Vec<UrlPart>,
    /// Path and query parameters in declared order
    pub params: Vec<ParamIR>,
    /// Request body (None = no body)
    pub body: Option<BodyIR>,
    /// Response type (None = void)
    pub response: Option<TsType>,
    /// Whether query parameters are passed as `{query: {...}}`
    pub send_query: bool,
    /// Schema names used by the signature, in first-appearance order
    pub refs: IndexSet<String>,
}

impl OperationIR {
    /// Query parameters, in declared order.
    pub fn query_params(&self) -> impl Iterator<Item = &ParamIR> {
        self.params
            .iter()
            .filter(|p| p.location == ParamLocation::Query)
    }
}

/// URL template part
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlPart {
    Static(String),
    /// Interpolated identifier: ${name}
    Param(String),
}

/// Parameter location
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamLocation {
    Path,
    Query,
}

/// Single parameter definition
#[derive(Debug, Clone)]
pub struct ParamIR {
    /// TypeScript-safe identifier
    pub name: String,
    /// Wire name (query key)
    pub original_name: String,
    pub ty: TsType,
    pub required: bool,
    pub location: ParamLocation,
}

/// Request body content type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    /// multipart/form-data, sent as FormData
    Multipart,
    /// application/json, sent as is
    Json,
    /// Declared in the signature but not sent
    Unsupported,
}

/// Request body
#[derive(Debug, Clone)]
pub struct BodyIR {
    pub kind: BodyKind,
    /// Parameter name: `data` for multipart, `content` otherwise
    pub param_name: &'static str,
    pub ty: TsType,
}
