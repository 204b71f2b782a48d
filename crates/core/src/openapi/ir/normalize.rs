//! Normalization from the API description to service IR.
//!
//! This module handles all the description-specific logic:
//! - Grouping operations into modules by tag
//! - Parameter merging (path-level and operation-level)
//! - Success response, request body and query policy decisions
//! - Function naming and collision resolution per module

use indexmap::{IndexMap, IndexSet};

use crate::config::{QueryWithBodyPolicy, RenderOptions};
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::openapi::spec::{
    self, ApiDescription, HttpMethod, Operation, Param, PropDescription, RequestBody, Response,
};

use super::api::{
    BodyIR, BodyKind, OperationIR, OperationKind, ParamIR, ParamLocation, ServiceIR, UrlPart,
};
use super::naming::{
    NameRegistry, fallback_seed, to_camel_case, to_function_name, to_link_function_name,
    to_module_name,
};
use super::typemap::{TypeMapping, map_type};
use super::types::{TsPrimitive, TsType};
use super::utils::{capitalize_first, escape_identifier, sanitize_ts_identifier};

const JSON: &str = "application/json";
const MULTIPART: &str = "multipart/form-data";
const OCTET_STREAM: &str = "application/octet-stream";

/// An operation before it is placed into a module.
struct Normalized {
    /// Name derived from the summary (or its fallbacks)
    preferred: String,
    /// Name derived from the operationId, used on collision
    alternative: Option<String>,
    op: OperationIR,
}

/// Group and normalize every operation of the document.
///
/// Modules come out in order of first appearance; operations inside a
/// module keep document order.
pub fn normalize_services(
    doc: &ApiDescription,
    options: &RenderOptions,
    diagnostics: &mut Diagnostics,
) -> Vec<ServiceIR> {
    let mut buckets: IndexMap<String, (NameRegistry, Vec<OperationIR>)> = IndexMap::new();

    for (path, item) in &doc.paths {
        for verb in &item.unsupported_methods {
            diagnostics.warn(
                DiagnosticKind::UnsupportedMethod,
                format!("{} {path}", verb.to_ascii_uppercase()),
                "the client has no method for this verb, operation not emitted",
            );
        }

        for (method, op) in &item.operations {
            let subject = format!("{} {path}", method.as_str().to_ascii_uppercase());

            if op.tags.is_empty() {
                diagnostics.warn(
                    DiagnosticKind::UntaggedOperation,
                    &subject,
                    "operation has no tag and is not emitted",
                );
                continue;
            }

            let Some(normalized) = normalize_operation(
                path,
                *method,
                op,
                &item.parameters,
                options,
                &subject,
                diagnostics,
            ) else {
                continue;
            };

            let modules: IndexSet<String> = op.tags.iter().map(|t| to_module_name(t)).collect();
            for module_name in modules {
                let (registry, operations) = buckets.entry(module_name.clone()).or_default();
                let claimed =
                    registry.claim(normalized.preferred.clone(), normalized.alternative.clone());
                if let Some(collided) = &claimed.collided {
                    diagnostics.warn(
                        DiagnosticKind::NameCollision,
                        &subject,
                        format!(
                            "'{collided}' is already defined in {module_name}, emitted as '{}'",
                            claimed.name
                        ),
                    );
                }
                let mut op_ir = normalized.op.clone();
                op_ir.name = claimed.name;
                operations.push(op_ir);
            }
        }
    }

    buckets
        .into_iter()
        .map(|(module_name, (_, operations))| ServiceIR {
            module_name,
            operations,
        })
        .collect()
}

fn normalize_operation(
    path: &str,
    method: HttpMethod,
    op: &Operation,
    path_params: &[Param],
    options: &RenderOptions,
    subject: &str,
    diagnostics: &mut Diagnostics,
) -> Option<Normalized> {
    let mut refs = IndexSet::new();

    let success = success_response(op);
    let kind = if success.is_some_and(|r| r.content.contains_key(OCTET_STREAM)) {
        OperationKind::DownloadLink
    } else {
        OperationKind::Request
    };

    let mut params =
        normalize_params(path_params, &op.parameters, subject, &mut refs, diagnostics);
    declare_missing_path_params(path, &mut params, subject, diagnostics);

    let (body, response) = match kind {
        OperationKind::DownloadLink => (None, None),
        OperationKind::Request => {
            let response = success.and_then(|r| normalize_response(r, subject, &mut refs, diagnostics));
            let body = op
                .request_body
                .as_ref()
                .map(|b| normalize_body(b, subject, &mut refs, diagnostics));
            (body, response)
        }
    };

    let has_query = params.iter().any(|p| p.location == ParamLocation::Query);
    let send_query = match (&body, has_query) {
        (_, false) => false,
        (None, true) => true,
        (Some(_), true) => match options.query_with_body {
            QueryWithBodyPolicy::Drop => {
                diagnostics.warn(
                    DiagnosticKind::QueryWithBody,
                    subject,
                    "query parameters with a request body are not sent",
                );
                false
            }
            QueryWithBodyPolicy::Combine => true,
            QueryWithBodyPolicy::Reject => {
                diagnostics.error(
                    DiagnosticKind::QueryWithBody,
                    subject,
                    "query parameters with a request body, operation omitted",
                );
                return None;
            }
        },
    };

    claim_param_names(&mut params, body.as_ref(), subject, diagnostics);

    let (preferred, alternative) = function_names(kind, method, path, op);
    let url = url_parts(path, &params);

    Some(Normalized {
        preferred,
        alternative,
        op: OperationIR {
            name: String::new(),
            kind,
            method,
            url,
            params,
            body,
            response,
            send_query,
            refs,
        },
    })
}

/// `200`, else the first `2xx` in document order.
fn success_response(op: &Operation) -> Option<&Response> {
    op.responses.get("200").or_else(|| {
        op.responses
            .iter()
            .find(|(status, _)| status.starts_with('2'))
            .map(|(_, response)| response)
    })
}

/// Map a description, turning unsupported shapes into warnings.
fn map_reported(
    prop: &PropDescription,
    subject: &str,
    what: &str,
    refs: &mut IndexSet<String>,
    diagnostics: &mut Diagnostics,
) -> TsType {
    let TypeMapping {
        ty,
        refs: found,
        unsupported,
    } = map_type(prop);
    for raw in unsupported {
        diagnostics.warn(
            DiagnosticKind::UnsupportedProperty,
            subject,
            format!("{what} has unsupported shape {raw}, typed as unknown"),
        );
    }
    refs.extend(found);
    ty
}

fn normalize_params(
    path_params: &[Param],
    op_params: &[Param],
    subject: &str,
    refs: &mut IndexSet<String>,
    diagnostics: &mut Diagnostics,
) -> Vec<ParamIR> {
    // Operation-level parameters override path-level ones with the same name
    let mut merged: IndexMap<(&str, spec::ParamLocation), &Param> = IndexMap::new();
    for param in path_params.iter().chain(op_params) {
        merged.insert((param.name.as_str(), param.location), param);
    }

    merged
        .into_values()
        .filter_map(|param| {
            let location = match param.location {
                spec::ParamLocation::Path => ParamLocation::Path,
                spec::ParamLocation::Query => ParamLocation::Query,
                spec::ParamLocation::Header | spec::ParamLocation::Cookie => return None,
            };
            let what = format!("parameter '{}'", param.name);
            let ty = map_reported(&param.schema, subject, &what, refs, diagnostics);
            Some(ParamIR {
                name: sanitize_ts_identifier(&param.name),
                original_name: param.name.clone(),
                ty,
                // Path parameters are always part of the URL
                required: param.required || location == ParamLocation::Path,
                location,
            })
        })
        .collect()
}

/// Placeholders of the path template without a declared path parameter
/// become required `string` parameters, in front of the declared ones.
fn declare_missing_path_params(
    path: &str,
    params: &mut Vec<ParamIR>,
    subject: &str,
    diagnostics: &mut Diagnostics,
) {
    let mut missing: Vec<ParamIR> = placeholders(path)
        .into_iter()
        .filter(|placeholder| {
            !params
                .iter()
                .any(|p| p.location == ParamLocation::Path && p.original_name == *placeholder)
        })
        .map(|placeholder| {
            diagnostics.warn(
                DiagnosticKind::UndeclaredPathParameter,
                subject,
                format!("'{{{placeholder}}}' has no declared parameter, typed as string"),
            );
            ParamIR {
                name: sanitize_ts_identifier(placeholder),
                original_name: placeholder.to_string(),
                ty: TsType::Primitive(TsPrimitive::String),
                required: true,
                location: ParamLocation::Path,
            }
        })
        .collect();
    if !missing.is_empty() {
        missing.append(params);
        *params = missing;
    }
}

/// Make every signature identifier unique inside the function.
///
/// The body parameter and the names the function body refers to are taken
/// first; a clashing parameter gets a numeric suffix and keeps its wire name
/// as the query key.
fn claim_param_names(
    params: &mut [ParamIR],
    body: Option<&BodyIR>,
    subject: &str,
    diagnostics: &mut Diagnostics,
) {
    let mut registry = NameRegistry::default();
    registry.reserve("api");
    registry.reserve("getApiBase");
    if let Some(body) = body {
        registry.reserve(body.param_name);
        if body.kind == BodyKind::Multipart {
            registry.reserve("formData");
        }
    }

    for param in params {
        let claimed = registry.claim(param.name.clone(), None);
        if let Some(collided) = claimed.collided {
            diagnostics.warn(
                DiagnosticKind::NameCollision,
                subject,
                format!(
                    "parameter '{}' clashes with '{collided}', emitted as '{}'",
                    param.original_name, claimed.name
                ),
            );
            param.name = claimed.name;
        }
    }
}

fn normalize_response(
    response: &Response,
    subject: &str,
    refs: &mut IndexSet<String>,
    diagnostics: &mut Diagnostics,
) -> Option<TsType> {
    if response.content.is_empty() {
        return None;
    }

    match response.content.get(JSON) {
        Some(media) => Some(map_reported(
            &media.schema,
            subject,
            "response",
            refs,
            diagnostics,
        )),
        None => {
            let types: Vec<_> = response.content.keys().map(String::as_str).collect();
            diagnostics.warn(
                DiagnosticKind::UnsupportedResponseContent,
                subject,
                format!("no JSON response among [{}], typed as unknown", types.join(", ")),
            );
            Some(TsType::Primitive(TsPrimitive::Unknown))
        }
    }
}

fn normalize_body(
    body: &RequestBody,
    subject: &str,
    refs: &mut IndexSet<String>,
    diagnostics: &mut Diagnostics,
) -> BodyIR {
    if let Some(media) = body.content.get(MULTIPART) {
        let ty = map_reported(&media.schema, subject, "multipart body", refs, diagnostics);
        return BodyIR {
            kind: BodyKind::Multipart,
            param_name: "data",
            ty,
        };
    }

    if let Some(media) = body.content.get(JSON) {
        let ty = map_reported(&media.schema, subject, "JSON body", refs, diagnostics);
        return BodyIR {
            kind: BodyKind::Json,
            param_name: "content",
            ty,
        };
    }

    let types: Vec<_> = body.content.keys().map(String::as_str).collect();
    diagnostics.warn(
        DiagnosticKind::UnsupportedRequestBody,
        subject,
        format!(
            "request body [{}] is declared but not sent",
            types.join(", ")
        ),
    );
    let ty = match body.content.values().next() {
        Some(media) if !media.schema.is_unspecified() => {
            map_reported(&media.schema, subject, "request body", refs, diagnostics)
        }
        _ => TsType::Primitive(TsPrimitive::Unknown),
    };
    BodyIR {
        kind: BodyKind::Unsupported,
        param_name: "content",
        ty,
    }
}

/// Preferred and collision fallback names for an operation.
fn function_names(
    kind: OperationKind,
    method: HttpMethod,
    path: &str,
    op: &Operation,
) -> (String, Option<String>) {
    let from_seed = |seed: &str| match kind {
        OperationKind::Request => escape_identifier(seed.to_string()),
        OperationKind::DownloadLink => format!("get{}Link", capitalize_first(seed)),
    };

    let alternative = op
        .operation_id
        .as_deref()
        .map(to_camel_case)
        .filter(|s| !s.is_empty())
        .map(|s| from_seed(&s));

    let from_summary = op.summary.as_deref().and_then(|s| match kind {
        OperationKind::Request => to_function_name(s),
        OperationKind::DownloadLink => to_link_function_name(s),
    });

    let preferred = from_summary
        .or_else(|| alternative.clone())
        .unwrap_or_else(|| from_seed(&fallback_seed(method, path)));

    (preferred, alternative)
}

/// Distinct `{name}` placeholders of a path template, in order.
fn placeholders(path: &str) -> IndexSet<&str> {
    let mut found = IndexSet::new();
    let mut rest = path;
    while let Some(start) = rest.find('{') {
        let Some(len) = rest[start..].find('}') else {
            break;
        };
        found.insert(&rest[start + 1..start + len]);
        rest = &rest[start + len + 1..];
    }
    found
}

/// Split `/items/{item-id}/x` into static text and interpolated identifiers.
fn url_parts(path: &str, params: &[ParamIR]) -> Vec<UrlPart> {
    let mut parts = Vec::new();
    let mut rest = path;

    while let Some(start) = rest.find('{') {
        let Some(len) = rest[start..].find('}') else {
            break;
        };
        if start > 0 {
            parts.push(UrlPart::Static(rest[..start].to_string()));
        }
        let placeholder = &rest[start + 1..start + len];
        let ident = params
            .iter()
            .find(|p| p.location == ParamLocation::Path && p.original_name == placeholder)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| sanitize_ts_identifier(placeholder));
        parts.push(UrlPart::Param(ident));
        rest = &rest[start + len + 1..];
    }

    if !rest.is_empty() {
        parts.push(UrlPart::Static(rest.to_string()));
    }
    parts
}
