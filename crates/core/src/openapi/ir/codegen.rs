//! Code generation from service IR to TypeScript AST.
//!
//! This module lowers normalized operations into TypeScript AST nodes
//! (functions, statements, expressions) and builds the constants module
//! every service imports from.
//!
//! The generated AST can then be emitted to strings via the `Emit` trait.

use crate::config::RenderOptions;

use super::GENERATED_HEADER;
use super::api::{BodyKind, OperationIR, OperationKind, ParamIR, ServiceIR, UrlPart};
use super::schemas::schema_import;
use super::types::{
    BinOp, TemplatePart, TsExpr, TsFunction, TsImport, TsModule, TsParam, TsPrimitive, TsStmt,
    TsType, VarKind,
};

/// Module path of the constants module, relative to a service module.
const DEFAULTS_FROM_SERVICE: &str = "../defaults";

/// Generate a service module from its IR.
pub fn codegen_service(service: &ServiceIR) -> TsModule {
    let defaults_import = TsImport {
        items: vec!["getApiBase".into(), "api".into()],
        from: DEFAULTS_FROM_SERVICE.into(),
    };

    let schema_imports = service
        .refs()
        .into_iter()
        .map(|name| schema_import(&name, "../schemas"))
        .collect();

    TsModule {
        header: vec![GENERATED_HEADER.to_string()],
        import_groups: vec![vec![defaults_import], schema_imports],
        types: Vec::new(),
        functions: service.operations.iter().map(codegen_operation).collect(),
        statements: Vec::new(),
    }
}

/// Generate the constants module: base-URL resolver and client instance.
pub fn codegen_defaults(options: &RenderOptions) -> TsModule {
    let is_dev = TsExpr::ident("import")
        .member("meta")
        .member("env")
        .member("DEV");

    let get_api_base = TsFunction {
        name: "getApiBase".into(),
        params: Vec::new(),
        return_type: None,
        body: vec![TsStmt::If {
            cond: is_dev,
            then_body: vec![TsStmt::Return(Some(TsExpr::string(&options.dev_base_url)))],
            else_body: Some(vec![TsStmt::Return(Some(TsExpr::string(
                &options.api_prefix,
            )))]),
        }],
        is_async: false,
        is_export: true,
    };

    let client = TsStmt::VarDecl {
        kind: VarKind::Const,
        name: "api".into(),
        init: TsExpr::ident("mande").call(vec![TsExpr::ident("getApiBase").call(Vec::new())]),
        is_export: true,
    };

    TsModule {
        header: vec![GENERATED_HEADER.to_string()],
        import_groups: vec![vec![TsImport {
            items: vec!["mande".into()],
            from: "mande".into(),
        }]],
        types: Vec::new(),
        functions: vec![get_api_base],
        statements: vec![client],
    }
}

fn codegen_operation(op: &OperationIR) -> TsFunction {
    match op.kind {
        OperationKind::Request => codegen_request(op),
        OperationKind::DownloadLink => codegen_link(op),
    }
}

/// Function parameters: declared parameters, then the body.
///
/// An optional parameter followed by a required one cannot use `?`, so it is
/// typed `T | undefined` instead.
fn codegen_params(op: &OperationIR) -> Vec<TsParam> {
    let body_follows = op.body.is_some();
    let mut params = Vec::with_capacity(op.params.len() + 1);

    for (i, param) in op.params.iter().enumerate() {
        let required_follows = body_follows || op.params[i + 1..].iter().any(|p| p.required);
        params.push(codegen_param(param, required_follows));
    }

    if let Some(body) = &op.body {
        params.push(TsParam {
            name: body.param_name.into(),
            ty: Some(body.ty.clone()),
            optional: false,
        });
    }

    params
}

fn codegen_param(param: &ParamIR, required_follows: bool) -> TsParam {
    if param.required {
        return TsParam {
            name: param.name.clone(),
            ty: Some(param.ty.clone()),
            optional: false,
        };
    }

    if required_follows {
        let undefined = TsType::Primitive(TsPrimitive::Undefined);
        let ty = match &param.ty {
            TsType::Union(members) => {
                let mut members = members.clone();
                members.push(undefined);
                TsType::Union(members)
            }
            other => TsType::Union(vec![other.clone(), undefined]),
        };
        return TsParam {
            name: param.name.clone(),
            ty: Some(ty),
            optional: false,
        };
    }

    TsParam {
        name: param.name.clone(),
        ty: Some(param.ty.clone()),
        optional: true,
    }
}

fn codegen_url(parts: &[UrlPart]) -> TsExpr {
    TsExpr::Template(
        parts
            .iter()
            .map(|part| match part {
                UrlPart::Static(s) => TemplatePart::Static(s.clone()),
                UrlPart::Param(name) => TemplatePart::Dynamic(TsExpr::ident(name.as_str())),
            })
            .collect(),
    )
}

/// `{query: {a, 'b-c': bC}}`
fn codegen_query_options(op: &OperationIR) -> TsExpr {
    let query = op
        .query_params()
        .map(|p| (p.original_name.clone(), TsExpr::ident(p.name.as_str())))
        .collect();
    TsExpr::Object(vec![("query".into(), TsExpr::Object(query))])
}

fn codegen_request(op: &OperationIR) -> TsFunction {
    let mut body = Vec::new();
    let mut args = vec![codegen_url(&op.url)];

    let payload = match op.body.as_ref().map(|b| b.kind) {
        Some(BodyKind::Multipart) => {
            body.push(TsStmt::VarDecl {
                kind: VarKind::Const,
                name: "formData".into(),
                init: TsExpr::New {
                    callee: Box::new(TsExpr::ident("FormData")),
                    args: Vec::new(),
                },
                is_export: false,
            });
            body.push(TsStmt::Expr(TsExpr::ident("formData").member("append").call(
                vec![
                    TsExpr::string("file"),
                    TsExpr::ident("data").member("file"),
                ],
            )));
            Some(TsExpr::ident("formData"))
        }
        Some(BodyKind::Json) => Some(TsExpr::ident("content")),
        Some(BodyKind::Unsupported) | None => None,
    };

    match (payload, op.send_query) {
        (Some(payload), true) => {
            args.push(payload);
            args.push(codegen_query_options(op));
        }
        (Some(payload), false) => args.push(payload),
        (None, true) => {
            if op.method.takes_body() {
                args.push(TsExpr::ident("undefined"));
            }
            args.push(codegen_query_options(op));
        }
        (None, false) => {}
    }

    let type_args = op.response.iter().cloned().collect();
    let call = TsExpr::ident("api")
        .member(op.method.as_str())
        .call_with_types(type_args, args);
    body.push(TsStmt::Return(Some(TsExpr::Await(Box::new(call)))));

    let response = op
        .response
        .clone()
        .unwrap_or(TsType::Primitive(TsPrimitive::Void));

    TsFunction {
        name: op.name.clone(),
        params: codegen_params(op),
        return_type: Some(TsType::promise(response)),
        body,
        is_async: true,
        is_export: true,
    }
}

fn codegen_link(op: &OperationIR) -> TsFunction {
    let url = TsExpr::BinOp {
        left: Box::new(TsExpr::ident("getApiBase").call(Vec::new())),
        op: BinOp::Add,
        right: Box::new(codegen_url(&op.url)),
    };

    TsFunction {
        name: op.name.clone(),
        params: codegen_params(op),
        return_type: Some(TsType::Primitive(TsPrimitive::String)),
        body: vec![TsStmt::Return(Some(url))],
        is_async: false,
        is_export: true,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::super::emit::Emit;
    use super::*;

    use indexmap::IndexSet;

    use crate::openapi::ir::api::{BodyIR, ParamLocation};
    use crate::openapi::spec::HttpMethod;

    fn op(name: &str, method: HttpMethod, url: &str) -> OperationIR {
        OperationIR {
            name: name.into(),
            kind: OperationKind::Request,
            method,
            url: vec![UrlPart::Static(url.into())],
            params: Vec::new(),
            body: None,
            response: None,
            send_query: false,
            refs: IndexSet::new(),
        }
    }

    fn param(name: &str, ty: TsPrimitive, required: bool, location: ParamLocation) -> ParamIR {
        ParamIR {
            name: name.into(),
            original_name: name.into(),
            ty: TsType::Primitive(ty),
            required,
            location,
        }
    }

    #[test]
    fn test_defaults_module() {
        let options = RenderOptions {
            api_prefix: "/api".into(),
            ..RenderOptions::default()
        };
        let expected = "\
// This file is autogenerated, do not edit directly.

import {mande} from 'mande'

export const getApiBase = () => {
  if (import.meta.env.DEV) {
    return 'http://localhost:8000'
  } else {
    return '/api'
  }
}

export const api = mande(getApiBase())
";
        assert_eq!(codegen_defaults(&options).emit(), expected);
    }

    #[test]
    fn test_void_request_without_type_args() {
        let mut delete = op("deleteGlossary", HttpMethod::Delete, "/glossary/");
        delete.url.push(UrlPart::Param("glossary_id".into()));
        delete.params.push(param(
            "glossary_id",
            TsPrimitive::Number,
            true,
            ParamLocation::Path,
        ));

        assert_eq!(
            codegen_operation(&delete).emit(),
            "export const deleteGlossary = async (glossary_id: number): Promise<void> => {\n  return await api.delete(`/glossary/${glossary_id}`)\n}\n"
        );
    }

    #[test]
    fn test_optional_param_before_required() {
        let mut search = op("search", HttpMethod::Get, "/search");
        search.response = Some(TsType::Ref("SearchResult".into()));
        search.send_query = true;
        search.params = vec![
            param("page", TsPrimitive::Number, false, ParamLocation::Query),
            param("q", TsPrimitive::String, true, ParamLocation::Query),
            param("limit", TsPrimitive::Number, false, ParamLocation::Query),
        ];

        let code = codegen_operation(&search).emit();
        assert!(
            code.starts_with(
                "export const search = async (page: number | undefined, q: string, limit?: number): Promise<SearchResult> => {"
            ),
            "{code}"
        );
        assert!(code.contains("return await api.get<SearchResult>(`/search`, {query: {page, q, limit}})"));
    }

    #[test]
    fn test_post_query_without_body() {
        let mut start = op("startJob", HttpMethod::Post, "/jobs");
        start.send_query = true;
        start.params = vec![param("force", TsPrimitive::Boolean, true, ParamLocation::Query)];

        let code = codegen_operation(&start).emit();
        assert!(code.contains("return await api.post(`/jobs`, undefined, {query: {force}})"));
    }

    #[test]
    fn test_multipart_with_combined_query() {
        let mut load = op("loadGlossaryFile", HttpMethod::Post, "/glossary/load_file");
        load.response = Some(TsType::Ref("GlossaryResponse".into()));
        load.send_query = true;
        load.params = vec![param(
            "glossary_name",
            TsPrimitive::String,
            false,
            ParamLocation::Query,
        )];
        load.body = Some(BodyIR {
            kind: BodyKind::Multipart,
            param_name: "data",
            ty: TsType::Ref("Body_load_file".into()),
        });

        let expected = "\
export const loadGlossaryFile = async (glossary_name: string | undefined, data: Body_load_file): Promise<GlossaryResponse> => {
  const formData = new FormData()
  formData.append('file', data.file)
  return await api.post<GlossaryResponse>(`/glossary/load_file`, formData, {query: {glossary_name}})
}
";
        assert_eq!(codegen_operation(&load).emit(), expected);
    }

    #[test]
    fn test_quoted_query_key() {
        let mut list = op("listItems", HttpMethod::Get, "/items");
        list.send_query = true;
        list.params = vec![ParamIR {
            name: "pageSize".into(),
            original_name: "page-size".into(),
            ty: TsType::Primitive(TsPrimitive::Number),
            required: false,
            location: ParamLocation::Query,
        }];

        let code = codegen_operation(&list).emit();
        assert!(code.contains("(pageSize?: number): Promise<void>"));
        assert!(code.contains("{query: {'page-size': pageSize}}"));
    }

    #[test]
    fn test_download_link() {
        let link = OperationIR {
            kind: OperationKind::DownloadLink,
            url: vec![
                UrlPart::Static("/xliff/".into()),
                UrlPart::Param("doc_id".into()),
                UrlPart::Static("/download".into()),
            ],
            params: vec![param("doc_id", TsPrimitive::Number, true, ParamLocation::Path)],
            ..op("getDownloadXliffLink", HttpMethod::Get, "")
        };

        assert_eq!(
            codegen_operation(&link).emit(),
            "export const getDownloadXliffLink = (doc_id: number): string => {\n  return getApiBase() + `/xliff/${doc_id}/download`\n}\n"
        );
    }
}
