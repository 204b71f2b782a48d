//! TypeScript code emission via the Emit trait.
//!
//! Each AST type implements `Emit`. Output follows the formatting of the
//! consuming app: single quotes, no semicolons, no spaces inside braces,
//! two-space indentation.

use super::types::{
    BinOp, TemplatePart, TsExpr, TsFunction, TsImport, TsLiteral, TsModule, TsParam, TsPrimitive,
    TsProp, TsStmt, TsType, TsTypeDef, TypeDefKind, VarKind,
};
use super::utils::{escape_template_static, escape_ts_string, quote_if_needed};

/// Trait for emitting TypeScript code from AST nodes.
pub trait Emit {
    /// Convert the AST node to its TypeScript string representation.
    fn emit(&self) -> String;
}

fn join<T: Emit>(items: &[T], sep: &str) -> String {
    items.iter().map(Emit::emit).collect::<Vec<_>>().join(sep)
}

// =============================================================================
// Types
// =============================================================================

impl Emit for TsPrimitive {
    fn emit(&self) -> String {
        match self {
            TsPrimitive::String => "string",
            TsPrimitive::Number => "number",
            TsPrimitive::Boolean => "boolean",
            TsPrimitive::Null => "null",
            TsPrimitive::Void => "void",
            TsPrimitive::Unknown => "unknown",
            TsPrimitive::Undefined => "undefined",
        }
        .to_string()
    }
}

impl Emit for TsLiteral {
    fn emit(&self) -> String {
        match self {
            TsLiteral::String(s) => format!("'{}'", escape_ts_string(s)),
        }
    }
}

impl Emit for TsType {
    fn emit(&self) -> String {
        match self {
            TsType::Primitive(p) => p.emit(),
            TsType::Array(inner) => {
                let inner_str = inner.emit();
                // Wrap unions in parentheses
                if matches!(**inner, TsType::Union(_)) {
                    format!("({inner_str})[]")
                } else {
                    format!("{inner_str}[]")
                }
            }
            TsType::Union(types) if types.is_empty() => "never".to_string(),
            TsType::Union(types) => join(types, " | "),
            TsType::Literal(lit) => lit.emit(),
            TsType::Ref(name) => name.clone(),
            TsType::Generic { name, args } => format!("{name}<{}>", join(args, ", ")),
        }
    }
}

impl Emit for TsProp {
    fn emit(&self) -> String {
        let key = quote_if_needed(&self.name);
        let opt = if self.optional { "?" } else { "" };
        format!("{key}{opt}: {}", self.ty.emit())
    }
}

impl Emit for TsTypeDef {
    fn emit(&self) -> String {
        match &self.kind {
            TypeDefKind::Interface { properties } => {
                if properties.is_empty() {
                    return format!("export interface {} {{}}\n", self.name);
                }
                let mut output = format!("export interface {} {{\n", self.name);
                for prop in properties {
                    output.push_str(&format!("  {}\n", prop.emit()));
                }
                output.push_str("}\n");
                output
            }
            TypeDefKind::TypeAlias { ty } => {
                format!("export type {} = {}\n", self.name, ty.emit())
            }
        }
    }
}

// =============================================================================
// Expressions
// =============================================================================

impl Emit for BinOp {
    fn emit(&self) -> String {
        match self {
            BinOp::Add => "+".to_string(),
        }
    }
}

impl Emit for TsExpr {
    fn emit(&self) -> String {
        match self {
            TsExpr::Ident(name) => name.clone(),
            TsExpr::Literal(lit) => lit.emit(),
            TsExpr::Call {
                callee,
                type_args,
                args,
            } => {
                let type_args_str = if type_args.is_empty() {
                    String::new()
                } else {
                    format!("<{}>", join(type_args, ", "))
                };
                format!("{}{type_args_str}({})", callee.emit(), join(args, ", "))
            }
            TsExpr::Object(props) => {
                let parts: Vec<_> = props
                    .iter()
                    .map(|(k, v)| match v {
                        // Shorthand property: {name}
                        TsExpr::Ident(ident) if ident == k => k.clone(),
                        _ => format!("{}: {}", quote_if_needed(k), v.emit()),
                    })
                    .collect();
                format!("{{{}}}", parts.join(", "))
            }
            TsExpr::Member { object, prop } => {
                format!("{}.{prop}", object.emit())
            }
            TsExpr::Template(parts) => {
                let content: String = parts
                    .iter()
                    .map(|p| match p {
                        TemplatePart::Static(s) => escape_template_static(s),
                        TemplatePart::Dynamic(e) => format!("${{{}}}", e.emit()),
                    })
                    .collect();
                format!("`{content}`")
            }
            TsExpr::Await(expr) => {
                format!("await {}", expr.emit())
            }
            TsExpr::BinOp { left, op, right } => {
                format!("{} {} {}", left.emit(), op.emit(), right.emit())
            }
            TsExpr::New { callee, args } => {
                format!("new {}({})", callee.emit(), join(args, ", "))
            }
        }
    }
}

impl Emit for TsParam {
    fn emit(&self) -> String {
        let opt = if self.optional { "?" } else { "" };
        match &self.ty {
            Some(ty) => format!("{}{opt}: {}", self.name, ty.emit()),
            None => format!("{}{opt}", self.name),
        }
    }
}

// =============================================================================
// Statements
// =============================================================================

impl Emit for VarKind {
    fn emit(&self) -> String {
        match self {
            VarKind::Const => "const".to_string(),
        }
    }
}

impl Emit for TsStmt {
    fn emit(&self) -> String {
        self.emit_indented(1)
    }
}

impl TsStmt {
    /// Emit with specified indentation level (2 spaces per level)
    pub fn emit_indented(&self, indent: usize) -> String {
        let prefix = "  ".repeat(indent);
        match self {
            TsStmt::VarDecl {
                kind,
                name,
                init,
                is_export,
            } => {
                let export = if *is_export { "export " } else { "" };
                format!("{prefix}{export}{} {name} = {}\n", kind.emit(), init.emit())
            }
            TsStmt::Expr(expr) => {
                format!("{prefix}{}\n", expr.emit())
            }
            TsStmt::Return(expr) => match expr {
                Some(e) => format!("{prefix}return {}\n", e.emit()),
                None => format!("{prefix}return\n"),
            },
            TsStmt::If {
                cond,
                then_body,
                else_body,
            } => {
                let mut output = format!("{prefix}if ({}) {{\n", cond.emit());
                for stmt in then_body {
                    output.push_str(&stmt.emit_indented(indent + 1));
                }
                if let Some(else_stmts) = else_body {
                    output.push_str(&format!("{prefix}}} else {{\n"));
                    for stmt in else_stmts {
                        output.push_str(&stmt.emit_indented(indent + 1));
                    }
                }
                output.push_str(&format!("{prefix}}}\n"));
                output
            }
            TsStmt::Comment(text) => format!("{prefix}// {text}\n"),
        }
    }
}

// =============================================================================
// Functions
// =============================================================================

impl Emit for TsFunction {
    fn emit(&self) -> String {
        let export = if self.is_export { "export " } else { "" };
        let async_str = if self.is_async { "async " } else { "" };
        let params_str = join(&self.params, ", ");
        let return_type_str = self
            .return_type
            .as_ref()
            .map(|t| format!(": {}", t.emit()))
            .unwrap_or_default();

        let mut output = format!(
            "{export}const {} = {async_str}({params_str}){return_type_str} => {{\n",
            self.name
        );
        for stmt in &self.body {
            output.push_str(&stmt.emit_indented(1));
        }
        output.push_str("}\n");
        output
    }
}

// =============================================================================
// Module
// =============================================================================

impl Emit for TsImport {
    fn emit(&self) -> String {
        format!(
            "import {{{}}} from '{}'\n",
            self.items.join(", "),
            escape_ts_string(&self.from)
        )
    }
}

impl Emit for TsModule {
    fn emit(&self) -> String {
        let mut output = String::new();

        for line in &self.header {
            output.push_str(&format!("// {line}\n"));
        }
        if !self.header.is_empty() {
            output.push('\n');
        }

        for group in self.import_groups.iter().filter(|g| !g.is_empty()) {
            for import in group {
                output.push_str(&import.emit());
            }
            output.push('\n');
        }

        let types: Vec<_> = self.types.iter().map(Emit::emit).collect();
        output.push_str(&types.join("\n"));

        for func in &self.functions {
            output.push_str(&func.emit());
        }

        if !self.statements.is_empty() && !(self.functions.is_empty() && self.types.is_empty()) {
            output.push('\n');
        }
        for stmt in &self.statements {
            output.push_str(&stmt.emit_indented(0));
        }

        output
    }
}

// =============================================================================
// Tests
// =============================================================================
