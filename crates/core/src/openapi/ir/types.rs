//! TypeScript IR types for code generation.
//!
//! This module defines the TypeScript representation every emitter builds:
//! - TsType: Types (primitives, arrays, unions, named references)
//! - TsExpr: Expressions (identifiers, calls, templates, objects)
//! - TsStmt / TsFunction / TsModule: statements, arrow functions, files

/// TypeScript type representation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TsType {
    /// Primitive types: string, number, boolean, null, void, unknown, undefined
    Primitive(TsPrimitive),
    /// Array type: T[]
    Array(Box<TsType>),
    /// Union type: A | B | C
    Union(Vec<TsType>),
    /// Literal type: 'foo'
    Literal(TsLiteral),
    /// Named type reference: Item, FormData
    Ref(String),
    /// Generic application: Promise<T>, Record<K, V>
    Generic { name: String, args: Vec<TsType> },
}

impl TsType {
    /// `Promise<T>`
    pub fn promise(inner: TsType) -> Self {
        TsType::Generic {
            name: "Promise".into(),
            args: vec![inner],
        }
    }
}

/// TypeScript primitive types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TsPrimitive {
    String,
    Number,
    Boolean,
    Null,
    Void,
    Unknown,
    Undefined,
}

/// Object property definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsProp {
    pub name: String,
    pub ty: TsType,
    pub optional: bool,
}

/// TypeScript literal values
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TsLiteral {
    String(String),
}

/// TypeScript expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TsExpr {
    /// Identifier: foo
    Ident(String),
    /// Literal value: 'bar'
    Literal(TsLiteral),
    /// Function call: foo<T>(a, b)
    Call {
        callee: Box<TsExpr>,
        type_args: Vec<TsType>,
        args: Vec<TsExpr>,
    },
    /// Object literal: {a: 1, b}
    Object(Vec<(String, TsExpr)>),
    /// Member access: foo.bar
    Member { object: Box<TsExpr>, prop: String },
    /// Template literal: `${foo}/bar`
    Template(Vec<TemplatePart>),
    /// Await expression: await fetch()
    Await(Box<TsExpr>),
    /// Binary operation: a + b
    BinOp {
        left: Box<TsExpr>,
        op: BinOp,
        right: Box<TsExpr>,
    },
    /// new FormData()
    New {
        callee: Box<TsExpr>,
        args: Vec<TsExpr>,
    },
}

impl TsExpr {
    /// Identifier expression.
    pub fn ident(name: impl Into<String>) -> Self {
        TsExpr::Ident(name.into())
    }

    /// `self.prop`
    pub fn member(self, prop: impl Into<String>) -> Self {
        TsExpr::Member {
            object: Box::new(self),
            prop: prop.into(),
        }
    }

    /// `self(args)`
    pub fn call(self, args: Vec<TsExpr>) -> Self {
        self.call_with_types(Vec::new(), args)
    }

    /// `self<type_args>(args)`
    pub fn call_with_types(self, type_args: Vec<TsType>, args: Vec<TsExpr>) -> Self {
        TsExpr::Call {
            callee: Box::new(self),
            type_args,
            args,
        }
    }

    /// Single-quoted string literal.
    pub fn string(value: impl Into<String>) -> Self {
        TsExpr::Literal(TsLiteral::String(value.into()))
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
}

/// Function parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsParam {
    pub name: String,
    pub ty: Option<TsType>,
    pub optional: bool,
}

/// Template literal part
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplatePart {
    /// Static string part
    Static(String),
    /// Dynamic expression part: ${expr}
    Dynamic(TsExpr),
}

// =============================================================================
// Module-Level IR (for printer)
// =============================================================================

/// Import statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsImport {
    /// Items to import
    pub items: Vec<String>,
    /// Module path
    pub from: String,
}

/// Type definition kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDefKind {
    /// interface Foo { ... }
    Interface { properties: Vec<TsProp> },
    /// type Foo = ...
    TypeAlias { ty: TsType },
}

/// Type definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsTypeDef {
    pub name: String,
    pub kind: TypeDefKind,
}

/// Statement in a function body or at module level
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TsStmt {
    /// const/let declaration
    VarDecl {
        kind: VarKind,
        name: String,
        init: TsExpr,
        is_export: bool,
    },
    /// Expression statement
    Expr(TsExpr),
    /// Return statement
    Return(Option<TsExpr>),
    /// If statement
    If {
        cond: TsExpr,
        then_body: Vec<TsStmt>,
        else_body: Option<Vec<TsStmt>>,
    },
    /// Line comment
    Comment(String),
}

/// Variable declaration kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarKind {
    Const,
}

/// Arrow function bound to a const: `export const name = async (...): T => {...}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsFunction {
    pub name: String,
    pub params: Vec<TsParam>,
    pub return_type: Option<TsType>,
    pub body: Vec<TsStmt>,
    pub is_async: bool,
    pub is_export: bool,
}

/// Complete TypeScript file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TsModule {
    /// Leading line comments
    pub header: Vec<String>,
    /// Import groups, separated by a blank line
    pub import_groups: Vec<Vec<TsImport>>,
    pub types: Vec<TsTypeDef>,
    pub functions: Vec<TsFunction>,
    /// Module-level statements after the functions
    pub statements: Vec<TsStmt>,
}
