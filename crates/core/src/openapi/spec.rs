//! API description model for serde deserialization.
//!
//! This module defines the subset of an OpenAPI document that the generator
//! understands. Schema and property shapes are classified into closed variant
//! sets while deserializing, so the rest of the pipeline matches on them
//! instead of probing raw JSON. Anything outside those sets is kept as an
//! `Unsupported` variant carrying the raw value, which later turns into a
//! diagnostic.
//!
//! Maps keep document order (`IndexMap`), which keeps the generated output
//! stable across runs and in the order the API author wrote it.

use indexmap::IndexMap;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Prefix of references pointing at component schemas.
const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";

/// Root API description document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiDescription {
    /// Document metadata, only used for logging.
    #[serde(default)]
    pub info: Option<Info>,
    /// URL template -> operations bound to it.
    #[serde(default)]
    pub paths: IndexMap<String, PathItem>,
    /// Reusable components.
    #[serde(default)]
    pub components: Components,
}

/// Document metadata.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Info {
    /// API title.
    pub title: Option<String>,
    /// API version.
    pub version: Option<String>,
}

/// Components section containing reusable schemas.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Components {
    /// Schema name -> schema description.
    #[serde(default)]
    pub schemas: IndexMap<String, SchemaDesc>,
}

/// HTTP verbs the generated client can call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// `get`
    Get,
    /// `post`
    Post,
    /// `put`
    Put,
    /// `delete`
    Delete,
}

impl HttpMethod {
    /// Parse a path item key into a verb. Unknown keys yield `None`.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "get" => Some(Self::Get),
            "post" => Some(Self::Post),
            "put" => Some(Self::Put),
            "delete" => Some(Self::Delete),
            _ => None,
        }
    }

    /// Lower-case verb, which is also the client method name.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Delete => "delete",
        }
    }

    /// Whether the client method takes a body argument before its options.
    pub fn takes_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put)
    }
}

/// Operations bound to one URL template.
#[derive(Debug, Clone, Default)]
pub struct PathItem {
    /// Operations in document order.
    pub operations: Vec<(HttpMethod, Operation)>,
    /// Path-level parameters shared by all operations.
    pub parameters: Vec<Param>,
    /// Verbs present in the document that the client cannot call.
    pub unsupported_methods: Vec<String>,
}

/// Verbs that are valid in a path item but have no client method.
const UNSUPPORTED_VERBS: &[&str] = &["patch", "head", "options", "trace"];

impl<'de> Deserialize<'de> for PathItem {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = IndexMap::<String, Value>::deserialize(deserializer)?;
        let mut item = PathItem::default();
        for (key, value) in raw {
            if key == "parameters" {
                item.parameters = serde_json::from_value(value).map_err(D::Error::custom)?;
            } else if let Some(method) = HttpMethod::from_key(&key) {
                let operation = serde_json::from_value(value)
                    .map_err(|e| D::Error::custom(format!("{key}: {e}")))?;
                item.operations.push((method, operation));
            } else if UNSUPPORTED_VERBS.contains(&key.as_str()) {
                item.unsupported_methods.push(key);
            }
        }
        Ok(item)
    }
}

/// An API operation (endpoint).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    /// Group labels; the operation is emitted once per tag.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Free text used as the naming seed.
    pub summary: Option<String>,
    /// Stable identifier, used to disambiguate colliding names.
    pub operation_id: Option<String>,
    /// Parameters in declaration order.
    #[serde(default)]
    pub parameters: Vec<Param>,
    /// Optional request body.
    pub request_body: Option<RequestBody>,
    /// Status code -> response.
    #[serde(default)]
    pub responses: IndexMap<String, Response>,
}

/// Where a parameter travels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamLocation {
    /// Query string.
    Query,
    /// URL template placeholder.
    Path,
    /// Request header.
    Header,
    /// Cookie.
    Cookie,
}

/// A single operation parameter.
#[derive(Debug, Clone, Deserialize)]
pub struct Param {
    /// Wire name.
    pub name: String,
    /// Parameter location.
    #[serde(rename = "in")]
    pub location: ParamLocation,
    /// Whether the parameter must be supplied.
    #[serde(default)]
    pub required: bool,
    /// Value shape.
    #[serde(default)]
    pub schema: PropDescription,
}

/// A request body definition.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RequestBody {
    /// Content type -> media type.
    #[serde(default)]
    pub content: IndexMap<String, MediaType>,
    /// Whether the body is mandatory.
    #[serde(default)]
    pub required: bool,
}

/// A response definition.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Response {
    /// Human readable description.
    pub description: Option<String>,
    /// Content type -> media type; empty when the response has no body.
    #[serde(default)]
    pub content: IndexMap<String, MediaType>,
}

/// Media type content (e.g. `application/json`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediaType {
    /// Payload shape.
    #[serde(default)]
    pub schema: PropDescription,
}

/// A named schema component.
#[derive(Debug, Clone)]
pub enum SchemaDesc {
    /// Object with named properties.
    Object(ObjectSchema),
    /// Closed set of string literals.
    Enum(EnumSchema),
    /// Any other shape, kept raw for diagnostics.
    Unsupported(Value),
}

/// Object schema.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ObjectSchema {
    /// Schema title.
    #[serde(default)]
    pub title: Option<String>,
    /// Property name -> description, in document order.
    #[serde(default)]
    pub properties: IndexMap<String, PropDescription>,
    /// Names of properties that are not optional.
    #[serde(default)]
    pub required: Vec<String>,
}

impl ObjectSchema {
    /// Whether `name` is listed in `required`.
    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|r| r == name)
    }
}

/// Enum schema.
#[derive(Debug, Clone, Default)]
pub struct EnumSchema {
    /// Literal values in document order.
    pub values: Vec<String>,
}

impl SchemaDesc {
    /// Classify a raw schema value.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        if value.get("properties").is_some() {
            return ObjectSchema::deserialize(value).map(SchemaDesc::Object);
        }

        if let Some(Value::Array(items)) = value.get("enum") {
            let values: Option<Vec<String>> = items
                .iter()
                .map(|v| v.as_str().map(str::to_string))
                .collect();
            if let Some(values) = values {
                return Ok(SchemaDesc::Enum(EnumSchema { values }));
            }
        }

        Ok(SchemaDesc::Unsupported(value))
    }
}

impl<'de> Deserialize<'de> for SchemaDesc {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        SchemaDesc::from_value(value).map_err(D::Error::custom)
    }
}

/// Primitive kinds a trivial property can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    /// `string`
    String,
    /// `integer`
    Integer,
    /// `number`
    Number,
    /// `boolean`
    Boolean,
    /// `null`
    Null,
}

impl Primitive {
    /// Parse a JSON schema `type` keyword.
    pub fn from_type_name(name: &str) -> Option<Self> {
        match name {
            "string" => Some(Self::String),
            "integer" => Some(Self::Integer),
            "number" => Some(Self::Number),
            "boolean" => Some(Self::Boolean),
            "null" => Some(Self::Null),
            _ => None,
        }
    }
}

/// Primitive property plus metadata that does not affect its type.
#[derive(Debug, Clone)]
pub struct TrivialDesc {
    /// Primitive kind.
    pub kind: Primitive,
    /// Format hint (e.g. `date-time`).
    pub format: Option<String>,
    /// Validation regex.
    pub pattern: Option<String>,
    /// Title.
    pub title: Option<String>,
}

/// Pointer to a schema component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefDesc {
    /// Raw `$ref` value.
    pub reference: String,
}

impl RefDesc {
    /// Name of the referenced schema component.
    pub fn name(&self) -> &str {
        self.reference
            .strip_prefix(SCHEMA_REF_PREFIX)
            .or_else(|| self.reference.rsplit('/').next())
            .unwrap_or(&self.reference)
    }
}

/// Shape of a property, parameter, or payload.
#[derive(Debug, Clone)]
pub enum PropDescription {
    /// Primitive value.
    Trivial(TrivialDesc),
    /// Array of items.
    Array(Box<PropDescription>),
    /// Reference to a schema component.
    Ref(RefDesc),
    /// Union of members.
    AnyOf(Vec<PropDescription>),
    /// Any other shape, kept raw for diagnostics.
    Unsupported(Value),
}

impl Default for PropDescription {
    fn default() -> Self {
        PropDescription::Unsupported(Value::Null)
    }
}

impl PropDescription {
    /// Classify a raw property value. Never fails; unknown shapes become
    /// `Unsupported`.
    pub fn classify(value: Value) -> Self {
        if let Some(Value::String(reference)) = value.get("$ref") {
            return PropDescription::Ref(RefDesc {
                reference: reference.clone(),
            });
        }

        if let Some(Value::Array(members)) = value.get("anyOf") {
            return PropDescription::AnyOf(
                members.iter().cloned().map(PropDescription::classify).collect(),
            );
        }

        let type_name = value.get("type").and_then(Value::as_str);
        if type_name == Some("array") {
            let items = value
                .get("items")
                .cloned()
                .map(PropDescription::classify)
                .unwrap_or_default();
            return PropDescription::Array(Box::new(items));
        }

        if let Some(kind) = type_name.and_then(Primitive::from_type_name) {
            let text = |key: &str| value.get(key).and_then(Value::as_str).map(str::to_string);
            return PropDescription::Trivial(TrivialDesc {
                kind,
                format: text("format"),
                pattern: text("pattern"),
                title: text("title"),
            });
        }

        PropDescription::Unsupported(value)
    }

    /// Compact JSON rendering of the description, for diagnostics.
    pub fn describe(&self) -> String {
        match self {
            PropDescription::Unsupported(value) => value.to_string(),
            PropDescription::Ref(r) => format!("{{\"$ref\":\"{}\"}}", r.reference),
            PropDescription::Trivial(t) => format!("{:?}", t.kind),
            PropDescription::Array(items) => format!("array of {}", items.describe()),
            PropDescription::AnyOf(members) => format!("anyOf({})", members.len()),
        }
    }

    /// Append every reference reachable from this description.
    pub fn collect_refs<'a>(&'a self, out: &mut Vec<&'a RefDesc>) {
        match self {
            PropDescription::Ref(r) => out.push(r),
            PropDescription::Array(items) => items.collect_refs(out),
            PropDescription::AnyOf(members) => {
                for member in members {
                    member.collect_refs(out);
                }
            }
            PropDescription::Trivial(_) | PropDescription::Unsupported(_) => {}
        }
    }

    /// Whether the description is a media-type placeholder with no shape.
    pub fn is_unspecified(&self) -> bool {
        matches!(self, PropDescription::Unsupported(Value::Null))
    }
}

impl<'de> Deserialize<'de> for PropDescription {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(PropDescription::classify)
    }
}

impl ApiDescription {
    /// Parse a description from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parse a description from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Every `(location, reference)` pair whose target is not a component
    /// schema of this document.
    pub fn dangling_refs(&self) -> Vec<(String, &RefDesc)> {
        let mut dangling = Vec::new();

        for (name, schema) in &self.components.schemas {
            if let SchemaDesc::Object(object) = schema {
                for (prop_name, prop) in &object.properties {
                    self.push_dangling(format!("schema {name}.{prop_name}"), prop, &mut dangling);
                }
            }
        }

        for (path, item) in &self.paths {
            for param in &item.parameters {
                let location = format!("{path} parameter {}", param.name);
                self.push_dangling(location, &param.schema, &mut dangling);
            }
            for (method, op) in &item.operations {
                let subject = format!("{} {path}", method.as_str().to_ascii_uppercase());
                for param in &op.parameters {
                    let location = format!("{subject} parameter {}", param.name);
                    self.push_dangling(location, &param.schema, &mut dangling);
                }
                if let Some(body) = &op.request_body {
                    for (content_type, media) in &body.content {
                        let location = format!("{subject} body {content_type}");
                        self.push_dangling(location, &media.schema, &mut dangling);
                    }
                }
                for (status, response) in &op.responses {
                    for media in response.content.values() {
                        let location = format!("{subject} response {status}");
                        self.push_dangling(location, &media.schema, &mut dangling);
                    }
                }
            }
        }

        dangling
    }

    fn push_dangling<'a>(
        &self,
        location: String,
        prop: &'a PropDescription,
        out: &mut Vec<(String, &'a RefDesc)>,
    ) {
        let mut refs = Vec::new();
        prop.collect_refs(&mut refs);
        for r in refs {
            if !self.components.schemas.contains_key(r.name()) {
                out.push((location.clone(), r));
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_classify_property_shapes() {
        let prop = PropDescription::classify(json!({ "type": "string", "format": "date-time" }));
        assert!(matches!(
            prop,
            PropDescription::Trivial(TrivialDesc { kind: Primitive::String, ref format, .. })
                if format.as_deref() == Some("date-time")
        ));

        let prop = PropDescription::classify(json!({ "$ref": "#/components/schemas/Item" }));
        let PropDescription::Ref(r) = prop else {
            panic!("expected a ref");
        };
        assert_eq!(r.name(), "Item");

        let prop = PropDescription::classify(json!({
            "type": "array",
            "items": { "$ref": "#/components/schemas/Item" }
        }));
        assert!(matches!(prop, PropDescription::Array(ref items) if matches!(**items, PropDescription::Ref(_))));

        let prop = PropDescription::classify(json!({
            "anyOf": [{ "type": "integer" }, { "type": "null" }]
        }));
        assert!(matches!(prop, PropDescription::AnyOf(ref members) if members.len() == 2));

        let prop = PropDescription::classify(json!({ "type": "object", "additionalProperties": true }));
        assert!(matches!(prop, PropDescription::Unsupported(_)));
    }

    #[test]
    fn test_schema_shapes() {
        let object = SchemaDesc::from_value(json!({
            "type": "object",
            "required": ["id"],
            "properties": { "id": { "type": "integer" }, "name": { "type": "string" } }
        }))
        .unwrap();
        let SchemaDesc::Object(object) = object else {
            panic!("expected an object schema");
        };
        assert!(object.is_required("id"));
        assert!(!object.is_required("name"));
        let names: Vec<_> = object.properties.keys().collect();
        assert_eq!(names, ["id", "name"]);

        let enum_schema =
            SchemaDesc::from_value(json!({ "enum": ["pending", "done", "error"] })).unwrap();
        let SchemaDesc::Enum(enum_schema) = enum_schema else {
            panic!("expected an enum schema");
        };
        assert_eq!(enum_schema.values, ["pending", "done", "error"]);

        let unsupported = SchemaDesc::from_value(json!({ "type": "string" })).unwrap();
        assert!(matches!(unsupported, SchemaDesc::Unsupported(_)));

        let mixed = SchemaDesc::from_value(json!({ "enum": [1, 2] })).unwrap();
        assert!(matches!(mixed, SchemaDesc::Unsupported(_)));
    }

    #[test]
    fn test_path_item_keeps_document_order() {
        let doc = ApiDescription::from_json(
            r##"{
  "paths": {
    "/items/{id}": {
      "parameters": [{ "name": "id", "in": "path", "required": true, "schema": { "type": "integer" } }],
      "delete": { "tags": ["Item"], "summary": "Delete Item", "responses": {} },
      "get": { "tags": ["Item"], "summary": "Get Item", "responses": {} },
      "patch": { "tags": ["Item"], "summary": "Patch Item", "responses": {} }
    }
  }
}"##,
        )
        .unwrap();

        let item = &doc.paths["/items/{id}"];
        let methods: Vec<_> = item.operations.iter().map(|(m, _)| *m).collect();
        assert_eq!(methods, [HttpMethod::Delete, HttpMethod::Get]);
        assert_eq!(item.unsupported_methods, ["patch"]);
        assert_eq!(item.parameters.len(), 1);
        assert_eq!(item.parameters[0].location, ParamLocation::Path);
    }

    #[test]
    fn test_dangling_refs() {
        let doc = ApiDescription::from_json(
            r##"{
  "paths": {},
  "components": {
    "schemas": {
      "Item": {
        "type": "object",
        "properties": {
          "owner": { "$ref": "#/components/schemas/User" },
          "parent": { "$ref": "#/components/schemas/Item" }
        }
      }
    }
  }
}"##,
        )
        .unwrap();

        let dangling = doc.dangling_refs();
        assert_eq!(dangling.len(), 1);
        assert_eq!(dangling[0].0, "schema Item.owner");
        assert_eq!(dangling[0].1.name(), "User");
    }

    #[test]
    fn test_yaml_input() {
        let doc = ApiDescription::from_yaml(
            "paths: {}\ncomponents:\n  schemas:\n    Status:\n      enum: [active, archived]\n",
        );
        let doc = doc.unwrap();
        assert!(matches!(doc.components.schemas["Status"], SchemaDesc::Enum(_)));
    }
}
