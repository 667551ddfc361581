//! Schema document model.
//!
//! Strongly-typed view over an OpenAPI-style description: named definitions
//! (objects, aliases, containers, primitives, references) plus named
//! operations. The loader walks a `serde_json::Value`; everything after it
//! works on these types only.

use indexmap::IndexMap;
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

// ------------------------------- Types ------------------------------------ //

/// One schema node. References are kept symbolic; resolution happens in
/// `resolve` against the owning [`Document`].
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode {
    Primitive(Primitive),
    /// Homogeneous array; `items` may itself be any node.
    Array(Box<SchemaNode>),
    /// String-keyed map via `additionalProperties`.
    Map(Box<SchemaNode>),
    /// `$ref` target, stored as the raw pointer text (e.g.
    /// `#/definitions/Volume`).
    Reference(String),
    Object(ObjectSchema),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Primitive {
    /// Raw schema type name: `string`, `integer`, `number`, `boolean`, ...
    pub kind: String,
    /// Raw `format` hint: `date-time`, `int64`, `binary`, ...
    pub format: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectSchema {
    /// Insertion order preserved for deterministic emission.
    pub properties: IndexMap<String, PropertySchema>,
    /// Parent model, taken from the first `$ref` arm of an `allOf`.
    pub parent: Option<String>,
}

/// A named property slot inside an object definition. Carries the metadata
/// the descriptors need beyond the bare type shape.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertySchema {
    pub node: SchemaNode,
    pub example: Option<String>,
    /// Raw enumeration values, empty when the property is not enumerated.
    pub enum_values: Vec<String>,
}

/// One operation as the document declares it, before normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationSpec {
    pub id: String,
    pub method: String,
    pub path: String,
    /// First declared tag; `default` when the operation carries none.
    pub tag: String,
    pub parameters: Vec<ParameterSpec>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSpec {
    pub name: String,
    pub node: SchemaNode,
    pub example: Option<String>,
}

/// The parsed document: everything the generation pass consumes.
#[derive(Debug, Clone, Default)]
pub struct Document {
    pub definitions: IndexMap<String, SchemaNode>,
    pub operations: Vec<OperationSpec>,
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("unsupported document version {0:?} (expected 3.x)")]
    UnsupportedVersion(String),
    #[error("definition `{0}` is not a JSON object")]
    BadDefinition(String),
}

impl SchemaNode {
    pub fn is_object(&self) -> bool {
        matches!(self, SchemaNode::Object(_))
    }

    /// Last segment of a reference pointer: `#/definitions/Volume` → `Volume`.
    pub fn reference_simple_name(target: &str) -> &str {
        target.rsplit('/').next().unwrap_or(target)
    }
}

impl Document {
    /// Look up the definition a reference points at, by simple name.
    /// Dangling references are the loader's caller's problem; lookups simply
    /// return `None`.
    pub fn definition_of(&self, reference_target: &str) -> Option<&SchemaNode> {
        let name = SchemaNode::reference_simple_name(reference_target);
        self.definitions.get(name)
    }
}

// ------------------------------- Loader ----------------------------------- //

/// Parse an OpenAPI 3.x document. Definitions come from
/// `#/components/schemas`; operations from `paths`.
pub fn parse_document(input: &Value) -> Result<Document, ParseError> {
    let version = input.get("openapi").and_then(|v| v.as_str()).unwrap_or("");
    if !version.starts_with("3.") {
        return Err(ParseError::UnsupportedVersion(version.to_string()));
    }

    let mut doc = Document::default();

    if let Some(schemas) = input
        .pointer("/components/schemas")
        .and_then(|s| s.as_object())
    {
        for (name, schema) in schemas {
            if !schema.is_object() {
                return Err(ParseError::BadDefinition(name.clone()));
            }
            doc.definitions
                .insert(name.clone(), parse_schema_node(schema));
        }
    }

    if let Some(paths) = input.get("paths").and_then(|p| p.as_object()) {
        for (path, methods) in paths {
            let Some(methods) = methods.as_object() else { continue };
            for (method, operation) in methods {
                if !is_http_method(method) {
                    continue;
                }
                doc.operations
                    .push(parse_operation(path, method, operation));
            }
        }
    }

    Ok(doc)
}

fn is_http_method(s: &str) -> bool {
    matches!(
        s,
        "get" | "put" | "post" | "delete" | "options" | "head" | "patch" | "trace"
    )
}

fn parse_operation(path: &str, method: &str, op: &Value) -> OperationSpec {
    let id = match op.get("operationId").and_then(|v| v.as_str()) {
        Some(id) => id.to_string(),
        None => {
            let synthesized = synthesize_operation_id(method, path);
            warn!("operation `{method} {path}` has no operationId, synthesized `{synthesized}`");
            synthesized
        }
    };

    let tag = op
        .get("tags")
        .and_then(|t| t.as_array())
        .and_then(|t| t.first())
        .and_then(|t| t.as_str())
        .unwrap_or("default");

    let parameters = op
        .get("parameters")
        .and_then(|p| p.as_array())
        .map(|params| params.iter().filter_map(parse_parameter).collect())
        .unwrap_or_default();

    OperationSpec {
        id,
        method: method.to_string(),
        path: path.to_string(),
        tag: tag.to_string(),
        parameters,
    }
}

/// Fallback id for operations that declare none: method plus path
/// segments, template braces dropped. `get /volumes/{name}` →
/// `get_volumes_name`. Downstream operation-name normalization cleans up
/// whatever else the path contains.
fn synthesize_operation_id(method: &str, path: &str) -> String {
    let mut parts = vec![method.to_string()];
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        parts.push(segment.trim_matches(|c| c == '{' || c == '}').to_string());
    }
    parts.join("_")
}

fn parse_parameter(param: &Value) -> Option<ParameterSpec> {
    let name = param.get("name")?.as_str()?;
    let schema = param.get("schema")?;
    Some(ParameterSpec {
        name: name.to_string(),
        node: parse_schema_node(schema),
        example: example_text(param.get("example").or_else(|| schema.get("example"))),
    })
}

/// Convert one schema value into a [`SchemaNode`].
///
/// Shape checks in priority order: `$ref` wins outright, then `allOf`
/// (parent + merged inline properties), then explicit `type`. A schema with
/// `properties` but no `type` is still an object; anything left is an
/// untyped `object` primitive, which the resolver later degrades gracefully.
pub fn parse_schema_node(schema: &Value) -> SchemaNode {
    if let Some(target) = schema.get("$ref").and_then(|r| r.as_str()) {
        return SchemaNode::Reference(target.to_string());
    }

    if let Some(arms) = schema.get("allOf").and_then(|a| a.as_array()) {
        return parse_all_of(arms);
    }

    let ty = schema.get("type").and_then(|t| t.as_str());
    match ty {
        Some("array") => {
            let items = schema
                .get("items")
                .map(parse_schema_node)
                .unwrap_or_else(untyped_object);
            SchemaNode::Array(Box::new(items))
        }
        // Named properties make an object a model, even when it also
        // declares additionalProperties; only a pure map shape parses as
        // Map.
        Some("object") | None if schema.get("properties").is_some() => {
            SchemaNode::Object(parse_object_body(schema))
        }
        Some("object") | None if has_additional_properties(schema) => {
            // additionalProperties: true (or absent schema) maps to an
            // untyped value type.
            let values = schema
                .get("additionalProperties")
                .filter(|v| v.is_object())
                .map(parse_schema_node)
                .unwrap_or_else(untyped_object);
            SchemaNode::Map(Box::new(values))
        }
        Some("object") => SchemaNode::Object(parse_object_body(schema)),
        Some(kind) => SchemaNode::Primitive(Primitive {
            kind: kind.to_string(),
            format: schema
                .get("format")
                .and_then(|f| f.as_str())
                .map(str::to_string),
        }),
        None => untyped_object(),
    }
}

fn untyped_object() -> SchemaNode {
    SchemaNode::Primitive(Primitive {
        kind: "object".to_string(),
        format: None,
    })
}

fn has_additional_properties(schema: &Value) -> bool {
    match schema.get("additionalProperties") {
        Some(Value::Bool(b)) => *b,
        Some(Value::Object(_)) => true,
        _ => false,
    }
}

fn parse_all_of(arms: &[Value]) -> SchemaNode {
    let mut parent = None;
    let mut body = ObjectSchema::default();
    for arm in arms {
        if let Some(target) = arm.get("$ref").and_then(|r| r.as_str()) {
            if parent.is_none() {
                parent = Some(SchemaNode::reference_simple_name(target).to_string());
            }
            continue;
        }
        let merged = parse_object_body(arm);
        body.properties.extend(merged.properties);
    }
    body.parent = parent;
    SchemaNode::Object(body)
}

fn parse_object_body(schema: &Value) -> ObjectSchema {
    let mut out = ObjectSchema::default();
    if let Some(props) = schema.get("properties").and_then(|p| p.as_object()) {
        for (name, prop) in props {
            let enum_values = prop
                .get("enum")
                .and_then(|e| e.as_array())
                .map(|vals| vals.iter().map(enum_literal_text).collect())
                .unwrap_or_default();
            out.properties.insert(
                name.clone(),
                PropertySchema {
                    node: parse_schema_node(prop),
                    example: example_text(prop.get("example")),
                    enum_values,
                },
            );
        }
    }
    out
}

fn enum_literal_text(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Examples keep their own text form: strings verbatim, everything else as
/// compact JSON.
fn example_text(v: Option<&Value>) -> Option<String> {
    match v? {
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
