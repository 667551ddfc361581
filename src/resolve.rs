//! Schema-to-type resolution.
//!
//! Maps a [`SchemaNode`] to the target type string: containers recurse,
//! known schema kinds take fixed primitives, references resolve through
//! model naming (with trivial aliases collapsed to their underlying type),
//! and everything else degrades to a best-effort name with a warning.
//! Resolution never fails and never mutates its input; the date branch
//! returns its serialization annotation alongside the type.

use tracing::warn;

use crate::config::{CodegenConfig, DATETIME_TYPE, DATE_TYPE};
use crate::naming::IdentifierNormalizer;
use crate::schema::{Document, Primitive, SchemaNode};

/// Outcome of one resolution: the type text plus any serialization
/// annotation the caller should record on the owning descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedType {
    pub type_string: String,
    pub annotation: Option<TypeAnnotation>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeAnnotation {
    /// Date-only fields need the custom serializer in the emitted stubs.
    DateSerializer,
}

impl TypeAnnotation {
    pub fn wire_format(self) -> &'static str {
        match self {
            TypeAnnotation::DateSerializer => "date",
        }
    }

    pub fn serde_attribute(self) -> &'static str {
        match self {
            TypeAnnotation::DateSerializer => "serde(with=date_serializer)",
        }
    }
}

impl ResolvedType {
    fn plain(type_string: impl Into<String>) -> Self {
        Self {
            type_string: type_string.into(),
            annotation: None,
        }
    }
}

/// String formats routed through the mapping-table fallback instead of the
/// plain-string branch. `date` and `date-time` have their own direct arms
/// and never reach this list.
const SPECIAL_STRING_FORMATS: &[&str] = &["password", "byte", "binary", "email", "uuid"];

pub struct SchemaResolver<'a> {
    config: &'a CodegenConfig,
    document: &'a Document,
    normalizer: IdentifierNormalizer<'a>,
}

impl<'a> SchemaResolver<'a> {
    pub fn new(config: &'a CodegenConfig, document: &'a Document) -> Self {
        Self {
            config,
            document,
            normalizer: IdentifierNormalizer::new(config),
        }
    }

    /// Resolve a node to its target type string. Containers recurse and
    /// propagate the inner annotation; known primitive kinds take fixed
    /// types ahead of any table lookup (the direct integer branch widens to
    /// `direct_integer_type` even though the table maps `integer`
    /// narrower).
    pub fn resolve(&self, node: &SchemaNode) -> ResolvedType {
        match node {
            SchemaNode::Array(items) => {
                let inner = self.resolve(items);
                ResolvedType {
                    type_string: format!("Vec<{}>", inner.type_string),
                    annotation: inner.annotation,
                }
            }
            SchemaNode::Map(values) => {
                let inner = self.resolve(values);
                ResolvedType {
                    type_string: format!("HashMap<String, {}>", inner.type_string),
                    annotation: inner.annotation,
                }
            }
            SchemaNode::Primitive(p) => self.resolve_primitive(node, p),
            SchemaNode::Reference(_) | SchemaNode::Object(_) => self.resolve_fallback(node),
        }
    }

    fn resolve_primitive(&self, node: &SchemaNode, p: &Primitive) -> ResolvedType {
        match (p.kind.as_str(), p.format.as_deref()) {
            ("string", Some("date-time")) => ResolvedType::plain(DATETIME_TYPE),
            ("string", Some("date")) => ResolvedType {
                type_string: DATE_TYPE.to_string(),
                annotation: Some(TypeAnnotation::DateSerializer),
            },
            ("string", Some(format)) if SPECIAL_STRING_FORMATS.contains(&format) => {
                self.resolve_fallback(node)
            }
            ("string", _) => ResolvedType::plain("String"),
            ("number", _) => ResolvedType::plain("f32"),
            ("integer", _) => ResolvedType::plain(self.config.direct_integer_type.clone()),
            ("boolean", _) => ResolvedType::plain("bool"),
            _ => self.resolve_fallback(node),
        }
    }

    /// The table-driven tail of resolution, in fixed priority order:
    /// mapping-table key, reference model name, mapping-table value,
    /// warn-and-degrade.
    fn resolve_fallback(&self, node: &SchemaNode) -> ResolvedType {
        let schema_type = self.schema_type_name(node);

        if let Some(mapped) = self.config.type_mapping.get(&schema_type) {
            return ResolvedType::plain(mapped.clone());
        }

        if let SchemaNode::Reference(target) = node {
            let simple = SchemaNode::reference_simple_name(target);
            return ResolvedType::plain(self.normalizer.model_name(simple));
        }

        if self.config.type_mapping.values().any(|v| v == &schema_type) {
            // Already a resolved target type; pass through untouched.
            return ResolvedType::plain(schema_type);
        }

        let model_name = self.normalizer.model_name(&schema_type);
        warn!(
            "could not resolve given type (schema type: {schema_type}, model name: {model_name}). \
             The generated code is probably faulty. Check the schema!"
        );

        if self.config.is_language_primitive(&schema_type) {
            ResolvedType::plain(schema_type)
        } else {
            ResolvedType::plain(model_name)
        }
    }

    /// The raw schema-type name a node carries before any target mapping.
    ///
    /// References take their last path segment, except that a reference to
    /// a non-object definition borrows the referenced schema's own name, so
    /// trivial aliases (a named plain string, say) collapse instead of
    /// growing a wrapper type. The substitution is a single lookup, never a
    /// chain, so reference cycles cannot loop the resolver.
    fn schema_type_name(&self, node: &SchemaNode) -> String {
        match node {
            SchemaNode::Array(_) => "array".to_string(),
            SchemaNode::Map(_) => "map".to_string(),
            SchemaNode::Object(_) => "object".to_string(),
            SchemaNode::Primitive(p) => primitive_type_name(p).to_string(),
            SchemaNode::Reference(target) => {
                let simple = SchemaNode::reference_simple_name(target);
                match self.document.definition_of(target) {
                    Some(def) if !def.is_object() => match def {
                        // One level only: a ref-to-ref keeps the inner
                        // target's simple name.
                        SchemaNode::Reference(inner) => {
                            SchemaNode::reference_simple_name(inner).to_string()
                        }
                        SchemaNode::Array(_) => "array".to_string(),
                        SchemaNode::Map(_) => "map".to_string(),
                        SchemaNode::Primitive(p) => primitive_type_name(p).to_string(),
                        SchemaNode::Object(_) => unreachable!("filtered above"),
                    },
                    _ => simple.to_string(),
                }
            }
        }
    }
}

fn primitive_type_name(p: &Primitive) -> &str {
    match (p.kind.as_str(), p.format.as_deref()) {
        ("string", Some("date-time")) => "DateTime",
        ("string", Some("date")) => "date",
        ("string", Some("binary")) => "binary",
        ("string", Some("byte")) => "ByteArray",
        ("string", Some("uuid")) => "UUID",
        ("string", Some("password")) => "password",
        ("string", _) => "string",
        ("integer", Some("int64")) => "long",
        ("integer", _) => "integer",
        ("number", Some("float")) => "float",
        ("number", Some("double")) => "double",
        ("number", _) => "number",
        ("boolean", _) => "boolean",
        (kind, _) => kind,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::parse_schema_node;
    use serde_json::json;

    fn doc_with(defs: serde_json::Value) -> Document {
        let mut doc = Document::default();
        if let Some(map) = defs.as_object() {
            for (name, schema) in map {
                doc.definitions
                    .insert(name.clone(), parse_schema_node(schema));
            }
        }
        doc
    }

    fn resolve_str(doc: &Document, schema: serde_json::Value) -> String {
        let cfg = CodegenConfig::default();
        let resolver = SchemaResolver::new(&cfg, doc);
        resolver.resolve(&parse_schema_node(&schema)).type_string
    }

    #[test]
    fn containers_recurse() {
        let doc = Document::default();
        assert_eq!(
            resolve_str(&doc, json!({ "type": "array", "items": { "type": "string" } })),
            "Vec<String>"
        );
        assert_eq!(
            resolve_str(
                &doc,
                json!({ "type": "object", "additionalProperties": { "type": "integer" } })
            ),
            "HashMap<String, i64>"
        );
    }

    #[test]
    fn direct_kind_beats_mapping_table() {
        // The table maps `integer` to i32; the direct schema-kind branch
        // must still win with i64.
        let doc = Document::default();
        let cfg = CodegenConfig::default();
        assert_eq!(cfg.type_mapping["integer"], "i32");
        let resolver = SchemaResolver::new(&cfg, &doc);
        let resolved = resolver.resolve(&parse_schema_node(&json!({ "type": "integer" })));
        assert_eq!(resolved.type_string, "i64");
    }

    #[test]
    fn date_branch_returns_annotation_without_mutation() {
        let doc = Document::default();
        let cfg = CodegenConfig::default();
        let resolver = SchemaResolver::new(&cfg, &doc);
        let node = parse_schema_node(&json!({ "type": "string", "format": "date" }));
        let before = node.clone();
        let resolved = resolver.resolve(&node);
        assert_eq!(resolved.type_string, "Date<Utc>");
        assert_eq!(resolved.annotation, Some(TypeAnnotation::DateSerializer));
        assert_eq!(node, before);
    }

    #[test]
    fn datetime_and_formatted_strings() {
        let doc = Document::default();
        assert_eq!(
            resolve_str(&doc, json!({ "type": "string", "format": "date-time" })),
            "DateTime<Utc>"
        );
        // uuid goes through the table, not the direct string branch
        assert_eq!(
            resolve_str(&doc, json!({ "type": "string", "format": "uuid" })),
            "String"
        );
        assert_eq!(
            resolve_str(&doc, json!({ "type": "string", "format": "binary" })),
            "Vec<u8>"
        );
    }

    #[test]
    fn reference_to_object_becomes_model_name() {
        let doc = doc_with(json!({
            "Volume": { "type": "object", "properties": { "Name": { "type": "string" } } }
        }));
        assert_eq!(
            resolve_str(&doc, json!({ "$ref": "#/components/schemas/Volume" })),
            "Volume"
        );
    }

    #[test]
    fn reference_to_string_alias_collapses() {
        // A named plain-string definition must not grow a wrapper type.
        let doc = doc_with(json!({ "ContainerId": { "type": "string" } }));
        assert_eq!(
            resolve_str(&doc, json!({ "$ref": "#/components/schemas/ContainerId" })),
            "String"
        );
    }

    #[test]
    fn dangling_reference_still_resolves() {
        let doc = Document::default();
        assert_eq!(
            resolve_str(&doc, json!({ "$ref": "#/components/schemas/Missing" })),
            "Missing"
        );
    }

    #[test]
    fn unknown_type_degrades_to_model_name() {
        let doc = Document::default();
        assert_eq!(
            resolve_str(&doc, json!({ "type": "mystery-kind" })),
            "MysteryKind"
        );
    }

    #[test]
    fn inline_object_maps_to_value() {
        let doc = Document::default();
        assert_eq!(resolve_str(&doc, json!({ "description": "free-form" })), "Value");
    }

    #[test]
    fn nested_containers() {
        let doc = Document::default();
        assert_eq!(
            resolve_str(
                &doc,
                json!({
                    "type": "array",
                    "items": {
                        "type": "object",
                        "additionalProperties": { "type": "number" }
                    }
                })
            ),
            "Vec<HashMap<String, f32>>"
        );
    }
}
