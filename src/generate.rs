//! Single-pass generation driver.
//!
//! Walks a parsed [`Document`] once: every definition becomes a
//! [`ModelDescriptor`], every operation lands in its tag group, enumerated
//! properties get their variant tables. Post-processing runs per descriptor
//! before hand-off. The pass never fails; degraded types come out of the
//! resolver with warnings already logged.

use indexmap::IndexMap;

use crate::config::CodegenConfig;
use crate::descriptor::{
    EnumVariant, EnumVariantTable, GeneratedOutput, ModelDescriptor, OperationDescriptor,
    ParameterDescriptor, PropertyDescriptor,
};
use crate::enums::EnumNamer;
use crate::naming::IdentifierNormalizer;
use crate::postprocess::{postprocess_parameter, ModelPostProcessor};
use crate::resolve::SchemaResolver;
use crate::schema::{Document, ObjectSchema, OperationSpec, Primitive, SchemaNode};

pub struct Generator<'a> {
    config: &'a CodegenConfig,
    document: &'a Document,
    post: ModelPostProcessor,
}

impl<'a> Generator<'a> {
    pub fn new(config: &'a CodegenConfig, document: &'a Document) -> Self {
        Self {
            config,
            document,
            post: ModelPostProcessor::new(),
        }
    }

    /// Access the per-model hook registry before running the pass.
    pub fn post_processor_mut(&mut self) -> &mut ModelPostProcessor {
        &mut self.post
    }

    pub fn run(&self) -> GeneratedOutput {
        let resolver = SchemaResolver::new(self.config, self.document);
        let normalizer = IdentifierNormalizer::new(self.config);
        let enums = EnumNamer::new(self.config);

        let mut out = GeneratedOutput::default();

        for (raw_name, node) in &self.document.definitions {
            let mut model = self.build_model(raw_name, node, &resolver, &normalizer, &enums);
            self.post.run(&mut model);
            out.models.push(model);
        }

        for op in &self.document.operations {
            let descriptor = build_operation(op, &resolver, &normalizer);
            out.operations
                .entry(descriptor.tag.clone())
                .or_insert_with(Vec::new)
                .push(descriptor);
        }

        out
    }

    fn build_model(
        &self,
        raw_name: &str,
        node: &SchemaNode,
        resolver: &SchemaResolver<'_>,
        normalizer: &IdentifierNormalizer<'_>,
        enums: &EnumNamer<'_>,
    ) -> ModelDescriptor {
        let mut model = ModelDescriptor {
            name: normalizer.model_name(raw_name),
            file_name: normalizer.model_file_name(raw_name),
            raw_name: raw_name.to_string(),
            parent_name: None,
            properties: Vec::new(),
        };

        let SchemaNode::Object(object) = node else {
            // Alias and container definitions carry no properties of their
            // own; referers collapse them through the resolver.
            return model;
        };

        model.parent_name = object
            .parent
            .as_deref()
            .map(|parent| normalizer.model_name(parent));
        model.properties = self.build_properties(object, resolver, normalizer, enums);
        model
    }

    fn build_properties(
        &self,
        object: &ObjectSchema,
        resolver: &SchemaResolver<'_>,
        normalizer: &IdentifierNormalizer<'_>,
        enums: &EnumNamer<'_>,
    ) -> Vec<PropertyDescriptor> {
        let mut properties = Vec::with_capacity(object.properties.len());
        for (raw_name, prop) in &object.properties {
            let resolved = resolver.resolve(&prop.node);
            let is_enum = !prop.enum_values.is_empty();

            let mut descriptor = PropertyDescriptor {
                raw_name: raw_name.clone(),
                name: normalizer.member_name(raw_name),
                type_string: resolved.type_string.clone(),
                example: prop.example.clone(),
                is_enum,
                enum_type_name: None,
                variants: None,
                serde_attribute: None,
                wire_format: None,
            };
            descriptor.apply_annotation(resolved.annotation);

            if is_enum {
                let datatype = enum_datatype(&prop.node, &resolved.type_string);
                descriptor.enum_type_name = Some(enums.enum_type_name(raw_name));
                descriptor.variants = Some(build_variant_table(
                    &prop.enum_values,
                    &datatype,
                    enums,
                ));
            }

            properties.push(descriptor);
        }
        properties
    }
}

/// Variant-naming datatype of an enumerated property. Numeric schema kinds
/// use the short names the variant rules key on; everything else names
/// variants by string rules.
fn enum_datatype(node: &SchemaNode, resolved_type: &str) -> String {
    match node {
        SchemaNode::Primitive(Primitive { kind, format }) => {
            match (kind.as_str(), format.as_deref()) {
                ("integer", _) => "int".to_string(),
                ("number", Some("double")) => "double".to_string(),
                ("number", _) => "float".to_string(),
                _ => resolved_type.to_string(),
            }
        }
        SchemaNode::Array(items) | SchemaNode::Map(items) => {
            enum_datatype(items, resolved_type)
        }
        _ => resolved_type.to_string(),
    }
}

fn build_variant_table(
    raw_values: &[String],
    datatype: &str,
    enums: &EnumNamer<'_>,
) -> EnumVariantTable {
    let mut table = IndexMap::new();
    for raw in raw_values {
        table.insert(
            raw.clone(),
            EnumVariant {
                name: enums.variant_name(raw, datatype),
                value: enums.literal_value(raw, datatype),
                default_value: enums.default_variant_value(datatype, raw),
            },
        );
    }
    table
}

fn build_operation(
    op: &OperationSpec,
    resolver: &SchemaResolver<'_>,
    normalizer: &IdentifierNormalizer<'_>,
) -> OperationDescriptor {
    let path = op.path.strip_prefix('/').unwrap_or(&op.path).to_string();

    let parameters = op
        .parameters
        .iter()
        .map(|param| {
            let resolved = resolver.resolve(&param.node);
            let mut descriptor = ParameterDescriptor {
                raw_name: param.name.clone(),
                name: normalizer.member_name(&param.name),
                type_string: resolved.type_string,
                data_format: None,
                example: param.example.clone(),
            };
            postprocess_parameter(&mut descriptor);
            descriptor
        })
        .collect();

    OperationDescriptor {
        raw_id: op.id.clone(),
        id: normalizer.operation_name(&op.id),
        method: op.method.clone(),
        path,
        tag: op.tag.clone(),
        parameters,
    }
}
