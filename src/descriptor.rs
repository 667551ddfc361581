//! Renderer-ready descriptors.
//!
//! These are the hand-off types: built during the generation pass, touched
//! up by post-processing, then owned by the external renderer. Field order
//! everywhere follows document order for deterministic output.

use indexmap::IndexMap;
use serde::Serialize;

use crate::resolve::TypeAnnotation;

#[derive(Debug, Clone, Serialize)]
pub struct ModelDescriptor {
    /// Type-level name (`PhoneNumber`).
    pub name: String,
    /// File-level name (`phone_number`).
    pub file_name: String,
    /// Raw definition name as the document spelled it.
    pub raw_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_name: Option<String>,
    pub properties: Vec<PropertyDescriptor>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PropertyDescriptor {
    pub raw_name: String,
    pub name: String,
    pub type_string: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    pub is_enum: bool,
    /// Present only when `is_enum`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enum_type_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variants: Option<EnumVariantTable>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serde_attribute: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wire_format: Option<String>,
}

impl PropertyDescriptor {
    pub fn apply_annotation(&mut self, annotation: Option<TypeAnnotation>) {
        if let Some(annotation) = annotation {
            self.serde_attribute = Some(annotation.serde_attribute().to_string());
            self.wire_format = Some(annotation.wire_format().to_string());
        }
    }
}

/// Raw enum value → variant naming, insertion order preserved.
pub type EnumVariantTable = IndexMap<String, EnumVariant>;

#[derive(Debug, Clone, Serialize)]
pub struct EnumVariant {
    pub name: String,
    /// Literal text the renderer emits for the value.
    pub value: String,
    /// Fallback default-constant reference (`<datatype>_<raw>`).
    pub default_value: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct OperationDescriptor {
    pub raw_id: String,
    /// Normalized method name.
    pub id: String,
    pub method: String,
    /// Leading slash stripped.
    pub path: String,
    pub tag: String,
    pub parameters: Vec<ParameterDescriptor>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParameterDescriptor {
    pub raw_name: String,
    pub name: String,
    pub type_string: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
}

/// Everything one generation pass hands to the renderer.
#[derive(Debug, Clone, Serialize, Default)]
pub struct GeneratedOutput {
    pub models: Vec<ModelDescriptor>,
    /// Tag → operations, in declaration order.
    pub operations: IndexMap<String, Vec<OperationDescriptor>>,
}
