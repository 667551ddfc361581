//! Descriptor post-processing.
//!
//! Final touch-ups after per-field resolution and naming: the parent-name
//! compatibility shim, example-to-doc-comment reformatting, per-model hooks,
//! and the timestamp treatment of operation parameters.

use std::collections::HashMap;

use tracing::debug;

use crate::config::DATETIME_TYPE;
use crate::descriptor::{ModelDescriptor, ParameterDescriptor};

/// Synthesized when a timestamp parameter carries no example of its own.
pub const CANONICAL_TIMESTAMP_EXAMPLE: &str = "2019-03-19T18:38:33.131642+03:00";

/// Artifact prefix upstream reference resolution leaves on parent names of
/// some composed models. Compatibility shim, not a naming rule.
const PARENT_NULL_ARTIFACT: &str = "null";

pub type ModelHook = Box<dyn Fn(&mut ModelDescriptor)>;

/// Per-model finalization. Hooks registered by model name run before the
/// standard steps, replacing the old hard-wired diagnostic dump.
#[derive(Default)]
pub struct ModelPostProcessor {
    hooks: HashMap<String, ModelHook>,
}

impl ModelPostProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_hook(
        &mut self,
        model_name: impl Into<String>,
        hook: impl Fn(&mut ModelDescriptor) + 'static,
    ) {
        self.hooks.insert(model_name.into(), Box::new(hook));
    }

    pub fn run(&self, model: &mut ModelDescriptor) {
        if let Some(hook) = self.hooks.get(&model.name) {
            debug!("running pre-processing hook for model {}", model.name);
            hook(model);
        }

        if let Some(parent) = model.parent_name.take() {
            model.parent_name = strip_parent_artifact(parent);
        }

        for property in &mut model.properties {
            if let Some(example) = property.example.take() {
                property.example = Some(format_example(&example));
            }
        }
    }
}

fn strip_parent_artifact(parent: String) -> Option<String> {
    match parent.strip_prefix(PARENT_NULL_ARTIFACT) {
        // the bare placeholder means no parent at all
        Some("") => None,
        Some(rest) => Some(rest.to_string()),
        None => Some(parent),
    }
}

/// Rewrite an example into a `///` documentation block. Multi-line examples
/// get a header line plus one marker per line; single-line examples get
/// exactly one marker line.
pub fn format_example(example: &str) -> String {
    let example = escape_doc_text(example);
    if example.contains('\n') {
        let mut out = String::from("/// Example:\n");
        for part in example.split('\n') {
            out.push_str("/// ");
            out.push_str(part);
            out.push('\n');
        }
        out
    } else {
        format!("/// {example}")
    }
}

/// Defang comment delimiters so example text cannot escape the doc block.
fn escape_doc_text(text: &str) -> String {
    text.replace("*/", "*_/").replace("/*", "/_*")
}

/// Timestamp treatment for operation parameters: pin the wire format, and
/// make sure an example exists in doc-comment form.
pub fn postprocess_parameter(parameter: &mut ParameterDescriptor) {
    if parameter.type_string != DATETIME_TYPE {
        return;
    }

    parameter.data_format = Some("datetime".to_string());
    parameter.example = match parameter.example.take() {
        None => Some(CANONICAL_TIMESTAMP_EXAMPLE.to_string()),
        Some(example) => Some(format_example(&example)),
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::PropertyDescriptor;

    fn model(parent: Option<&str>) -> ModelDescriptor {
        ModelDescriptor {
            name: "Volume".into(),
            file_name: "volume".into(),
            raw_name: "Volume".into(),
            parent_name: parent.map(str::to_string),
            properties: Vec::new(),
        }
    }

    fn property(example: Option<&str>) -> PropertyDescriptor {
        PropertyDescriptor {
            raw_name: "Name".into(),
            name: "name".into(),
            type_string: "String".into(),
            example: example.map(str::to_string),
            is_enum: false,
            enum_type_name: None,
            variants: None,
            serde_attribute: None,
            wire_format: None,
        }
    }

    #[test]
    fn parent_artifact_prefix_is_stripped() {
        let pp = ModelPostProcessor::new();
        let mut m = model(Some("nullMount"));
        pp.run(&mut m);
        assert_eq!(m.parent_name.as_deref(), Some("Mount"));
    }

    #[test]
    fn bare_placeholder_parent_clears() {
        let pp = ModelPostProcessor::new();
        let mut m = model(Some("null"));
        pp.run(&mut m);
        assert!(m.parent_name.is_none());
    }

    #[test]
    fn single_line_example_gets_one_marker() {
        assert_eq!(format_example("tmpfs"), "/// tmpfs");
    }

    #[test]
    fn multi_line_example_gets_header_and_markers() {
        assert_eq!(
            format_example("first\nsecond"),
            "/// Example:\n/// first\n/// second\n"
        );
    }

    #[test]
    fn comment_delimiters_are_defanged() {
        assert_eq!(format_example("a */ b"), "/// a *_/ b");
    }

    #[test]
    fn properties_examples_are_reformatted() {
        let pp = ModelPostProcessor::new();
        let mut m = model(None);
        m.properties.push(property(Some("local")));
        pp.run(&mut m);
        assert_eq!(m.properties[0].example.as_deref(), Some("/// local"));
    }

    #[test]
    fn hooks_run_before_standard_steps() {
        let mut pp = ModelPostProcessor::new();
        pp.register_hook("Volume", |m: &mut ModelDescriptor| {
            m.parent_name = Some("nullBase".into());
        });
        let mut m = model(None);
        pp.run(&mut m);
        assert_eq!(m.parent_name.as_deref(), Some("Base"));
    }

    #[test]
    fn timestamp_parameter_synthesizes_example() {
        let mut p = ParameterDescriptor {
            raw_name: "since".into(),
            name: "since".into(),
            type_string: DATETIME_TYPE.into(),
            data_format: None,
            example: None,
        };
        postprocess_parameter(&mut p);
        assert_eq!(p.data_format.as_deref(), Some("datetime"));
        assert_eq!(p.example.as_deref(), Some(CANONICAL_TIMESTAMP_EXAMPLE));
    }

    #[test]
    fn non_timestamp_parameter_is_untouched() {
        let mut p = ParameterDescriptor {
            raw_name: "name".into(),
            name: "name".into(),
            type_string: "String".into(),
            data_format: None,
            example: None,
        };
        postprocess_parameter(&mut p);
        assert!(p.data_format.is_none());
        assert!(p.example.is_none());
    }

    #[test]
    fn timestamp_parameter_with_example_reformats_it() {
        let mut p = ParameterDescriptor {
            raw_name: "since".into(),
            name: "since".into(),
            type_string: DATETIME_TYPE.into(),
            data_format: None,
            example: Some("2020-01-01T00:00:00Z".into()),
        };
        postprocess_parameter(&mut p);
        assert_eq!(p.example.as_deref(), Some("/// 2020-01-01T00:00:00Z"));
    }
}
