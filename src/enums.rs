//! Enum variant and enum type naming.
//!
//! Raw enumeration values become SCREAMING_SNAKE variant identifiers:
//! numeric values spell out their signs and decimal points, lone symbols
//! take their dictionary names, strings get upper-snaked and de-collided.
//! The empty value always maps to `EMPTY`.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;

use crate::config::CodegenConfig;
use crate::naming::{self, IdentifierNormalizer};

/// Names for values that sanitize away entirely (punctuation-only
/// literals).
static SYMBOL_NAMES: Lazy<BTreeMap<&'static str, &'static str>> = Lazy::new(|| {
    BTreeMap::from([
        ("$", "dollar"),
        ("#", "hash"),
        ("@", "at"),
        ("%", "percent"),
        ("&", "ampersand"),
        ("*", "star"),
        ("+", "plus"),
        ("-", "minus"),
        ("/", "slash"),
        ("\\", "back_slash"),
        ("=", "equal"),
        ("!", "exclamation"),
        ("<", "less_than"),
        (">", "greater_than"),
        (".", "period"),
        ("?", "question_mark"),
        ("|", "pipe"),
        ("^", "caret"),
        ("~", "tilde"),
    ])
});

/// Datatypes whose enum values are numeric literals rather than strings.
fn is_numeric_datatype(datatype: &str) -> bool {
    matches!(datatype, "int" | "double" | "float")
}

pub struct EnumNamer<'a> {
    config: &'a CodegenConfig,
    normalizer: IdentifierNormalizer<'a>,
}

impl<'a> EnumNamer<'a> {
    pub fn new(config: &'a CodegenConfig) -> Self {
        Self {
            config,
            normalizer: IdentifierNormalizer::new(config),
        }
    }

    /// Variant identifier for one raw enum value.
    pub fn variant_name(&self, raw: &str, datatype: &str) -> String {
        if raw.is_empty() {
            return "EMPTY".to_string();
        }

        if is_numeric_datatype(datatype) {
            return raw
                .replace('-', "MINUS_")
                .replace('+', "PLUS_")
                .replace('.', "_DOT_");
        }

        if let Some(symbol) = SYMBOL_NAMES.get(raw) {
            return symbol.to_uppercase();
        }

        let mut name = naming::sanitize_name(&naming::underscore(raw).to_uppercase());
        name = name.strip_prefix('_').unwrap_or(&name).to_string();
        name = name.strip_suffix('_').unwrap_or(&name).to_string();

        if self.config.is_reserved(&name) || naming::starts_with_digit(&name) {
            name = self.normalizer.escape_reserved_word(&name);
        }

        name
    }

    /// Enum type name for an enumerated property: upper-snake of the
    /// model-style property name, container markers stripped.
    pub fn enum_type_name(&self, property_name: &str) -> String {
        let mut name = naming::underscore(&self.normalizer.model_name(property_name)).to_uppercase();

        // drop [] markers on array-of-enum / map-of-enum properties
        name = name.replace("[]", "");

        if naming::starts_with_digit(&name) {
            format!("_{name}")
        } else {
            name
        }
    }

    /// Fallback default-constant reference for an enum default.
    pub fn default_variant_value(&self, datatype: &str, raw: &str) -> String {
        format!("{datatype}_{raw}")
    }

    /// The literal text emitted for a variant's value: numeric datatypes
    /// pass through verbatim, strings get quotation marks stripped to keep
    /// them out of emitted source.
    pub fn literal_value(&self, raw: &str, datatype: &str) -> String {
        if is_numeric_datatype(datatype) {
            raw.to_string()
        } else {
            raw.replace('"', "")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn namer(config: &CodegenConfig) -> EnumNamer<'_> {
        EnumNamer::new(config)
    }

    #[test]
    fn empty_value_is_empty_for_every_datatype() {
        let cfg = CodegenConfig::default();
        let n = namer(&cfg);
        for datatype in ["int", "double", "float", "String"] {
            assert_eq!(n.variant_name("", datatype), "EMPTY");
        }
    }

    #[test]
    fn numeric_values_spell_out_signs() {
        let cfg = CodegenConfig::default();
        let n = namer(&cfg);
        assert_eq!(n.variant_name("-1.5", "double"), "MINUS_1_DOT_5");
        assert_eq!(n.variant_name("+3", "int"), "PLUS_3");
        assert_eq!(n.variant_name("2.25", "float"), "2_DOT_25");
    }

    #[test]
    fn symbols_take_dictionary_names() {
        let cfg = CodegenConfig::default();
        let n = namer(&cfg);
        assert_eq!(n.variant_name("$", "String"), "DOLLAR");
        assert_eq!(n.variant_name("#", "String"), "HASH");
    }

    #[test]
    fn string_values_upper_snake() {
        let cfg = CodegenConfig::default();
        let n = namer(&cfg);
        assert_eq!(n.variant_name("local", "String"), "LOCAL");
        assert_eq!(n.variant_name("read-only", "String"), "READ_ONLY");
        assert_eq!(n.variant_name("_hidden_", "String"), "HIDDEN");
    }

    #[test]
    fn digit_leading_string_value_is_escaped() {
        let cfg = CodegenConfig::default();
        let n = namer(&cfg);
        assert_eq!(n.variant_name("1st", "String"), "_1ST");
    }

    #[test]
    fn enum_type_name_strips_container_markers() {
        let cfg = CodegenConfig::default();
        let n = namer(&cfg);
        assert_eq!(n.enum_type_name("Scope"), "SCOPE");
        assert_eq!(n.enum_type_name("Capabilities[]"), "CAPABILITIES");
    }

    #[test]
    fn default_variant_value_joins_datatype() {
        let cfg = CodegenConfig::default();
        let n = namer(&cfg);
        assert_eq!(n.default_variant_value("String", "local"), "String_local");
    }

    #[test]
    fn literal_value_strips_quotes_for_strings() {
        let cfg = CodegenConfig::default();
        let n = namer(&cfg);
        assert_eq!(n.literal_value("a\"b", "String"), "ab");
        assert_eq!(n.literal_value("-1.5", "double"), "-1.5");
    }
}
