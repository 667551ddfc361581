//! Generator configuration.
//!
//! Built once at startup and read-only for the whole run: the reserved-word
//! set, the schema-primitive → target-primitive mapping table, the set of
//! target-language primitive spellings, and the model-name affixes.

use std::collections::{BTreeMap, BTreeSet};

/// Target type the date schema branch resolves to.
pub const DATE_TYPE: &str = "Date<Utc>";
/// Target type the date-time schema branch resolves to.
pub const DATETIME_TYPE: &str = "DateTime<Utc>";

#[derive(Debug, Clone)]
pub struct CodegenConfig {
    /// Lower-cased keywords of the target language.
    pub reserved_words: BTreeSet<String>,
    /// Schema primitive name → target primitive name.
    pub type_mapping: BTreeMap<String, String>,
    /// Type spellings that need no import and no model wrapper.
    pub language_primitives: BTreeSet<String>,
    /// Joined to model names with `_` when non-empty.
    pub model_name_prefix: String,
    pub model_name_suffix: String,
    /// Width used by the direct integer-schema branch. The mapping table
    /// keeps its own (narrower) entry for `integer`; the direct branch wins
    /// whenever the schema kind is known. Kept separate so the
    /// inconsistency is at least explicit and tunable.
    pub direct_integer_type: String,
}

impl CodegenConfig {
    pub fn is_reserved(&self, name: &str) -> bool {
        self.reserved_words.contains(&name.to_lowercase())
    }

    pub fn is_language_primitive(&self, name: &str) -> bool {
        self.language_primitives.contains(name)
    }
}

impl Default for CodegenConfig {
    fn default() -> Self {
        let reserved_words = [
            "abstract", "alignof", "as", "become", "box",
            "break", "const", "continue", "crate", "do",
            "else", "enum", "extern", "false", "final",
            "fn", "for", "if", "impl", "in",
            "let", "loop", "macro", "match", "mod",
            "move", "mut", "offsetof", "override", "priv",
            "proc", "pub", "pure", "ref", "return",
            "self", "sizeof", "static", "struct",
            "super", "trait", "true", "type", "typeof",
            "unsafe", "unsized", "use", "virtual", "where",
            "while", "yield",
        ]
        .into_iter()
        .map(str::to_string)
        .collect();

        let type_mapping = [
            ("integer", "i32"),
            ("long", "i64"),
            ("number", "f32"),
            ("float", "f32"),
            ("double", "f64"),
            ("boolean", "bool"),
            ("string", "String"),
            ("UUID", "String"),
            ("date", "string"),
            ("DateTime", "String"),
            ("password", "String"),
            ("file", "File"),
            ("binary", "Vec<u8>"),
            ("ByteArray", "String"),
            ("object", "Value"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let language_primitives = [
            "i8", "i16", "i32", "i64",
            "u8", "u16", "u32", "u64",
            "f32", "f64", "str", "String",
            "char", "bool", "Vec<u8>", "File", "BigDecimal",
        ]
        .into_iter()
        .map(str::to_string)
        .collect();

        Self {
            reserved_words,
            type_mapping,
            language_primitives,
            model_name_prefix: String::new(),
            model_name_suffix: String::new(),
            direct_integer_type: "i64".to_string(),
        }
    }
}
