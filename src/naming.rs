//! Identifier normalization.
//!
//! Turns raw schema names into valid, collision-free target identifiers:
//! lower-snake members and operations, UpperCamel model types, with fixed
//! prefixing rules for reserved words and leading digits. Normalization
//! never fails; every input maps to some legal identifier.

use tracing::{debug, warn};

use crate::config::CodegenConfig;

pub struct IdentifierNormalizer<'a> {
    config: &'a CodegenConfig,
}

impl<'a> IdentifierNormalizer<'a> {
    pub fn new(config: &'a CodegenConfig) -> Self {
        Self { config }
    }

    /// Member (field/parameter) name.
    ///
    /// `created-at` → `created_at`, `PetId` → `pet_id`. An all-caps input is
    /// taken as an already-formed constant and passed through. Reserved
    /// words get a `_` prefix, leading digits a `var_` prefix.
    pub fn member_name(&self, raw: &str) -> String {
        let mut name = sanitize_name(&raw.replace('-', "_"));

        if is_formed_constant(&name) {
            return name;
        }

        name = underscore(&name);

        if self.config.is_reserved(&name) {
            debug!("member name `{raw}` is a reserved word, escaping");
            name = self.escape_reserved_word(&name);
        }

        if starts_with_digit(&name) {
            debug!("member name `{raw}` starts with a digit, prefixing");
            name = format!("var_{name}");
        }

        name
    }

    /// File-level model name: affixes joined with `_`, sanitized, then
    /// lower-snake-cased. Reserved or digit-leading results take a `model_`
    /// prefix with a warning.
    pub fn model_file_name(&self, raw: &str) -> String {
        let mut name = raw.to_string();
        if !self.config.model_name_prefix.is_empty() {
            name = format!("{}_{name}", self.config.model_name_prefix);
        }
        if !self.config.model_name_suffix.is_empty() {
            name = format!("{name}_{}", self.config.model_name_suffix);
        }

        name = sanitize_name(&name);

        if self.config.is_reserved(&name) {
            let renamed = format!("model_{name}");
            warn!("reserved word `{name}` cannot be used as model name, renamed to {renamed}");
            name = renamed;
        }

        if starts_with_digit(&name) {
            let renamed = format!("model_{name}");
            warn!("model name `{name}` starts with a digit, renamed to {renamed}");
            name = renamed;
        }

        underscore(&name)
    }

    /// Type-level model name: UpperCamel of the snake file name, so
    /// `phone_number` → `PhoneNumber` and `200Response` → `Model200Response`.
    pub fn model_name(&self, raw: &str) -> String {
        camelize(&self.model_file_name(raw))
    }

    /// Operation (method) name. Reserved ids take a `call_` prefix.
    pub fn operation_name(&self, raw: &str) -> String {
        let mut name = sanitize_name(raw);

        if self.config.is_reserved(&name) {
            name = format!("call_{name}");
            debug!(
                "reserved word `{raw}` cannot be used as method name, renamed to {}",
                underscore(&name)
            );
        }

        underscore(&name)
    }

    /// Prefix `_` until the result no longer collides. A single step
    /// suffices for any sane reserved-word set (none ships with leading
    /// underscores), but the loop makes the guarantee unconditional.
    pub fn escape_reserved_word(&self, name: &str) -> String {
        let mut out = format!("_{name}");
        while self.config.is_reserved(&out) {
            out.insert(0, '_');
        }
        out
    }
}

// ----------------------------- Char helpers -------------------------------- //

pub fn starts_with_digit(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_ascii_digit())
}

/// All uppercase letters/underscores (and non-empty): an already-formed
/// constant like `CPUS` or `MAC_ADDRESS`.
fn is_formed_constant(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_uppercase() || c == '_')
}

/// Keep ASCII alphanumerics and underscores; every other run of characters
/// collapses to a single `_`. Leaves word boundaries visible without ever
/// producing doubled separators.
pub fn sanitize_name(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_sep = false;
    for c in raw.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            if pending_sep && !out.is_empty() && !out.ends_with('_') && c != '_' {
                out.push('_');
            }
            pending_sep = false;
            out.push(c);
        } else {
            pending_sep = true;
        }
    }
    out
}

/// Lower-snake-case: `PetId` → `pet_id`, `APIKey` → `api_key`,
/// `already_snake` stays put.
pub fn underscore(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev: Option<char> = None;
    let mut it = name.chars().peekable();
    while let Some(c) = it.next() {
        if c.is_ascii_uppercase() {
            if let Some(p) = prev {
                let prev_lower = p.is_ascii_lowercase() || p.is_ascii_digit();
                let next_lower = it.peek().is_some_and(|n| n.is_ascii_lowercase());
                // Break before an uppercase char at a camel boundary
                // (listUsers) or at the tail of an acronym run (APIKey).
                if (prev_lower || next_lower) && p != '_' {
                    out.push('_');
                }
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
        prev = Some(c);
    }
    out
}

/// UpperCamel from snake: `phone_number` → `PhoneNumber`.
pub fn camelize(name: &str) -> String {
    name.split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalizer(config: &CodegenConfig) -> IdentifierNormalizer<'_> {
        IdentifierNormalizer::new(config)
    }

    #[test]
    fn member_name_basics() {
        let cfg = CodegenConfig::default();
        let n = normalizer(&cfg);
        assert_eq!(n.member_name("created-at"), "created_at");
        assert_eq!(n.member_name("PetId"), "pet_id");
        assert_eq!(n.member_name("APIKey"), "api_key");
        assert_eq!(n.member_name("MAC_ADDRESS"), "MAC_ADDRESS");
    }

    #[test]
    fn every_reserved_word_escapes_to_single_underscore() {
        let cfg = CodegenConfig::default();
        let n = normalizer(&cfg);
        for word in &cfg.reserved_words {
            assert_eq!(n.member_name(word), format!("_{word}"));
        }
    }

    #[test]
    fn escape_loops_past_underscore_prefixed_entries() {
        let mut cfg = CodegenConfig::default();
        cfg.reserved_words.insert("_type".into());
        let n = normalizer(&cfg);
        assert_eq!(n.escape_reserved_word("type"), "__type");
        assert_eq!(n.member_name("type"), "__type");
    }

    #[test]
    fn digit_prefixes_per_kind() {
        let cfg = CodegenConfig::default();
        let n = normalizer(&cfg);
        assert_eq!(n.member_name("300gd"), "var_300gd");
        assert!(n.model_file_name("200Response").starts_with("model_"));
        assert_eq!(n.model_name("200Response"), "Model200Response");
        assert!(n.operation_name("return").starts_with("call_"));
    }

    #[test]
    fn model_name_affixes() {
        let cfg = CodegenConfig {
            model_name_prefix: "api".into(),
            model_name_suffix: "dto".into(),
            ..CodegenConfig::default()
        };
        let n = normalizer(&cfg);
        assert_eq!(n.model_file_name("PhoneNumber"), "api_phone_number_dto");
        assert_eq!(n.model_name("PhoneNumber"), "ApiPhoneNumberDto");
    }

    #[test]
    fn reserved_model_name_is_prefixed() {
        let cfg = CodegenConfig::default();
        let n = normalizer(&cfg);
        assert_eq!(n.model_file_name("return"), "model_return");
        assert_eq!(n.model_name("return"), "ModelReturn");
    }

    #[test]
    fn model_file_name_is_idempotent_on_clean_output() {
        let cfg = CodegenConfig::default();
        let n = normalizer(&cfg);
        for raw in ["Volume", "PhoneNumber", "created-at", "HostConfig"] {
            let once = n.model_file_name(raw);
            assert_eq!(n.model_file_name(&once), once, "raw = {raw}");
        }
    }

    #[test]
    fn sanitize_collapses_symbol_runs() {
        assert_eq!(sanitize_name("foo bar"), "foo_bar");
        assert_eq!(sanitize_name("foo**bar"), "foo_bar");
        assert_eq!(sanitize_name("$$$"), "");
        assert_eq!(sanitize_name("a.b.c"), "a_b_c");
    }

    #[test]
    fn underscore_handles_acronym_runs() {
        assert_eq!(underscore("HTTPSUrl"), "https_url");
        assert_eq!(underscore("HTML"), "html");
        assert_eq!(underscore("getUserById"), "get_user_by_id");
    }
}
