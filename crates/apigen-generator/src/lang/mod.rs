//! Target language descriptors.
//!
//! A [`TargetLanguage`] is the capability set a target language must
//! implement to participate in rendering: identifier, literal, type,
//! and call-argument formatting, plus the file extensions it owns and
//! the doc-tag macros it supports. The rendering environment binds
//! these capabilities to template filters; the descriptors themselves
//! know nothing about templates.

mod javascript;
mod python;
mod ruby;

pub use javascript::JavascriptLanguage;
pub use python::PythonLanguage;
pub use ruby::RubyLanguage;

use apigen_shared::{DataType, Field};
use serde_json::Value;

use crate::template_engine::DocTagMacros;

/// Formatting capability set implemented once per target language.
///
/// Any formatting operation may fail with [`FormattingError`] when
/// given a malformed identifier or a value the language cannot
/// express; the renderer does not catch this — it propagates as a
/// render failure for that file.
pub trait TargetLanguage: Send + Sync {
    /// Non-empty, unique short name, used as a filter-name prefix
    /// (`js_type`). Must match `[a-z][a-z0-9_]*`.
    fn short_name(&self) -> &'static str;

    /// File extensions this language owns, without the leading dot.
    fn supported_extensions(&self) -> &'static [&'static str];

    /// Idiomatic spelling for a method/operation name.
    fn format_method(&self, name: &str) -> Result<String, FormattingError>;

    /// Idiomatic spelling for a class/type-definition name.
    fn format_class(&self, name: &str) -> Result<String, FormattingError>;

    /// Idiomatic spelling for a variable/field name.
    fn format_variable(&self, name: &str) -> Result<String, FormattingError>;

    /// A string literal per this language's quoting and escaping rules.
    fn format_string_value(&self, value: &str) -> Result<String, FormattingError>;

    /// A schema type reference in this language's type syntax.
    fn format_type(&self, data_type: &DataType) -> Result<String, FormattingError>;

    /// Pretty-print an arbitrary default/example value as a language literal.
    fn format_object(&self, value: &Value) -> Result<String, FormattingError>;

    /// A parameter list per this language's call syntax.
    fn format_func_call_args(&self, args: &[Field]) -> Result<String, FormattingError>;

    /// Decompose an identifier into constituent words.
    ///
    /// Handles snake_case and camelCase inputs without losing or
    /// duplicating characters. Languages with unusual identifier
    /// conventions may override.
    fn split_words(&self, identifier: &str) -> Vec<String> {
        split_words(identifier)
    }

    /// The doc-tag macros this language supports.
    ///
    /// By convention `op` references an operation and `field` a
    /// data-type field. The substitution engine itself is
    /// tag-agnostic; languages may register additional tags.
    fn doc_tag_macros(&self) -> DocTagMacros<'_> {
        let mut macros = DocTagMacros::new();
        macros.register("op", move |val| self.format_method(val));
        macros.register("field", move |val| self.format_variable(val));
        macros
    }
}

/// A target language cannot represent the given input.
#[derive(Debug, thiserror::Error)]
pub enum FormattingError {
    #[error("cannot format an empty identifier")]
    EmptyIdentifier,

    #[error("{language} cannot represent value {value}: {reason}")]
    UnrepresentableValue {
        language: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// Split an identifier into its constituent words.
///
/// Underscores, hyphens, and spaces separate words; within a chunk, a
/// lowercase-to-uppercase transition starts a new word. `HTTPServer`
/// stays a single word — acronym runs are not split.
pub fn split_words(identifier: &str) -> Vec<String> {
    let mut words = Vec::new();
    for chunk in identifier.split(['_', '-', ' ']) {
        if chunk.is_empty() {
            continue;
        }
        let mut current = String::new();
        let mut prev_breaks = false;
        for ch in chunk.chars() {
            if ch.is_uppercase() && prev_breaks && !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            current.push(ch);
            prev_breaks = ch.is_lowercase() || ch.is_ascii_digit();
        }
        if !current.is_empty() {
            words.push(current);
        }
    }
    words
}

/// Reject empty schema identifiers before case conversion.
pub(crate) fn require_identifier(name: &str) -> Result<&str, FormattingError> {
    if name.trim().is_empty() {
        return Err(FormattingError::EmptyIdentifier);
    }
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_words_snake_case() {
        assert_eq!(split_words("get_account_info"), ["get", "account", "info"]);
    }

    #[test]
    fn test_split_words_camel_case() {
        assert_eq!(split_words("getAccountInfo"), ["get", "Account", "Info"]);
    }

    #[test]
    fn test_split_words_mixed_separators() {
        assert_eq!(split_words("get-accountInfo now"), ["get", "account", "Info", "now"]);
    }

    #[test]
    fn test_split_words_preserves_all_characters() {
        for input in ["upload_session", "uploadSession", "utf8Encoding", "x"] {
            let rejoined: String = split_words(input).concat();
            let stripped: String = input.chars().filter(|c| !"_- ".contains(*c)).collect();
            assert_eq!(rejoined, stripped, "lost or duplicated characters in {input:?}");
        }
    }

    #[test]
    fn test_split_words_acronym_run_stays_together() {
        assert_eq!(split_words("HTTPServer"), ["HTTPServer"]);
    }

    #[test]
    fn test_split_words_empty() {
        assert!(split_words("").is_empty());
        assert!(split_words("___").is_empty());
    }

    #[test]
    fn test_require_identifier_rejects_blank() {
        assert!(require_identifier("").is_err());
        assert!(require_identifier("   ").is_err());
        assert!(require_identifier("ok").is_ok());
    }
}
