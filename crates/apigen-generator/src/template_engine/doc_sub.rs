//! Documentation tag substitution.
//!
//! Schema documentation strings may embed generic markup of the form
//! `` :tag:`value` ``. At render time each occurrence is rewritten by
//! a macro keyed by the tag name, so one doc string can become a
//! Python docstring cross-reference or a JSDoc link depending on the
//! active language. The engine itself is tag-agnostic: it is a
//! dispatch table with no built-in tag semantics.

use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::lang::FormattingError;

/// Matches `` :tag:`value` ``. Tags are alphabetic; the value runs
/// non-greedily to the next backtick and may not contain one.
/// Unterminated or malformed markup simply does not match.
static DOC_TAG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r":(?P<tag>[A-Za-z]+):`(?P<val>[^`]*?)`").expect("doc tag pattern is valid")
});

/// A macro rewriting one tag value into language-appropriate text.
pub type TagMacro<'a> = Box<dyn Fn(&str) -> Result<String, FormattingError> + 'a>;

/// Tag-name-keyed dispatch table for doc substitution.
///
/// Supplied by the caller — in practice by
/// [`TargetLanguage::doc_tag_macros`](crate::lang::TargetLanguage::doc_tag_macros),
/// whose macros close over the descriptor they format with.
#[derive(Default)]
pub struct DocTagMacros<'a> {
    macros: HashMap<String, TagMacro<'a>>,
}

impl fmt::Debug for DocTagMacros<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocTagMacros")
            .field("tags", &self.macros.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl<'a> DocTagMacros<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the macro for one tag, replacing any previous one.
    pub fn register<F>(&mut self, tag: impl Into<String>, macro_fn: F)
    where
        F: Fn(&str) -> Result<String, FormattingError> + 'a,
    {
        self.macros.insert(tag.into(), Box::new(macro_fn));
    }

    /// Rewrite every tag occurrence in `doc`.
    ///
    /// Scans left to right for non-overlapping occurrences; each whole
    /// occurrence (including the `:tag:` prefix and backticks) is
    /// replaced by the macro output. Replacement text is inserted
    /// literally and not re-scanned — a single pass, not recursive.
    ///
    /// A tag with no registered macro is an error, not a silent
    /// pass-through: documentation typos should fail at generation
    /// time, not survive into generated code.
    pub fn substitute(&self, doc: &str) -> Result<String, DocSubError> {
        let mut out = String::with_capacity(doc.len());
        let mut last = 0;
        for caps in DOC_TAG_RE.captures_iter(doc) {
            let Some(whole) = caps.get(0) else { continue };
            let tag = &caps["tag"];
            let val = &caps["val"];
            let macro_fn = self
                .macros
                .get(tag)
                .ok_or_else(|| DocSubError::UnknownTag {
                    tag: tag.to_string(),
                })?;
            out.push_str(&doc[last..whole.start()]);
            out.push_str(&macro_fn(val)?);
            last = whole.end();
        }
        out.push_str(&doc[last..]);
        Ok(out)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DocSubError {
    #[error("no doc tag macro registered for ':{tag}:'")]
    UnknownTag { tag: String },

    #[error(transparent)]
    Formatting(#[from] FormattingError),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upper_macros() -> DocTagMacros<'static> {
        let mut macros = DocTagMacros::new();
        macros.register("op", |val: &str| Ok(format!("op<{}>", val.to_uppercase())));
        macros.register("field", |val: &str| Ok(format!("field<{val}>")));
        macros
    }

    #[test]
    fn test_single_tag_replaced_exactly_once() {
        let macros = upper_macros();
        let out = macros.substitute("See :op:`upload` for details.").unwrap();
        assert_eq!(out, "See op<UPLOAD> for details.");
        assert!(!out.contains(":op:"));
    }

    #[test]
    fn test_unknown_tag_fails() {
        let macros = DocTagMacros::new();
        let err = macros.substitute("See :op:`upload`").unwrap_err();
        assert!(matches!(err, DocSubError::UnknownTag { tag } if tag == "op"));
    }

    #[test]
    fn test_multiple_tags_left_to_right() {
        let macros = upper_macros();
        let out = macros
            .substitute("Set :field:`path`, then call :op:`upload`.")
            .unwrap();
        assert_eq!(out, "Set field<path>, then call op<UPLOAD>.");
    }

    #[test]
    fn test_adjacent_tags() {
        let macros = upper_macros();
        let out = macros.substitute(":op:`a`:op:`b`").unwrap();
        assert_eq!(out, "op<A>op<B>");
    }

    #[test]
    fn test_repeated_occurrences_each_substituted() {
        let macros = upper_macros();
        let out = macros.substitute(":op:`x` and :op:`x`").unwrap();
        assert_eq!(out, "op<X> and op<X>");
    }

    #[test]
    fn test_unterminated_backtick_not_matched() {
        let macros = upper_macros();
        let doc = "Broken :op:`upload with no closing tick";
        assert_eq!(macros.substitute(doc).unwrap(), doc);
    }

    #[test]
    fn test_replacement_not_rescanned() {
        let mut macros = DocTagMacros::new();
        // Macro output that itself looks like a tag must stay literal.
        macros.register("op", |_: &str| Ok(":field:`sneaky`".to_string()));
        let out = macros.substitute("x :op:`y` z").unwrap();
        assert_eq!(out, "x :field:`sneaky` z");
    }

    #[test]
    fn test_macro_failure_propagates() {
        let mut macros = DocTagMacros::new();
        macros.register("op", |_: &str| Err(FormattingError::EmptyIdentifier));
        let err = macros.substitute(":op:`x`").unwrap_err();
        assert!(matches!(err, DocSubError::Formatting(_)));
    }

    #[test]
    fn test_empty_value_allowed() {
        let macros = upper_macros();
        assert_eq!(macros.substitute(":op:``").unwrap(), "op<>");
    }
}
