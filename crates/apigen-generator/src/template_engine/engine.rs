//! Tera-based rendering environment with per-language filter overlays.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tera::{Context, Tera};
use tracing::debug;

use apigen_shared::Api;

use super::filters::{register_generic_filters, register_language_filters};
use super::functions;
use crate::lang::TargetLanguage;

/// Registration name for the one-off template each render compiles.
const INLINE_TEMPLATE: &str = "__inline__";

/// Rendering environment shared by every output file of a generator run.
///
/// Construction precomputes one Tera instance per registered
/// language — generic filters, every language's prefixed filters, and
/// that language's plain-named overlay — plus a language-agnostic base
/// instance for extensions no language claims. Each instance is
/// immutable afterward and [`render`](Self::render) borrows `&self`,
/// so a failed render cannot leave a later render under the wrong
/// language's filters, and concurrent renders need no locking.
pub struct GeneratorEnvironment {
    /// The API description, exposed to every template as `api`.
    context: Context,

    /// Generic + prefixed filters only; serves language-agnostic output.
    base: Tera,

    languages: Vec<Arc<dyn TargetLanguage>>,

    /// Extension -> index into `languages` / `overlays`. Case-sensitive.
    ext_to_language: HashMap<String, usize>,

    /// Per-language instances, parallel to `languages`.
    overlays: Vec<Tera>,
}

impl GeneratorEnvironment {
    /// Build the environment for one generator run.
    ///
    /// Fails if two languages collide on a file extension or filter
    /// prefix, or a short name is unusable as a filter prefix —
    /// configuration errors are rejected here rather than silently
    /// resolved first-registered-wins at render time.
    pub fn new(
        api: &Api,
        languages: Vec<Arc<dyn TargetLanguage>>,
    ) -> Result<Self, EnvironmentError> {
        let mut context = Context::new();
        context
            .try_insert("api", api)
            .map_err(|source| EnvironmentError::Context { source })?;

        let mut ext_to_language: HashMap<String, usize> = HashMap::new();
        let mut seen_prefixes: HashMap<&str, usize> = HashMap::new();
        for (idx, language) in languages.iter().enumerate() {
            let prefix = language.short_name();
            if !is_valid_prefix(prefix) {
                return Err(EnvironmentError::InvalidPrefix {
                    prefix: prefix.to_string(),
                });
            }
            if seen_prefixes.insert(prefix, idx).is_some() {
                return Err(EnvironmentError::DuplicatePrefix {
                    prefix: prefix.to_string(),
                });
            }
            for ext in language.supported_extensions() {
                if let Some(&first) = ext_to_language.get(*ext) {
                    return Err(EnvironmentError::DuplicateExtension {
                        extension: (*ext).to_string(),
                        first: languages[first].short_name().to_string(),
                        second: prefix.to_string(),
                    });
                }
                ext_to_language.insert((*ext).to_string(), idx);
            }
        }

        let mut base = Tera::default();
        register_generic_filters(&mut base);
        base.register_function("trim", functions::trim);
        for language in &languages {
            register_language_filters(&mut base, language, true);
        }

        let overlays = languages
            .iter()
            .map(|language| {
                let mut overlay = base.clone();
                register_language_filters(&mut overlay, language, false);
                overlay
            })
            .collect();

        debug!(
            languages = languages.len(),
            extensions = ext_to_language.len(),
            "built rendering environment"
        );

        Ok(Self {
            context,
            base,
            languages,
            ext_to_language,
            overlays,
        })
    }

    /// Render one template source for the given output file extension.
    ///
    /// The extension resolves to a language's overlay by exact string
    /// match; unclaimed extensions (documentation/markup outputs such
    /// as `md` or `html`) render language-agnostic, with only the
    /// generic and prefixed filters available. A failed compile or
    /// render produces no output for the file — there is no partial
    /// result — and leaves the environment untouched.
    pub fn render(&self, extension: &str, template_source: &str) -> Result<String, RenderError> {
        let (mut tera, language) = match self.ext_to_language.get(extension) {
            Some(&idx) => (
                self.overlays[idx].clone(),
                Some(self.languages[idx].short_name()),
            ),
            None => (self.base.clone(), None),
        };
        debug!(
            extension,
            language = language.unwrap_or("(agnostic)"),
            bytes = template_source.len(),
            "rendering template"
        );

        tera.add_raw_template(INLINE_TEMPLATE, template_source)
            .map_err(|source| RenderError::Template {
                extension: extension.to_string(),
                source,
            })?;
        tera.render(INLINE_TEMPLATE, &self.context)
            .map_err(|source| RenderError::Template {
                extension: extension.to_string(),
                source,
            })
    }

    /// The language that owns `extension`, if any.
    pub fn language_for(&self, extension: &str) -> Option<&dyn TargetLanguage> {
        self.ext_to_language
            .get(extension)
            .map(|&idx| self.languages[idx].as_ref())
    }
}

impl fmt::Debug for GeneratorEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let languages: Vec<_> = self.languages.iter().map(|l| l.short_name()).collect();
        let mut extensions: Vec<_> = self.ext_to_language.keys().collect();
        extensions.sort();
        f.debug_struct("GeneratorEnvironment")
            .field("languages", &languages)
            .field("extensions", &extensions)
            .finish_non_exhaustive()
    }
}

/// A filter prefix must parse as part of a Tera filter identifier.
fn is_valid_prefix(prefix: &str) -> bool {
    let mut chars = prefix.chars();
    match chars.next() {
        Some(first) if first.is_ascii_lowercase() => {
            chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
        }
        _ => false,
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EnvironmentError {
    #[error("extension '{extension}' is claimed by both '{first}' and '{second}'")]
    DuplicateExtension {
        extension: String,
        first: String,
        second: String,
    },

    #[error("filter prefix '{prefix}' is registered by more than one language")]
    DuplicatePrefix { prefix: String },

    #[error("'{prefix}' is not usable as a filter prefix (expected [a-z][a-z0-9_]*)")]
    InvalidPrefix { prefix: String },

    #[error("failed to serialize the API description: {source}")]
    Context { source: tera::Error },
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("template render failed for extension '{extension}': {source}")]
    Template {
        extension: String,
        source: tera::Error,
    },
}
