//! Template rendering core for schema-driven code generation.
//!
//! Given an [`apigen_shared::Api`] description, this crate renders
//! generic template sources into source text for multiple target
//! programming languages. One shared set of templates serves every
//! language; per-language name/type formatting is injected as Tera
//! filter overlays, resolved by the output file's extension.
//!
//! # Modules
//!
//! - [`lang`] — Target language descriptors: the formatting
//!   capability set every language implements, plus the
//!   JavaScript/Python/Ruby implementations
//! - [`template_engine`] — Filter registry, doc-tag substitution,
//!   whitespace control, and the per-language rendering environment

pub mod lang;
pub mod template_engine;
