//! Shared template environment with per-language filter overlays.
//!
//! One Tera instance is precomputed per registered language: the
//! generic filter set, every language's prefixed filters, and that
//! language's plain-named overlay. [`GeneratorEnvironment::render`]
//! dispatches by output file extension, so the same template source
//! renders differently per target language while languages stay
//! strictly isolated from each other.

mod doc_sub;
mod engine;
mod filters;
mod functions;

pub use doc_sub::{DocSubError, DocTagMacros};
pub use engine::{EnvironmentError, GeneratorEnvironment, RenderError};
