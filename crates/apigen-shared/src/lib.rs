//! Shared API object model for the apigen code generator.
//!
//! An [`Api`] is the immutable root object that templates render
//! against: namespaces containing data-type definitions and
//! operations (routes), each carrying free-text documentation. The
//! model is produced by an external schema compiler; the rendering
//! core only reads it.
//!
//! All types serialize with serde so they can cross into the template
//! context and be recovered inside filters.

pub mod api;
pub mod data_type;

pub use api::{Api, Namespace, Route};
pub use data_type::{DataType, Field};
