//! The API description tree exposed to templates as `api`.

use serde::{Deserialize, Serialize};

use crate::data_type::DataType;

/// Root of an API description: a set of namespaces.
///
/// Read-only during rendering; the core never mutates it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Api {
    pub namespaces: Vec<Namespace>,
}

/// A named grouping of data types and operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Namespace {
    pub name: String,

    #[serde(default)]
    pub doc: String,

    /// Data type definitions declared in this namespace.
    #[serde(default)]
    pub data_types: Vec<DataType>,

    /// Operations declared in this namespace.
    #[serde(default)]
    pub routes: Vec<Route>,
}

/// An operation: a named request/response pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub name: String,

    #[serde(default)]
    pub doc: String,

    pub request: DataType,
    pub response: DataType,
}
