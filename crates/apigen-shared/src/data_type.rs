//! Language-agnostic data type representation.
//!
//! [`DataType`] is the intermediate form that language descriptors
//! render into concrete type syntax. It is internally tagged with a
//! `kind` discriminant so that values keep their classification after
//! being serialized into a template context — the type-predicate
//! filters (`is_struct`, `is_union`, …) inspect exactly that tag.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A schema-level data type, as referenced by fields, routes, and templates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataType {
    /// A record with named, typed fields.
    Struct {
        name: String,
        #[serde(default)]
        doc: String,
        fields: Vec<Field>,
    },
    /// A tagged union; exactly one variant is set at a time.
    Union {
        name: String,
        #[serde(default)]
        doc: String,
        variants: Vec<Field>,
    },
    /// A homogeneous list.
    List { item: Box<DataType> },
    /// Raw bytes.
    Binary,
    String,
    Int64,
    Float64,
    Boolean,
    Timestamp,
}

/// A single field within a struct, union, or argument list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Schema-level field name (arbitrary case/separator style).
    pub name: String,

    /// The field's type.
    #[serde(rename = "type")]
    pub data_type: DataType,

    /// Free-text documentation, possibly containing doc tags.
    #[serde(default)]
    pub doc: String,

    /// Default value, if the schema declares one.
    #[serde(default)]
    pub default: Option<serde_json::Value>,
}

impl DataType {
    /// The declared name for user-defined types, `None` for primitives.
    pub fn name(&self) -> Option<&str> {
        match self {
            DataType::Struct { name, .. } | DataType::Union { name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn is_struct(&self) -> bool {
        matches!(self, DataType::Struct { .. })
    }

    pub fn is_union(&self) -> bool {
        matches!(self, DataType::Union { .. })
    }

    pub fn is_list(&self) -> bool {
        matches!(self, DataType::List { .. })
    }

    pub fn is_binary(&self) -> bool {
        matches!(self, DataType::Binary)
    }

    /// Whether this is a user-defined composite (struct or union).
    pub fn is_composite(&self) -> bool {
        self.is_struct() || self.is_union()
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Struct { name, .. } => write!(f, "{name}"),
            DataType::Union { name, .. } => write!(f, "{name}"),
            DataType::List { item } => write!(f, "List<{item}>"),
            DataType::Binary => write!(f, "Binary"),
            DataType::String => write!(f, "String"),
            DataType::Int64 => write!(f, "Int64"),
            DataType::Float64 => write!(f, "Float64"),
            DataType::Boolean => write!(f, "Boolean"),
            DataType::Timestamp => write!(f, "Timestamp"),
        }
    }
}
