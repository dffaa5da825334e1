//! Read-only access to validation-schema nodes.
//!
//! The documentation compiler never looks at a concrete schema representation.
//! It only talks to [`SchemaNode`], which every adapter implements:
//!
//! - [`JoiSchema`] reads the JSON dump of a validation library's internal node
//!   layout (`_type`, `_flags`, `_valids`, `_inner`, `_tests`).
//! - [`Schema`] is a typed builder for declaring contracts directly in Rust.
//!
//! Every accessor is total: a missing or malformed piece of the node reads as
//! its documented default and never as an error.

mod builder;
mod joi;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

pub use builder::Schema;
pub use joi::JoiSchema;

/// The type tag of a schema node.
///
/// Tags outside the well-known set are kept verbatim in [`Kind::Other`] so
/// they still show up as the documented `type`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Kind {
    #[default]
    Object,
    Array,
    String,
    Number,
    Boolean,
    Any,
    Other(String),
}

impl Kind {
    /// Parse a type tag. Matching is exact; the library emits lower-case tags.
    pub fn parse(tag: &str) -> Self {
        match tag {
            "object" => Kind::Object,
            "array" => Kind::Array,
            "string" => Kind::String,
            "number" => Kind::Number,
            "boolean" => Kind::Boolean,
            "any" => Kind::Any,
            other => Kind::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Kind::Object => "object",
            Kind::Array => "array",
            Kind::String => "string",
            Kind::Number => "number",
            Kind::Boolean => "boolean",
            Kind::Any => "any",
            Kind::Other(tag) => tag,
        }
    }

    /// Scalars are everything that has neither nested fields nor items.
    pub fn is_scalar(&self) -> bool {
        !matches!(self, Kind::Object | Kind::Array)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Kind {
    fn from(tag: String) -> Self {
        Kind::parse(&tag)
    }
}

impl From<&str> for Kind {
    fn from(tag: &str) -> Self {
        Kind::parse(tag)
    }
}

impl From<Kind> for String {
    fn from(kind: Kind) -> Self {
        kind.as_str().to_string()
    }
}

/// Capability set the documentation compiler needs from a schema node.
///
/// Implementations must answer every query for every node kind. Absence is a
/// valid answer: `kind` defaults to [`Kind::Object`], `required` to `false`,
/// and the collection accessors to empty.
pub trait SchemaNode {
    /// The node's type tag.
    fn kind(&self) -> Kind;

    /// Whether the presence flag marks the field as required.
    fn required(&self) -> bool;

    /// Literal values the field is constrained to, in declaration order.
    fn allowed_values(&self) -> &[Value];

    /// Look up one argument of a named annotation (`"description"`,
    /// `"example"`, ...). Author metadata lives in the `"default"` slot.
    fn annotation_arg(&self, name: &str, param: &str) -> Option<&Value>;

    /// Declared `(key, node)` pairs of an object node, in declaration order.
    fn fields(&self) -> Vec<(&str, &Self)>;

    /// The element schema of an array node. Only the first declared item
    /// schema is honored.
    fn item_schema(&self) -> Option<&Self>;

    /// Shorthand for the `"default"` argument of a named annotation.
    fn annotation(&self, name: &str) -> Option<&Value> {
        self.annotation_arg(name, "default")
    }

    /// Find a declared field by key.
    fn field(&self, key: &str) -> Option<&Self> {
        self.fields()
            .into_iter()
            .find(|(k, _)| *k == key)
            .map(|(_, node)| node)
    }
}
