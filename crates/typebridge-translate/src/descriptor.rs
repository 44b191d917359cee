//! Target-schema descriptors produced by the classifiers.
//!
//! Descriptors hold labels that are already in target form (camel-cased
//! classes and roles, snake-cased attributes). Clause separators are only
//! produced when a descriptor is rendered.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

// ============================================================================
// Value types
// ============================================================================

/// The closed set of primitive value kinds the target database understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    Long,
    Double,
    String,
    Boolean,
    Datetime,
}

impl ValueType {
    pub const ALL: [ValueType; 5] = [
        ValueType::Long,
        ValueType::Double,
        ValueType::String,
        ValueType::Boolean,
        ValueType::Datetime,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ValueType::Long => "long",
            ValueType::Double => "double",
            ValueType::String => "string",
            ValueType::Boolean => "boolean",
            ValueType::Datetime => "datetime",
        }
    }

    /// Exact match against the target's own primitive names.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == name)
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("`{0}` is not a target value type (expected one of: long, double, string, boolean, datetime)")]
pub struct UnknownValueType(pub String);

impl FromStr for ValueType {
    type Err = UnknownValueType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| UnknownValueType(s.to_string()))
    }
}

// ============================================================================
// Attribute types
// ============================================================================

/// What an attribute type subtypes: the built-in `attribute` root, or another
/// named attribute type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Supertype {
    Attribute,
    Named(String),
}

pub const ATTRIBUTE_ROOT: &str = "attribute";

impl Supertype {
    pub fn as_str(&self) -> &str {
        match self {
            Supertype::Attribute => ATTRIBUTE_ROOT,
            Supertype::Named(name) => name,
        }
    }
}

impl From<String> for Supertype {
    fn from(value: String) -> Self {
        if value == ATTRIBUTE_ROOT {
            Supertype::Attribute
        } else {
            Supertype::Named(value)
        }
    }
}

impl From<Supertype> for String {
    fn from(value: Supertype) -> Self {
        match value {
            Supertype::Attribute => ATTRIBUTE_ROOT.to_string(),
            Supertype::Named(name) => name,
        }
    }
}

impl fmt::Display for Supertype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An attribute type, keyed by its label in an [`crate::AttributeTable`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    #[serde(rename = "type")]
    pub supertype: Supertype,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<ValueType>,
    #[serde(rename = "abstract", default)]
    pub is_abstract: bool,
}

impl TypeDescriptor {
    pub fn attribute(value: ValueType) -> Self {
        Self {
            supertype: Supertype::Attribute,
            value: Some(value),
            is_abstract: false,
        }
    }

    pub fn subtype_of(label: impl Into<String>) -> Self {
        Self {
            supertype: Supertype::Named(label.into()),
            value: None,
            is_abstract: false,
        }
    }

    pub fn with_value(mut self, value: ValueType) -> Self {
        self.value = Some(value);
        self
    }

    pub fn into_abstract(mut self) -> Self {
        self.is_abstract = true;
        self
    }
}

// ============================================================================
// Entities and relations
// ============================================================================

/// `Relation:Role`, the unit of a plays clause.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoleRef {
    pub relation: String,
    pub role: String,
}

impl fmt::Display for RoleRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.relation, self.role)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityDescriptor {
    pub name: String,
    pub supertype: String,
    pub owns: IndexSet<String>,
    pub plays: IndexSet<RoleRef>,
}

impl EntityDescriptor {
    pub fn owns_clause(&self) -> String {
        clause("owns", &self.owns)
    }

    pub fn plays_clause(&self) -> String {
        clause("plays", &self.plays)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationDescriptor {
    pub name: String,
    pub supertype: String,
    #[serde(rename = "abstract")]
    pub is_abstract: bool,
    /// Roles declared here; roles inherited from the supertype are left out.
    pub relates: IndexSet<String>,
    pub owns: IndexSet<String>,
    pub plays: IndexSet<RoleRef>,
}

impl RelationDescriptor {
    pub fn relates_clause(&self) -> String {
        clause("relates", &self.relates)
    }

    pub fn owns_clause(&self) -> String {
        clause("owns", &self.owns)
    }

    pub fn plays_clause(&self) -> String {
        clause("plays", &self.plays)
    }
}

/// `, kw a, kw b` or the empty string.
fn clause<T: fmt::Display>(keyword: &str, items: &IndexSet<T>) -> String {
    items.iter().map(|item| format!(", {keyword} {item}")).collect()
}
