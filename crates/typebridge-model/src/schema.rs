//! Serde types for the LinkML subset the translator reads.
//!
//! Only the fields the translation engine consumes are modelled; everything
//! else in a schema document (prefixes, enums, annotations, ...) is accepted
//! and ignored. Element maps keep declaration order because the generated
//! statement order follows it.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

pub type Name = String;

// ============================================================================
// Schema document
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SchemaDefinition {
    pub id: Option<String>,
    pub name: Option<Name>,
    #[serde(deserialize_with = "nullable")]
    pub imports: Vec<String>,
    #[serde(deserialize_with = "definitions")]
    pub types: IndexMap<Name, TypeDefinition>,
    #[serde(deserialize_with = "definitions")]
    pub slots: IndexMap<Name, SlotDefinition>,
    #[serde(deserialize_with = "definitions")]
    pub classes: IndexMap<Name, ClassDefinition>,
}

/// A named scalar type (`types:` block).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TypeDefinition {
    /// Primitive the type is implemented by (`str`, `int`, `XSDDate`, ...).
    pub base: Option<Name>,
    /// Another named type this one refines.
    #[serde(rename = "typeof")]
    pub type_of: Option<Name>,
    pub uri: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SlotDefinition {
    pub range: Option<Name>,
    pub description: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub any_of: Vec<AnyOfAlternative>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ClassDefinition {
    pub is_a: Option<Name>,
    pub mixin: bool,
    #[serde(rename = "abstract")]
    pub is_abstract: bool,
    #[serde(deserialize_with = "nullable")]
    pub mixins: Vec<Name>,
    #[serde(deserialize_with = "nullable")]
    pub slots: Vec<Name>,
    #[serde(deserialize_with = "definitions")]
    pub attributes: IndexMap<Name, SlotDefinition>,
    #[serde(deserialize_with = "definitions")]
    pub slot_usage: IndexMap<Name, SlotUsage>,
    #[serde(deserialize_with = "nullable")]
    pub defining_slots: Vec<Name>,
    pub description: Option<String>,
}

/// Per-class refinement of a slot (`slot_usage:` entry).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SlotUsage {
    pub range: Option<Name>,
    #[serde(deserialize_with = "nullable")]
    pub any_of: Vec<AnyOfAlternative>,
    pub description: Option<String>,
}

/// One member of an `any_of` union.
///
/// Schemas normally write full expressions (`- range: gene`); a bare string is
/// accepted too and kept distinct because the classifier treats the two shapes
/// differently.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum AnyOfAlternative {
    Name(Name),
    Expression(SlotUsage),
}

impl AnyOfAlternative {
    pub fn range(&self) -> Option<&str> {
        match self {
            AnyOfAlternative::Name(_) => None,
            AnyOfAlternative::Expression(usage) => usage.range.as_deref(),
        }
    }
}

// ============================================================================
// Null-tolerant deserializers
// ============================================================================

/// `key:` with no body deserializes as `null`; treat it as the empty value.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn definitions<'de, D, T>(deserializer: D) -> Result<IndexMap<Name, T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    let raw = Option::<IndexMap<Name, Option<T>>>::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|(name, def)| (name, def.unwrap_or_default()))
        .collect())
}
