//! Advisory findings collected during translation.
//!
//! None of these stop a run: the offending type or reference is left out and
//! the rest of the model is still translated.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    #[error("type `{name}` cannot be mapped: it declares neither `base` nor `typeof`")]
    UnmappableType { name: String },

    #[error("type `{name}` has base `{base}`, which maps to no target value type")]
    UnmappedBase { name: String, base: String },

    #[error("attribute type `{label}` subtypes `{reference}`, which is not defined")]
    DanglingSupertype { label: String, reference: String },

    #[error("attribute type `{label}` is part of a cyclic subtype chain")]
    CyclicSupertype { label: String },

    #[error("a slot redefines attribute type `{label}`; the slot definition is kept")]
    SlotShadowsType { label: String },

    #[error("hierarchy root `{root}` is not defined in the schema")]
    MissingRoot { root: String },

    #[error("role `{role}` of `{relation}` lists bare alternative `{name}`; it is not used for plays")]
    BareAlternative {
        relation: String,
        role: String,
        name: String,
    },

    /// `declared_as` reads as "an entity" or "a relation".
    #[error("label `{label}` is defined both as an attribute type and as {declared_as} type")]
    LabelCollision {
        label: String,
        declared_as: &'static str,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        tracing::warn!(%diagnostic, "translation diagnostic");
        self.0.push(diagnostic);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.0
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
