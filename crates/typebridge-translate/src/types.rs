//! Named scalar types -> attribute types.
//!
//! Each named type becomes either an attribute bound directly to a value type,
//! or a subtype of another attribute type. Subtype links are kept as links;
//! [`AttributeTable::resolve_value_type`] follows them on demand.

use std::collections::HashSet;

use indexmap::IndexMap;
use serde::Serialize;
use typebridge_model::{to_snake_case, SchemaSource};

use crate::config::TranslationConfig;
use crate::descriptor::{Supertype, TypeDescriptor, ValueType};
use crate::diagnostics::{Diagnostic, Diagnostics};

/// Attribute types keyed by label, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AttributeTable {
    entries: IndexMap<String, TypeDescriptor>,
}

impl AttributeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace. A replaced entry keeps its original position.
    pub fn insert(&mut self, label: impl Into<String>, descriptor: TypeDescriptor) -> Option<TypeDescriptor> {
        self.entries.insert(label.into(), descriptor)
    }

    pub fn get(&self, label: &str) -> Option<&TypeDescriptor> {
        self.entries.get(label)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.entries.contains_key(label)
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, TypeDescriptor> {
        self.entries.iter()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Follow subtype links until an entry carries a value type.
    ///
    /// Returns `None` for unknown labels, dangling links and cycles.
    pub fn resolve_value_type(&self, label: &str) -> Option<ValueType> {
        let mut seen = HashSet::new();
        let mut current = label;
        loop {
            if !seen.insert(current) {
                return None;
            }
            let descriptor = self.entries.get(current)?;
            if let Some(value) = descriptor.value {
                return Some(value);
            }
            match &descriptor.supertype {
                Supertype::Attribute => return None,
                Supertype::Named(next) => current = next,
            }
        }
    }

    /// Report subtype links that point nowhere or loop back on themselves.
    pub fn validate(&self, diagnostics: &mut Diagnostics) {
        for (label, descriptor) in &self.entries {
            if let Supertype::Named(reference) = &descriptor.supertype {
                if !self.entries.contains_key(reference) {
                    diagnostics.push(Diagnostic::DanglingSupertype {
                        label: label.clone(),
                        reference: reference.clone(),
                    });
                    continue;
                }
            }
            if self.in_cycle(label) {
                diagnostics.push(Diagnostic::CyclicSupertype {
                    label: label.clone(),
                });
            }
        }
    }

    fn in_cycle(&self, label: &str) -> bool {
        let mut seen = HashSet::new();
        let mut current = label;
        while let Some(descriptor) = self.entries.get(current) {
            if !seen.insert(current) {
                return true;
            }
            match &descriptor.supertype {
                Supertype::Attribute => return false,
                Supertype::Named(next) => current = next,
            }
        }
        false
    }
}

impl<'a> IntoIterator for &'a AttributeTable {
    type Item = (&'a String, &'a TypeDescriptor);
    type IntoIter = indexmap::map::Iter<'a, String, TypeDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Builds the attribute table for the schema's named scalar types.
pub struct TypeResolver<'a> {
    config: &'a TranslationConfig,
}

impl<'a> TypeResolver<'a> {
    pub fn new(config: &'a TranslationConfig) -> Self {
        Self { config }
    }

    pub fn resolve<S: SchemaSource + ?Sized>(&self, source: &S, diagnostics: &mut Diagnostics) -> AttributeTable {
        let mut table = AttributeTable::new();
        for (name, descriptor) in &self.config.special_types {
            table.insert(to_snake_case(name), self.normalize(descriptor));
        }

        for name in source.type_names() {
            if ValueType::parse(name).is_some() || self.config.is_pass_through(name) {
                continue;
            }
            let Some(def) = source.type_def(name) else {
                continue;
            };

            let descriptor = if let Some(base) = def.base.as_deref() {
                match self.config.value_type_of(base) {
                    Some(value) => TypeDescriptor::attribute(value),
                    None => {
                        diagnostics.push(Diagnostic::UnmappedBase {
                            name: name.to_string(),
                            base: base.to_string(),
                        });
                        continue;
                    }
                }
            } else if let Some(reference) = def.type_of.as_deref() {
                match self.config.value_type_of(reference) {
                    Some(value) => TypeDescriptor::attribute(value),
                    None => TypeDescriptor::subtype_of(to_snake_case(reference)),
                }
            } else {
                diagnostics.push(Diagnostic::UnmappableType {
                    name: name.to_string(),
                });
                continue;
            };

            tracing::trace!(name, descriptor = ?descriptor, "resolved type");
            table.insert(to_snake_case(name), descriptor);
        }

        table
    }

    fn normalize(&self, descriptor: &TypeDescriptor) -> TypeDescriptor {
        let mut out = descriptor.clone();
        if let Supertype::Named(reference) = &descriptor.supertype {
            out.supertype = Supertype::Named(to_snake_case(reference));
        }
        out
    }
}
