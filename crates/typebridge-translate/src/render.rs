//! Descriptors -> `define` statements.
//!
//! Clause order is the same for every kind: abstract, value, owns, relates,
//! plays. Absent clauses render as nothing.

use std::fmt;

use serde::Serialize;

use crate::descriptor::{EntityDescriptor, RelationDescriptor, TypeDescriptor};

pub fn render_attribute(label: &str, descriptor: &TypeDescriptor) -> String {
    let abstract_clause = if descriptor.is_abstract { ", abstract" } else { "" };
    let value_clause = descriptor
        .value
        .map(|value| format!(", value {value}"))
        .unwrap_or_default();
    format!(
        "define {label} sub {}{abstract_clause}{value_clause};",
        descriptor.supertype
    )
}

pub fn render_entity(entity: &EntityDescriptor) -> String {
    format!(
        "define {} sub {}{}{};",
        entity.name,
        entity.supertype,
        entity.owns_clause(),
        entity.plays_clause()
    )
}

pub fn render_relation(relation: &RelationDescriptor) -> String {
    let abstract_clause = if relation.is_abstract { ", abstract" } else { "" };
    format!(
        "define {} sub {}{abstract_clause}{}{}{};",
        relation.name,
        relation.supertype,
        relation.owns_clause(),
        relation.relates_clause(),
        relation.plays_clause()
    )
}

/// An ordered list of `define` statements, submitted as one batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SchemaScript {
    statements: Vec<String>,
}

impl SchemaScript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, statement: impl Into<String>) {
        self.statements.push(statement.into());
    }

    pub fn statements(&self) -> &[String] {
        &self.statements
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.statements.iter()
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

impl fmt::Display for SchemaScript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, statement) in self.statements.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            f.write_str(statement)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a SchemaScript {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.statements.iter()
    }
}

impl FromIterator<String> for SchemaScript {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            statements: iter.into_iter().collect(),
        }
    }
}
