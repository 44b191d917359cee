//! Read-only, queryable view over one or more schema documents.
//!
//! Hierarchy queries follow LinkML semantics: `is_a` children and mixin users
//! both count as descendants, ancestors include mixins, and a class's visible
//! slots are the slots and attributes of every ancestor.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::builtin::{linkml_types_schema, LINKML_TYPES_IMPORT};
use crate::schema::{ClassDefinition, Name, SchemaDefinition, SlotDefinition, SlotUsage, TypeDefinition};
use crate::ModelError;

/// Everything the translation engine needs from a source model.
///
/// Unknown names produce empty results rather than errors; the engine reports
/// missing roots itself.
pub trait SchemaSource {
    /// All classes, in declaration order.
    fn class_names(&self) -> Vec<&str>;
    fn class(&self, name: &str) -> Option<&ClassDefinition>;
    /// Reflexive descendants (is_a children and mixin users), discovery order.
    fn class_descendants(&self, name: &str) -> Vec<&str>;
    /// Induced slot names visible on a class, deduplicated.
    fn class_slots(&self, name: &str) -> Vec<&str>;
    fn type_names(&self) -> Vec<&str>;
    fn type_def(&self, name: &str) -> Option<&TypeDefinition>;
    /// Schema-level slots followed by class attributes not declared as slots.
    fn slot_names(&self) -> Vec<&str>;
    fn slot(&self, name: &str) -> Option<&SlotDefinition>;

    fn class_parent(&self, name: &str) -> Option<&str> {
        self.class(name).and_then(|c| c.is_a.as_deref())
    }

    fn is_mixin(&self, name: &str) -> bool {
        self.class(name).is_some_and(|c| c.mixin)
    }

    fn slot_usage(&self, name: &str) -> Option<&IndexMap<Name, SlotUsage>> {
        self.class(name).map(|c| &c.slot_usage)
    }
}

#[derive(Debug, Clone, Default)]
pub struct SchemaView {
    pub name: Option<Name>,
    classes: IndexMap<Name, ClassDefinition>,
    types: IndexMap<Name, TypeDefinition>,
    slots: IndexMap<Name, SlotDefinition>,
}

impl SchemaView {
    /// Merge documents in order; the first definition of a name wins.
    pub fn from_schemas(schemas: Vec<SchemaDefinition>) -> Self {
        let mut view = SchemaView {
            name: schemas.first().and_then(|s| s.name.clone()),
            ..Default::default()
        };

        for schema in &schemas {
            for (name, def) in &schema.classes {
                view.classes.entry(name.clone()).or_insert_with(|| def.clone());
            }
            for (name, def) in &schema.types {
                view.types.entry(name.clone()).or_insert_with(|| def.clone());
            }
            for (name, def) in &schema.slots {
                view.slots.entry(name.clone()).or_insert_with(|| def.clone());
            }
        }

        // Attributes are slots too, scoped to their class but sharing the
        // global slot namespace.
        for schema in &schemas {
            for class in schema.classes.values() {
                for (name, def) in &class.attributes {
                    view.slots.entry(name.clone()).or_insert_with(|| def.clone());
                }
            }
        }

        view
    }

    /// Parse a single document. Only the built-in `linkml:types` import is
    /// resolved; file imports need [`SchemaView::from_path`].
    pub fn from_yaml_str(text: &str) -> Result<Self, ModelError> {
        let schema = parse_schema(text, "<inline>")?;
        let mut schemas = Vec::new();
        let mut builtin = false;
        for import in &schema.imports {
            if import == LINKML_TYPES_IMPORT {
                builtin = true;
            } else {
                tracing::warn!(import = %import, "skipping import of inline schema");
            }
        }
        schemas.push(schema);
        if builtin {
            schemas.push(linkml_types_schema());
        }
        Ok(Self::from_schemas(schemas))
    }

    /// Load a schema file and everything it imports.
    pub fn from_path(path: &Path) -> Result<Self, ModelError> {
        let mut loader = ImportLoader::default();
        loader.load(path)?;
        if loader.builtin_types {
            loader.documents.push(linkml_types_schema());
        }
        Ok(Self::from_schemas(loader.documents))
    }

    pub fn class_children(&self, name: &str) -> Vec<&str> {
        self.classes
            .iter()
            .filter(|(_, c)| c.is_a.as_deref() == Some(name) || c.mixins.iter().any(|m| m == name))
            .map(|(child, _)| child.as_str())
            .collect()
    }

    pub fn class_parents(&self, name: &str) -> Vec<&str> {
        let Some(class) = self.classes.get(name) else {
            return Vec::new();
        };
        let mut parents: Vec<&str> = class.mixins.iter().map(String::as_str).collect();
        if let Some(is_a) = class.is_a.as_deref() {
            parents.push(is_a);
        }
        parents
    }

    pub fn class_ancestors(&self, name: &str) -> Vec<&str> {
        match self.classes.get_key_value(name) {
            Some((key, _)) => closure(key.as_str(), |n| self.class_parents(n)),
            None => Vec::new(),
        }
    }
}

impl SchemaSource for SchemaView {
    fn class_names(&self) -> Vec<&str> {
        self.classes.keys().map(String::as_str).collect()
    }

    fn class(&self, name: &str) -> Option<&ClassDefinition> {
        self.classes.get(name)
    }

    fn class_descendants(&self, name: &str) -> Vec<&str> {
        match self.classes.get_key_value(name) {
            Some((key, _)) => closure(key.as_str(), |n| self.class_children(n)),
            None => Vec::new(),
        }
    }

    fn class_slots(&self, name: &str) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for ancestor in self.class_ancestors(name) {
            let Some(class) = self.classes.get(ancestor) else {
                continue;
            };
            for slot in class.slots.iter().chain(class.attributes.keys()) {
                if seen.insert(slot.as_str()) {
                    out.push(slot.as_str());
                }
            }
        }
        out
    }

    fn type_names(&self) -> Vec<&str> {
        self.types.keys().map(String::as_str).collect()
    }

    fn type_def(&self, name: &str) -> Option<&TypeDefinition> {
        self.types.get(name)
    }

    fn slot_names(&self) -> Vec<&str> {
        self.slots.keys().map(String::as_str).collect()
    }

    fn slot(&self, name: &str) -> Option<&SlotDefinition> {
        self.slots.get(name)
    }
}

/// Reflexive depth-first closure. Results are in discovery order: a node is
/// listed when first seen as a neighbour, and expanded at most once.
fn closure<'a, F>(start: &'a str, mut neighbours: F) -> Vec<&'a str>
where
    F: FnMut(&'a str) -> Vec<&'a str>,
{
    let mut out = vec![start];
    let mut listed: HashSet<&str> = HashSet::from([start]);
    let mut todo = vec![start];

    while let Some(next) = todo.pop() {
        for n in neighbours(next) {
            if listed.insert(n) {
                out.push(n);
                todo.push(n);
            }
        }
    }
    out
}

fn parse_schema(text: &str, location: &str) -> Result<SchemaDefinition, ModelError> {
    serde_yaml::from_str(text).map_err(|source| ModelError::Yaml {
        location: location.to_string(),
        source,
    })
}

#[derive(Default)]
struct ImportLoader {
    visited: HashSet<PathBuf>,
    documents: Vec<SchemaDefinition>,
    builtin_types: bool,
}

impl ImportLoader {
    fn load(&mut self, path: &Path) -> Result<(), ModelError> {
        let key = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        if !self.visited.insert(key) {
            return Ok(());
        }

        let text = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let schema = parse_schema(&text, &path.display().to_string())?;
        tracing::debug!(
            path = %path.display(),
            classes = schema.classes.len(),
            slots = schema.slots.len(),
            types = schema.types.len(),
            "loaded schema document"
        );

        let imports = schema.imports.clone();
        self.documents.push(schema);

        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        for import in imports {
            if import == LINKML_TYPES_IMPORT {
                self.builtin_types = true;
                continue;
            }
            if import.contains(':') {
                tracing::warn!(import = %import, "skipping non-local import");
                continue;
            }
            let file_name = if import.ends_with(".yaml") || import.ends_with(".yml") {
                import.clone()
            } else {
                format!("{import}.yaml")
            };
            let import_path = base_dir.join(file_name);
            if !import_path.exists() {
                return Err(ModelError::ImportNotFound {
                    import,
                    path: import_path,
                });
            }
            self.load(&import_path)?;
        }
        Ok(())
    }
}
