//! Classes under the entity root, and slot-bearing mixins, become entity types.

use indexmap::{IndexMap, IndexSet};
use typebridge_model::{to_camel_case, to_snake_case, SchemaSource};

use crate::config::TranslationConfig;
use crate::descriptor::EntityDescriptor;
use crate::diagnostics::{Diagnostic, Diagnostics};

/// Built-in root of the target's entity hierarchy.
pub const ENTITY_ROOT: &str = "entity";

/// Entity descriptors keyed by source class name.
pub type EntityTable = IndexMap<String, EntityDescriptor>;

pub struct EntityClassifier<'a> {
    config: &'a TranslationConfig,
}

impl<'a> EntityClassifier<'a> {
    pub fn new(config: &'a TranslationConfig) -> Self {
        Self { config }
    }

    /// Plays clauses are left empty here; see [`crate::plays::PlaysIndex`].
    pub fn classify<S: SchemaSource + ?Sized>(&self, source: &S, diagnostics: &mut Diagnostics) -> EntityTable {
        let mut entities = EntityTable::new();
        let root = self.config.entity_root.as_str();

        if source.class(root).is_none() {
            diagnostics.push(Diagnostic::MissingRoot {
                root: root.to_string(),
            });
        }

        for class in source.class_descendants(root) {
            let parent = source.class_parent(class);
            let supertype = match parent {
                Some(parent) => entity_supertype(parent),
                None => ENTITY_ROOT.to_string(),
            };

            // The root drops only the reserved slot; everything below it also
            // drops what the parent already shows plus the implicit slots.
            let inherited: IndexSet<&str> = if class == root {
                IndexSet::from([self.config.reserved_slot.as_str()])
            } else {
                parent
                    .map(|p| source.class_slots(p))
                    .unwrap_or_default()
                    .into_iter()
                    .chain(self.config.implicit_slots.iter().map(String::as_str))
                    .collect()
            };

            let owns = source
                .class_slots(class)
                .into_iter()
                .filter(|slot| !inherited.contains(slot))
                .map(to_snake_case)
                .collect();

            entities.insert(
                class.to_string(),
                EntityDescriptor {
                    name: to_camel_case(class),
                    supertype,
                    owns,
                    plays: IndexSet::new(),
                },
            );
        }

        for class in source.class_names() {
            if !source.is_mixin(class) {
                continue;
            }
            let slots = source.class_slots(class);
            if slots.is_empty() {
                continue;
            }
            let owns = slots
                .into_iter()
                .filter(|slot| !self.config.is_implicit_slot(slot))
                .map(to_snake_case)
                .collect();
            entities.insert(
                class.to_string(),
                EntityDescriptor {
                    name: to_camel_case(class),
                    supertype: ENTITY_ROOT.to_string(),
                    owns,
                    plays: IndexSet::new(),
                },
            );
        }

        tracing::debug!(entities = entities.len(), "classified entities");
        entities
    }
}

fn entity_supertype(parent: &str) -> String {
    let label = to_camel_case(parent);
    if label == "Entity" {
        ENTITY_ROOT.to_string()
    } else {
        label
    }
}
