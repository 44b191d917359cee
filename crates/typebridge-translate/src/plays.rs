//! Role players, computed from the finished entity and relation tables.
//!
//! The index is a pure fold over the role bindings, so the result does not
//! depend on the order relations were declared in: a relation may play a
//! role in a relation declared before or after it.

use indexmap::{IndexMap, IndexSet};

use crate::descriptor::RoleRef;
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::entities::EntityTable;
use crate::relations::{RelationTable, RoleBinding};

/// Plays clauses keyed by source class name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaysIndex {
    by_player: IndexMap<String, IndexSet<RoleRef>>,
}

impl PlaysIndex {
    /// Ranges naming neither an entity nor a relation are skipped; they still
    /// leave the role in its relation's relates clause.
    pub fn build(
        bindings: &[RoleBinding],
        entities: &EntityTable,
        relations: &RelationTable,
        diagnostics: &mut Diagnostics,
    ) -> Self {
        let is_known = |name: &str| entities.contains_key(name) || relations.contains_key(name);
        let mut by_player: IndexMap<String, IndexSet<RoleRef>> = IndexMap::new();

        for binding in bindings {
            for range in &binding.ranges {
                if is_known(range.as_str()) {
                    by_player
                        .entry(range.clone())
                        .or_default()
                        .insert(binding.role.clone());
                } else {
                    tracing::debug!(role = %binding.role, range = %range, "role range is not a known type");
                }
            }
            for name in &binding.bare {
                if is_known(name.as_str()) {
                    diagnostics.push(Diagnostic::BareAlternative {
                        relation: binding.role.relation.clone(),
                        role: binding.role.role.clone(),
                        name: name.clone(),
                    });
                }
            }
        }

        Self { by_player }
    }

    pub fn plays_of(&self, player: &str) -> impl Iterator<Item = &RoleRef> {
        self.by_player.get(player).into_iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.by_player.values().map(IndexSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_player.is_empty()
    }

    pub fn with_entity_plays(&self, entities: EntityTable) -> EntityTable {
        entities
            .into_iter()
            .map(|(key, mut entity)| {
                entity.plays = self.plays_of(&key).cloned().collect();
                (key, entity)
            })
            .collect()
    }

    pub fn with_relation_plays(&self, relations: RelationTable) -> RelationTable {
        relations
            .into_iter()
            .map(|(key, mut relation)| {
                relation.plays = self.plays_of(&key).cloned().collect();
                (key, relation)
            })
            .collect()
    }
}
