//! Translation engine: LinkML-style class models to TypeDB schema definitions.
//!
//! The pipeline runs over a read-only [`SchemaSource`]:
//!
//! 1. [`TypeResolver`] maps named scalar types to attribute types.
//! 2. [`SlotTypeFiller`] adds one attribute type per slot; the two tables are
//!    merged into one label namespace.
//! 3. [`EntityClassifier`] and [`RelationClassifier`] build the entity and
//!    relation tables independently.
//! 4. [`PlaysIndex`] folds the relations' role bindings into plays clauses.
//!
//! Nothing here performs I/O. Problems in the source model are collected as
//! [`Diagnostics`] and never abort the run.

pub mod config;
pub mod descriptor;
pub mod diagnostics;
pub mod entities;
pub mod plays;
pub mod relations;
pub mod render;
pub mod slots;
pub mod types;

use serde::Serialize;
use typebridge_model::{to_snake_case, SchemaSource};

pub use config::{ConfigError, TranslationConfig};
pub use descriptor::{
    EntityDescriptor, RelationDescriptor, RoleRef, Supertype, TypeDescriptor, ValueType,
};
pub use diagnostics::{Diagnostic, Diagnostics};
pub use entities::{EntityClassifier, EntityTable};
pub use plays::PlaysIndex;
pub use relations::{RelationClassification, RelationClassifier, RelationTable, RoleBinding};
pub use render::{render_attribute, render_entity, render_relation, SchemaScript};
pub use slots::{merge_attribute_tables, SlotTypeFiller};
pub use types::{AttributeTable, TypeResolver};

/// Everything one translation run produces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Translation {
    /// Attribute types derived from named scalar types.
    pub types: AttributeTable,
    /// Attribute types derived from slots.
    pub slot_types: AttributeTable,
    /// `types` with `slot_types` merged over it; this is what gets rendered.
    #[serde(skip)]
    pub attributes: AttributeTable,
    pub entities: EntityTable,
    pub relations: RelationTable,
    pub diagnostics: Diagnostics,
}

impl Translation {
    /// Attribute types, then entities, then relations.
    pub fn script(&self) -> SchemaScript {
        let attributes = self
            .attributes
            .iter()
            .map(|(label, descriptor)| render_attribute(label, descriptor));
        let entities = self.entities.values().map(render_entity);
        let relations = self.relations.values().map(render_relation);
        attributes.chain(entities).chain(relations).collect()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Run the full pipeline.
pub fn translate<S: SchemaSource + ?Sized>(source: &S, config: &TranslationConfig) -> Translation {
    let mut diagnostics = Diagnostics::new();

    let types = TypeResolver::new(config).resolve(source, &mut diagnostics);
    let slot_types = SlotTypeFiller::new(config).fill(source);
    let attributes = merge_attribute_tables(&types, &slot_types, &mut diagnostics);
    attributes.validate(&mut diagnostics);

    let entities = EntityClassifier::new(config).classify(source, &mut diagnostics);
    let RelationClassification { relations, bindings } =
        RelationClassifier::new(config).classify(source, &mut diagnostics);

    let plays = PlaysIndex::build(&bindings, &entities, &relations, &mut diagnostics);
    let entities = plays.with_entity_plays(entities);
    let relations = plays.with_relation_plays(relations);

    check_label_collisions(&attributes, &entities, &relations, &mut diagnostics);

    tracing::info!(
        attributes = attributes.len(),
        entities = entities.len(),
        relations = relations.len(),
        plays = plays.len(),
        diagnostics = diagnostics.len(),
        "translated schema"
    );

    Translation {
        types,
        slot_types,
        attributes,
        entities,
        relations,
        diagnostics,
    }
}

/// Entity and relation labels must not reuse an attribute label, either as
/// rendered or in the attribute namespace's snake-cased form.
fn check_label_collisions(
    attributes: &AttributeTable,
    entities: &EntityTable,
    relations: &RelationTable,
    diagnostics: &mut Diagnostics,
) {
    let named = entities
        .iter()
        .map(|(key, e)| (key, &e.name, "an entity"))
        .chain(relations.iter().map(|(key, r)| (key, &r.name, "a relation")));

    for (key, label, declared_as) in named {
        let snake = to_snake_case(key);
        let clash = if attributes.contains(label) {
            Some(label.clone())
        } else if attributes.contains(&snake) {
            Some(snake)
        } else {
            None
        };
        if let Some(label) = clash {
            diagnostics.push(Diagnostic::LabelCollision { label, declared_as });
        }
    }
}
