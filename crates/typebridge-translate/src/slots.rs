//! Slots -> attribute types.
//!
//! Slot ranges are resolved on their own, without consulting the type table:
//! a direct target primitive, then an alias, then the configured default.

use typebridge_model::{to_snake_case, SchemaSource};

use crate::config::TranslationConfig;
use crate::descriptor::TypeDescriptor;
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::types::AttributeTable;

pub struct SlotTypeFiller<'a> {
    config: &'a TranslationConfig,
}

impl<'a> SlotTypeFiller<'a> {
    pub fn new(config: &'a TranslationConfig) -> Self {
        Self { config }
    }

    /// One attribute type per slot, in declaration order. The reserved slot
    /// name is skipped.
    pub fn fill<S: SchemaSource + ?Sized>(&self, source: &S) -> AttributeTable {
        let mut table = AttributeTable::new();
        for name in source.slot_names() {
            if name == self.config.reserved_slot {
                continue;
            }
            let value = source
                .slot(name)
                .and_then(|slot| slot.range.as_deref())
                .and_then(|range| self.config.value_type_of(range))
                .unwrap_or(self.config.default_value_type);
            table.insert(to_snake_case(name), TypeDescriptor::attribute(value));
        }
        table
    }
}

/// Merge slot-derived attribute types over the type table.
///
/// Slots and types share one label namespace in the target schema. On a
/// clash the slot wins and keeps the type's position; each clash is reported.
pub fn merge_attribute_tables(
    types: &AttributeTable,
    slots: &AttributeTable,
    diagnostics: &mut Diagnostics,
) -> AttributeTable {
    let mut merged = types.clone();
    for (label, descriptor) in slots {
        if merged.insert(label.clone(), descriptor.clone()).is_some() {
            diagnostics.push(Diagnostic::SlotShadowsType {
                label: label.clone(),
            });
        }
    }
    merged
}
