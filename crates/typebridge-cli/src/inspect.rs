//! Plain-text reports for `typebridge inspect`.

use std::fmt::Write;

use anyhow::{bail, Result};
use typebridge_model::{SchemaSource, SchemaView};
use typebridge_translate::{render_entity, render_relation, Translation};

pub fn summarize(view: &SchemaView, translation: &Translation) -> Result<String> {
    let mut out = String::new();
    writeln!(
        out,
        "schema {}",
        view.name.as_deref().unwrap_or("<unnamed>")
    )?;
    writeln!(
        out,
        "  {} classes, {} slots, {} types",
        view.class_names().len(),
        view.slot_names().len(),
        view.type_names().len()
    )?;
    writeln!(
        out,
        "  {} attribute types ({} from types, {} from slots)",
        translation.attributes.len(),
        translation.types.len(),
        translation.slot_types.len()
    )?;

    writeln!(out, "\nentities ({})", translation.entities.len())?;
    for entity in translation.entities.values() {
        writeln!(
            out,
            "  {} sub {}  owns {}, plays {}",
            entity.name,
            entity.supertype,
            entity.owns.len(),
            entity.plays.len()
        )?;
    }

    writeln!(out, "\nrelations ({})", translation.relations.len())?;
    for relation in translation.relations.values() {
        let roles: Vec<&str> = relation.relates.iter().map(String::as_str).collect();
        writeln!(
            out,
            "  {} sub {}  relates [{}]",
            relation.name,
            relation.supertype,
            roles.join(", ")
        )?;
    }

    if !translation.diagnostics.is_empty() {
        writeln!(out, "\n{} diagnostics", translation.diagnostics.len())?;
    }
    Ok(out)
}

pub fn explain_class(view: &SchemaView, translation: &Translation, class: &str) -> Result<String> {
    let Some(def) = view.class(class) else {
        bail!("class `{class}` is not defined in the schema");
    };

    let mut out = String::new();
    writeln!(out, "class {class}")?;
    if let Some(parent) = view.class_parent(class) {
        writeln!(out, "  is_a: {parent}")?;
    }
    if !def.mixins.is_empty() {
        writeln!(out, "  mixins: {}", def.mixins.join(", "))?;
    }
    if def.mixin {
        writeln!(out, "  mixin")?;
    }
    writeln!(out, "  ancestors: {}", view.class_ancestors(class).join(" -> "))?;
    writeln!(out, "  slots: {}", view.class_slots(class).join(", "))?;
    if let Some(usage) = view.slot_usage(class) {
        let keys: Vec<&str> = usage.keys().map(String::as_str).collect();
        writeln!(out, "  slot_usage: {}", keys.join(", "))?;
    }

    if let Some(entity) = translation.entities.get(class) {
        writeln!(out, "\nentity\n  {}", render_entity(entity))?;
    } else if let Some(relation) = translation.relations.get(class) {
        writeln!(out, "\nrelation\n  {}", render_relation(relation))?;
    } else if def.mixin {
        writeln!(out, "\nnot translated: mixin without slots")?;
    } else {
        writeln!(out, "\nnot translated: outside the entity and relation hierarchies")?;
    }
    Ok(out)
}
