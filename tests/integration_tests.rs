//! Cross-crate tests: schema files on disk -> translation -> sink.

use std::fs;
use std::path::{Path, PathBuf};

use typebridge_model::SchemaView;
use typebridge_sink::{FileSink, SchemaSink};
use typebridge_translate::{translate, TranslationConfig, ValueType};

fn fixture_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("crates/typebridge-translate/tests/fixtures/mini_biolink.yaml")
}

// ============================================================================
// Full pipeline
// ============================================================================

#[test]
fn fixture_round_trips_through_the_file_sink() {
    let view = SchemaView::from_path(&fixture_path()).expect("fixture should load");
    let translation = translate(&view, &TranslationConfig::default());
    let script = translation.script();

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("schema/mini_biolink.tql");
    FileSink::path(&out).define(&script).unwrap();

    let written = fs::read_to_string(&out).unwrap();
    assert_eq!(written.lines().count(), script.len());
    assert_eq!(written.trim_end(), script.to_string());
    assert!(written.contains("define Gene sub BiologicalEntity, owns symbol, owns has_biological_sequence, owns in_taxon, plays GeneToGeneAssociation:Subject, plays GeneToGeneAssociation:Object, plays VariantToGeneAssociation:Object;\n"));
}

#[test]
fn config_file_changes_the_slot_default() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("typebridge.yaml");
    fs::write(&config_path, "default_value_type: long\n").unwrap();

    let config = TranslationConfig::from_path(&config_path).unwrap();
    let view = SchemaView::from_path(&fixture_path()).unwrap();
    let translation = translate(&view, &config);

    assert_eq!(
        translation.slot_types.get("publications").and_then(|d| d.value),
        Some(ValueType::Long)
    );
    // Declared primitives are unaffected.
    assert_eq!(
        translation.slot_types.get("symbol").and_then(|d| d.value),
        Some(ValueType::String)
    );
}

// ============================================================================
// Split schemas
// ============================================================================

#[test]
fn imported_classes_are_translated_with_the_importer() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("main.yaml"),
        r#"
name: main
imports:
  - linkml:types
  - associations
slots:
  name:
    range: string
  subject:
  object:
classes:
  named thing:
    slots: [name]
  gene:
    is_a: named thing
"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("associations.yaml"),
        r#"
name: associations
classes:
  association:
    slots: [subject, object]
  gene to gene association:
    is_a: association
    slot_usage:
      subject:
        range: gene
      object:
        range: gene
"#,
    )
    .unwrap();

    let view = SchemaView::from_path(&dir.path().join("main.yaml")).unwrap();
    let translation = translate(&view, &TranslationConfig::default());

    assert!(translation.diagnostics.is_empty(), "{:?}", translation.diagnostics);
    assert_eq!(
        translation.entities["gene"].plays_clause(),
        ", plays GeneToGeneAssociation:Subject, plays GeneToGeneAssociation:Object"
    );
    let json: serde_json::Value = serde_json::from_str(&translation.to_json().unwrap()).unwrap();
    assert_eq!(
        json["relations"]["gene to gene association"]["relates"],
        serde_json::json!(["Subject", "Object"])
    );
}
