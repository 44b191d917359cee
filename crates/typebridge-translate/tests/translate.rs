use std::path::Path;

use proptest::prelude::*;
use typebridge_model::{SchemaSource, SchemaView};
use typebridge_translate::{
    translate, Diagnostic, RoleRef, TypeDescriptor, Translation, TranslationConfig, ValueType,
};

fn fixture_view() -> SchemaView {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/mini_biolink.yaml");
    SchemaView::from_path(&path).expect("fixture should load")
}

fn fixture() -> Translation {
    translate(&fixture_view(), &TranslationConfig::default())
}

fn role(relation: &str, role: &str) -> RoleRef {
    RoleRef {
        relation: relation.to_string(),
        role: role.to_string(),
    }
}

fn plays(translation: &Translation, entity: &str) -> Vec<String> {
    translation.entities[entity].plays.iter().map(ToString::to_string).collect()
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn gene_to_gene_association_relates_subject_and_object() {
    let translation = fixture();
    let g2g = &translation.relations["gene to gene association"];
    assert_eq!(g2g.name, "GeneToGeneAssociation");
    assert_eq!(g2g.supertype, "association");
    assert_eq!(g2g.relates_clause(), ", relates Subject, relates Object");
    assert!(translation.entities["gene"]
        .plays
        .contains(&role("GeneToGeneAssociation", "Subject")));
}

#[test]
fn xsd_date_resolves_through_the_alias_table() {
    let translation = fixture();
    assert_eq!(
        translation.types.get("xsddate"),
        Some(&TypeDescriptor::attribute(ValueType::Datetime))
    );
    let json = serde_json::to_value(&translation.types).unwrap();
    assert_eq!(
        json["xsddate"],
        serde_json::json!({"type": "attribute", "value": "datetime", "abstract": false})
    );
}

#[test]
fn entities_follow_the_hierarchy_walk_then_mixins() {
    let translation = fixture();
    let keys: Vec<&str> = translation.entities.keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        vec![
            "named thing",
            "attribute",
            "organism taxon",
            "biological entity",
            "gene",
            "gene product",
            "sequence variant",
            "thing with taxon",
        ]
    );
    assert_eq!(translation.entities["named thing"].supertype, "entity");
    assert_eq!(translation.entities["gene"].supertype, "BiologicalEntity");
    assert_eq!(
        translation.entities["gene"].owns_clause(),
        ", owns symbol, owns has_biological_sequence, owns in_taxon"
    );
    assert_eq!(translation.entities["gene product"].owns_clause(), ", owns product_name");
}

#[test]
fn plays_are_collected_once_per_role() {
    let translation = fixture();
    assert_eq!(
        plays(&translation, "gene"),
        vec![
            "GeneToGeneAssociation:Subject",
            "GeneToGeneAssociation:Object",
            "VariantToGeneAssociation:Object",
        ]
    );
    assert_eq!(plays(&translation, "sequence variant"), vec!["VariantToGeneAssociation:Subject"]);
    assert_eq!(plays(&translation, "gene product"), vec!["VariantToGeneAssociation:Object"]);
    assert!(translation.entities["thing with taxon"].plays.is_empty());
}

#[test]
fn relations_play_roles_in_other_relations() {
    let translation = fixture();
    for key in ["gene to gene association", "variant to gene association"] {
        assert_eq!(
            translation.relations[key].plays_clause(),
            ", plays AssociationEvidence:Subject"
        );
    }
}

#[test]
fn relation_owns_excludes_root_slots() {
    let translation = fixture();
    assert_eq!(
        translation.relations["variant to gene association"].owns_clause(),
        ", owns sequence_variant_qualifier, owns has_percentage"
    );
    assert_eq!(translation.relations["association evidence"].owns_clause(), "");
}

#[test]
fn diagnostics_are_advisory() {
    let translation = fixture();
    assert_eq!(
        translation.diagnostics.clone().into_vec(),
        vec![
            Diagnostic::UnmappableType {
                name: "unit".to_string(),
            },
            Diagnostic::BareAlternative {
                relation: "VariantToGeneAssociation".to_string(),
                role: "Object".to_string(),
                name: "thing with taxon".to_string(),
            },
        ]
    );
    // The unmappable type is skipped; everything else is still translated.
    assert!(!translation.types.contains("unit"));
    assert_eq!(translation.relations.len(), 5);
}

#[test]
fn rendered_script_is_stable() {
    let first = fixture().script().to_string();
    let second = fixture().script().to_string();
    assert_eq!(first, second);

    let lines: Vec<&str> = first.lines().collect();
    assert_eq!(lines[0], "define uriorcurie sub attribute, abstract, value string;");
    assert!(lines.contains(&"define xsddate sub attribute, value datetime;"));
    assert!(lines.contains(&"define category_type sub iri_type;"));
    assert!(lines.contains(&"define association sub relation, abstract;"));
    assert!(lines.contains(
        &"define GeneToGeneHomologyAssociation sub GeneToGeneAssociation, relates Predicate;"
    ));
    assert!(lines.contains(
        &"define SequenceVariant sub BiologicalEntity, owns in_taxon, plays VariantToGeneAssociation:Subject;"
    ));
    assert!(lines.iter().all(|l| l.starts_with("define ") && l.ends_with(';')));
}

#[test]
fn json_export_mirrors_the_tables() {
    let json: serde_json::Value = serde_json::from_str(&fixture().to_json().unwrap()).unwrap();
    let object = json.as_object().unwrap();
    let keys: Vec<&str> = object.keys().map(String::as_str).collect();
    for key in ["types", "slot_types", "entities", "relations", "diagnostics"] {
        assert!(keys.contains(&key), "missing {key}");
    }
    assert_eq!(json["slot_types"]["has_count"]["value"], "long");
    assert_eq!(json["diagnostics"][0]["kind"], "unmappable_type");
}

// ============================================================================
// Properties over the fixture
// ============================================================================

#[test]
fn relates_never_repeats_a_parent_role() {
    let view = fixture_view();
    let translation = fixture();
    for (key, relation) in &translation.relations {
        let Some(parent) = view.class_parent(key) else {
            continue;
        };
        let Some(parent_relation) = translation.relations.get(parent) else {
            continue;
        };
        assert!(
            relation.relates.is_disjoint(&parent_relation.relates),
            "{key} redeclares a role of {parent}"
        );
    }
}

#[test]
fn every_played_role_is_related() {
    let translation = fixture();
    let all_plays = translation
        .entities
        .values()
        .flat_map(|e| e.plays.iter())
        .chain(translation.relations.values().flat_map(|r| r.plays.iter()));
    for played in all_plays {
        let relation = translation
            .relations
            .values()
            .find(|r| r.name == played.relation)
            .unwrap_or_else(|| panic!("no relation {}", played.relation));
        assert!(relation.relates.contains(&played.role), "{played} is not related");
    }
}

#[test]
fn unknown_slot_ranges_fall_back_to_the_default() {
    let translation = fixture();
    for label in ["iri", "name", "category", "has_attribute", "in_taxon", "publications"] {
        assert_eq!(
            translation.slot_types.get(label).and_then(|d| d.value),
            Some(ValueType::String),
            "{label}"
        );
    }
    assert!(!translation.slot_types.contains("type"));
}

#[test]
fn entity_and_attribute_labels_are_disjoint() {
    let translation = fixture();
    for entity in translation.entities.values() {
        assert!(!translation.attributes.contains(&entity.name));
    }
    assert!(!translation
        .diagnostics
        .iter()
        .any(|d| matches!(d, Diagnostic::LabelCollision { .. })));
}

#[test]
fn every_attribute_type_resolves_to_a_value() {
    let translation = fixture();
    for label in translation.attributes.labels() {
        assert!(
            translation.attributes.resolve_value_type(label).is_some(),
            "{label} has no value type"
        );
    }
}

// ============================================================================
// Generated hierarchies
// ============================================================================

const ROLES: [&str; 4] = ["subject", "object", "predicate", "qualifier"];

/// One generated relation: index of its parent (`None` = the root), and its
/// slot usage as (role index, range index).
type GeneratedRelation = (Option<usize>, Vec<(usize, usize)>);

fn relation_strategy() -> impl Strategy<Value = Vec<GeneratedRelation>> {
    prop::collection::vec(
        (
            prop::option::of(0usize..8),
            prop::collection::vec((0usize..ROLES.len(), 0usize..12), 0..4),
        ),
        1..8,
    )
}

fn generated_yaml(relations: &[GeneratedRelation]) -> String {
    let entities = ["gene", "protein", "disease"];
    let mut yaml = String::from(
        "classes:\n  named thing:\n  gene:\n    is_a: named thing\n  protein:\n    is_a: named thing\n  disease:\n    is_a: named thing\n  association:\n",
    );
    for (i, (parent, usage)) in relations.iter().enumerate() {
        yaml.push_str(&format!("  rel {i}:\n"));
        let parent = match parent {
            Some(p) if *p < i => format!("rel {p}"),
            _ => "association".to_string(),
        };
        yaml.push_str(&format!("    is_a: {parent}\n"));
        if usage.is_empty() {
            continue;
        }
        yaml.push_str("    slot_usage:\n");
        let mut declared = std::collections::HashSet::new();
        for (role, range) in usage {
            if !declared.insert(*role) {
                continue;
            }
            let range = match range {
                r if *r < entities.len() => entities[*r].to_string(),
                r if r - entities.len() < relations.len() => format!("rel {}", r - entities.len()),
                _ => "nowhere".to_string(),
            };
            yaml.push_str(&format!("      {}:\n        range: {range}\n", ROLES[*role]));
        }
    }
    yaml
}

proptest! {
    #[test]
    fn generated_hierarchies_keep_role_invariants(relations in relation_strategy()) {
        let view = SchemaView::from_yaml_str(&generated_yaml(&relations)).unwrap();
        let translation = translate(&view, &TranslationConfig::default());

        for (key, relation) in &translation.relations {
            if let Some(parent) = view.class_parent(key).and_then(|p| translation.relations.get(p)) {
                prop_assert!(relation.relates.is_disjoint(&parent.relates));
            }
        }

        let all_plays: Vec<&RoleRef> = translation
            .entities
            .values()
            .flat_map(|e| e.plays.iter())
            .chain(translation.relations.values().flat_map(|r| r.plays.iter()))
            .collect();
        for played in all_plays {
            let related = translation
                .relations
                .values()
                .any(|r| r.name == played.relation && r.relates.contains(&played.role));
            prop_assert!(related, "{} has no matching relates clause", played);
        }
    }

    #[test]
    fn translation_is_deterministic(relations in relation_strategy()) {
        let view = SchemaView::from_yaml_str(&generated_yaml(&relations)).unwrap();
        let config = TranslationConfig::default();
        prop_assert_eq!(translate(&view, &config), translate(&view, &config));
    }
}
