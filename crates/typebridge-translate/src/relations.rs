//! Classes under the relation root become relation types.
//!
//! A relation's roles are the keys of its slot usage, minus the keys its
//! direct parent already uses, so a role is declared once at the top of the
//! chain that introduces it. Every role also yields a [`RoleBinding`]: the
//! class names whose instances may fill it. Bindings feed the plays index
//! once all entities and relations are known.

use std::collections::HashSet;

use indexmap::{IndexMap, IndexSet};
use typebridge_model::{to_camel_case, to_snake_case, AnyOfAlternative, SchemaSource, SlotUsage};

use crate::config::TranslationConfig;
use crate::descriptor::{RelationDescriptor, RoleRef};
use crate::diagnostics::{Diagnostic, Diagnostics};

/// Built-in root of the target's relation hierarchy.
pub const RELATION_ROOT: &str = "relation";

/// Relation descriptors keyed by source class name.
pub type RelationTable = IndexMap<String, RelationDescriptor>;

/// The candidate players of one role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleBinding {
    pub role: RoleRef,
    /// Ranges of the role's full declarations: each `any_of` expression, then
    /// the slot usage itself.
    pub ranges: Vec<String>,
    /// `any_of` members written as bare strings.
    pub bare: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct RelationClassification {
    pub relations: RelationTable,
    pub bindings: Vec<RoleBinding>,
}

pub struct RelationClassifier<'a> {
    config: &'a TranslationConfig,
}

impl<'a> RelationClassifier<'a> {
    pub fn new(config: &'a TranslationConfig) -> Self {
        Self { config }
    }

    pub fn classify<S: SchemaSource + ?Sized>(
        &self,
        source: &S,
        diagnostics: &mut Diagnostics,
    ) -> RelationClassification {
        let root = self.config.relation_root.as_str();
        let mut out = RelationClassification::default();

        if source.class(root).is_none() {
            diagnostics.push(Diagnostic::MissingRoot {
                root: root.to_string(),
            });
        }

        out.relations.insert(
            root.to_string(),
            RelationDescriptor {
                name: root.to_string(),
                supertype: RELATION_ROOT.to_string(),
                is_abstract: true,
                relates: IndexSet::new(),
                owns: IndexSet::new(),
                plays: IndexSet::new(),
            },
        );

        let root_slots: HashSet<&str> = source.class_slots(root).into_iter().collect();
        let no_usage = IndexMap::new();

        for class in source.class_descendants(root) {
            if class == root {
                continue;
            }
            let Some(def) = source.class(class) else {
                continue;
            };
            let parent = source.class_parent(class);
            let supertype = match parent {
                Some(p) if p == root => p.to_string(),
                Some(p) => to_camel_case(p),
                None => root.to_string(),
            };
            let label = to_camel_case(class);

            let owns: IndexSet<String> = def
                .slots
                .iter()
                .chain(def.attributes.keys())
                .chain(def.defining_slots.iter())
                .map(String::as_str)
                .filter(|slot| !root_slots.contains(slot))
                .map(to_snake_case)
                .collect();

            let usage = source.slot_usage(class).unwrap_or(&no_usage);
            let inherited = parent.and_then(|p| source.slot_usage(p)).unwrap_or(&no_usage);

            let mut relates = IndexSet::new();
            for (role, role_usage) in usage {
                if inherited.contains_key(role) {
                    continue;
                }
                let role_ref = RoleRef {
                    relation: label.clone(),
                    role: to_camel_case(role),
                };
                relates.insert(role_ref.role.clone());
                out.bindings.push(bind(role_ref, role_usage));
            }

            tracing::trace!(class, roles = relates.len(), owns = owns.len(), "classified relation");
            out.relations.insert(
                class.to_string(),
                RelationDescriptor {
                    name: label,
                    supertype,
                    is_abstract: false,
                    relates,
                    owns,
                    plays: IndexSet::new(),
                },
            );
        }

        tracing::debug!(
            relations = out.relations.len(),
            bindings = out.bindings.len(),
            "classified relations"
        );
        out
    }
}

fn bind(role: RoleRef, usage: &SlotUsage) -> RoleBinding {
    let mut ranges = Vec::new();
    let mut bare = Vec::new();
    for alternative in &usage.any_of {
        match alternative {
            AnyOfAlternative::Name(name) => bare.push(name.clone()),
            expression => ranges.extend(expression.range().map(str::to_string)),
        }
    }
    ranges.extend(usage.range.clone());
    RoleBinding { role, ranges, bare }
}

#[cfg(test)]
mod tests {
    use super::*;
    use typebridge_model::SchemaView;

    const RELATIONS: &str = r#"
slots:
  id:
  subject:
  predicate:
  object:
  publications:
  frequency qualifier:
classes:
  association:
    slots: [id, subject, predicate, object, publications]
  gene to gene association:
    is_a: association
    slots: [frequency qualifier, publications]
    slot_usage:
      subject:
        range: gene
      object:
        range: gene
  gene to gene homology association:
    is_a: gene to gene association
    slot_usage:
      subject:
        range: gene
      predicate:
        description: narrowed
      object:
        range: gene
  evidence association:
    is_a: association
    slot_usage:
      subject:
        any_of:
          - range: gene to gene association
          - protein
        range: named thing
"#;

    fn classify() -> (RelationClassification, Diagnostics) {
        let view = SchemaView::from_yaml_str(RELATIONS).unwrap();
        let mut diagnostics = Diagnostics::new();
        let out = RelationClassifier::new(&TranslationConfig::default()).classify(&view, &mut diagnostics);
        (out, diagnostics)
    }

    #[test]
    fn root_is_an_abstract_relation() {
        let (out, diagnostics) = classify();
        assert!(diagnostics.is_empty());
        let root = &out.relations["association"];
        assert_eq!(root.name, "association");
        assert_eq!(root.supertype, "relation");
        assert!(root.is_abstract);
        assert!(root.relates.is_empty());
    }

    #[test]
    fn direct_children_keep_the_uncased_root_as_supertype() {
        let (out, _) = classify();
        let g2g = &out.relations["gene to gene association"];
        assert_eq!(g2g.name, "GeneToGeneAssociation");
        assert_eq!(g2g.supertype, "association");
        assert_eq!(g2g.relates_clause(), ", relates Subject, relates Object");
        assert_eq!(g2g.owns_clause(), ", owns frequency_qualifier");
    }

    #[test]
    fn roles_used_by_the_parent_are_not_redeclared() {
        let (out, _) = classify();
        let homology = &out.relations["gene to gene homology association"];
        assert_eq!(homology.supertype, "GeneToGeneAssociation");
        assert_eq!(homology.relates.iter().collect::<Vec<_>>(), vec!["Predicate"]);
    }

    #[test]
    fn bindings_list_expression_ranges_then_the_usage_range() {
        let (out, _) = classify();
        let evidence = out
            .bindings
            .iter()
            .find(|b| b.role.relation == "EvidenceAssociation")
            .unwrap();
        assert_eq!(evidence.role.role, "Subject");
        assert_eq!(evidence.ranges, vec!["gene to gene association", "named thing"]);
        assert_eq!(evidence.bare, vec!["protein"]);

        let predicate = out
            .bindings
            .iter()
            .find(|b| b.role.relation == "GeneToGeneHomologyAssociation")
            .unwrap();
        assert!(predicate.ranges.is_empty());
    }
}
