//! Label conventions for the generated schema.
//!
//! Classes, relations and roles become `CamelCase` labels; slots and scalar
//! types become `snake_case` labels.

use regex::Regex;
use std::sync::OnceLock;

fn word_separators() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[_\-\s]+").unwrap())
}

fn snake_separators() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[_\-]+").unwrap())
}

/// `gene to gene association` -> `GeneToGeneAssociation`.
///
/// Only the first letter of each word is touched, so names that are already
/// camel-cased come back unchanged.
pub fn to_camel_case(name: &str) -> String {
    word_separators()
        .split(name)
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect()
}

/// `has attribute` -> `has_attribute`, `XSDDate` -> `xsddate`.
pub fn to_snake_case(name: &str) -> String {
    snake_separators()
        .replace_all(name, " ")
        .to_lowercase()
        .replace(' ', "_")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
