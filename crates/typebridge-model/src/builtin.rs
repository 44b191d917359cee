//! The standard `linkml:types` import, carried in-process.

use crate::schema::{SchemaDefinition, TypeDefinition};

pub const LINKML_TYPES_IMPORT: &str = "linkml:types";

/// (name, base)
const LINKML_TYPES: &[(&str, &str)] = &[
    ("string", "str"),
    ("integer", "int"),
    ("boolean", "Bool"),
    ("float", "float"),
    ("double", "float"),
    ("decimal", "Decimal"),
    ("time", "XSDTime"),
    ("date", "XSDDate"),
    ("datetime", "XSDDateTime"),
    ("date_or_datetime", "str"),
    ("uriorcurie", "URIorCURIE"),
    ("curie", "Curie"),
    ("uri", "URI"),
    ("ncname", "NCName"),
    ("objectidentifier", "ElementIdentifier"),
    ("nodeidentifier", "NodeIdentifier"),
    ("jsonpointer", "str"),
    ("jsonpath", "str"),
    ("sparqlpath", "str"),
];

pub fn linkml_types_schema() -> SchemaDefinition {
    let mut schema = SchemaDefinition {
        id: Some("https://w3id.org/linkml/types".to_string()),
        name: Some("types".to_string()),
        ..Default::default()
    };
    for (name, base) in LINKML_TYPES {
        schema.types.insert(
            name.to_string(),
            TypeDefinition {
                base: Some(base.to_string()),
                ..Default::default()
            },
        );
    }
    schema
}
