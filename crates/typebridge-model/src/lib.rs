//! Source model for typebridge.
//!
//! Reads LinkML-style YAML schemas (classes with `is_a`/mixins, slots,
//! slot usages, named scalar types) and exposes them through the read-only
//! [`SchemaSource`] view the translation engine consumes. The model is never
//! mutated after loading.

pub mod builtin;
pub mod naming;
pub mod schema;
pub mod view;

use std::path::PathBuf;

pub use naming::{to_camel_case, to_snake_case};
pub use schema::{
    AnyOfAlternative, ClassDefinition, Name, SchemaDefinition, SlotDefinition, SlotUsage,
    TypeDefinition,
};
pub use view::{SchemaSource, SchemaView};

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("failed to read schema {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse schema {location}: {source}")]
    Yaml {
        location: String,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("import `{import}` not found (looked for {path})")]
    ImportNotFound { import: String, path: PathBuf },
}
