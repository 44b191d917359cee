//! Translation settings.
//!
//! Every field has a default matching the Biolink-style models the engine was
//! written for, so a config file only needs the fields it changes.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::descriptor::{TypeDescriptor, ValueType};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationConfig {
    /// Source primitive names (`int`, `date`, ...) and the value type they map to.
    pub type_aliases: IndexMap<String, ValueType>,
    /// Value type for slots whose range is neither a target primitive nor an alias.
    pub default_value_type: ValueType,
    /// Source types the type resolver leaves alone (usually covered by `special_types`).
    pub pass_through_types: Vec<String>,
    /// Attribute types seeded before resolution starts.
    pub special_types: IndexMap<String, TypeDescriptor>,
    pub entity_root: String,
    pub relation_root: String,
    /// Slots every entity gets from the root and never re-declares.
    pub implicit_slots: Vec<String>,
    /// Slot name that is a keyword in the target language.
    pub reserved_slot: String,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        let type_aliases = [
            ("int", ValueType::Long),
            ("integer", ValueType::Long),
            ("float", ValueType::Double),
            ("double", ValueType::Double),
            ("Decimal", ValueType::Double),
            ("str", ValueType::String),
            ("Bool", ValueType::Boolean),
            ("date", ValueType::Datetime),
            ("datetime", ValueType::Datetime),
            ("XSDDate", ValueType::Datetime),
            ("XSDDateTime", ValueType::Datetime),
        ]
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect();

        let pass_through_types = [
            "ncname",
            "decimal",
            "uriorcurie",
            "curie",
            "uri",
            "objectidentifier",
            "nodeidentifier",
            "XSDTime",
            "time",
        ]
        .into_iter()
        .map(str::to_string)
        .collect();

        let special_types = [
            (
                "uriorcurie",
                TypeDescriptor::attribute(ValueType::String).into_abstract(),
            ),
            ("curie", TypeDescriptor::subtype_of("uriorcurie")),
            ("uri", TypeDescriptor::subtype_of("uriorcurie")),
            (
                "time",
                TypeDescriptor::attribute(ValueType::Datetime).into_abstract(),
            ),
            (
                "XSDTime",
                TypeDescriptor::subtype_of("time").with_value(ValueType::Datetime),
            ),
            ("ncname", TypeDescriptor::attribute(ValueType::String)),
            ("decimal", TypeDescriptor::attribute(ValueType::Double)),
            ("objectidentifier", TypeDescriptor::subtype_of("uriorcurie")),
            ("nodeidentifier", TypeDescriptor::subtype_of("uriorcurie")),
        ]
        .into_iter()
        .map(|(name, descriptor)| (name.to_string(), descriptor))
        .collect();

        Self {
            type_aliases,
            default_value_type: ValueType::String,
            pass_through_types,
            special_types,
            entity_root: "named thing".to_string(),
            relation_root: "association".to_string(),
            implicit_slots: vec!["has attribute".to_string(), "type".to_string()],
            reserved_slot: "type".to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid YAML config {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("invalid JSON config {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("unsupported config format for {0} (expected .yaml, .yml or .json)")]
    UnsupportedFormat(PathBuf),
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] serde_yaml::Error),
}

impl TranslationConfig {
    /// Load from a `.yaml`/`.yml` or `.json` file; missing fields keep their defaults.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("");
        if !matches!(ext, "yaml" | "yml" | "json") {
            return Err(ConfigError::UnsupportedFormat(path.to_path_buf()));
        }

        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        if ext == "json" {
            serde_json::from_str(&text).map_err(|source| ConfigError::Json {
                path: path.to_path_buf(),
                source,
            })
        } else {
            serde_yaml::from_str(&text).map_err(|source| ConfigError::Yaml {
                path: path.to_path_buf(),
                source,
            })
        }
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// A target primitive named directly, or an alias of one.
    pub fn value_type_of(&self, name: &str) -> Option<ValueType> {
        ValueType::parse(name).or_else(|| self.type_aliases.get(name).copied())
    }

    pub fn is_pass_through(&self, name: &str) -> bool {
        self.pass_through_types.iter().any(|t| t == name)
    }

    pub fn is_implicit_slot(&self, name: &str) -> bool {
        self.implicit_slots.iter().any(|s| s == name)
    }
}
