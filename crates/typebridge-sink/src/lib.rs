//! Destinations for rendered schema scripts.
//!
//! A sink receives the whole [`SchemaScript`] at once and either accepts all
//! of it or fails; there is no partial application and no retry.

pub mod file;
pub mod typedb;

use std::path::PathBuf;

use typebridge_translate::SchemaScript;

pub use file::FileSink;
pub use typedb::{TypeDbSink, DEFAULT_ADDRESS};

pub trait SchemaSink {
    fn define(&mut self, script: &SchemaScript) -> Result<(), SinkError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("failed to write schema to {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write schema to stdout: {0}")]
    Stdout(#[source] std::io::Error),
    #[error("failed to start the async runtime: {0}")]
    Runtime(#[source] std::io::Error),
    #[error("failed to connect to TypeDB at {address}: {source}")]
    Connect {
        address: String,
        #[source]
        source: typedb_driver::Error,
    },
    #[error("database `{database}` does not exist")]
    MissingDatabase { database: String },
    #[error("TypeDB failed to {stage}: {source}")]
    Driver {
        stage: &'static str,
        #[source]
        source: typedb_driver::Error,
    },
    #[error("TypeDB rejected statement {index} `{statement}`: {source}")]
    Rejected {
        index: usize,
        statement: String,
        #[source]
        source: typedb_driver::Error,
    },
}
