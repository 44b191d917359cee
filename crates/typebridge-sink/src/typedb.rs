//! TypeDB 2.x through the gRPC driver.
//!
//! One `define` call is one schema session with a single write transaction:
//! every statement is submitted in order, then the transaction commits. A
//! rejected statement drops the transaction uncommitted, so the server never
//! sees a partial schema.

use typebridge_translate::SchemaScript;
use typedb_driver::{Connection, DatabaseManager, Session, SessionType, TransactionType};

use crate::{SchemaSink, SinkError};

pub const DEFAULT_ADDRESS: &str = "127.0.0.1:1729";

#[derive(Debug, Clone)]
pub struct TypeDbSink {
    address: String,
    database: String,
}

impl TypeDbSink {
    pub fn new(address: &str, database: impl Into<String>) -> Self {
        Self {
            address: normalize_address(address),
            database: database.into(),
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    async fn submit(&self, script: &SchemaScript) -> Result<(), SinkError> {
        let connection = Connection::new_core(&self.address).map_err(|source| SinkError::Connect {
            address: self.address.clone(),
            source,
        })?;
        let databases = DatabaseManager::new(connection);

        let exists = databases
            .contains(self.database.as_str())
            .await
            .map_err(|source| SinkError::Driver {
                stage: "look up database",
                source,
            })?;
        if !exists {
            return Err(SinkError::MissingDatabase {
                database: self.database.clone(),
            });
        }
        let database = databases
            .get(self.database.as_str())
            .await
            .map_err(|source| SinkError::Driver {
                stage: "open database",
                source,
            })?;

        let session = Session::new(database, SessionType::Schema)
            .await
            .map_err(|source| SinkError::Driver {
                stage: "open schema session",
                source,
            })?;
        let transaction = session
            .transaction(TransactionType::Write)
            .await
            .map_err(|source| SinkError::Driver {
                stage: "open write transaction",
                source,
            })?;
        tracing::info!(
            address = %self.address,
            database = %self.database,
            statements = script.len(),
            "opened schema transaction"
        );

        for (index, statement) in script.iter().enumerate() {
            tracing::debug!(index, statement = %statement, "submitting statement");
            transaction
                .query()
                .define(statement)
                .await
                .map_err(|source| SinkError::Rejected {
                    index,
                    statement: statement.clone(),
                    source,
                })?;
        }

        transaction.commit().await.map_err(|source| SinkError::Driver {
            stage: "commit",
            source,
        })?;
        Ok(())
    }
}

impl SchemaSink for TypeDbSink {
    fn define(&mut self, script: &SchemaScript) -> Result<(), SinkError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(SinkError::Runtime)?;
        runtime.block_on(self.submit(script))?;
        tracing::info!(database = %self.database, "committed schema");
        Ok(())
    }
}

/// The driver wants a bare `host:port`; a URL scheme and trailing slashes are dropped.
pub fn normalize_address(address: &str) -> String {
    let address = address.trim();
    let address = address
        .strip_prefix("http://")
        .or_else(|| address.strip_prefix("https://"))
        .unwrap_or(address)
        .trim_end_matches('/');
    if address.is_empty() {
        DEFAULT_ADDRESS.to_string()
    } else {
        address.to_string()
    }
}
