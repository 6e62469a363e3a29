//! CLI command implementations.

pub mod catalog;
pub mod search;
pub mod seed;

use std::io::Write;

use serde::Serialize;
use stride_core::QueryError;
use stride_storefront::config::ConfigError;
use stride_storefront::store::{MemoryStore, StoreError};
use thiserror::Error;

/// Errors a command can fail with.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("catalog store: {0}")]
    Store(#[from] StoreError),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error("could not write output: {0}")]
    Output(#[from] std::io::Error),

    #[error("could not encode output: {0}")]
    Json(#[from] serde_json::Error),
}

/// Load the demo catalog.
fn seeded_store() -> Result<MemoryStore, CommandError> {
    Ok(MemoryStore::seeded()?)
}

/// Write `value` to stdout as pretty JSON.
fn print_json<T: Serialize>(value: &T) -> Result<(), CommandError> {
    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
