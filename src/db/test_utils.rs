#![allow(dead_code)]
use crate::db::{DbPool, schema};
use crate::errors::{Error, Result};
use rusqlite::Connection;
use std::sync::Arc;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

pub(crate) fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trace")), // Default to TRACE for tests if RUST_LOG is not set
        )
        .with_test_writer() // Crucial for `cargo test` output
        .try_init(); // Use try_init to avoid panic if already initialized
}

// Helper to create an in-memory DbPool for testing, schema included.
pub(crate) async fn setup_test_db() -> Result<DbPool> {
    let conn = Connection::open_in_memory()
        .map_err(|e| Error::Database(format!("Test DB: Failed to open in-memory: {}", e)))?;
    schema::create_tables(&conn)?;
    Ok(Arc::new(Mutex::new(conn)))
}
