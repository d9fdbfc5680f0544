use crate::errors::{Error, Result};
use rusqlite::Connection;
use tracing::{debug, info, instrument};

#[instrument(skip(conn))]
pub(crate) fn create_tables(conn: &Connection) -> Result<()> {
    debug!("Executing CREATE TABLE statements if tables do not exist.");
    conn.execute_batch(
        "PRAGMA foreign_keys = OFF;

        BEGIN;

        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            email TEXT NOT NULL,
            password TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS expense_categories (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            category_name TEXT NOT NULL
        );

        -- Foreign keys below are declarative only: the foreign_keys pragma is
        -- never enabled, so dangling references are storable and deleting a
        -- referenced parent row leaves its children in place.
        CREATE TABLE IF NOT EXISTS expenses (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL,
            category_id INTEGER NOT NULL,
            amount REAL NOT NULL,
            date_incurred DATE NOT NULL,
            FOREIGN KEY (user_id) REFERENCES users (id),
            FOREIGN KEY (category_id) REFERENCES expense_categories (id)
        );

        CREATE TABLE IF NOT EXISTS income_sources (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            source_name TEXT NOT NULL,
            description TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS incomes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL,
            income_source_id INTEGER NOT NULL,
            amount REAL NOT NULL,
            date_received DATE NOT NULL,
            FOREIGN KEY (user_id) REFERENCES users (id),
            FOREIGN KEY (income_source_id) REFERENCES income_sources (id)
        );

        COMMIT;",
    )
    .map_err(|e| Error::Database(format!("Failed to create tables: {}", e)))?;
    info!("Database tables ensured.");
    Ok(())
}
