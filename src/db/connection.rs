use crate::db::schema::create_tables;
use crate::errors::{Error, Result};
use rusqlite::Connection;
use std::sync::{Arc, Mutex};
use tracing::{debug, info, instrument};

/// Shared handle to the single database connection. Every data-access
/// function takes one explicitly; there is no global session.
pub type DbPool = Arc<Mutex<Connection>>;

#[instrument]
pub async fn init_db(db_path: &str) -> Result<DbPool> {
    debug!("Initializing database connection to: {}", db_path);
    let conn = Connection::open(db_path)
        .map_err(|e| Error::Database(format!("Failed to open database at {}: {}", db_path, e)))?;

    info!("Database connection opened. Ensuring tables are created...");
    create_tables(&conn)?;

    Ok(Arc::new(Mutex::new(conn)))
}

/// Consumes the pool and closes the underlying connection.
///
/// Taking the pool by value means a closed handle cannot be reused. Errors if
/// other clones of the pool are still alive.
#[instrument(skip(pool))]
pub fn close_db(pool: DbPool) -> Result<()> {
    let mutex = Arc::try_unwrap(pool).map_err(|_| {
        Error::Database("Cannot close database: other handles are still alive".to_string())
    })?;
    let conn = mutex
        .into_inner()
        .map_err(|_| Error::Database("Cannot close database: connection mutex poisoned".to_string()))?;
    conn.close()
        .map_err(|(_, e)| Error::Database(format!("Failed to close database: {}", e)))?;
    info!("Database connection closed.");
    Ok(())
}
