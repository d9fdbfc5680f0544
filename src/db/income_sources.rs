use crate::db::DbPool;
use crate::errors::{Error, Result};
use crate::models::IncomeSource;
use rusqlite::Error as RusqliteError;
use rusqlite::{OptionalExtension, params};
use tracing::{debug, info, instrument};

/// Creates a new income source record in the database.
///
/// # Parameters
///
/// * `pool`: The database connection pool.
/// * `source_name`: The display name of the source (e.g. "Salary").
/// * `description`: A free-text description of the source.
///
/// # Returns
///
/// Returns `Ok(i64)` with the ID of the newly inserted source upon success.
///
/// # Errors
///
/// Returns `Error::Database` if there's an issue acquiring the database lock
/// or executing the insert statement.
#[instrument(skip(pool))]
pub async fn create_income_source(
    pool: &DbPool,
    source_name: &str,
    description: &str,
) -> Result<i64> {
    let conn = pool
        .lock()
        .map_err(|_| Error::Database("Failed to acquire DB lock".to_string()))?;
    let mut stmt = conn.prepare_cached(
        "INSERT INTO income_sources (source_name, description) VALUES (?1, ?2)",
    )?;
    let source_id = stmt.insert(params![source_name, description])?;
    info!("Created income source_id {}: {}", source_id, source_name);
    Ok(source_id)
}

#[instrument(skip(pool))]
pub async fn get_all_income_sources(pool: &DbPool) -> Result<Vec<IncomeSource>> {
    let conn = pool.lock().map_err(|_| {
        Error::Database("Failed to acquire DB lock for getting income sources".to_string())
    })?;

    let mut stmt =
        conn.prepare_cached("SELECT id, source_name, description FROM income_sources")?;
    let source_iter = stmt.query_map([], |row| {
        Ok(IncomeSource {
            id: row.get(0)?,
            source_name: row.get(1)?,
            description: row.get(2)?,
        })
    })?;

    let mut sources = Vec::new();
    for source_result in source_iter {
        sources.push(source_result.map_err(|e: RusqliteError| {
            Error::Database(format!("Failed to map income source row: {}", e))
        })?);
    }

    debug!("Fetched {} income sources.", sources.len());
    Ok(sources)
}

/// Finds the first income source whose name exactly equals `source_name`.
///
/// Byte equality only: no case folding, no substring matching. Returns
/// `Ok(None)` when nothing matches; a miss is not an error.
#[instrument(skip(pool))]
pub async fn search_income_sources_by_name(
    pool: &DbPool,
    source_name: &str,
) -> Result<Option<IncomeSource>> {
    let conn = pool
        .lock()
        .map_err(|_| Error::Database("Failed to acquire DB lock".to_string()))?;

    let mut stmt = conn.prepare_cached(
        "SELECT id, source_name, description FROM income_sources WHERE source_name = ?1",
    )?;
    let source_result: Option<IncomeSource> = stmt
        .query_row(params![source_name], |row| {
            Ok(IncomeSource {
                id: row.get(0)?,
                source_name: row.get(1)?,
                description: row.get(2)?,
            })
        })
        .optional()?;

    debug!(
        "Income source lookup for '{}': {:?}",
        source_name,
        source_result.as_ref().map(|s| s.id)
    );
    Ok(source_result)
}

// `None` leaves a column untouched, `Some(value)` writes it, empty strings
// included.
#[derive(Debug, Default)]
pub struct IncomeSourceChanges<'a> {
    pub source_name: Option<&'a str>,
    pub description: Option<&'a str>,
}

/// Applies `changes` to the income source with `source_id`.
///
/// Returns `Ok(false)` when no such source exists; no error is raised.
#[instrument(skip(pool, changes))]
pub async fn update_income_source(
    pool: &DbPool,
    source_id: i64,
    changes: &IncomeSourceChanges<'_>,
) -> Result<bool> {
    let conn = pool
        .lock()
        .map_err(|_| Error::Database("Failed to acquire DB lock".to_string()))?;
    let mut stmt = conn.prepare_cached(
        "UPDATE income_sources SET
            source_name = COALESCE(?1, source_name),
            description = COALESCE(?2, description)
         WHERE id = ?3",
    )?;
    let rows_affected = stmt.execute(params![
        changes.source_name,
        changes.description,
        source_id,
    ])?;
    if rows_affected > 0 {
        info!("Updated income source_id {}", source_id);
    } else {
        debug!("No income source with id {} to update.", source_id);
    }
    Ok(rows_affected > 0)
}

/// Deletes the income source with `source_id`, returning whether a row was
/// removed. Incomes referencing the source are left in place.
#[instrument(skip(pool))]
pub async fn delete_income_source(pool: &DbPool, source_id: i64) -> Result<bool> {
    let conn = pool
        .lock()
        .map_err(|_| Error::Database("Failed to acquire DB lock for delete".to_string()))?;
    let rows_affected = conn.execute(
        "DELETE FROM income_sources WHERE id = ?1",
        params![source_id],
    )?;
    if rows_affected > 0 {
        info!("Deleted income source_id {}", source_id);
    } else {
        debug!("No income source with id {} to delete.", source_id);
    }
    Ok(rows_affected > 0)
}
