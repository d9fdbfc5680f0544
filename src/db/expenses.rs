use crate::db::DbPool;
use crate::errors::{Error, Result};
use crate::models::Expense;
use chrono::NaiveDate;
use rusqlite::Error as RusqliteError;
use rusqlite::params;
use tracing::{debug, info, instrument};

#[instrument(skip(pool))]
pub async fn create_expense(
    pool: &DbPool,
    user_id: i64,
    category_id: i64,
    amount: f64,
    date_incurred: NaiveDate,
) -> Result<i64> {
    let conn = pool
        .lock()
        .map_err(|_| Error::Database("Failed to acquire DB lock".to_string()))?;
    let mut stmt = conn.prepare_cached(
        "INSERT INTO expenses (user_id, category_id, amount, date_incurred)
         VALUES (?1, ?2, ?3, ?4)",
    )?;
    let expense_id = stmt.insert(params![user_id, category_id, amount, date_incurred])?;
    info!(
        "Created expense_id {} for user_id {}: amount={}, category_id={}",
        expense_id, user_id, amount, category_id
    );
    Ok(expense_id)
}

#[instrument(skip(pool))]
pub async fn get_all_expenses(pool: &DbPool) -> Result<Vec<Expense>> {
    let conn = pool.lock().map_err(|_| {
        Error::Database("Failed to acquire DB lock for getting expenses".to_string())
    })?;

    let mut stmt = conn
        .prepare_cached("SELECT id, user_id, category_id, amount, date_incurred FROM expenses")?;
    let expense_iter = stmt.query_map([], |row| {
        Ok(Expense {
            id: row.get(0)?,
            user_id: row.get(1)?,
            category_id: row.get(2)?,
            amount: row.get(3)?,
            date_incurred: row.get(4)?,
        })
    })?;

    let mut expenses = Vec::new();
    for expense_result in expense_iter {
        expenses.push(expense_result.map_err(|e: RusqliteError| {
            Error::Database(format!("Failed to map expense row: {}", e))
        })?);
    }

    debug!("Fetched {} expenses.", expenses.len());
    Ok(expenses)
}

// `None` leaves a column untouched, `Some(value)` writes it, zero included.
#[derive(Debug, Default)]
pub struct ExpenseChanges {
    pub user_id: Option<i64>,
    pub category_id: Option<i64>,
    pub amount: Option<f64>,
    pub date_incurred: Option<NaiveDate>,
}

/// Applies `changes` to the expense with `expense_id`.
///
/// Returns `Ok(false)` when no such expense exists; no error is raised.
#[instrument(skip(pool, changes))]
pub async fn update_expense(
    pool: &DbPool,
    expense_id: i64,
    changes: &ExpenseChanges,
) -> Result<bool> {
    let conn = pool
        .lock()
        .map_err(|_| Error::Database("Failed to acquire DB lock".to_string()))?;
    let mut stmt = conn.prepare_cached(
        "UPDATE expenses SET
            user_id = COALESCE(?1, user_id),
            category_id = COALESCE(?2, category_id),
            amount = COALESCE(?3, amount),
            date_incurred = COALESCE(?4, date_incurred)
         WHERE id = ?5",
    )?;
    let rows_affected = stmt.execute(params![
        changes.user_id,
        changes.category_id,
        changes.amount,
        changes.date_incurred,
        expense_id,
    ])?;
    if rows_affected > 0 {
        info!("Updated expense_id {}", expense_id);
    } else {
        debug!("No expense with id {} to update.", expense_id);
    }
    Ok(rows_affected > 0)
}

/// Deletes the expense with `expense_id`, returning whether a row was removed.
#[instrument(skip(pool))]
pub async fn delete_expense(pool: &DbPool, expense_id: i64) -> Result<bool> {
    let conn = pool
        .lock()
        .map_err(|_| Error::Database("Failed to acquire DB lock for delete".to_string()))?;
    let rows_affected = conn.execute("DELETE FROM expenses WHERE id = ?1", params![expense_id])?;
    if rows_affected > 0 {
        info!("Deleted expense_id {}", expense_id);
    } else {
        debug!("No expense with id {} to delete.", expense_id);
    }
    Ok(rows_affected > 0)
}

/// Sums every expense amount recorded for `user_id`. Returns 0.0 when the
/// user has no expenses (or does not exist).
#[instrument(skip(pool))]
pub async fn total_expenses_for_user(pool: &DbPool, user_id: i64) -> Result<f64> {
    let conn = pool
        .lock()
        .map_err(|_| Error::Database("Failed to acquire DB lock".to_string()))?;
    let mut stmt = conn
        .prepare_cached("SELECT COALESCE(SUM(amount), 0.0) FROM expenses WHERE user_id = ?1")?;
    let total: f64 = stmt.query_row(params![user_id], |row| row.get(0))?;

    debug!("Total expenses for user_id {}: {:.2}", user_id, total);
    Ok(total)
}
