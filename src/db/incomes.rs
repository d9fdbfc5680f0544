use crate::db::DbPool;
use crate::errors::{Error, Result};
use crate::models::Income;
use chrono::NaiveDate;
use rusqlite::Error as RusqliteError;
use rusqlite::params;
use tracing::{debug, info, instrument};

/// Creates a new income record in the database.
///
/// # Parameters
///
/// * `pool`: The database connection pool.
/// * `user_id`: The ID of the user receiving the income.
/// * `income_source_id`: The ID of the source this income came from.
/// * `amount`: The monetary value received.
/// * `date_received`: The calendar date the income arrived.
///
/// The referenced user and source IDs are stored as supplied; nothing checks
/// that they exist.
///
/// # Returns
///
/// Returns `Ok(i64)` with the ID of the newly inserted income upon success.
///
/// # Errors
///
/// Returns `Error::Database` if there's an issue acquiring the database lock
/// or executing the insert statement.
#[instrument(skip(pool))]
pub async fn create_income(
    pool: &DbPool,
    user_id: i64,
    income_source_id: i64,
    amount: f64,
    date_received: NaiveDate,
) -> Result<i64> {
    let conn = pool
        .lock()
        .map_err(|_| Error::Database("Failed to acquire DB lock".to_string()))?;
    let mut stmt = conn.prepare_cached(
        "INSERT INTO incomes (user_id, income_source_id, amount, date_received)
         VALUES (?1, ?2, ?3, ?4)",
    )?;
    let income_id = stmt.insert(params![user_id, income_source_id, amount, date_received])?;
    info!(
        "Created income_id {} for user_id {}: amount={}, source_id={}",
        income_id, user_id, amount, income_source_id
    );
    Ok(income_id)
}

#[instrument(skip(pool))]
pub async fn get_all_incomes(pool: &DbPool) -> Result<Vec<Income>> {
    let conn = pool.lock().map_err(|_| {
        Error::Database("Failed to acquire DB lock for getting incomes".to_string())
    })?;

    let mut stmt = conn.prepare_cached(
        "SELECT id, user_id, income_source_id, amount, date_received FROM incomes",
    )?;
    let income_iter = stmt.query_map([], |row| {
        Ok(Income {
            id: row.get(0)?,
            user_id: row.get(1)?,
            income_source_id: row.get(2)?,
            amount: row.get(3)?,
            date_received: row.get(4)?,
        })
    })?;

    let mut incomes = Vec::new();
    for income_result in income_iter {
        incomes.push(income_result.map_err(|e: RusqliteError| {
            Error::Database(format!("Failed to map income row: {}", e))
        })?);
    }

    debug!("Fetched {} incomes.", incomes.len());
    Ok(incomes)
}

// `None` leaves a column untouched, `Some(value)` writes it, zero included.
#[derive(Debug, Default)]
pub struct IncomeChanges {
    pub user_id: Option<i64>,
    pub income_source_id: Option<i64>,
    pub amount: Option<f64>,
    pub date_received: Option<NaiveDate>,
}

/// Applies `changes` to the income with `income_id`.
///
/// Returns `Ok(false)` when no such income exists; no error is raised.
#[instrument(skip(pool, changes))]
pub async fn update_income(pool: &DbPool, income_id: i64, changes: &IncomeChanges) -> Result<bool> {
    let conn = pool
        .lock()
        .map_err(|_| Error::Database("Failed to acquire DB lock".to_string()))?;
    let mut stmt = conn.prepare_cached(
        "UPDATE incomes SET
            user_id = COALESCE(?1, user_id),
            income_source_id = COALESCE(?2, income_source_id),
            amount = COALESCE(?3, amount),
            date_received = COALESCE(?4, date_received)
         WHERE id = ?5",
    )?;
    let rows_affected = stmt.execute(params![
        changes.user_id,
        changes.income_source_id,
        changes.amount,
        changes.date_received,
        income_id,
    ])?;
    if rows_affected > 0 {
        info!("Updated income_id {}", income_id);
    } else {
        debug!("No income with id {} to update.", income_id);
    }
    Ok(rows_affected > 0)
}

/// Deletes the income with `income_id`, returning whether a row was removed.
#[instrument(skip(pool))]
pub async fn delete_income(pool: &DbPool, income_id: i64) -> Result<bool> {
    let conn = pool
        .lock()
        .map_err(|_| Error::Database("Failed to acquire DB lock for delete".to_string()))?;
    let rows_affected = conn.execute("DELETE FROM incomes WHERE id = ?1", params![income_id])?;
    if rows_affected > 0 {
        info!("Deleted income_id {}", income_id);
    } else {
        debug!("No income with id {} to delete.", income_id);
    }
    Ok(rows_affected > 0)
}

/// Sums every income amount recorded for `user_id`. Returns 0.0 when the
/// user has no incomes (or does not exist).
#[instrument(skip(pool))]
pub async fn total_income_for_user(pool: &DbPool, user_id: i64) -> Result<f64> {
    let conn = pool
        .lock()
        .map_err(|_| Error::Database("Failed to acquire DB lock".to_string()))?;
    let mut stmt =
        conn.prepare_cached("SELECT COALESCE(SUM(amount), 0.0) FROM incomes WHERE user_id = ?1")?;
    let total: f64 = stmt.query_row(params![user_id], |row| row.get(0))?;

    debug!("Total income for user_id {}: {:.2}", user_id, total);
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_utils::setup_test_db;

    fn sample_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 12, 1).unwrap()
    }

    #[tokio::test]
    async fn test_create_and_get_all_incomes_round_trip() -> Result<()> {
        let pool = setup_test_db().await?;
        let id = create_income(&pool, 1, 1, 1500.0, sample_date()).await?;

        let incomes = get_all_incomes(&pool).await?;
        assert_eq!(incomes.len(), 1);
        let income = &incomes[0];
        assert_eq!(income.id, id);
        assert_eq!(income.user_id, 1);
        assert_eq!(income.income_source_id, 1);
        assert_eq!(income.amount, 1500.0);
        assert_eq!(income.date_received, sample_date());
        Ok(())
    }

    #[tokio::test]
    async fn test_distinct_ids_across_inserts() -> Result<()> {
        let pool = setup_test_db().await?;
        let date = sample_date();
        let mut ids = Vec::new();
        for amount in [1500.0, 1200.0, 800.0] {
            ids.push(create_income(&pool, 1, 1, amount, date).await?);
        }
        ids.dedup();
        assert_eq!(ids.len(), 3, "Ids must be distinct and never reused");
        assert_eq!(get_all_incomes(&pool).await?.len(), 3);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_income_date_and_amount() -> Result<()> {
        let pool = setup_test_db().await?;
        let id = create_income(&pool, 2, 2, 1200.0, sample_date()).await?;
        let new_date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();

        let updated = update_income(
            &pool,
            id,
            &IncomeChanges {
                amount: Some(0.0),
                date_received: Some(new_date),
                ..IncomeChanges::default()
            },
        )
        .await?;
        assert!(updated);

        let income = &get_all_incomes(&pool).await?[0];
        assert_eq!(income.amount, 0.0, "Some(0.0) writes the zero");
        assert_eq!(income.date_received, new_date);
        assert_eq!(income.user_id, 2);
        assert_eq!(income.income_source_id, 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_and_delete_unknown_income() -> Result<()> {
        let pool = setup_test_db().await?;
        let updated = update_income(
            &pool,
            11,
            &IncomeChanges {
                amount: Some(5.0),
                ..IncomeChanges::default()
            },
        )
        .await?;
        assert!(!updated);
        assert!(!delete_income(&pool, 11).await?);
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_income() -> Result<()> {
        let pool = setup_test_db().await?;
        let id = create_income(&pool, 1, 3, 800.0, sample_date()).await?;
        assert!(delete_income(&pool, id).await?);
        assert!(get_all_incomes(&pool).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_total_income_for_user() -> Result<()> {
        let pool = setup_test_db().await?;
        let date = sample_date();
        create_income(&pool, 1, 1, 1500.0, date).await?;
        create_income(&pool, 2, 2, 1200.0, date).await?;
        create_income(&pool, 1, 3, 800.0, date).await?;

        assert_eq!(total_income_for_user(&pool, 1).await?, 2300.0);
        assert_eq!(total_income_for_user(&pool, 2).await?, 1200.0);
        assert_eq!(total_income_for_user(&pool, 3).await?, 0.0);
        Ok(())
    }
}
