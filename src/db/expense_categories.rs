use crate::db::DbPool;
use crate::errors::{Error, Result};
use crate::models::ExpenseCategory;
use rusqlite::Error as RusqliteError;
use rusqlite::params;
use tracing::{debug, info, instrument};

#[instrument(skip(pool))]
pub async fn create_expense_category(pool: &DbPool, category_name: &str) -> Result<i64> {
    let conn = pool
        .lock()
        .map_err(|_| Error::Database("Failed to acquire DB lock".to_string()))?;
    let mut stmt =
        conn.prepare_cached("INSERT INTO expense_categories (category_name) VALUES (?1)")?;
    let category_id = stmt.insert(params![category_name])?;
    info!("Created expense category_id {}: {}", category_id, category_name);
    Ok(category_id)
}

#[instrument(skip(pool))]
pub async fn get_all_expense_categories(pool: &DbPool) -> Result<Vec<ExpenseCategory>> {
    let conn = pool.lock().map_err(|_| {
        Error::Database("Failed to acquire DB lock for getting categories".to_string())
    })?;

    let mut stmt = conn.prepare_cached("SELECT id, category_name FROM expense_categories")?;
    let category_iter = stmt.query_map([], |row| {
        Ok(ExpenseCategory {
            id: row.get(0)?,
            category_name: row.get(1)?,
        })
    })?;

    let mut categories = Vec::new();
    for category_result in category_iter {
        categories.push(category_result.map_err(|e: RusqliteError| {
            Error::Database(format!("Failed to map expense category row: {}", e))
        })?);
    }

    debug!("Fetched {} expense categories.", categories.len());
    Ok(categories)
}

/// Renames the category with `category_id`. The name is the only mutable
/// column, so it is always written.
///
/// Returns `Ok(false)` when no such category exists.
#[instrument(skip(pool))]
pub async fn update_expense_category(
    pool: &DbPool,
    category_id: i64,
    category_name: &str,
) -> Result<bool> {
    let conn = pool
        .lock()
        .map_err(|_| Error::Database("Failed to acquire DB lock".to_string()))?;
    let rows_affected = conn.execute(
        "UPDATE expense_categories SET category_name = ?1 WHERE id = ?2",
        params![category_name, category_id],
    )?;
    if rows_affected > 0 {
        info!("Updated expense category_id {} to '{}'", category_id, category_name);
    } else {
        debug!("No expense category with id {} to update.", category_id);
    }
    Ok(rows_affected > 0)
}

/// Deletes the category with `category_id`, returning whether a row was
/// removed. Expenses referencing the category are left in place.
#[instrument(skip(pool))]
pub async fn delete_expense_category(pool: &DbPool, category_id: i64) -> Result<bool> {
    let conn = pool
        .lock()
        .map_err(|_| Error::Database("Failed to acquire DB lock for delete".to_string()))?;
    let rows_affected = conn.execute(
        "DELETE FROM expense_categories WHERE id = ?1",
        params![category_id],
    )?;
    if rows_affected > 0 {
        info!("Deleted expense category_id {}", category_id);
    } else {
        debug!("No expense category with id {} to delete.", category_id);
    }
    Ok(rows_affected > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_utils::setup_test_db;
    use crate::db::{create_expense, create_user, get_all_expenses};
    use chrono::NaiveDate;

    #[tokio::test]
    async fn test_create_and_get_all_categories() -> Result<()> {
        let pool = setup_test_db().await?;
        for name in ["Food", "Transport", "Utilities"] {
            create_expense_category(&pool, name).await?;
        }

        let categories = get_all_expense_categories(&pool).await?;
        assert_eq!(categories.len(), 3);
        let names: Vec<&str> = categories.iter().map(|c| c.category_name.as_str()).collect();
        assert_eq!(names, vec!["Food", "Transport", "Utilities"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_category_name() -> Result<()> {
        let pool = setup_test_db().await?;
        let id = create_expense_category(&pool, "Food").await?;

        assert!(update_expense_category(&pool, id, "Groceries").await?);
        let categories = get_all_expense_categories(&pool).await?;
        assert_eq!(categories[0].category_name, "Groceries");

        assert!(!update_expense_category(&pool, 999, "Nothing").await?);
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_category_with_referencing_expense_succeeds() -> Result<()> {
        // Referential integrity is declarative only: the delete goes through
        // and the expense keeps its now-dangling category_id.
        let pool = setup_test_db().await?;
        let user_id = create_user(&pool, "John", "Smith", "john@x", "pw").await?;
        let category_id = create_expense_category(&pool, "Utilities").await?;
        let date = NaiveDate::from_ymd_opt(2024, 12, 1).unwrap();
        create_expense(&pool, user_id, category_id, 100.0, date).await?;

        assert!(delete_expense_category(&pool, category_id).await?);
        assert!(get_all_expense_categories(&pool).await?.is_empty());

        let expenses = get_all_expenses(&pool).await?;
        assert_eq!(expenses.len(), 1);
        assert_eq!(expenses[0].category_id, category_id);
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_unknown_category_returns_false() -> Result<()> {
        let pool = setup_test_db().await?;
        assert!(!delete_expense_category(&pool, 42).await?);
        Ok(())
    }
}
