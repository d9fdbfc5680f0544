use crate::db::DbPool;
use crate::errors::{Error, Result};
use crate::models::User;
use rusqlite::Error as RusqliteError;
use rusqlite::params;
use tracing::{debug, info, instrument};

#[instrument(skip(pool, password))]
pub async fn create_user(
    pool: &DbPool,
    first_name: &str,
    last_name: &str,
    email: &str,
    password: &str,
) -> Result<i64> {
    let conn = pool
        .lock()
        .map_err(|_| Error::Database("Failed to acquire DB lock".to_string()))?;
    let mut stmt = conn.prepare_cached(
        "INSERT INTO users (first_name, last_name, email, password)
         VALUES (?1, ?2, ?3, ?4)",
    )?;
    let user_id = stmt.insert(params![first_name, last_name, email, password])?;
    info!("Created user_id {}: {} {}", user_id, first_name, last_name);
    Ok(user_id)
}

#[instrument(skip(pool))]
pub async fn get_all_users(pool: &DbPool) -> Result<Vec<User>> {
    let conn = pool
        .lock()
        .map_err(|_| Error::Database("Failed to acquire DB lock for getting users".to_string()))?;

    let mut stmt =
        conn.prepare_cached("SELECT id, first_name, last_name, email, password FROM users")?;

    let user_iter = stmt.query_map([], |row| {
        Ok(User {
            id: row.get(0)?,
            first_name: row.get(1)?,
            last_name: row.get(2)?,
            email: row.get(3)?,
            password: row.get(4)?,
        })
    })?;

    let mut users = Vec::new();
    for user_result in user_iter {
        users.push(user_result.map_err(|e: RusqliteError| {
            Error::Database(format!("Failed to map user row: {}", e))
        })?);
    }

    debug!("Fetched {} users.", users.len());
    Ok(users)
}

// Argument struct for partial updates: `None` leaves a column untouched,
// `Some(value)` writes it, empty strings included.
#[derive(Debug, Default)]
pub struct UserChanges<'a> {
    pub first_name: Option<&'a str>,
    pub last_name: Option<&'a str>,
    pub email: Option<&'a str>,
    pub password: Option<&'a str>,
}

/// Applies `changes` to the user with `user_id`.
///
/// Returns `Ok(false)` when no such user exists; no error is raised.
#[instrument(skip(pool, changes))]
pub async fn update_user(pool: &DbPool, user_id: i64, changes: &UserChanges<'_>) -> Result<bool> {
    let conn = pool
        .lock()
        .map_err(|_| Error::Database("Failed to acquire DB lock".to_string()))?;
    let mut stmt = conn.prepare_cached(
        "UPDATE users SET
            first_name = COALESCE(?1, first_name),
            last_name = COALESCE(?2, last_name),
            email = COALESCE(?3, email),
            password = COALESCE(?4, password)
         WHERE id = ?5",
    )?;
    let rows_affected = stmt.execute(params![
        changes.first_name,
        changes.last_name,
        changes.email,
        changes.password,
        user_id,
    ])?;
    if rows_affected > 0 {
        info!("Updated user_id {}", user_id);
    } else {
        debug!("No user with id {} to update.", user_id);
    }
    Ok(rows_affected > 0)
}

/// Deletes the user with `user_id`, returning whether a row was removed.
#[instrument(skip(pool))]
pub async fn delete_user(pool: &DbPool, user_id: i64) -> Result<bool> {
    let conn = pool
        .lock()
        .map_err(|_| Error::Database("Failed to acquire DB lock for delete".to_string()))?;
    let rows_affected = conn.execute("DELETE FROM users WHERE id = ?1", params![user_id])?;
    if rows_affected > 0 {
        info!("Deleted user_id {}", user_id);
    } else {
        debug!("No user with id {} to delete.", user_id);
    }
    Ok(rows_affected > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_utils::{init_test_tracing, setup_test_db};

    #[tokio::test]
    async fn test_create_and_get_all_users_round_trip() -> Result<()> {
        init_test_tracing();
        let pool = setup_test_db().await?;

        let id1 = create_user(&pool, "John", "Smith", "john.smith@gmail.com", "123J45").await?;
        let id2 = create_user(&pool, "Ann", "Mari", "ann.mari@gmail.com", "6A789").await?;
        assert_ne!(id1, id2, "Each insert must get a fresh id");
        assert!(id2 > id1);

        let users = get_all_users(&pool).await?;
        assert_eq!(users.len(), 2);

        let john = users.iter().find(|u| u.id == id1).expect("John not found");
        assert_eq!(john.first_name, "John");
        assert_eq!(john.last_name, "Smith");
        assert_eq!(john.email, "john.smith@gmail.com");
        assert_eq!(john.password, "123J45");
        Ok(())
    }

    #[tokio::test]
    async fn test_update_single_field_leaves_others_alone() -> Result<()> {
        let pool = setup_test_db().await?;
        let id = create_user(&pool, "John", "Smith", "john.smith@gmail.com", "123J45").await?;

        let updated = update_user(
            &pool,
            id,
            &UserChanges {
                email: Some("johnnn@gmail.com"),
                ..UserChanges::default()
            },
        )
        .await?;
        assert!(updated);

        let users = get_all_users(&pool).await?;
        let john = &users[0];
        assert_eq!(john.email, "johnnn@gmail.com");
        assert_eq!(john.first_name, "John");
        assert_eq!(john.last_name, "Smith");
        assert_eq!(john.password, "123J45");
        Ok(())
    }

    #[tokio::test]
    async fn test_update_with_no_changes_is_a_no_op() -> Result<()> {
        let pool = setup_test_db().await?;
        let id = create_user(&pool, "Ann", "Mari", "ann.mari@gmail.com", "6A789").await?;

        let updated = update_user(&pool, id, &UserChanges::default()).await?;
        assert!(updated, "Row exists, so the update still reports a match");

        let users = get_all_users(&pool).await?;
        assert_eq!(users[0].first_name, "Ann");
        assert_eq!(users[0].email, "ann.mari@gmail.com");
        Ok(())
    }

    #[tokio::test]
    async fn test_update_writes_empty_string() -> Result<()> {
        // An explicit Some("") clears the column; only None skips it.
        let pool = setup_test_db().await?;
        let id = create_user(&pool, "Ann", "Mari", "ann.mari@gmail.com", "6A789").await?;

        update_user(
            &pool,
            id,
            &UserChanges {
                email: Some(""),
                ..UserChanges::default()
            },
        )
        .await?;

        let users = get_all_users(&pool).await?;
        assert_eq!(users[0].email, "");
        assert_eq!(users[0].first_name, "Ann");
        Ok(())
    }

    #[tokio::test]
    async fn test_update_unknown_id_returns_false() -> Result<()> {
        let pool = setup_test_db().await?;
        let updated = update_user(
            &pool,
            999,
            &UserChanges {
                email: Some("nobody@example.com"),
                ..UserChanges::default()
            },
        )
        .await?;
        assert!(!updated);
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_user_and_unknown_id() -> Result<()> {
        let pool = setup_test_db().await?;
        let id = create_user(&pool, "John", "Smith", "john.smith@gmail.com", "123J45").await?;

        assert!(delete_user(&pool, id).await?);
        assert!(get_all_users(&pool).await?.is_empty());

        assert!(
            !delete_user(&pool, id).await?,
            "Deleting an already-removed id is a quiet false"
        );
        Ok(())
    }
}
