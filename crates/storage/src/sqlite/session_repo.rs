use async_trait::async_trait;
use chrono::Utc;
use sqlx::Row;

use super::SqliteRepository;
use crate::repository::{SessionStorage, StorageError};

fn conn<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Connection(e.to_string())
}

#[async_trait]
impl SessionStorage for SqliteRepository {
    async fn get(&self, scope: &str, key: &str) -> Result<Option<String>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT value
            FROM session_storage
            WHERE scope = ?1 AND key = ?2
            ",
        )
        .bind(scope)
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(conn)?;

        let Some(row) = row else {
            return Ok(None);
        };

        row.try_get::<String, _>("value")
            .map(Some)
            .map_err(|err| StorageError::Serialization(err.to_string()))
    }

    async fn set(&self, scope: &str, key: &str, value: &str) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO session_storage (scope, key, value, updated_at)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(scope, key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            ",
        )
        .bind(scope)
        .bind(key)
        .bind(value)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        tracing::debug!(scope, key, "session storage updated");
        Ok(())
    }

    async fn clear(&self, scope: &str) -> Result<(), StorageError> {
        let res = sqlx::query("DELETE FROM session_storage WHERE scope = ?1")
            .bind(scope)
            .execute(&self.pool)
            .await
            .map_err(conn)?;
        tracing::debug!(scope, removed = res.rows_affected(), "session storage cleared");
        Ok(())
    }
}
