//! Persisted session token.

use chrono::Utc;
use sqlx::{Row, SqlitePool};

use crate::errors::ClientError;

/// Storage key of the bearer token.
pub const AUTH_TOKEN_KEY: &str = "authToken";

/// Wraps the single persisted authentication token.
///
/// There is no expiry tracking: a token is trusted until the backend rejects it.
#[derive(Clone)]
pub struct SessionStore {
    pool: SqlitePool,
}

impl SessionStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Read the current token, if any.
    pub async fn get(&self) -> Result<Option<String>, ClientError> {
        let row = sqlx::query("SELECT value FROM kv WHERE key = ?")
            .bind(AUTH_TOKEN_KEY)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row
            .map(|r| r.get::<String, _>("value"))
            .filter(|token| !token.is_empty()))
    }

    /// Read the token or fail with `Unauthorized`.
    pub async fn require(&self) -> Result<String, ClientError> {
        self.get()
            .await?
            .ok_or_else(|| ClientError::Unauthorized("No token found".to_string()))
    }

    /// Store a token, replacing any previous one.
    pub async fn set(&self, token: &str) -> Result<(), ClientError> {
        let now = Utc::now().to_rfc3339();
        sqlx::query(
            "INSERT INTO kv (key, value, updated_at) VALUES (?, ?, ?) \
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        )
        .bind(AUTH_TOKEN_KEY)
        .bind(token)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        tracing::debug!("Session token stored");
        Ok(())
    }

    /// Remove the token. Removing a missing token is not an error.
    pub async fn clear(&self) -> Result<(), ClientError> {
        sqlx::query("DELETE FROM kv WHERE key = ?")
            .bind(AUTH_TOKEN_KEY)
            .execute(&self.pool)
            .await?;

        tracing::debug!("Session token removed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_database;
    use tempfile::TempDir;

    async fn store() -> (SessionStore, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let pool = init_database(&temp_dir.path().join("session.sqlite"))
            .await
            .expect("Failed to init DB");
        (SessionStore::new(pool), temp_dir)
    }

    #[tokio::test]
    async fn test_empty_store_has_no_token() {
        let (store, _dir) = store().await;
        assert_eq!(store.get().await.unwrap(), None);
        assert!(matches!(
            store.require().await,
            Err(ClientError::Unauthorized(_))
        ));
    }

    #[tokio::test]
    async fn test_set_replaces_previous_token() {
        let (store, _dir) = store().await;
        store.set("first").await.unwrap();
        store.set("second").await.unwrap();
        assert_eq!(store.get().await.unwrap().as_deref(), Some("second"));
    }

    #[tokio::test]
    async fn test_clear_removes_token() {
        let (store, _dir) = store().await;
        store.set("abc").await.unwrap();
        store.clear().await.unwrap();
        assert_eq!(store.get().await.unwrap(), None);
        // Clearing twice is harmless
        store.clear().await.unwrap();
    }

    #[tokio::test]
    async fn test_token_survives_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.sqlite");

        let pool = init_database(&path).await.unwrap();
        SessionStore::new(pool.clone()).set("persisted").await.unwrap();
        pool.close().await;

        let reopened = SessionStore::new(init_database(&path).await.unwrap());
        assert_eq!(reopened.get().await.unwrap().as_deref(), Some("persisted"));
    }
}
