use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use tracing::{debug, error, info};

use crate::error::{AppError, AppResult};
use crate::infrastructure::database::CommentStore;
use crate::models::{Comment, NewComment};

/// SQLite implementation of the comment store
pub struct SqliteCommentStore {
    pool: SqlitePool,
}

impl SqliteCommentStore {
    /// Connect to `database_url`, creating the database file when missing.
    pub async fn connect(database_url: &str) -> AppResult<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| {
                AppError::Configuration(format!("Invalid database url {}: {}", database_url, e))
            })?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(options)
            .await
            .map_err(|e| {
                error!("Failed to connect to {}: {}", database_url, e);
                AppError::Database(e)
            })?;

        info!("Connected to comment store at {}", database_url);
        Ok(Self { pool })
    }

    /// Fresh in-memory database. Pinned to one connection, since every SQLite
    /// memory connection is its own database.
    pub async fn in_memory() -> AppResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(|e| {
                error!("Failed to connect to in-memory SQLite: {}", e);
                AppError::Database(e)
            })?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl CommentStore for SqliteCommentStore {
    async fn migrate(&self) -> AppResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS comment (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                text VARCHAR(255) NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn append(&self, text: &str) -> AppResult<Comment> {
        let comment = NewComment::parse(text)?;

        let result = sqlx::query("INSERT INTO comment (text) VALUES (?)")
            .bind(comment.as_str())
            .execute(&self.pool)
            .await?;

        let id = result.last_insert_rowid();
        debug!("Stored comment {}", id);

        Ok(Comment {
            id,
            text: comment.as_str().to_string(),
        })
    }

    async fn list_all(&self) -> AppResult<Vec<Comment>> {
        let rows = sqlx::query("SELECT id, text FROM comment ORDER BY id DESC")
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(Comment::from_row).collect()
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn store() -> SqliteCommentStore {
        let store = SqliteCommentStore::in_memory().await.unwrap();
        store.migrate().await.unwrap();
        store
    }

    #[tokio::test]
    async fn test_append_then_list_newest_first() {
        let store = store().await;

        let first = store.append("first").await.unwrap();
        let second = store.append("second").await.unwrap();
        assert!(second.id > first.id);

        let comments = store.list_all().await.unwrap();
        assert_eq!(comments, vec![second, first]);
    }

    #[tokio::test]
    async fn test_list_is_sorted_descending() {
        let store = store().await;
        for text in ["a", "b", "c", "d", "e"] {
            store.append(text).await.unwrap();
        }

        let comments = store.list_all().await.unwrap();
        assert_eq!(comments.len(), 5);
        assert!(comments.windows(2).all(|pair| pair[0].id > pair[1].id));
        assert_eq!(comments[0].text, "e");
    }

    #[tokio::test]
    async fn test_new_id_exceeds_all_prior_ids() {
        let store = store().await;
        store.append("one").await.unwrap();
        store.append("two").await.unwrap();
        let max_prior = store.list_all().await.unwrap().iter().map(|c| c.id).max().unwrap();

        let latest = store.append("three").await.unwrap();
        assert!(latest.id > max_prior);
        assert_eq!(store.list_all().await.unwrap()[0], latest);
    }

    #[tokio::test]
    async fn test_rejected_append_leaves_store_unchanged() {
        let store = store().await;
        store.append("keep me").await.unwrap();
        let before = store.list_all().await.unwrap();

        assert!(matches!(store.append("").await, Err(AppError::Validation(_))));
        assert!(matches!(store.append("   ").await, Err(AppError::Validation(_))));

        assert_eq!(store.list_all().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_empty_store_lists_nothing() {
        let store = store().await;
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_database_is_a_database_error() {
        let dir = tempdir().unwrap();
        let url = format!("sqlite:{}", dir.path().join("missing").join("comments.db").display());

        let result = SqliteCommentStore::connect(&url).await;
        assert!(matches!(result, Err(AppError::Database(_))));
    }

    #[tokio::test]
    async fn test_comments_survive_reconnect() {
        let dir = tempdir().unwrap();
        let url = format!("sqlite:{}", dir.path().join("comments.db").display());

        {
            let store = SqliteCommentStore::connect(&url).await.unwrap();
            store.migrate().await.unwrap();
            store.append("persisted").await.unwrap();
            store.close().await;
        }

        let store = SqliteCommentStore::connect(&url).await.unwrap();
        store.migrate().await.unwrap();
        let comments = store.list_all().await.unwrap();
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].text, "persisted");
    }
}
