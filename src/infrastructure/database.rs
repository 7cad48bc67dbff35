// Comment store interface - the only owner of the comment collection

use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::Comment;

/// Append-only comment log with newest-first retrieval.
///
/// Implementations own the backing table exclusively. Rejected input never
/// reaches storage: `append` validates before writing and reports blank or
/// over-long text as [`AppError::Validation`](crate::error::AppError::Validation).
#[async_trait]
pub trait CommentStore: Send + Sync {
    /// Create the backing table if it does not exist yet.
    async fn migrate(&self) -> AppResult<()>;

    /// Persist `text` as a new comment and return it with its assigned id.
    async fn append(&self, text: &str) -> AppResult<Comment>;

    /// Every comment, highest id first.
    async fn list_all(&self) -> AppResult<Vec<Comment>>;

    /// Release the underlying connections.
    async fn close(&self);
}
