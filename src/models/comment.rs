use serde::{Deserialize, Serialize};
use sqlx::{sqlite::SqliteRow, Row};

use crate::error::{AppError, AppResult};

/// Upper bound on comment length, in characters. Matches the `VARCHAR(255)`
/// column of the `comment` table.
pub const MAX_COMMENT_LEN: usize = 255;

/// A persisted comment row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub text: String,
}

impl Comment {
    /// Map a `SELECT id, text FROM comment` row onto the record.
    pub fn from_row(row: &SqliteRow) -> AppResult<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            text: row.try_get("text")?,
        })
    }
}

/// Comment text that passed the presence and length checks and may be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment(String);

impl NewComment {
    /// Accepts text that is not blank and no longer than [`MAX_COMMENT_LEN`]
    /// characters. The text is kept as submitted, surrounding whitespace included.
    pub fn parse(text: &str) -> AppResult<Self> {
        if text.trim().is_empty() {
            return Err(AppError::Validation("comment text is empty".to_string()));
        }

        let len = text.chars().count();
        if len > MAX_COMMENT_LEN {
            return Err(AppError::Validation(format!(
                "comment text is {} characters, limit is {}",
                len, MAX_COMMENT_LEN
            )));
        }

        Ok(Self(text.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
