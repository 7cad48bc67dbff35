// Typed records for the comment board and the static game payloads

pub mod comment;
pub mod game;

pub use comment::{Comment, NewComment, MAX_COMMENT_LEN};
pub use game::{Game, GameInfo};
