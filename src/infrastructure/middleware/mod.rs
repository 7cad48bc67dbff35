// Cross-cutting request handling shared by every board route

pub mod comment_form_extractor;
pub mod request_tracking_middleware;

pub use comment_form_extractor::CommentForm;
pub use request_tracking_middleware::{request_tracking_middleware, UNMATCHED_ENDPOINT};
