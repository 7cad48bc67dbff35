// Core infrastructure modules
pub mod database;              // Comment store interface
pub mod sqlite_database;       // SQLite comment store
pub mod monitoring;            // Request metrics and Prometheus export
pub mod access_log;            // Access log lines and subscriber setup
pub mod middleware;            // Request tracking and form extraction

pub use database::CommentStore;
pub use sqlite_database::SqliteCommentStore;
pub use monitoring::{MetricsCollector, RequestLabels};
pub use access_log::{access_layer, init_logging, AccessNote, AccessRecord, ACCESS_TARGET};
