// Game Night - comment board and game info service

// Typed records
pub mod models;

// Comment store, metrics, access logging and middleware
pub mod infrastructure;

// HTTP surface
pub mod routes;
pub mod views;

// Common utilities
pub mod app_state;
pub mod config;
pub mod error;

// Re-exports for convenience
pub use app_state::AppState;
pub use error::{AppError, AppResult};
pub use routes::create_router;
