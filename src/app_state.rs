use std::sync::Arc;

use crate::{
    config::Config,
    error::AppResult,
    infrastructure::{CommentStore, MetricsCollector, SqliteCommentStore},
    views::Views,
};

/// Process-scoped dependencies shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CommentStore>,
    pub config: Arc<Config>,
    pub metrics: Arc<MetricsCollector>,
    pub views: Arc<Views>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let store = SqliteCommentStore::connect(&config.database.url).await?;
        Self::with_store(config, Arc::new(store)).await
    }

    /// Build state around an already connected store; the schema is created
    /// here when missing.
    pub async fn with_store(config: Config, store: Arc<dyn CommentStore>) -> AppResult<Self> {
        store.migrate().await?;

        Ok(Self {
            metrics: Arc::new(MetricsCollector::new(config.app.clone())),
            views: Arc::new(Views::new()?),
            config: Arc::new(config),
            store,
        })
    }
}
