//! Application state - shared across all handlers.

use std::sync::Arc;

use ripple_core::ports::{CommentRepository, LikeRepository, PostRepository, UserRepository};
use ripple_infra::{
    DatabaseConfig, PostgresCommentRepository, PostgresLikeRepository, PostgresPostRepository,
    PostgresUserRepository, connect,
};

/// Shared application state: one repository per entity, all backed by the
/// same connection pool.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub likes: Arc<dyn LikeRepository>,
    pub comments: Arc<dyn CommentRepository>,
}

impl AppState {
    /// Connect to the database and build the repository set.
    pub async fn new(config: &DatabaseConfig) -> anyhow::Result<Self> {
        let db = connect(config).await?;

        let state = Self {
            users: Arc::new(PostgresUserRepository::new(db.clone())),
            posts: Arc::new(PostgresPostRepository::new(db.clone())),
            likes: Arc::new(PostgresLikeRepository::new(db.clone())),
            comments: Arc::new(PostgresCommentRepository::new(db)),
        };

        tracing::info!("Application state initialized");
        Ok(state)
    }
}
