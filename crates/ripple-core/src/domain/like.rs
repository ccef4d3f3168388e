use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Like entity - a user's like on a post. No payload of its own.
///
/// Likes are immutable once created, and a user may like the same post more
/// than once; uniqueness per (user, post) is deliberately not enforced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Like {
    pub id: i64,
    pub user_id: Uuid,
    pub post_id: Uuid,
}
