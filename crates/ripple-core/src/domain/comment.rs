use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Comment entity - user-authored text attached to a post.
///
/// Comments are immutable once created; they can only be added and removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub user_id: Uuid,
    pub post_id: Uuid,
    pub content: String,
}
