use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Comment, Like, Post, PostWithAuthor, User};
use crate::error::RepoError;
use crate::pagination::{Page, PageRequest};

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Insert a new entity.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Update an existing entity.
    async fn update(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    /// Find a user by their (already normalized) email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;
}

/// Ordering of the post listing. Defaults to newest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PostOrdering {
    CreatedAtAsc,
    #[default]
    CreatedAtDesc,
}

impl PostOrdering {
    /// Parse an ordering query parameter: `created_at` or `-created_at`.
    /// Unknown fields fall back to the default ordering.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "created_at" => Self::CreatedAtAsc,
            _ => Self::CreatedAtDesc,
        }
    }
}

/// Filters applied to the post listing.
#[derive(Debug, Clone, Default)]
pub struct PostQuery {
    /// Case-insensitive substring match over the title and the author's
    /// username.
    pub search: Option<String>,
    pub ordering: PostOrdering,
}

/// Post repository. Deleting a post cascades to its likes and comments.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// Retrieve a post together with its author's username.
    async fn find_with_author(&self, id: Uuid) -> Result<Option<PostWithAuthor>, RepoError>;

    /// List posts with search, ordering and pagination.
    async fn list(
        &self,
        query: PostQuery,
        page: PageRequest,
    ) -> Result<Page<PostWithAuthor>, RepoError>;
}

/// Like repository. Creation and deletion adjust the owning post's
/// `like_count` within the same unit of work; there is no update.
#[async_trait]
pub trait LikeRepository: Send + Sync {
    async fn create(&self, user_id: Uuid, post_id: Uuid) -> Result<Like, RepoError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Like>, RepoError>;

    async fn delete(&self, id: i64) -> Result<(), RepoError>;

    /// List all likes, most recently created first.
    async fn list(&self, page: PageRequest) -> Result<Page<Like>, RepoError>;

    /// List the likes of one post, most recently created first.
    async fn list_by_post(
        &self,
        post_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<Like>, RepoError>;
}

/// Comment repository. Creation and deletion adjust the owning post's
/// `comment_count` within the same unit of work; there is no update.
#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn create(
        &self,
        user_id: Uuid,
        post_id: Uuid,
        content: String,
    ) -> Result<Comment, RepoError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Comment>, RepoError>;

    async fn delete(&self, id: i64) -> Result<(), RepoError>;

    /// List all comments, most recently created first.
    async fn list(&self, page: PageRequest) -> Result<Page<Comment>, RepoError>;

    /// List the comments of one post, most recently created first.
    async fn list_by_post(
        &self,
        post_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<Comment>, RepoError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_parses_drf_style_parameters() {
        assert_eq!(PostOrdering::parse("created_at"), PostOrdering::CreatedAtAsc);
        assert_eq!(
            PostOrdering::parse("-created_at"),
            PostOrdering::CreatedAtDesc
        );
    }

    #[test]
    fn unknown_ordering_falls_back_to_default() {
        assert_eq!(PostOrdering::parse("title"), PostOrdering::default());
    }
}
