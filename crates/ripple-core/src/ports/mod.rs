//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod repository;

pub use auth::{AuthError, PasswordService, TokenClaims, TokenPair, TokenService};
pub use repository::{
    BaseRepository, CommentRepository, LikeRepository, PostOrdering, PostQuery, PostRepository,
    UserRepository,
};
