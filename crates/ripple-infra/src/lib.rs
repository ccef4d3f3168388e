//! # Ripple Infrastructure
//!
//! Concrete implementations of the ports defined in `ripple-core`: the
//! SeaORM/Postgres entity store with its counter maintenance, the JWT token
//! service and the Argon2 password service.

pub mod auth;
pub mod database;

pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
pub use database::{
    DatabaseConfig, PostgresCommentRepository, PostgresLikeRepository, PostgresPostRepository,
    PostgresUserRepository, connect,
};
