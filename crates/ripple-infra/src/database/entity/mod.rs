//! SeaORM entity definitions and their domain conversions.

pub mod comment;
pub mod like;
pub mod post;
pub mod user;
