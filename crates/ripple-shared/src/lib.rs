//! # Ripple Shared
//!
//! Wire types shared between the server and clients: request/response DTOs,
//! the pagination envelope and RFC 7807 error bodies.

pub mod dto;
pub mod pagination;
pub mod response;

pub use pagination::Paginated;
pub use response::ErrorResponse;
