//! HTTP handlers and route configuration.

mod auth;
mod comment;
mod health;
mod like;
mod post;
mod user;


use actix_web::{HttpResponse, web};
use serde::Serialize;

use ripple_core::error::RepoError;
use ripple_core::pagination::{Page, PageRequest};
use ripple_shared::Paginated;

use crate::middleware::error::{AppError, AppResult};

/// Configure all application routes.
///
/// Each entity mounts only the methods it allows: posts support partial
/// update, likes and comments are immutable and expose no update at all.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/auth")
                .route("/register", web::post().to(auth::register))
                .route("/login", web::post().to(auth::login)),
        )
        .service(
            web::scope("/user")
                .route("/me", web::get().to(user::me))
                .route("/me", web::patch().to(user::update_me)),
        )
        .service(
            web::scope("/post")
                .route("", web::get().to(post::list))
                .route("", web::post().to(post::create))
                .route("/{id}", web::get().to(post::retrieve))
                .route("/{id}", web::patch().to(post::partial_update))
                .route("/{id}", web::delete().to(post::destroy)),
        )
        .service(
            web::scope("/like")
                .route("", web::get().to(like::list))
                .route("", web::post().to(like::create))
                .route("/posts/{post_id}", web::get().to(like::list_by_post))
                .route("/{id}", web::get().to(like::retrieve))
                .route("/{id}", web::delete().to(like::destroy)),
        )
        .service(
            web::scope("/comment")
                .route("", web::get().to(comment::list))
                .route("", web::post().to(comment::create))
                .route("/posts/{post_id}", web::get().to(comment::list_by_post))
                .route("/{id}", web::get().to(comment::retrieve))
                .route("/{id}", web::delete().to(comment::destroy)),
        );
}

/// Wrap one page of serialized results in the pagination envelope. A page
/// number past the end of the collection is a 404, like the original API.
pub(crate) fn paginated<T: Serialize>(
    page_data: Page<T>,
    page: PageRequest,
) -> AppResult<HttpResponse> {
    let envelope = Paginated::new(page_data.items, page_data.total, page.page, page.page_size)
        .map_err(|e| AppError::NotFound(e.to_string()))?;

    Ok(HttpResponse::Ok().json(envelope))
}

/// Map a store failure during like/comment creation. A missing parent
/// mid-transaction means the referenced post raced with a delete.
pub(crate) fn map_child_create_err(e: RepoError) -> AppError {
    match e {
        RepoError::NotFound | RepoError::Constraint(_) => AppError::Validation(vec![
            "post_id: referenced post does not exist".to_string(),
        ]),
        other => other.into(),
    }
}
