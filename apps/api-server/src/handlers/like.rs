//! Like handlers: list, create, retrieve, delete, and per-post listing.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use ripple_core::domain::Like;
use ripple_core::error::RepoError;
use ripple_core::pagination::PageRequest;
use ripple_shared::dto::{CreateLikeRequest, LikeResponse, ListParams};

use super::{map_child_create_err, paginated};
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn like_response(like: Like) -> LikeResponse {
    LikeResponse {
        id: like.id,
        user_id: like.user_id,
        post_id: like.post_id,
    }
}

/// GET /like
pub async fn list(
    state: web::Data<AppState>,
    _identity: Identity,
    params: web::Query<ListParams>,
) -> AppResult<HttpResponse> {
    let params = params.into_inner();
    let page = PageRequest::from_params(params.page, params.page_size);

    let result = state.likes.list(page).await?;

    paginated(result.map(like_response), page)
}

/// POST /like
///
/// The like is created under the caller's identity; the payload only names
/// the post.
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreateLikeRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    // The referenced post must exist; the store's foreign key is the
    // backstop for creations racing a delete.
    if state.posts.find_by_id(req.post_id).await?.is_none() {
        return Err(AppError::Validation(vec![
            "post_id: referenced post does not exist".to_string(),
        ]));
    }

    let like = state
        .likes
        .create(identity.user_id, req.post_id)
        .await
        .map_err(map_child_create_err)?;

    Ok(HttpResponse::Created().json(like_response(like)))
}

/// GET /like/{id}
pub async fn retrieve(
    state: web::Data<AppState>,
    _identity: Identity,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let like = state
        .likes
        .find_by_id(path.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("No Like matches the given query.".to_string()))?;

    Ok(HttpResponse::Ok().json(like_response(like)))
}

/// DELETE /like/{id}
pub async fn destroy(
    state: web::Data<AppState>,
    _identity: Identity,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    state
        .likes
        .delete(path.into_inner())
        .await
        .map_err(|e| match e {
            RepoError::NotFound => {
                AppError::NotFound("No Like matches the given query.".to_string())
            }
            other => other.into(),
        })?;

    Ok(HttpResponse::NoContent().finish())
}

/// GET /like/posts/{post_id}
pub async fn list_by_post(
    state: web::Data<AppState>,
    _identity: Identity,
    path: web::Path<Uuid>,
    params: web::Query<ListParams>,
) -> AppResult<HttpResponse> {
    let params = params.into_inner();
    let page = PageRequest::from_params(params.page, params.page_size);

    let result = state.likes.list_by_post(path.into_inner(), page).await?;

    paginated(result.map(like_response), page)
}
