//! Comment handlers: list, create, retrieve, delete, and per-post listing.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use ripple_core::domain::Comment;
use ripple_core::error::RepoError;
use ripple_core::pagination::PageRequest;
use ripple_shared::dto::{CommentResponse, CreateCommentRequest, ListParams};

use super::{map_child_create_err, paginated};
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn comment_response(comment: Comment) -> CommentResponse {
    CommentResponse {
        id: comment.id,
        user_id: comment.user_id,
        post_id: comment.post_id,
        content: comment.content,
    }
}

/// GET /comment
pub async fn list(
    state: web::Data<AppState>,
    _identity: Identity,
    params: web::Query<ListParams>,
) -> AppResult<HttpResponse> {
    let params = params.into_inner();
    let page = PageRequest::from_params(params.page, params.page_size);

    let result = state.comments.list(page).await?;

    paginated(result.map(comment_response), page)
}

/// POST /comment
///
/// The comment is created under the caller's identity; the payload names
/// the post and carries the text.
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreateCommentRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    if req.content.trim().is_empty() {
        return Err(AppError::Validation(vec![
            "content: may not be blank".to_string(),
        ]));
    }
    if state.posts.find_by_id(req.post_id).await?.is_none() {
        return Err(AppError::Validation(vec![
            "post_id: referenced post does not exist".to_string(),
        ]));
    }

    let comment = state
        .comments
        .create(identity.user_id, req.post_id, req.content)
        .await
        .map_err(map_child_create_err)?;

    Ok(HttpResponse::Created().json(comment_response(comment)))
}

/// GET /comment/{id}
pub async fn retrieve(
    state: web::Data<AppState>,
    _identity: Identity,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let comment = state
        .comments
        .find_by_id(path.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("No Comment matches the given query.".to_string()))?;

    Ok(HttpResponse::Ok().json(comment_response(comment)))
}

/// DELETE /comment/{id}
pub async fn destroy(
    state: web::Data<AppState>,
    _identity: Identity,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    state
        .comments
        .delete(path.into_inner())
        .await
        .map_err(|e| match e {
            RepoError::NotFound => {
                AppError::NotFound("No Comment matches the given query.".to_string())
            }
            other => other.into(),
        })?;

    Ok(HttpResponse::NoContent().finish())
}

/// GET /comment/posts/{post_id}
pub async fn list_by_post(
    state: web::Data<AppState>,
    _identity: Identity,
    path: web::Path<Uuid>,
    params: web::Query<ListParams>,
) -> AppResult<HttpResponse> {
    let params = params.into_inner();
    let page = PageRequest::from_params(params.page, params.page_size);

    let result = state.comments.list_by_post(path.into_inner(), page).await?;

    paginated(result.map(comment_response), page)
}
