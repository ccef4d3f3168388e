//! Post handlers: list, create, retrieve, partial update, delete.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use ripple_core::domain::{Post, PostWithAuthor};
use ripple_core::error::RepoError;
use ripple_core::pagination::PageRequest;
use ripple_core::ports::{PostOrdering, PostQuery};
use ripple_shared::dto::{CreatePostRequest, PostListParams, PostResponse, UpdatePostRequest};

use super::paginated;
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

const NOT_FOUND_DETAIL: &str = "No Post matches the given query.";

fn post_response(record: PostWithAuthor) -> PostResponse {
    PostResponse {
        id: record.post.id,
        title: record.post.title,
        content: record.post.content,
        username: record.username,
        created_at: record.post.created_at,
        like_count: record.post.like_count,
        comment_count: record.post.comment_count,
    }
}

fn validate(title: Option<&str>, content: Option<&str>) -> AppResult<()> {
    let mut errors = Vec::new();
    if let Some(title) = title {
        if title.trim().is_empty() {
            errors.push("title: may not be blank".to_string());
        }
        if title.chars().count() > 255 {
            errors.push("title: no longer than 255 characters".to_string());
        }
    }
    if let Some(content) = content {
        if content.trim().is_empty() {
            errors.push("content: may not be blank".to_string());
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(errors))
    }
}

/// GET /post
pub async fn list(
    state: web::Data<AppState>,
    _identity: Identity,
    params: web::Query<PostListParams>,
) -> AppResult<HttpResponse> {
    let params = params.into_inner();
    let page = PageRequest::from_params(params.page, params.page_size);

    let query = PostQuery {
        search: params.search.filter(|s| !s.trim().is_empty()),
        ordering: params
            .ordering
            .as_deref()
            .map(PostOrdering::parse)
            .unwrap_or_default(),
    };

    let result = state.posts.list(query, page).await?;

    paginated(result.map(post_response), page)
}

/// POST /post
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    validate(Some(&req.title), Some(&req.content))?;

    // The owner comes from the authenticated identity; the payload has no
    // owner field to override.
    let post = Post::new(identity.user_id, req.title, req.content);
    let saved = state.posts.insert(post).await?;

    let record = state
        .posts
        .find_with_author(saved.id)
        .await?
        .ok_or_else(|| AppError::Internal("created post not readable".to_string()))?;

    tracing::info!(post_id = %saved.id, "post created");
    Ok(HttpResponse::Created().json(post_response(record)))
}

/// GET /post/{id}
pub async fn retrieve(
    state: web::Data<AppState>,
    _identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let record = state
        .posts
        .find_with_author(path.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND_DETAIL.to_string()))?;

    Ok(HttpResponse::Ok().json(post_response(record)))
}

/// PATCH /post/{id}
pub async fn partial_update(
    state: web::Data<AppState>,
    _identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let req = body.into_inner();

    validate(req.title.as_deref(), req.content.as_deref())?;

    let mut post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND_DETAIL.to_string()))?;

    // Ownership is not reassignable; only title and content are mutable.
    if let Some(title) = req.title {
        post.title = title;
    }
    if let Some(content) = req.content {
        post.content = content;
    }
    post.updated_at = chrono::Utc::now();

    state.posts.update(post).await?;

    let record = state
        .posts
        .find_with_author(id)
        .await?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND_DETAIL.to_string()))?;

    Ok(HttpResponse::Ok().json(post_response(record)))
}

/// DELETE /post/{id} - cascades to the post's likes and comments.
pub async fn destroy(
    state: web::Data<AppState>,
    _identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    state
        .posts
        .delete(path.into_inner())
        .await
        .map_err(|e| match e {
            RepoError::NotFound => AppError::NotFound(NOT_FOUND_DETAIL.to_string()),
            other => other.into(),
        })?;

    Ok(HttpResponse::NoContent().finish())
}
