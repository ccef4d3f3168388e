//! Handlers for the authenticated user's own profile.

use actix_web::{HttpResponse, web};
use std::sync::Arc;

use ripple_core::ports::PasswordService;
use ripple_shared::dto::UpdateMeRequest;

use super::auth::user_response;
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /user/me
pub async fn me(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let user = state
        .users
        .find_by_id(identity.user_id)
        .await?
        .ok_or(AppError::Unauthorized)?;

    Ok(HttpResponse::Ok().json(user_response(&user)))
}

/// PATCH /user/me
///
/// Only the display name and password are updatable; the email address and
/// the derived username are immutable identity.
pub async fn update_me(
    state: web::Data<AppState>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    identity: Identity,
    body: web::Json<UpdateMeRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let mut user = state
        .users
        .find_by_id(identity.user_id)
        .await?
        .ok_or(AppError::Unauthorized)?;

    if let Some(name) = req.name {
        user.name = name;
    }
    if let Some(password) = req.password {
        if password.len() < 8 {
            return Err(AppError::Validation(vec![
                "password: must be at least 8 characters".to_string(),
            ]));
        }
        user.password_hash = password_service
            .hash(&password)
            .map_err(|e| AppError::Internal(e.to_string()))?;
    }
    user.updated_at = chrono::Utc::now();

    let saved = state.users.update(user).await?;

    Ok(HttpResponse::Ok().json(user_response(&saved)))
}
