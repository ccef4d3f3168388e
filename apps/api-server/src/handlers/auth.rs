//! Authentication handlers.

use actix_web::{HttpResponse, web};
use std::sync::Arc;

use ripple_core::domain::User;
use ripple_core::error::RepoError;
use ripple_core::ports::{PasswordService, TokenService};
use ripple_shared::dto::{LoginRequest, RegisterRequest, TokenPairResponse, UserResponse};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

pub(crate) fn user_response(user: &User) -> UserResponse {
    UserResponse {
        id: user.id,
        email: user.email.clone(),
        username: user.username.clone(),
        name: user.name.clone(),
        created_at: user.created_at,
    }
}

/// POST /auth/register
pub async fn register(
    state: web::Data<AppState>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<RegisterRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    // Validate input
    if req.email.is_empty() || !req.email.contains('@') {
        return Err(AppError::Validation(vec![
            "email: enter a valid email address".to_string(),
        ]));
    }
    if req.password.len() < 8 {
        return Err(AppError::Validation(vec![
            "password: must be at least 8 characters".to_string(),
        ]));
    }

    // Hash password
    let password_hash = password_service
        .hash(&req.password)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    // Normalizes the email and derives the username from its local part
    let user = User::register(&req.email, req.name.unwrap_or_default(), password_hash)?;

    // Check for an existing account under the normalized address
    if state.users.find_by_email(&user.email).await?.is_some() {
        return Err(AppError::Conflict("Email already registered".to_string()));
    }

    let saved = state.users.insert(user).await.map_err(|e| match e {
        RepoError::Constraint(_) => {
            AppError::Conflict("Email or username already registered".to_string())
        }
        other => other.into(),
    })?;

    tracing::info!(user_id = %saved.id, "user registered");
    Ok(HttpResponse::Created().json(user_response(&saved)))
}

/// POST /auth/login
pub async fn login(
    state: web::Data<AppState>,
    token_service: web::Data<Arc<dyn TokenService>>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    // Credentials are matched against the normalized address
    let email = req.email.trim().to_lowercase();

    let user = state
        .users
        .find_by_email(&email)
        .await?
        .ok_or(AppError::Unauthorized)?;

    // Verify password
    let valid = password_service
        .verify(&req.password, &user.password_hash)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    if !valid || !user.is_active {
        return Err(AppError::Unauthorized);
    }

    // Issue the bearer token pair
    let pair = token_service
        .issue_pair(user.id, &user.email)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(HttpResponse::Ok().json(TokenPairResponse {
        access_token: pair.access,
        refresh_token: pair.refresh,
        token_type: "Bearer".to_string(),
        expires_in: token_service.access_expiry_seconds() as u64,
    }))
}
