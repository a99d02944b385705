//! Authentication handlers.

use actix_web::{HttpResponse, web};

use blogify_core::domain::{NewUser, User};
use blogify_shared::dto::{AuthResponse, LoginRequest, RegisterRequest, RegisterResponse};

use super::views::user_response;
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /auth/register
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<RegisterRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let new_user = NewUser::validate(req.name, req.email, req.password)?;

    if state.users.find_by_email(&new_user.email).await?.is_some() {
        return Err(AppError::Conflict("Email already registered".to_string()));
    }

    let password_hash = state.passwords.hash(&new_user.password)?;
    let user = User::new(new_user.name, new_user.email, password_hash);
    let saved = state.users.insert(user).await?;

    tracing::info!(user_id = %saved.id, "User registered");

    Ok(HttpResponse::Created().json(RegisterResponse {
        message: "Registered successfully".to_string(),
        user: user_response(&saved),
    }))
}

/// POST /auth/login
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let invalid = || AppError::Unauthorized("Invalid credentials".to_string());

    let user = state
        .users
        .find_by_email(req.email.trim())
        .await?
        .ok_or_else(invalid)?;

    if !state.passwords.verify(&req.password, &user.password_hash)? {
        return Err(invalid());
    }

    let token = state.tokens.generate_token(user.id, &user.name, &user.email)?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        token,
        token_type: "Bearer".to_string(),
        expires_in: state.tokens.expiration_seconds().max(0) as u64,
        user: user_response(&user),
    }))
}

/// GET /auth/me - Protected route
pub async fn me(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let user = state
        .users
        .find_by_id(identity.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(HttpResponse::Ok().json(user_response(&user)))
}
