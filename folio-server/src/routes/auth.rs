//! Registration, login, logout and credential reset endpoints

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use folio_core::Storage;
use serde::{Deserialize, Serialize};
use tower_cookies::Cookies;

use super::extract::JsonBody;
use super::session::{clear_session_cookie, client_session, start_session, UserView};
use crate::error::ApiError;
use crate::relay::ContactRelay;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Serialize)]
pub struct AuthResponse {
    pub success: bool,
    pub user: UserView,
}

/// POST /api/auth/register
/// Create the account, then log it in
pub async fn register<S, R>(
    State(state): State<Arc<AppState<S, R>>>,
    cookies: Cookies,
    JsonBody(req): JsonBody<RegisterRequest>,
) -> Result<Json<AuthResponse>, ApiError>
where
    S: Storage + Clone,
    R: ContactRelay,
{
    state
        .auth
        .register(&req.username, &req.password, &req.email)?;
    let account = start_session(&state.auth, &cookies, &req.username, &req.password)?;

    Ok(Json(AuthResponse {
        success: true,
        user: UserView::from(&account),
    }))
}

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// POST /api/auth/login
pub async fn login<S, R>(
    State(state): State<Arc<AppState<S, R>>>,
    cookies: Cookies,
    JsonBody(req): JsonBody<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError>
where
    S: Storage + Clone,
    R: ContactRelay,
{
    let account = start_session(&state.auth, &cookies, &req.username, &req.password)?;

    Ok(Json(AuthResponse {
        success: true,
        user: UserView::from(&account),
    }))
}

#[derive(Serialize)]
pub struct LogoutResponse {
    pub success: bool,
}

/// POST /api/auth/logout
pub async fn logout<S, R>(
    State(state): State<Arc<AppState<S, R>>>,
    cookies: Cookies,
) -> Result<Json<LogoutResponse>, ApiError>
where
    S: Storage + Clone,
    R: ContactRelay,
{
    if let Some(session) = client_session(&state.auth, &cookies)? {
        session.clear()?;
    }
    clear_session_cookie(&cookies);
    Ok(Json(LogoutResponse { success: true }))
}

#[derive(Deserialize)]
pub struct ResetRequest {
    #[serde(default)]
    pub email: String,
    pub new_username: Option<String>,
    pub new_password: Option<String>,
}

#[derive(Serialize)]
pub struct ResetResponse {
    pub success: bool,
    pub message: &'static str,
}

/// POST /api/auth/reset
pub async fn reset_credentials<S, R>(
    State(state): State<Arc<AppState<S, R>>>,
    JsonBody(req): JsonBody<ResetRequest>,
) -> Result<Json<ResetResponse>, ApiError>
where
    S: Storage + Clone,
    R: ContactRelay,
{
    state.auth.reset_credentials(
        &req.email,
        req.new_username.as_deref(),
        req.new_password.as_deref(),
    )?;

    Ok(Json(ResetResponse {
        success: true,
        message: "Credentials reset successfully",
    }))
}
