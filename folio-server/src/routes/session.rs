//! Session context endpoint and the per-client session cookie

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use folio_core::{Account, AuthContext, SessionHolder, Storage, StoreResult};
use serde::Serialize;
use tower_cookies::{Cookie, Cookies};
use uuid::Uuid;

use crate::error::ApiError;
use crate::relay::ContactRelay;
use crate::state::AppState;

pub const SESSION_COOKIE: &str = "folio_session";

/// Account as exposed over HTTP (never includes the password)
#[derive(Serialize)]
pub struct UserView {
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    pub is_admin: bool,
}

impl From<&Account> for UserView {
    fn from(account: &Account) -> Self {
        Self {
            username: account.username.clone(),
            email: account.email.clone(),
            created_at: account.created_at,
            updated_at: account.updated_at,
            is_admin: account.is_admin(),
        }
    }
}

#[derive(Serialize)]
pub struct SessionContext {
    pub authenticated: bool,
    pub user: Option<UserView>,
    pub server_time: i64,
}

/// GET /api/session
pub async fn get_session_context<S, R>(
    State(state): State<Arc<AppState<S, R>>>,
    cookies: Cookies,
) -> Result<Json<SessionContext>, ApiError>
where
    S: Storage + Clone,
    R: ContactRelay,
{
    let current = current_user(&state.auth, &cookies)?;

    Ok(Json(SessionContext {
        authenticated: current.is_some(),
        user: current.as_ref().map(UserView::from),
        server_time: Utc::now().timestamp(),
    }))
}

/// Client id carried by the session cookie, if it is well formed
pub fn client_id_from_cookies(cookies: &Cookies) -> Option<String> {
    cookies
        .get(SESSION_COOKIE)
        .and_then(|c| Uuid::parse_str(c.value()).ok())
        .map(|id| id.to_string())
}

/// Session of the requesting client, if it sent a session cookie
pub fn client_session<S: Storage + Clone>(
    auth: &AuthContext<S>,
    cookies: &Cookies,
) -> StoreResult<Option<SessionHolder<S>>> {
    client_id_from_cookies(cookies)
        .map(|id| auth.client_session(&id))
        .transpose()
}

/// Account logged in by the requesting client
pub fn current_user<S: Storage + Clone>(
    auth: &AuthContext<S>,
    cookies: &Cookies,
) -> StoreResult<Option<Account>> {
    match client_session(auth, cookies)? {
        Some(session) => session.current(),
        None => Ok(None),
    }
}

/// Start a fresh client session for `username`.
///
/// A new id is issued on every login; the mirror of the previous one is
/// dropped once the credentials check out.
pub fn start_session<S: Storage + Clone>(
    auth: &AuthContext<S>,
    cookies: &Cookies,
    username: &str,
    password: &str,
) -> StoreResult<Account> {
    let client_id = Uuid::new_v4().to_string();
    let session = auth.client_session(&client_id)?;
    let account = auth.login_into(&session, username, password)?;

    if let Some(previous) = client_session(auth, cookies)? {
        previous.clear()?;
    }
    set_session_cookie(cookies, &client_id);
    Ok(account)
}

/// Helper to set session cookie
pub fn set_session_cookie(cookies: &Cookies, client_id: &str) {
    let cookie = Cookie::build((SESSION_COOKIE, client_id.to_string()))
        .path("/")
        .http_only(true)
        .build();
    cookies.add(cookie);
}

/// Helper to clear session cookie
pub fn clear_session_cookie(cookies: &Cookies) {
    let cookie = Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .max_age(tower_cookies::cookie::time::Duration::ZERO)
        .build();
    cookies.add(cookie);
}
