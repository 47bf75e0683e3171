//! HTTP routes for the Folio backend

mod auth;
mod blog;
mod contact;
mod extract;
mod session;
mod theme;
mod visits;

pub use session::{UserView, SESSION_COOKIE};

use std::path::Path;
use std::sync::Arc;

use axum::routing::{delete, get, post};
use axum::Router;
use folio_core::Storage;
use tower_cookies::CookieManagerLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::relay::ContactRelay;
use crate::state::AppState;

/// Create the router with all routes
pub fn create_router<S, R>(state: Arc<AppState<S, R>>) -> Router
where
    S: Storage + Clone + 'static,
    R: ContactRelay + 'static,
{
    create_router_with_static_path(state, "static")
}

/// Create the router with a custom static file path
pub fn create_router_with_static_path<S, R>(
    state: Arc<AppState<S, R>>,
    static_path: impl AsRef<Path>,
) -> Router
where
    S: Storage + Clone + 'static,
    R: ContactRelay + 'static,
{
    Router::new()
        .route("/api/session", get(session::get_session_context))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/reset", post(auth::reset_credentials))
        .route("/api/posts", get(blog::list_posts).post(blog::publish_post))
        .route("/api/posts/:id", delete(blog::delete_post))
        .route("/api/visits", get(visits::get_visits).post(visits::record_visit))
        .route("/api/theme", get(theme::get_theme).put(theme::set_theme))
        .route("/api/theme/toggle", post(theme::toggle_theme))
        .route("/api/contact", post(contact::send_message))
        // Everything else is the built front-end
        .fallback_service(ServeDir::new(static_path))
        .layer(CookieManagerLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
