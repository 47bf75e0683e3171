//! Blog post endpoints

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use folio_core::{BlogPost, Storage, DEFAULT_RECENT_POSTS};
use serde::{Deserialize, Serialize};
use tower_cookies::Cookies;

use super::extract::{JsonBody, PathParams, QueryParams};
use super::session::current_user;

use crate::error::ApiError;
use crate::relay::ContactRelay;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ListQuery {
    pub limit: Option<usize>,
}

#[derive(Serialize)]
pub struct PostsResponse {
    pub posts: Vec<BlogPost>,
}

/// GET /api/posts?limit=n
pub async fn list_posts<S, R>(
    State(state): State<Arc<AppState<S, R>>>,
    QueryParams(query): QueryParams<ListQuery>,
) -> Result<Json<PostsResponse>, ApiError>
where
    S: Storage,
    R: ContactRelay,
{
    let limit = query.limit.unwrap_or(DEFAULT_RECENT_POSTS);
    let posts = state.blog.list_recent(limit)?;
    Ok(Json(PostsResponse { posts }))
}

#[derive(Deserialize)]
pub struct PublishRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Serialize)]
pub struct PostResponse {
    pub success: bool,
    pub post: BlogPost,
}

/// POST /api/posts
/// Author is the current session's username, or anonymous
pub async fn publish_post<S, R>(
    State(state): State<Arc<AppState<S, R>>>,
    cookies: Cookies,
    JsonBody(req): JsonBody<PublishRequest>,
) -> Result<Json<PostResponse>, ApiError>
where
    S: Storage + Clone,
    R: ContactRelay,
{
    let author = current_user(&state.auth, &cookies)?;
    let post = state
        .blog
        .publish(&req.title, &req.content, author.as_ref())?;

    Ok(Json(PostResponse {
        success: true,
        post,
    }))
}

/// DELETE /api/posts/:id
pub async fn delete_post<S, R>(
    State(state): State<Arc<AppState<S, R>>>,
    cookies: Cookies,
    PathParams(id): PathParams<i64>,
) -> Result<Json<PostResponse>, ApiError>
where
    S: Storage + Clone,
    R: ContactRelay,
{
    let actor = current_user(&state.auth, &cookies)?;
    let post = state.blog.delete(id, actor.as_ref())?;

    Ok(Json(PostResponse {
        success: true,
        post,
    }))
}
