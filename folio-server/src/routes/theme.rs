//! Theme preference endpoints

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use folio_core::{Storage, Theme};
use serde::{Deserialize, Serialize};

use super::extract::JsonBody;
use crate::error::ApiError;
use crate::relay::ContactRelay;
use crate::state::AppState;

#[derive(Serialize)]
pub struct ThemeResponse {
    pub theme: Theme,
    /// Screen-reader text for the live region, present when the theme changed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub announcement: Option<String>,
}

fn announce(theme: Theme) -> String {
    format!("Theme switched to {} mode", theme)
}

/// GET /api/theme
pub async fn get_theme<S, R>(
    State(state): State<Arc<AppState<S, R>>>,
) -> Result<Json<ThemeResponse>, ApiError>
where
    S: Storage,
    R: ContactRelay,
{
    Ok(Json(ThemeResponse {
        theme: state.theme.load()?,
        announcement: None,
    }))
}

#[derive(Deserialize)]
pub struct SetThemeRequest {
    pub theme: Theme,
}

/// PUT /api/theme
pub async fn set_theme<S, R>(
    State(state): State<Arc<AppState<S, R>>>,
    JsonBody(req): JsonBody<SetThemeRequest>,
) -> Result<Json<ThemeResponse>, ApiError>
where
    S: Storage,
    R: ContactRelay,
{
    let previous = state.theme.load()?;
    state.theme.set(req.theme)?;

    Ok(Json(ThemeResponse {
        theme: req.theme,
        announcement: (previous != req.theme).then(|| announce(req.theme)),
    }))
}

/// POST /api/theme/toggle
pub async fn toggle_theme<S, R>(
    State(state): State<Arc<AppState<S, R>>>,
) -> Result<Json<ThemeResponse>, ApiError>
where
    S: Storage,
    R: ContactRelay,
{
    let theme = state.theme.toggle()?;

    Ok(Json(ThemeResponse {
        theme,
        announcement: Some(announce(theme)),
    }))
}
