//! Contact form endpoint

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use folio_core::contact::SENT_STATUS;
use folio_core::{ContactMessage, Storage};
use serde::{Deserialize, Serialize};

use super::extract::JsonBody;
use crate::error::ApiError;
use crate::relay::ContactRelay;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ContactRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Serialize)]
pub struct ContactResponse {
    pub success: bool,
    pub status: &'static str,
}

/// POST /api/contact
pub async fn send_message<S, R>(
    State(state): State<Arc<AppState<S, R>>>,
    JsonBody(req): JsonBody<ContactRequest>,
) -> Result<Json<ContactResponse>, ApiError>
where
    S: Storage + 'static,
    R: ContactRelay + 'static,
{
    let message = ContactMessage::new(&req.name, &req.email, &req.message)?;

    if !state.relay.is_configured() {
        return Err(ApiError::RelayNotConfigured);
    }

    // Relays block on network I/O
    let relay_state = state.clone();
    tokio::task::spawn_blocking(move || relay_state.relay.send(&message))
        .await
        .map_err(|e| ApiError::Internal(format!("Blocking task failed: {}", e)))?
        .map_err(ApiError::Relay)?;

    Ok(Json(ContactResponse {
        success: true,
        status: SENT_STATUS,
    }))
}
