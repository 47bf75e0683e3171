//! Page visit counter endpoints

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use folio_core::Storage;
use serde::{Deserialize, Serialize};

use super::extract::{JsonBody, QueryParams};
use crate::error::ApiError;
use crate::relay::ContactRelay;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct VisitRequest {
    pub path: String,
}

#[derive(Serialize)]
pub struct VisitResponse {
    pub path: String,
    pub count: i64,
}

/// POST /api/visits
pub async fn record_visit<S, R>(
    State(state): State<Arc<AppState<S, R>>>,
    JsonBody(req): JsonBody<VisitRequest>,
) -> Result<Json<VisitResponse>, ApiError>
where
    S: Storage,
    R: ContactRelay,
{
    let count = state.visits.record(&req.path)?;
    Ok(Json(VisitResponse {
        path: req.path,
        count,
    }))
}

/// GET /api/visits?path=p
pub async fn get_visits<S, R>(
    State(state): State<Arc<AppState<S, R>>>,
    QueryParams(query): QueryParams<VisitRequest>,
) -> Result<Json<VisitResponse>, ApiError>
where
    S: Storage,
    R: ContactRelay,
{
    let count = state.visits.count(&query.path)?;
    Ok(Json(VisitResponse {
        path: query.path,
        count,
    }))
}
