use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::Json,
};
use chrono::Utc;
use std::sync::Arc;

use super::admin::authorize;
use super::AppState;
use crate::api::error::{ApiError, ApiResult};
use crate::api::models::{CreateParticipant, SuccessResponse};
use crate::database;
use crate::domain::Participant;

pub async fn get_participants(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Participant>>> {
    let mut conn = state.connection()?;
    Ok(Json(database::participants::list_all(&mut conn)?))
}

pub async fn create_participant(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<CreateParticipant>,
) -> ApiResult<(StatusCode, Json<Participant>)> {
    authorize(&headers, &state.config)?;
    let name = body.name.trim();
    if name.is_empty() {
        return Err(ApiError::BadRequest("participant name is required".to_string()));
    }

    let mut conn = state.connection()?;
    // Names are unique regardless of case.
    if let Some(existing) = database::participants::find_case_insensitive(&mut conn, name)? {
        return Err(ApiError::Conflict(format!("participant {} already exists", existing.name)));
    }

    let participant = database::participants::insert_participant(&mut conn, name, Utc::now())?;
    Ok((StatusCode::CREATED, Json(participant)))
}

pub async fn delete_participant(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(name): Path<String>,
) -> ApiResult<Json<SuccessResponse>> {
    authorize(&headers, &state.config)?;
    let mut conn = state.connection()?;
    if !database::participants::delete_participant(&mut conn, &name)? {
        return Err(ApiError::NotFound(format!("participant {} not found", name)));
    }
    Ok(Json(SuccessResponse::ok()))
}
