use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::Json,
};
use anyhow::{Context, Result};
use regex::Regex;
use std::sync::Arc;

use super::admin::authorize;
use super::AppState;
use crate::api::error::{ApiError, ApiResult};
use crate::api::models::{CreateTournament, UpdateTournament};
use crate::database::{self, TournamentUpdate};
use crate::domain::{parse_timestamp, Tournament};

/// "Australian Open", 2025 -> "australian-open-2025"
pub fn tournament_slug(name: &str, year: i32) -> Result<String> {
    let whitespace = Regex::new(r"\s+").context("Failed to compile whitespace regex")?;
    let base = whitespace.replace_all(name.trim(), "-").to_lowercase();
    Ok(format!("{}-{}", base, year))
}

pub async fn get_tournaments(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Tournament>>> {
    let mut conn = state.connection()?;
    Ok(Json(database::tournaments::list_all(&mut conn)?))
}

pub async fn get_active_tournament(State(state): State<Arc<AppState>>) -> ApiResult<Json<Tournament>> {
    let mut conn = state.connection()?;
    database::tournaments::find_active(&mut conn)?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("no active tournament".to_string()))
}

pub async fn create_tournament(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<CreateTournament>,
) -> ApiResult<(StatusCode, Json<Tournament>)> {
    authorize(&headers, &state.config)?;
    if body.name.trim().is_empty() {
        return Err(ApiError::BadRequest("tournament name is required".to_string()));
    }
    let deadline = body
        .submission_deadline
        .as_deref()
        .map(parse_deadline)
        .transpose()?;

    let id = tournament_slug(&body.name, body.year)?;
    let mut conn = state.connection()?;
    if database::tournaments::find_by_id(&mut conn, &id)?.is_some() {
        return Err(ApiError::Conflict(format!("tournament {} already exists", id)));
    }

    let tournament = database::tournaments::create_active(&mut conn, &id, body.name.trim(), body.year, deadline)
        .map_err(|e| {
            if database::is_constraint_violation(&e) {
                ApiError::Conflict(format!("tournament {} already exists", id))
            } else {
                ApiError::Internal(e)
            }
        })?;
    log::info!("Created tournament {} (now active)", tournament.id);
    Ok((StatusCode::CREATED, Json(tournament)))
}

pub async fn update_tournament(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<UpdateTournament>,
) -> ApiResult<Json<Tournament>> {
    authorize(&headers, &state.config)?;
    let submission_deadline = match body.submission_deadline {
        Some(Some(raw)) => Some(Some(parse_deadline(&raw)?)),
        Some(None) => Some(None),
        None => None,
    };
    let update = TournamentUpdate {
        is_active: body.is_active,
        submission_deadline,
    };

    let mut conn = state.connection()?;
    database::tournaments::update(&mut conn, &id, &update)?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("tournament {} not found", id)))
}

fn parse_deadline(raw: &str) -> ApiResult<chrono::DateTime<chrono::Utc>> {
    parse_timestamp(raw).map_err(|e| ApiError::BadRequest(e.to_string()))
}
