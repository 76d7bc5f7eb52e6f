use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::Json,
};
use std::sync::Arc;

use super::admin::authorize;
use super::AppState;
use crate::api::error::{ApiError, ApiResult};
use crate::api::models::{CreatePlayer, ImportResponse, ImportRoster, PlayersResponse, SuccessResponse, UpdatePlayer};
use crate::database;
use crate::domain::{Gender, Player};
use crate::services::import::RosterImportService;

pub async fn get_players(State(state): State<Arc<AppState>>) -> ApiResult<Json<PlayersResponse>> {
    let mut conn = state.connection()?;
    Ok(Json(PlayersResponse {
        men: database::players::list_by_gender(&mut conn, Gender::Men)?,
        women: database::players::list_by_gender(&mut conn, Gender::Women)?,
    }))
}

pub async fn create_player(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<CreatePlayer>,
) -> ApiResult<(StatusCode, Json<Player>)> {
    authorize(&headers, &state.config)?;
    let name = body.name.trim();
    if name.is_empty() || body.ranking == 0 {
        return Err(ApiError::BadRequest("name and a positive ranking are required".to_string()));
    }

    let mut conn = state.connection()?;
    let player = Player {
        id: database::players::next_id(&mut conn, body.gender)?,
        name: name.to_string(),
        ranking: body.ranking,
        gender: body.gender,
    };
    let created = database::players::insert_player(&mut conn, &player)
        .map_err(|e| ranking_conflict(e, body.ranking))?;
    log::info!("Added player {} ({})", created.name, created.id);
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_player(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<UpdatePlayer>,
) -> ApiResult<Json<Player>> {
    authorize(&headers, &state.config)?;
    if body.name.trim().is_empty() || body.ranking == 0 {
        return Err(ApiError::BadRequest("name and a positive ranking are required".to_string()));
    }

    let mut conn = state.connection()?;
    database::players::update_player(&mut conn, &id, body.name.trim(), body.ranking)
        .map_err(|e| ranking_conflict(e, body.ranking))?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("player {} not found", id)))
}

pub async fn delete_player(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult<Json<SuccessResponse>> {
    authorize(&headers, &state.config)?;
    let mut conn = state.connection()?;
    if !database::players::delete_player(&mut conn, &id)? {
        return Err(ApiError::NotFound(format!("player {} not found", id)));
    }
    Ok(Json(SuccessResponse::ok()))
}

pub async fn import_players(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<ImportRoster>,
) -> ApiResult<Json<ImportResponse>> {
    authorize(&headers, &state.config)?;
    let mut conn = state.connection()?;
    let summary = RosterImportService::new(&mut conn).run(&body.csv, body.gender, body.replace)?;
    Ok(Json(ImportResponse {
        success: true,
        imported: summary.imported,
        roster_size: summary.roster_size,
        message: format!("{} {} players imported", summary.imported, body.gender),
    }))
}

fn ranking_conflict(err: anyhow::Error, ranking: u32) -> ApiError {
    if database::is_constraint_violation(&err) {
        ApiError::Conflict(format!("ranking {} is already taken", ranking))
    } else {
        ApiError::Internal(err)
    }
}
