use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::Json,
};
use std::sync::Arc;

use super::admin::authorize;
use super::AppState;
use crate::api::error::{ApiError, ApiResult};
use crate::api::models::{SuccessResponse, TournamentParams, UpsertResult};
use crate::database::{self, ResultUpdate, UpsertOutcome};
use crate::domain::TournamentResult;

pub async fn get_results(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TournamentParams>,
) -> ApiResult<Json<Vec<TournamentResult>>> {
    let mut conn = state.connection()?;
    Ok(Json(database::results::list(&mut conn, params.tournament_id.as_deref())?))
}

pub async fn upsert_result(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<UpsertResult>,
) -> ApiResult<(StatusCode, Json<TournamentResult>)> {
    authorize(&headers, &state.config)?;
    if body.tournament_id.trim().is_empty() || body.player_id.trim().is_empty() {
        return Err(ApiError::BadRequest("tournamentId and playerId are required".to_string()));
    }

    let update = ResultUpdate {
        round_reached: body.round_reached,
        eliminated: body.eliminated,
    };
    let mut conn = state.connection()?;
    let (result, outcome) = database::results::upsert_result(&mut conn, &body.tournament_id, &body.player_id, &update)?
        .ok_or_else(|| ApiError::BadRequest("roundReached is required for a new result".to_string()))?;

    let status = match outcome {
        UpsertOutcome::Created => StatusCode::CREATED,
        UpsertOutcome::Updated => StatusCode::OK,
    };
    Ok((status, Json(result)))
}

pub async fn delete_result(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path((tournament_id, player_id)): Path<(String, String)>,
) -> ApiResult<Json<SuccessResponse>> {
    authorize(&headers, &state.config)?;
    let mut conn = state.connection()?;
    if !database::results::delete_result(&mut conn, &tournament_id, &player_id)? {
        return Err(ApiError::NotFound(format!("no result for {} in {}", player_id, tournament_id)));
    }
    Ok(Json(SuccessResponse::ok()))
}
