use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use std::sync::Arc;

use super::AppState;
use crate::api::error::{ApiError, ApiResult};
use crate::api::models::{LeaderboardParams, TournamentParams};
use crate::services::leaderboard::{Leaderboard, LeaderboardService, PointsBreakdown};

pub async fn get_leaderboard(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LeaderboardParams>,
) -> ApiResult<Json<Leaderboard>> {
    let mut conn = state.connection()?;
    let mut service = LeaderboardService::new(&mut conn);

    let tournament = service
        .resolve_tournament(params.tournament_id.as_deref())?
        .ok_or_else(|| no_tournament(params.tournament_id.as_deref()))?;

    Ok(Json(service.leaderboard(&tournament.id, params.remaining)?))
}

pub async fn get_participant_points(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    Query(params): Query<TournamentParams>,
) -> ApiResult<Json<PointsBreakdown>> {
    let mut conn = state.connection()?;
    let mut service = LeaderboardService::new(&mut conn);

    let tournament = service
        .resolve_tournament(params.tournament_id.as_deref())?
        .ok_or_else(|| no_tournament(params.tournament_id.as_deref()))?;

    service
        .breakdown(&name, &tournament.id)?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("no prediction from {} for {}", name, tournament.id)))
}

fn no_tournament(requested: Option<&str>) -> ApiError {
    match requested {
        Some(id) => ApiError::NotFound(format!("tournament {} not found", id)),
        None => ApiError::NotFound("no active tournament".to_string()),
    }
}
