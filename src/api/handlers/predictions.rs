use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::Utc;
use std::sync::Arc;

use super::AppState;
use crate::api::error::ApiResult;
use crate::api::models::PredictionParams;
use crate::database::{self, PredictionFilter};
use crate::domain::Prediction;
use crate::services::submission::{SubmissionService, SubmitPrediction};

pub async fn get_predictions(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PredictionParams>,
) -> ApiResult<Json<Vec<Prediction>>> {
    let mut conn = state.connection()?;
    let filter = PredictionFilter {
        tournament_id: params.tournament_id,
        participant_name: params.participant_name,
    };
    Ok(Json(database::predictions::list(&mut conn, &filter)?))
}

pub async fn submit_prediction(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SubmitPrediction>,
) -> ApiResult<(StatusCode, Json<Prediction>)> {
    let mut conn = state.connection()?;
    let stored = SubmissionService::new(&mut conn, &state.config.roster).submit(request, Utc::now())?;
    Ok((StatusCode::CREATED, Json(stored)))
}
