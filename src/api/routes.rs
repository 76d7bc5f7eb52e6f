use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;

use crate::api::handlers::{leaderboard, participants, players, predictions, results, tournaments, AppState};

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/leaderboard", get(leaderboard::get_leaderboard))
        .route("/api/participants/:name/points", get(leaderboard::get_participant_points))
        .route(
            "/api/predictions",
            get(predictions::get_predictions).post(predictions::submit_prediction),
        )
        .route("/api/players", get(players::get_players).post(players::create_player))
        .route("/api/players/import", post(players::import_players))
        .route("/api/players/:id", put(players::update_player).delete(players::delete_player))
        .route(
            "/api/tournaments",
            get(tournaments::get_tournaments).post(tournaments::create_tournament),
        )
        .route("/api/tournaments/active", get(tournaments::get_active_tournament))
        .route("/api/tournaments/:id", put(tournaments::update_tournament))
        .route("/api/results", get(results::get_results).post(results::upsert_result))
        .route("/api/results/:tournament_id/:player_id", delete(results::delete_result))
        .route(
            "/api/participants",
            get(participants::get_participants).post(participants::create_participant),
        )
        .route("/api/participants/:name", delete(participants::delete_participant))
        .with_state(state)
}
