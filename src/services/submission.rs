use chrono::{DateTime, Utc};
use log::info;
use serde::Deserialize;

use crate::config::settings::RosterSettings;
use crate::database::{self, DbConn};
use crate::domain::{Player, PlayerId, Prediction};
use crate::validation;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitPrediction {
    pub participant_name: String,
    pub tournament_id: String,
    pub men_picks: Vec<PlayerId>,
    pub women_picks: Vec<PlayerId>,
    pub predicted_men_champion: PlayerId,
    pub predicted_women_champion: PlayerId,
}

#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("participant name and tournament id are required")]
    MissingFields,
    #[error("tournament {0} not found")]
    TournamentNotFound(String),
    #[error("the submission deadline has passed; predictions can no longer be submitted")]
    DeadlinePassed,
    #[error("validation failed")]
    Invalid(Vec<String>),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Write path: deadline check, roster validation, then upsert keyed by participant and tournament.
pub struct SubmissionService<'a> {
    conn: &'a mut DbConn,
    rules: &'a RosterSettings,
}

impl<'a> SubmissionService<'a> {
    pub fn new(conn: &'a mut DbConn, rules: &'a RosterSettings) -> Self {
        Self { conn, rules }
    }

    pub fn submit(&mut self, request: SubmitPrediction, now: DateTime<Utc>) -> Result<Prediction, SubmissionError> {
        let participant_name = request.participant_name.trim().to_string();
        if participant_name.is_empty() || request.tournament_id.trim().is_empty() {
            return Err(SubmissionError::MissingFields);
        }

        let tournament = database::tournaments::find_by_id(self.conn, &request.tournament_id)?
            .ok_or_else(|| SubmissionError::TournamentNotFound(request.tournament_id.clone()))?;
        if tournament.is_past_deadline(now) {
            return Err(SubmissionError::DeadlinePassed);
        }

        let men = self.resolve_players(&request.men_picks)?;
        let women = self.resolve_players(&request.women_picks)?;

        let outcome = validation::validate_full_prediction(
            &men,
            &women,
            &request.predicted_men_champion,
            &request.predicted_women_champion,
            self.rules,
        );
        if !outcome.valid {
            return Err(SubmissionError::Invalid(outcome.errors));
        }

        let prediction = Prediction {
            participant_name,
            tournament_id: tournament.id,
            men_picks: request.men_picks,
            women_picks: request.women_picks,
            predicted_men_champion: request.predicted_men_champion,
            predicted_women_champion: request.predicted_women_champion,
            submitted_at: now,
        };
        let stored = database::predictions::upsert_prediction(self.conn, &prediction)?;
        info!("Stored prediction of {} for {}", stored.participant_name, stored.tournament_id);
        Ok(stored)
    }

    /// Unknown ids are dropped, which surfaces as a roster size violation.
    fn resolve_players(&mut self, ids: &[PlayerId]) -> anyhow::Result<Vec<Player>> {
        let mut players = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(player) = database::players::find_by_id(self.conn, id)? {
                players.push(player);
            }
        }
        Ok(players)
    }
}
