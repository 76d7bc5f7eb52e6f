use anyhow::Result;
use log::{info, warn};
use serde::Serialize;

use crate::database::{self, DbConn};
use crate::domain::{Gender, PlayerId, Tournament, TournamentResult};
use crate::scoring::{self, LeaderboardEntry, PlayerPoints};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Leaderboard {
    pub tournament_id: String,
    pub leaderboard: Vec<LeaderboardEntry>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PointsBreakdown {
    pub tournament_id: String,
    pub entry: LeaderboardEntry,
    pub men: Vec<PlayerPoints>,
    pub women: Vec<PlayerPoints>,
    pub men_champion: Option<PlayerId>,
    pub women_champion: Option<PlayerId>,
    pub predicted_men_champion: PlayerId,
    pub predicted_women_champion: PlayerId,
}

/// Read path: loads a snapshot of predictions and results and hands it to the scoring engine.
pub struct LeaderboardService<'a> {
    conn: &'a mut DbConn,
}

impl<'a> LeaderboardService<'a> {
    pub fn new(conn: &'a mut DbConn) -> Self {
        Self { conn }
    }

    /// Falls back to the active tournament. `Ok(None)` when there is none.
    pub fn resolve_tournament(&mut self, tournament_id: Option<&str>) -> Result<Option<Tournament>> {
        match tournament_id {
            Some(id) => database::tournaments::find_by_id(self.conn, id),
            None => database::tournaments::find_active(self.conn),
        }
    }

    pub fn leaderboard(&mut self, tournament_id: &str, compute_remaining: bool) -> Result<Leaderboard> {
        let predictions = database::predictions::list_by_tournament(self.conn, tournament_id)?;
        let results = self.load_results(tournament_id)?;

        let leaderboard =
            scoring::build_leaderboard(&predictions, &results, tournament_id, compute_remaining);
        info!(
            "Leaderboard for {}: {} entries from {} results",
            tournament_id,
            leaderboard.len(),
            results.len()
        );

        Ok(Leaderboard {
            tournament_id: tournament_id.to_string(),
            leaderboard,
        })
    }

    pub fn breakdown(&mut self, participant_name: &str, tournament_id: &str) -> Result<Option<PointsBreakdown>> {
        let Some(prediction) = database::predictions::find(self.conn, participant_name, tournament_id)? else {
            return Ok(None);
        };
        let results = self.load_results(tournament_id)?;

        let champion_id = |gender| {
            scoring::find_champion(&results, tournament_id, gender).map(|r| r.player_id.clone())
        };

        Ok(Some(PointsBreakdown {
            tournament_id: tournament_id.to_string(),
            entry: scoring::score_prediction(&prediction, &results, true),
            men: scoring::player_point_details(&prediction.men_picks, &results, tournament_id),
            women: scoring::player_point_details(&prediction.women_picks, &results, tournament_id),
            men_champion: champion_id(Gender::Men),
            women_champion: champion_id(Gender::Women),
            predicted_men_champion: prediction.predicted_men_champion.clone(),
            predicted_women_champion: prediction.predicted_women_champion.clone(),
        }))
    }

    fn load_results(&mut self, tournament_id: &str) -> Result<Vec<TournamentResult>> {
        let results = database::results::list(self.conn, Some(tournament_id))?;
        warn_on_duplicate_champions(&results, tournament_id);
        Ok(results)
    }
}

fn warn_on_duplicate_champions(results: &[TournamentResult], tournament_id: &str) {
    for gender in Gender::ALL {
        let candidates = scoring::champion_candidates(results, tournament_id, gender);
        if candidates.len() > 1 {
            warn!(
                "{} results mark a {} champion for {}; scoring with {}",
                candidates.len(),
                gender,
                tournament_id,
                candidates[0].player_id
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{test_connection, ResultUpdate};
    use crate::domain::{Prediction, Round};
    use chrono::Utc;

    fn seed(conn: &mut DbConn) {
        database::tournaments::create_active(conn, "ao-2025", "AO", 2025, None).unwrap();
        for (name, champion) in [("Anna", "h3"), ("Ben", "h1")] {
            database::predictions::upsert_prediction(
                conn,
                &Prediction {
                    participant_name: name.to_string(),
                    tournament_id: "ao-2025".to_string(),
                    men_picks: vec!["h1".to_string(), "h3".to_string()],
                    women_picks: vec!["d1".to_string()],
                    predicted_men_champion: champion.to_string(),
                    predicted_women_champion: "d1".to_string(),
                    submitted_at: Utc::now(),
                },
            )
            .unwrap();
        }
        for (player, round, eliminated) in [("h3", Round::Final, false), ("h1", Round::Final, true)] {
            database::results::upsert_result(
                conn,
                "ao-2025",
                player,
                &ResultUpdate { round_reached: Some(round), eliminated: Some(eliminated) },
            )
            .unwrap();
        }
    }

    #[test]
    fn test_leaderboard_for_active_tournament() {
        let mut conn = test_connection();
        seed(&mut conn);
        let mut service = LeaderboardService::new(&mut conn);

        let tournament = service.resolve_tournament(None).unwrap().unwrap();
        let board = service.leaderboard(&tournament.id, true).unwrap();

        assert_eq!(board.tournament_id, "ao-2025");
        assert_eq!(board.leaderboard[0].participant_name, "Anna");
        assert_eq!(board.leaderboard[0].total_points, 12.0);
        assert_eq!(board.leaderboard[1].total_points, 11.0);
        assert_eq!(board.leaderboard[1].men_players_remaining, Some(1));
    }

    #[test]
    fn test_breakdown() {
        let mut conn = test_connection();
        seed(&mut conn);
        let mut service = LeaderboardService::new(&mut conn);

        let breakdown = service.breakdown("Anna", "ao-2025").unwrap().unwrap();
        assert_eq!(breakdown.men_champion.as_deref(), Some("h3"));
        assert_eq!(breakdown.women_champion, None);
        assert_eq!(breakdown.men[1].points, 6.0);
        assert_eq!(breakdown.entry.men_champion_bonus, 1);

        assert!(service.breakdown("Nobody", "ao-2025").unwrap().is_none());
    }
}
