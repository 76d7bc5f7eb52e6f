use serde::Serialize;

use crate::domain::{PlayerId, Round};

pub type Points = f64;

/// One row of the leaderboard. Derived on every request, never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub participant_name: String,
    pub men_points: Points,
    pub women_points: Points,
    pub total_points: Points,
    pub men_champion_bonus: u32,
    pub women_champion_bonus: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub men_players_remaining: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub women_players_remaining: Option<usize>,
}

/// Breakdown of a single pick.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerPoints {
    pub player_id: PlayerId,
    pub round_reached: Option<Round>,
    pub points: Points,
    pub is_champion: bool,
    pub eliminated: bool,
}
