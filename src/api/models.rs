use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::{Gender, Player, Round};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardParams {
    pub tournament_id: Option<String>,
    #[serde(default)]
    pub remaining: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentParams {
    pub tournament_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionParams {
    pub tournament_id: Option<String>,
    pub participant_name: Option<String>,
}

#[derive(Serialize)]
pub struct PlayersResponse {
    pub men: Vec<Player>,
    pub women: Vec<Player>,
}

#[derive(Debug, Deserialize)]
pub struct CreatePlayer {
    pub name: String,
    pub ranking: u32,
    pub gender: Gender,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePlayer {
    pub name: String,
    pub ranking: u32,
}

#[derive(Debug, Deserialize)]
pub struct ImportRoster {
    pub csv: String,
    pub gender: Gender,
    #[serde(default)]
    pub replace: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResponse {
    pub success: bool,
    pub imported: usize,
    pub roster_size: usize,
    pub message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTournament {
    pub name: String,
    pub year: i32,
    pub submission_deadline: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTournament {
    pub is_active: Option<bool>,
    /// Absent leaves the deadline alone, `null` clears it.
    #[serde(default, deserialize_with = "present")]
    pub submission_deadline: Option<Option<String>>,
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertResult {
    pub tournament_id: String,
    pub player_id: String,
    pub round_reached: Option<Round>,
    pub eliminated: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct CreateParticipant {
    pub name: String,
}

#[derive(Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}
