use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type PlayerId = String;
pub type TournamentId = String;

/// Draw a player competes in. Player ids carry the gender as a one-letter prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Men,
    Women,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Men, Gender::Women];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Men => "men",
            Gender::Women => "women",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Gender::Men => "Men",
            Gender::Women => "Women",
        }
    }

    pub fn id_prefix(&self) -> char {
        match self {
            Gender::Men => 'h',
            Gender::Women => 'd',
        }
    }

    pub fn from_player_id(player_id: &str) -> Option<Self> {
        Gender::ALL
            .into_iter()
            .find(|g| player_id.starts_with(g.id_prefix()))
    }

    pub fn owns(&self, player_id: &str) -> bool {
        Gender::from_player_id(player_id) == Some(*self)
    }

    pub fn player_id(&self, index: u32) -> PlayerId {
        format!("{}{}", self.id_prefix(), index)
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "men" | "herren" => Ok(Gender::Men),
            "women" | "damen" => Ok(Gender::Women),
            other => Err(DomainError::UnknownGender(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    #[error("round must be between 1 and 7 (got {0})")]
    RoundOutOfRange(i64),
    #[error("unknown gender: {0}")]
    UnknownGender(String),
    #[error("failed to parse timestamp: {0}")]
    InvalidTimestamp(String),
}

/// Furthest round a player is credited with reaching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub enum Round {
    First = 1,
    Second = 2,
    Third = 3,
    RoundOf16 = 4,
    QuarterFinal = 5,
    SemiFinal = 6,
    Final = 7,
}

impl Round {
    pub fn number(&self) -> u8 {
        *self as u8
    }

    pub fn name(&self) -> &'static str {
        match self {
            Round::First => "Round 1",
            Round::Second => "Round 2",
            Round::Third => "Round 3",
            Round::RoundOf16 => "Round of 16",
            Round::QuarterFinal => "Quarterfinal",
            Round::SemiFinal => "Semifinal",
            Round::Final => "Final",
        }
    }
}

impl TryFrom<i64> for Round {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Round::First),
            2 => Ok(Round::Second),
            3 => Ok(Round::Third),
            4 => Ok(Round::RoundOf16),
            5 => Ok(Round::QuarterFinal),
            6 => Ok(Round::SemiFinal),
            7 => Ok(Round::Final),
            other => Err(DomainError::RoundOutOfRange(other)),
        }
    }
}

impl From<Round> for u8 {
    fn from(round: Round) -> Self {
        round.number()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub ranking: u32,
    pub gender: Gender,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub year: i32,
    pub is_active: bool,
    pub submission_deadline: Option<DateTime<Utc>>,
}

impl Tournament {
    pub fn is_past_deadline(&self, now: DateTime<Utc>) -> bool {
        self.submission_deadline
            .is_some_and(|deadline| now > deadline)
    }
}

/// A participant's picks for one tournament ("Tipp").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    pub participant_name: String,
    pub tournament_id: TournamentId,
    pub men_picks: Vec<PlayerId>,
    pub women_picks: Vec<PlayerId>,
    pub predicted_men_champion: PlayerId,
    pub predicted_women_champion: PlayerId,
    pub submitted_at: DateTime<Utc>,
}

impl Prediction {
    pub fn picks(&self, gender: Gender) -> &[PlayerId] {
        match gender {
            Gender::Men => &self.men_picks,
            Gender::Women => &self.women_picks,
        }
    }

    pub fn predicted_champion(&self, gender: Gender) -> &str {
        match gender {
            Gender::Men => &self.predicted_men_champion,
            Gender::Women => &self.predicted_women_champion,
        }
    }
}

/// Progress of one player in one tournament ("TurnierErgebnis").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentResult {
    pub tournament_id: TournamentId,
    pub player_id: PlayerId,
    pub round_reached: Round,
    #[serde(default)]
    pub eliminated: bool,
}

impl TournamentResult {
    /// Reached the final and was not knocked out in it.
    pub fn is_champion(&self) -> bool {
        self.round_reached == Round::Final && !self.eliminated
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub name: String,
    pub created_at: DateTime<Utc>,
}
