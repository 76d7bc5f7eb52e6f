use chrono::{DateTime, Utc};

use crate::domain::Round;

#[derive(Debug, Clone, Default)]
pub struct PredictionFilter {
    pub tournament_id: Option<String>,
    pub participant_name: Option<String>,
}

/// Partial update of a result. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default)]
pub struct ResultUpdate {
    pub round_reached: Option<Round>,
    pub eliminated: Option<bool>,
}

/// `submission_deadline: Some(None)` clears the deadline.
#[derive(Debug, Clone, Default)]
pub struct TournamentUpdate {
    pub is_active: Option<bool>,
    pub submission_deadline: Option<Option<DateTime<Utc>>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created,
    Updated,
}
