pub mod models;
pub mod time;

pub use models::{
    DomainError, Gender, Participant, Player, PlayerId, Prediction, Round, Tournament,
    TournamentId, TournamentResult,
};
pub use time::parse_timestamp;
