pub mod leaderboard;
pub mod points;
pub mod types;

pub use leaderboard::{build_leaderboard, champion_candidates, find_champion, score_prediction};
pub use points::{player_point_details, points_for_player, round_points};
pub use types::{LeaderboardEntry, PlayerPoints, Points};
