pub mod import;
pub mod leaderboard;
pub mod server;
pub mod submission;
