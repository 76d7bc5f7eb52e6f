use crate::config::settings::AppConfig;
use crate::database::{self, DbConn, DbPool};

use super::error::ApiResult;

pub mod admin;
pub mod leaderboard;
pub mod participants;
pub mod players;
pub mod predictions;
pub mod results;
pub mod tournaments;

pub struct AppState {
    pub pool: DbPool,
    pub config: AppConfig,
}

impl AppState {
    pub fn connection(&self) -> ApiResult<DbConn> {
        Ok(database::get_connection(&self.pool)?)
    }
}
