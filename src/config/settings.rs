#[derive(Debug, Clone)]
pub struct RosterSettings {
    pub roster_size: usize,
    pub top_tier_cutoff: u32,
    pub max_top_tier: usize,
    pub mid_tier_cutoff: u32,
    pub max_mid_tier: usize,
    pub min_outside_mid_tier: usize,
}

impl Default for RosterSettings {
    fn default() -> Self {
        Self {
            roster_size: 8,
            top_tier_cutoff: 8,
            max_top_tier: 4,
            mid_tier_cutoff: 32,
            max_mid_tier: 6,
            min_outside_mid_tier: 2,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub database_path: String,
    pub admin_token: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            database_path: "grand_slam_pool.db".to_string(),
            admin_token: "secret".to_string(),
        }
    }
}

impl ServerSettings {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            database_path: std::env::var("DATABASE_PATH").unwrap_or(defaults.database_path),
            admin_token: std::env::var("ADMIN_TOKEN").unwrap_or(defaults.admin_token),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub roster: RosterSettings,
    pub server: ServerSettings,
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            roster: RosterSettings::default(),
            server: ServerSettings::from_env(),
        }
    }
}
