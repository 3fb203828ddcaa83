//! Runtime configuration read from the environment (and `.env`)

pub const DEFAULT_TRIP_URL: &str = "https://api.resrobot.se/v2.1/trip";
pub const DEFAULT_TARGET_LINE: &str = "281";
pub const DEFAULT_VRANGO_STOP_ID: &str = "740001382";
pub const DEFAULT_SALTHOLMEN_STOP_ID: &str = "740001206";
pub const DEFAULT_LOG_DIR: &str = "./logs";

#[derive(Debug, Clone)]
pub struct Config {
    pub fetcher: FetcherConfig,
    pub vrango_stop_id: String,
    pub saltholmen_stop_id: String,
    pub log_dir: String,
}

/// Everything the trip fetcher needs to talk to ResRobot
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    pub trip_url: String,
    pub access_id: String,
    /// Legs are kept when their line number contains this
    pub target_line: String,
}

/// Where the log files go. Read on its own so logging can start before the rest of the config is checked.
pub fn log_dir_from_env() -> String {
    log_dir_from_lookup(|key| dotenvy::var(key).ok())
}

pub fn log_dir_from_lookup(lookup: impl Fn(&str) -> Option<String>) -> String {
    lookup("LOG_DIR")
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_DIR.to_string())
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| dotenvy::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var_or = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let access_id = lookup("RESROBOT_ACCESS_ID")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::MissingVar("RESROBOT_ACCESS_ID"))?;

        let target_line = var_or("TARGET_LINE", DEFAULT_TARGET_LINE);

        let trip_url = var_or("RESROBOT_TRIP_URL", DEFAULT_TRIP_URL);
        if !trip_url.starts_with("http://") && !trip_url.starts_with("https://") {
            return Err(ConfigError::InvalidUrl(trip_url));
        }

        Ok(Self {
            fetcher: FetcherConfig {
                trip_url,
                access_id,
                target_line,
            },
            vrango_stop_id: var_or("VRANGO_STOP_ID", DEFAULT_VRANGO_STOP_ID),
            saltholmen_stop_id: var_or("SALTHOLMEN_STOP_ID", DEFAULT_SALTHOLMEN_STOP_ID),
            log_dir: log_dir_from_lookup(&lookup),
        })
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    MissingVar(&'static str),

    #[error("trip url {0} isn't an http(s) url")]
    InvalidUrl(String),
}
