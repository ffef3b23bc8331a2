use crate::error::{config::ConfigError, AppError};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;

/// Application configuration loaded from environment variables.
pub struct Config {
    pub discord_bot_token: String,

    /// Channel where game signup announcements are posted.
    pub signup_channel_id: u64,
    /// Role pinged when a signup is created with `notify_role` set.
    pub notify_role_id: Option<u64>,

    /// Operator dashboard password. Generated at startup when unset.
    pub admin_password: Option<String>,

    pub host: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            discord_bot_token: std::env::var("DISCORD_BOT_TOKEN")
                .map_err(|_| ConfigError::MissingEnvVar("DISCORD_BOT_TOKEN".to_string()))?,
            signup_channel_id: std::env::var("SIGNUP_CHANNEL_ID")
                .map_err(|_| ConfigError::MissingEnvVar("SIGNUP_CHANNEL_ID".to_string()))?
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidEnvVar("SIGNUP_CHANNEL_ID".to_string()))?,
            notify_role_id: match std::env::var("GAME_NOTIFY_ROLE_ID") {
                Ok(value) => Some(
                    value
                        .parse::<u64>()
                        .map_err(|_| ConfigError::InvalidEnvVar("GAME_NOTIFY_ROLE_ID".to_string()))?,
                ),
                Err(_) => None,
            },
            admin_password: std::env::var("ADMIN_PASSWORD").ok(),
            host: std::env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            port: match std::env::var("PORT") {
                Ok(value) => value
                    .parse::<u16>()
                    .map_err(|_| ConfigError::InvalidEnvVar("PORT".to_string()))?,
                Err(_) => DEFAULT_PORT,
            },
        })
    }
}
