use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is not set.
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// Environment variable is set but could not be parsed.
    ///
    /// Numeric configuration values (channel/role IDs, port) must parse into the
    /// expected integer type.
    #[error("Invalid value for environment variable: {0}")]
    InvalidEnvVar(String),
}
