//! Process configuration read from the environment.

use crate::{ConfigError, DEFAULT_HTTP_PORT, PG_POOL_ACQUIRE_TIMEOUT_SECS, env_parse_with_default};

/// Environment variable holding the PostgreSQL connection string.
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";

/// Environment variable overriding the HTTP port.
pub const PORT_VAR: &str = "PORT";

/// Environment variable overriding the pool acquire timeout.
pub const ACQUIRE_TIMEOUT_VAR: &str = "NAMEBOOK_DB_ACQUIRE_TIMEOUT_SECS";

#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub port: u16,
    pub acquire_timeout_secs: u64,
}

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// Call `dotenvy::dotenv()` first if a `.env` file should be honoured.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = std::env::var(DATABASE_URL_VAR).ok();
        Self::build(database_url, || {
            (
                env_parse_with_default(PORT_VAR, DEFAULT_HTTP_PORT),
                env_parse_with_default(ACQUIRE_TIMEOUT_VAR, PG_POOL_ACQUIRE_TIMEOUT_SECS),
            )
        })
    }

    fn build(
        database_url: Option<String>,
        rest: impl FnOnce() -> (u16, u64),
    ) -> Result<Self, ConfigError> {
        let database_url = database_url
            .map(|url| url.trim().to_owned())
            .filter(|url| !url.is_empty())
            .ok_or(ConfigError::MissingDatabaseUrl)?;
        let (port, acquire_timeout_secs) = rest();
        Ok(Self { database_url, port, acquire_timeout_secs })
    }
}

// The connection string carries credentials.
impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("database_url", &"<redacted>")
            .field("port", &self.port)
            .field("acquire_timeout_secs", &self.acquire_timeout_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_database_url_is_an_error() {
        let result = AppConfig::build(None, || (5000, 10));
        assert!(matches!(result, Err(ConfigError::MissingDatabaseUrl)));
    }

    #[test]
    fn blank_database_url_is_an_error() {
        let result = AppConfig::build(Some("   ".to_owned()), || (5000, 10));
        assert!(matches!(result, Err(ConfigError::MissingDatabaseUrl)));
    }

    #[test]
    fn database_url_is_trimmed() {
        let config = AppConfig::build(Some(" postgres://u@h/db \n".to_owned()), || (8080, 3))
            .expect("valid config");
        assert_eq!(config.database_url, "postgres://u@h/db");
        assert_eq!(config.port, 8080);
        assert_eq!(config.acquire_timeout_secs, 3);
    }

    #[test]
    fn debug_output_hides_credentials() {
        let config = AppConfig::build(Some("postgres://user:secret@h/db".to_owned()), || (1, 1))
            .expect("valid config");
        let printed = format!("{config:?}");
        assert!(!printed.contains("secret"));
    }
}
