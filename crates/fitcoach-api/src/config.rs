use config::{Config as ConfigLoader, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub coach: CoachConfig,
    #[serde(default)]
    pub logging: LoggingConfig,

    // Secrets (from ENV only)
    #[serde(default)]
    pub database_url: String,
    #[serde(default)]
    pub jwt_secret: String,
    #[serde(default)]
    pub google_client_id: String,
    #[serde(default)]
    pub gemini_api_key: String,
}

// Sections carry container-level defaults so a partial override (one env
// var, one toml key) leaves the other fields at their default values.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    pub enabled: bool,
    pub origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            origins: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CoachConfig {
    pub model: String,
}

impl Default for CoachConfig {
    fn default() -> Self {
        Self {
            model: "gemini-1.5-flash".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from TOML files and environment variables.
    ///
    /// Hierarchy (weakest to strongest):
    /// 1. config/default.toml
    /// 2. config/{ENV}.toml (if ENV is set)
    /// 3. Environment variables under the FITCOACH_ prefix, with `_`
    ///    separating section and key: FITCOACH_SERVER_PORT maps to
    ///    `server.port`, FITCOACH_LOGGING_FORMAT to `logging.format`.
    ///
    /// Secrets come from the environment only: DATABASE_URL (required),
    /// JWT_SECRET (falls back to a dev value), GOOGLE_CLIENT_ID and
    /// GEMINI_API_KEY (optional; the matching endpoints reject requests
    /// when unset).
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("ENV").unwrap_or_else(|_| "dev".to_string());

        let builder = ConfigLoader::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                Environment::with_prefix("FITCOACH")
                    .prefix_separator("_")
                    .separator("_")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        let mut cfg: Config = config.try_deserialize()?;

        cfg.database_url = std::env::var("DATABASE_URL").map_err(|_| {
            ConfigError::Message("DATABASE_URL environment variable is required".to_string())
        })?;
        cfg.jwt_secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("JWT_SECRET not set, using insecure dev secret");
            "dev_secret".to_string()
        });
        cfg.google_client_id = std::env::var("GOOGLE_CLIENT_ID").unwrap_or_default();
        cfg.gemini_api_key = std::env::var("GEMINI_API_KEY").unwrap_or_default();

        Ok(cfg)
    }

    /// Load config from a specific path (useful for testing).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let builder = ConfigLoader::builder().add_source(File::from(path.as_ref()));
        let config = builder.build()?;
        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_structure_deserializes() {
        let toml = r#"
            [server]
            host = "0.0.0.0"
            port = 5000

            [cors]
            enabled = true
            origins = ["http://localhost:5173"]

            [coach]
            model = "gemini-1.5-flash"

            [logging]
            level = "debug"
            format = "json"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.coach.model, "gemini-1.5-flash");
        assert!(config.cors.enabled);
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.logging.level, "info");
        assert!(!config.cors.enabled);
    }

    #[test]
    fn env_overrides_reach_nested_sections() {
        std::env::set_var("DATABASE_URL", "postgres://localhost/fitcoach_test");
        std::env::set_var("FITCOACH_SERVER_PORT", "8080");
        std::env::set_var("FITCOACH_LOGGING_FORMAT", "json");

        let config = Config::load().unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.server.host, "127.0.0.1");

        std::env::remove_var("DATABASE_URL");
        std::env::remove_var("FITCOACH_SERVER_PORT");
        std::env::remove_var("FITCOACH_LOGGING_FORMAT");
    }
}
