/// Configuration management for casting-service
///
/// Loads configuration from environment variables with sensible defaults.
/// Identity-provider settings and `DATABASE_URL` are required.
use auth_gate::AuthConfig;
use db_pool::env_utils::{parse_env_flag, parse_env_with_default};
use db_pool::DbConfig;
use thiserror::Error;

pub const SERVICE_NAME: &str = "casting-service";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Auth(#[from] auth_gate::ConfigError),

    #[error("database configuration: {0}")]
    Database(String),

    #[error("CORS_ALLOWED_ORIGINS must list explicit origins in production")]
    WildcardCorsInProduction,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppConfig,
    pub cors: CorsConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub env: String,
}

impl AppConfig {
    pub fn is_production(&self) -> bool {
        self.env.eq_ignore_ascii_case("production")
    }
}

#[derive(Clone, Debug)]
pub struct CorsConfig {
    /// Comma-separated origins, `*` for any
    pub allowed_origins: String,
}

impl CorsConfig {
    pub fn origins(&self) -> impl Iterator<Item = &str> {
        self.allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
    }

    pub fn allows_any(&self) -> bool {
        self.origins().any(|origin| origin == "*")
    }
}

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub pool: DbConfig,
    /// Drop and recreate the tables at startup
    pub reset_on_start: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let app = AppConfig {
            host: std::env::var("CASTING_SERVICE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_env_with_default("CASTING_SERVICE_PORT", 8080),
            env: std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        };

        let cors = CorsConfig {
            allowed_origins: std::env::var("CORS_ALLOWED_ORIGINS")
                .unwrap_or_else(|_| "*".to_string()),
        };
        if app.is_production() && (cors.allows_any() || cors.origins().next().is_none()) {
            return Err(ConfigError::WildcardCorsInProduction);
        }

        let database = DatabaseConfig {
            pool: DbConfig::from_env(SERVICE_NAME).map_err(ConfigError::Database)?,
            reset_on_start: parse_env_flag("DB_RESET_ON_START", false),
        };

        Ok(Config {
            app,
            cors,
            database,
            auth: AuthConfig::from_env()?,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.app.host, self.app.port)
    }
}
