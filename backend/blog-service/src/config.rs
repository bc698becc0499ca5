/// Configuration management for Blog Service
///
/// All settings come from environment variables (a `.env` file is loaded by
/// `main` before this runs).
use db_pool::env_utils::{parse_env_flag, parse_env_with_default};
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application settings
    pub app: AppConfig,
    /// CORS configuration
    pub cors: CorsConfig,
    /// Database configuration
    pub database: DatabaseConfig,
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (development, staging, production)
    pub env: String,
    /// Server host to bind to
    pub host: String,
    /// Server port to bind to
    pub port: u16,
    /// Number of actix workers
    pub workers: usize,
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated list of allowed origins
    pub allowed_origins: String,
}

/// Database configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database URL
    pub url: String,
    /// Max connections in pool
    pub max_connections: u32,
    /// Apply embedded migrations on startup
    pub run_migrations: bool,
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &"[REDACTED]")
            .field("max_connections", &self.max_connections)
            .field("run_migrations", &self.run_migrations)
            .finish()
    }
}

impl AppConfig {
    pub fn is_production(&self) -> bool {
        self.env.eq_ignore_ascii_case("production")
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl CorsConfig {
    /// Individual origins, trimmed, empty entries dropped
    pub fn origins(&self) -> impl Iterator<Item = &str> {
        self.allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());
        let production = app_env.eq_ignore_ascii_case("production");

        let cors = {
            let allowed_origins = match std::env::var("CORS_ALLOWED_ORIGINS") {
                Ok(value) => value,
                Err(_) if production => {
                    return Err("CORS_ALLOWED_ORIGINS must be set in production".to_string())
                }
                Err(_) => "http://localhost:3000".to_string(),
            };

            if production && allowed_origins.trim() == "*" {
                return Err("CORS_ALLOWED_ORIGINS cannot be '*' in production".to_string());
            }

            CorsConfig { allowed_origins }
        };

        let database_url = match std::env::var("DATABASE_URL") {
            Ok(url) => url,
            Err(_) if production => return Err("DATABASE_URL must be set in production".to_string()),
            Err(_) => "postgresql://localhost/blog".to_string(),
        };

        let max_connections = parse_env_with_default("DATABASE_MAX_CONNECTIONS", 10u32);
        if max_connections == 0 {
            return Err("DATABASE_MAX_CONNECTIONS must be greater than zero".to_string());
        }

        let workers = parse_env_with_default("BLOG_SERVICE_WORKERS", 4usize);
        if workers == 0 {
            return Err("BLOG_SERVICE_WORKERS must be greater than zero".to_string());
        }

        Ok(Config {
            app: AppConfig {
                env: app_env,
                host: std::env::var("BLOG_SERVICE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_env_with_default("BLOG_SERVICE_PORT", 8082),
                workers,
            },
            cors,
            database: DatabaseConfig {
                url: database_url,
                max_connections,
                run_migrations: parse_env_flag("RUN_MIGRATIONS", true),
            },
        })
    }
}
