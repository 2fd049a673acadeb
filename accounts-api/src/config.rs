/// Configuration management for the API server
///
/// Configuration comes from environment variables, with a `.env` file read
/// first when present.
///
/// # Environment Variables
///
/// - `API_HOST`: Host to bind to (default: 0.0.0.0)
/// - `API_PORT`: Port to bind to (default: 8080)
/// - `CORS_ORIGINS`: Comma-separated allowed origins (default: `*`)
/// - `STORAGE_BACKEND`: `postgres` or `memory` (default: postgres)
/// - `DATABASE_URL`: PostgreSQL connection string (required for postgres)
/// - `DATABASE_MAX_CONNECTIONS`: Pool size (default: 10)
/// - `DATABASE_MIN_CONNECTIONS`: Warm connections (default: 2)
/// - `RUN_MIGRATIONS`: Apply migrations on startup (default: true)
/// - `RUST_LOG`: Log filter
/// - `LOG_FORMAT`: `json` for JSON logs, anything else for text
///
/// # Example
///
/// ```no_run
/// use accounts_api::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Server will listen on {}", config.bind_address());
/// # Ok(())
/// # }
/// ```

use accounts_shared::db::pool::DatabaseConfig;
use std::env;
use std::str::FromStr;

/// Complete application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// API server configuration
    pub api: ApiConfig,

    /// Where users and addresses are stored
    pub storage: StorageConfig,
}

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,

    /// Allowed CORS origins; `*` allows any
    pub cors_origins: Vec<String>,
}

/// Storage backend selection
#[derive(Debug, Clone)]
pub enum StorageConfig {
    /// Process-local tables, lost on restart
    Memory,

    /// PostgreSQL
    Postgres {
        database: DatabaseConfig,
        run_migrations: bool,
    },
}

impl StorageConfig {
    /// Short backend name for logs and health output
    pub fn backend_name(&self) -> &'static str {
        match self {
            StorageConfig::Memory => "memory",
            StorageConfig::Postgres { .. } => "postgres",
        }
    }
}

fn var_or<T>(name: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(value) => value
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("{} has an invalid value '{}': {}", name, value, e)),
        Err(_) => Ok(default),
    }
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `STORAGE_BACKEND` is neither `postgres` nor `memory`
    /// - `DATABASE_URL` is missing while the postgres backend is selected
    /// - A numeric or boolean variable cannot be parsed
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = var_or("API_PORT", 8080u16)?;
        let cors_origins = parse_origins(&env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string()));

        let backend = env::var("STORAGE_BACKEND").unwrap_or_else(|_| "postgres".to_string());
        let storage = match backend.to_ascii_lowercase().as_str() {
            "memory" => StorageConfig::Memory,
            "postgres" | "postgresql" => {
                let url = env::var("DATABASE_URL").map_err(|_| {
                    anyhow::anyhow!("DATABASE_URL environment variable is required")
                })?;

                StorageConfig::Postgres {
                    database: DatabaseConfig {
                        url,
                        max_connections: var_or("DATABASE_MAX_CONNECTIONS", 10u32)?,
                        min_connections: var_or("DATABASE_MIN_CONNECTIONS", 2u32)?,
                        ..Default::default()
                    },
                    run_migrations: var_or("RUN_MIGRATIONS", true)?,
                }
            }
            other => anyhow::bail!("Unknown STORAGE_BACKEND '{}'", other),
        };

        Ok(Self {
            api: ApiConfig {
                host,
                port,
                cors_origins,
            },
            storage,
        })
    }

    /// Configuration for tests and local runs: in-memory storage, permissive CORS
    pub fn in_memory() -> Self {
        Self {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                cors_origins: vec!["*".to_string()],
            },
            storage: StorageConfig::Memory,
        }
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(String::from)
        .collect()
}
