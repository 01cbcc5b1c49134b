use std::str::FromStr;

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable, one line per event.
    #[default]
    Text,
    /// One JSON object per event, for log shippers.
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "pretty" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format '{other}' (expected text or json)")),
        }
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Postgres connection string. `None` runs on the in-memory store.
    pub database_url: Option<String>,
    /// Base URL of the external planning service.
    pub planning_url: String,
    /// Timeout for a single planning service call, in seconds (default: `10`).
    pub planning_timeout_secs: u64,
    /// Log output format (default: text).
    pub log_format: LogFormat,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                               |
    /// |-------------------------|---------------------------------------|
    /// | `HOST`                  | `0.0.0.0`                             |
    /// | `PORT`                  | `3000`                                |
    /// | `CORS_ORIGINS`          | `http://localhost:5173`               |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                                  |
    /// | `DATABASE_URL`          | unset (in-memory store)               |
    /// | `PLANNING_SERVICE_URL`  | `http://localhost:8080/api/planning`  |
    /// | `PLANNING_TIMEOUT_SECS` | `10`                                  |
    /// | `LOG_FORMAT`            | `text`                                |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = parse_origins(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:5173".into()),
        );

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let database_url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());

        let planning_url = std::env::var("PLANNING_SERVICE_URL")
            .unwrap_or_else(|_| "http://localhost:8080/api/planning".into());

        let planning_timeout_secs: u64 = std::env::var("PLANNING_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".into())
            .parse()
            .expect("PLANNING_TIMEOUT_SECS must be a valid u64");

        let log_format = std::env::var("LOG_FORMAT")
            .ok()
            .map(|v| v.parse().expect("LOG_FORMAT must be 'text' or 'json'"))
            .unwrap_or_default();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            database_url,
            planning_url,
            planning_timeout_secs,
            log_format,
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
