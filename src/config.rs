use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub database_url: String,
    pub database_max_connections: u32,
    pub allowed_origins: Vec<String>,
    pub environment: String,
    /// Shared secret the identity proxy signs `X-User-Id` with
    pub identity_secret_key: String,
    pub log_requests: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if it exists (development)
        dotenvy::dotenv().ok();

        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .map_err(|_| "Invalid SERVER_PORT")?;

        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://./data/workouts.db".to_string());

        let database_max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "5".to_string())
            .parse()
            .map_err(|_| "Invalid DATABASE_MAX_CONNECTIONS")?;

        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        let identity_secret_key = env::var("IDENTITY_SECRET_KEY")
            .map_err(|_| "IDENTITY_SECRET_KEY must be set to verify user identities")?;
        if identity_secret_key.is_empty() {
            return Err("IDENTITY_SECRET_KEY must not be empty".to_string());
        }

        let log_requests = env::var("LOG_REQUESTS")
            .map(|v| parse_flag(&v))
            .unwrap_or(Ok(false))
            .map_err(|_| "Invalid LOG_REQUESTS")?;

        Ok(Config {
            server_host,
            server_port,
            database_url,
            database_max_connections,
            allowed_origins,
            environment,
            identity_secret_key,
            log_requests,
        })
    }

    /// Get server address as string
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn parse_flag(value: &str) -> Result<bool, ()> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(()),
    }
}
