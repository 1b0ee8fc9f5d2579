use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Create a SQLite connection pool
///
/// Foreign keys are switched on for every connection; cascade deletes depend
/// on it. An in-memory database lives only as long as its connection, so it
/// gets exactly one connection that is never recycled.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    tracing::info!("Creating database connection pool...");

    let in_memory = is_in_memory(database_url);

    let mut options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(5));

    if !in_memory {
        if let Some(path) = database_file_path(database_url) {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                if !parent.exists() {
                    std::fs::create_dir_all(parent).map_err(|e| {
                        tracing::error!("Failed to create database directory: {}", e);
                        sqlx::Error::Io(e)
                    })?;
                }
            }
        }
        options = options.journal_mode(SqliteJournalMode::Wal);
    }

    let pool_options = if in_memory {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
    };

    let pool = pool_options
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await?;

    tracing::info!("Database connection pool created successfully");

    Ok(pool)
}

/// Apply the embedded schema migrations
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

/// File path named by a `sqlite:` URL, without query parameters
fn database_file_path(database_url: &str) -> Option<PathBuf> {
    let rest = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next().unwrap_or(rest);
    if path.is_empty() {
        None
    } else {
        Some(PathBuf::from(path))
    }
}
