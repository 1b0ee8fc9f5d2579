pub mod aggregate;
pub mod exercises;
pub mod pool;
pub mod workouts;

pub use pool::{create_pool, run_migrations};

use sqlx::SqlitePool;

use crate::error::Result;

/// Database handle type (cheaply cloneable pool shared across handlers)
pub type Db = SqlitePool;

/// Open the database at `database_url` and bring its schema up to date
pub async fn open_database(database_url: &str, max_connections: u32) -> Result<Db> {
    let pool = create_pool(database_url, max_connections).await?;

    tracing::info!("Running database migrations...");
    run_migrations(&pool).await?;
    tracing::info!("Migrations complete");

    Ok(pool)
}
