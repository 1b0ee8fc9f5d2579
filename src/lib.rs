//! Workout Log Server Library
//!
//! This module exports the core types and functions for testing and reuse.

pub mod auth;
pub mod config;
pub mod constants;
pub mod date;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;

pub use config::Config;
pub use date::{from_canonical_string, to_canonical_string, CanonicalDate};
pub use db::{open_database, Db};
pub use error::{AppError, Result};

use axum::Router;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Db,
    pub config: Config,
}

impl AppState {
    /// Create a new AppState with the given database and configuration
    pub fn new(db: Db, config: Config) -> Self {
        Self { db, config }
    }
}

/// Router with every route bound to `state`, without middleware layers
pub fn app(state: AppState) -> Router {
    routes::router().with_state(state)
}
