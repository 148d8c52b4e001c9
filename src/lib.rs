//! Vigil - deterministic stock signal scanning server

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod sources;
pub mod types;
pub mod validators;

use std::sync::Arc;

use config::Config;
use services::{CacheStore, Scanner};

pub use error::{AppError, Result};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub cache: Arc<CacheStore>,
    pub scanner: Arc<Scanner>,
}
