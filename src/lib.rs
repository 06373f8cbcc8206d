//! Local Library catalog server
//!
//! Server-rendered pages for browsing and editing a small library catalog of
//! authors, genres, books and their physical copies, backed by a JSON document
//! store.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;
pub mod validation;
pub mod views;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

use repository::Repository;
use services::Services;
use views::Views;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub services: Arc<Services>,
    pub views: Views,
}

impl AppState {
    /// Wires services and compiled templates over an open repository
    pub fn new(repository: Repository) -> AppResult<Self> {
        Ok(Self {
            services: Arc::new(Services::new(repository)),
            views: Views::new()?,
        })
    }
}
