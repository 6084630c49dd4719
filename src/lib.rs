//! Perception Gateway
//!
//! HTTP front-end that validates perception requests, builds the engine
//! selected by the caller and returns its result as JSON:
//! - Object detection, face recognition and enrollment
//! - Intent recognition and text recognition (OCR)
//! - Hand gesture extraction and voice generation

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use infrastructure::engine::RemoteEngineFactory;

/// Create the application state with default configuration
pub fn create_app_state() -> anyhow::Result<AppState> {
    create_app_state_with_config(&AppConfig::default())
}

/// Create the application state with custom configuration
pub fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let factory = RemoteEngineFactory::from_config(&config.engines)?;

    Ok(AppState::new(Arc::new(factory)))
}
