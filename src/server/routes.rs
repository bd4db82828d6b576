use std::sync::Arc;

use axum::{routing::post, Router};

use crate::{cli::DEFAULT_MODEL_PATH, pipelines::text_classification::Analyzer};

use super::handlers;

/// Application state shared across handlers
#[derive(Debug)]
pub struct AppState {
    /// The fitted analyzer, absent when the dataset could not be loaded at start-up
    pub analyzer: Option<Arc<Analyzer>>,

    /// Path stem of the trained model
    pub model_path: String,
}

impl AppState {
    /// Share an analyzer, if one could be fitted, and the model to use with it
    pub fn new(analyzer: Option<Analyzer>, model_path: impl Into<String>) -> Self {
        Self {
            analyzer: analyzer.map(Arc::new),
            model_path: model_path.into(),
        }
    }
}

/// Create the application router
///
/// # Routes
///
/// - `POST /analyze` - Classify the form field `headline`
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/analyze", post(handlers::analyze))
        .with_state(state)
}

/// Configuration for the HTTP server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,
    /// Port to bind to
    pub port: u16,
    /// Path stem of the trained model
    pub model_path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            model_path: DEFAULT_MODEL_PATH.to_string(),
        }
    }
}

impl ServerConfig {
    /// Get the bind address
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
