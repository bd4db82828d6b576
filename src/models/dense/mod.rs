/// Dense Classifier Configuration
pub mod config;

/// Dense Classifier
pub mod model;

/// Training and validation steps
pub mod train;

pub use config::Config;
pub use model::{Model, ModelRecord};
