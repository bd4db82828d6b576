/// Common model config and traits for text classification
pub mod model;

/// Batcher
pub mod batcher;

/// Text Classification Items
pub mod item;

/// Sentiments and predictions
pub mod output;

/// Training
pub mod training;

/// Inference
pub mod inference;

pub use batcher::Batcher;
pub use inference::{infer, AnalysisError, Analyzer};
pub use item::{Item, Sample};
pub use model::{probabilities, Model, ModelConfig};
pub use output::{Prediction, Sentiment, SentimentError};
pub use training::{evaluate, train, Config as TrainingConfig, Report, Scores};
