//! # Headline Sentiment
//!
//! Classifies financial news headlines as negative, neutral or positive with TF-IDF features
//! and a small dense network.
#![forbid(unsafe_code)]

/// Text features
pub mod features;

/// Models
pub mod models;

/// Pipelines
pub mod pipelines;

/// Datasets
pub mod datasets;

/// Utilities
pub mod utils;

/// Command line helpers
pub mod cli;

/// HTTP server
pub mod server;

/// Error macros
#[macro_use]
extern crate anyhow;
