/// File utilities
pub mod files;

/// Tensor Utilities
pub mod tensors;

/// Metric history recording during training
pub mod renderer;

/// SVG charts of a training history
pub mod plot;

/// Utilities for classification tasks
pub mod classes;
