/// Feed-forward classifier over TF-IDF features
pub mod dense;
