use async_trait::async_trait;
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

/// The labelled news headline dataset
pub mod headlines;

/// A dataset which can be loaded from a file
#[async_trait]
pub trait LoadableDataset<I>: burn::data::dataset::Dataset<I> {
    /// Load the dataset
    async fn load(path: &str) -> Result<Self, DatasetError>
    where
        Self: std::marker::Sized;
}

/// Shuffle items with a seeded RNG and split off `ceil(len * test_ratio)` of them as a test
/// partition. Returns `(train, test)`.
pub fn train_test_split<T>(items: Vec<T>, test_ratio: f64, seed: u64) -> (Vec<T>, Vec<T>) {
    let n_test = ((items.len() as f64) * test_ratio.clamp(0.0, 1.0)).ceil() as usize;

    let mut items = items;
    items.shuffle(&mut StdRng::seed_from_u64(seed));

    let train = items.split_off(n_test);

    (train, items)
}

/// Split off the last `ratio` of the items, without shuffling. Returns `(fit, validation)`.
pub fn validation_split<T>(items: Vec<T>, ratio: f64) -> (Vec<T>, Vec<T>) {
    let n_fit = ((items.len() as f64) * (1.0 - ratio.clamp(0.0, 1.0))) as usize;

    let mut items = items;
    let validation = items.split_off(n_fit);

    (items, validation)
}

/// Dataset Error
#[derive(thiserror::Error, Debug)]
pub enum DatasetError {
    /// The file could not be read
    #[error("unable to read dataset file '{path}': {source}")]
    Io {
        /// Path of the dataset file
        path: String,

        /// Underlying error
        source: std::io::Error,
    },

    /// The file is not valid CSV
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A record has no text column
    #[error("line {line}: expected a label and a headline")]
    MissingField {
        /// 1-based line of the record
        line: u64,
    },

    /// A record has a label outside the known sentiments
    #[error("line {line}: unknown sentiment label '{label}'")]
    UnknownLabel {
        /// 1-based line of the record
        line: u64,

        /// The offending label
        label: String,
    },

    /// The file holds no records
    #[error("the dataset is empty")]
    Empty,
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_split_sizes() {
        let (train, test) = train_test_split((0..101).collect(), 0.2, 42);

        assert_eq!(test.len(), 21);
        assert_eq!(train.len(), 80);
    }

    #[test]
    fn test_split_is_deterministic_and_disjoint() {
        let (train_a, test_a) = train_test_split((0..50).collect::<Vec<u32>>(), 0.2, 42);
        let (train_b, test_b) = train_test_split((0..50).collect::<Vec<u32>>(), 0.2, 42);

        assert_eq!(train_a, train_b);
        assert_eq!(test_a, test_b);

        let all: BTreeSet<u32> = train_a.iter().chain(&test_a).copied().collect();
        assert_eq!(all.len(), 50);
    }

    #[test]
    fn test_validation_split_takes_tail() {
        let (fit, validation) = validation_split((0..20).collect::<Vec<u32>>(), 0.1);

        assert_eq!(fit, (0..18).collect::<Vec<_>>());
        assert_eq!(validation, vec![18, 19]);
    }
}
