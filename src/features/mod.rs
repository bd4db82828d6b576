use log::info;

/// TF-IDF vectorization
pub mod tfidf;

/// Low-weight feature pruning
pub mod selection;

/// Label encoding
pub mod labels;

pub use labels::{LabelEncoder, LabelError};
pub use selection::{FeatureSelection, PRUNE_THRESHOLD};
pub use tfidf::{SparseRow, Vectorizer};

/// A dense, row-major feature matrix with one row per document
#[derive(Clone, Debug, PartialEq)]
pub struct FeatureMatrix {
    rows: usize,
    cols: usize,
    values: Vec<f32>,
}

impl FeatureMatrix {
    /// Create an all-zero matrix
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            values: vec![0.0; rows * cols],
        }
    }

    /// Number of rows (documents)
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns (features)
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// A single row
    pub fn row(&self, index: usize) -> &[f32] {
        &self.values[index * self.cols..(index + 1) * self.cols]
    }

    /// A single row, mutably
    pub fn row_mut(&mut self, index: usize) -> &mut [f32] {
        &mut self.values[index * self.cols..(index + 1) * self.cols]
    }

    /// Iterate over rows
    pub fn iter_rows(&self) -> impl Iterator<Item = &[f32]> {
        // chunks_exact panics on a zero chunk size
        self.values.chunks_exact(self.cols.max(1)).take(self.rows)
    }

    /// The summed weight of every column
    pub fn column_sums(&self) -> Vec<f32> {
        let mut sums = vec![0.0; self.cols];

        for row in self.iter_rows() {
            for (sum, value) in sums.iter_mut().zip(row) {
                *sum += value;
            }
        }

        sums
    }

    /// The raw row-major values
    pub fn values(&self) -> &[f32] {
        &self.values
    }
}

/// A fitted vectorizer together with the pruning that was fitted alongside it.
///
/// Both training and inference go through this type, so the column set only
/// depends on the corpus it was fitted on.
#[derive(Clone, Debug)]
pub struct Features {
    vectorizer: Vectorizer,
    selection: FeatureSelection,
}

impl Features {
    /// Fit TF-IDF weights and feature pruning over a corpus
    pub fn fit<S: AsRef<str>>(corpus: &[S]) -> Self {
        Self::fit_transform(corpus).0
    }

    /// Fit over a corpus and return the pruned feature matrix for it
    pub fn fit_transform<S: AsRef<str>>(corpus: &[S]) -> (Self, FeatureMatrix) {
        let vectorizer = Vectorizer::fit(corpus);
        let rows = vectorizer.transform_sparse(corpus);

        info!("Number of features: {}", vectorizer.len());

        let selection = FeatureSelection::fit(&rows, vectorizer.len(), PRUNE_THRESHOLD);

        info!("Features after selection: {}", selection.len());

        let matrix = selection.apply(&rows);

        (
            Self {
                vectorizer,
                selection,
            },
            matrix,
        )
    }

    /// Transform texts into the pruned feature space
    pub fn transform<S: AsRef<str>>(&self, texts: &[S]) -> FeatureMatrix {
        self.selection
            .apply(&self.vectorizer.transform_sparse(texts))
    }

    /// Width of the pruned feature vectors
    pub fn len(&self) -> usize {
        self.selection.len()
    }

    /// True if pruning left no features at all
    pub fn is_empty(&self) -> bool {
        self.selection.is_empty()
    }

    /// Size of the vocabulary before pruning
    pub fn vocabulary_len(&self) -> usize {
        self.vectorizer.len()
    }

    /// Names of the retained features, in column order
    pub fn feature_names(&self) -> Vec<&str> {
        let names = self.vectorizer.feature_names();

        self.selection
            .columns()
            .iter()
            .map(|&column| names[column])
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const CORPUS: &[&str] = &[
        "profit rose sharply",
        "profit fell sharply",
        "profit rose",
        "the company was founded in 1990",
    ];

    #[test]
    fn test_column_sums() {
        let mut matrix = FeatureMatrix::zeros(2, 3);
        matrix.row_mut(0).copy_from_slice(&[1.0, 0.0, 0.25]);
        matrix.row_mut(1).copy_from_slice(&[0.5, 0.0, 0.25]);

        assert_eq!(matrix.column_sums(), vec![1.5, 0.0, 0.5]);
        assert_eq!(matrix.iter_rows().count(), 2);
    }

    #[test]
    fn test_fit_transform_matches_transform() {
        let (features, matrix) = Features::fit_transform(CORPUS);

        assert_eq!(matrix.rows(), CORPUS.len());
        assert_eq!(matrix.cols(), features.len());
        assert_eq!(features.transform(CORPUS), matrix);
    }

    #[test]
    fn test_pruned_width_never_exceeds_vocabulary() {
        let features = Features::fit(CORPUS);

        assert!(features.len() <= features.vocabulary_len());
        assert_eq!(features.feature_names().len(), features.len());
    }

    #[test]
    fn test_transform_unseen_text_is_zero() {
        let features = Features::fit(CORPUS);
        let matrix = features.transform(&["zzz qqq"]);

        assert_eq!(matrix.rows(), 1);
        assert!(matrix.row(0).iter().all(|value| *value == 0.0));
    }
}
