use super::{FeatureMatrix, SparseRow};

/// Columns whose summed weight over the corpus falls below this are dropped
pub const PRUNE_THRESHOLD: f32 = 0.5;

/// Keeps the columns of a TF-IDF matrix that carry enough weight across a corpus
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FeatureSelection {
    /// Retained source columns, ascending
    columns: Vec<usize>,

    /// For every source column, its position in the pruned matrix
    positions: Vec<Option<usize>>,
}

impl FeatureSelection {
    /// Select the columns whose summed weight is at least `threshold`
    pub fn from_column_sums(sums: &[f32], threshold: f32) -> Self {
        let columns: Vec<usize> = sums
            .iter()
            .enumerate()
            .filter(|(_, sum)| **sum >= threshold)
            .map(|(column, _)| column)
            .collect();

        let mut positions = vec![None; sums.len()];
        for (position, &column) in columns.iter().enumerate() {
            positions[column] = Some(position);
        }

        Self { columns, positions }
    }

    /// Fit the selection on sparse rows spanning `n_cols` source columns
    pub fn fit(rows: &[SparseRow], n_cols: usize, threshold: f32) -> Self {
        let mut sums = vec![0.0; n_cols];

        for row in rows {
            for &(column, weight) in row {
                sums[column] += weight;
            }
        }

        Self::from_column_sums(&sums, threshold)
    }

    /// Fit the selection on a dense matrix
    pub fn fit_dense(matrix: &FeatureMatrix, threshold: f32) -> Self {
        Self::from_column_sums(&matrix.column_sums(), threshold)
    }

    /// Project sparse rows onto the retained columns
    pub fn apply(&self, rows: &[SparseRow]) -> FeatureMatrix {
        let mut matrix = FeatureMatrix::zeros(rows.len(), self.len());

        for (index, row) in rows.iter().enumerate() {
            let dense = matrix.row_mut(index);

            for &(column, weight) in row {
                if let Some(Some(position)) = self.positions.get(column) {
                    dense[*position] = weight;
                }
            }
        }

        matrix
    }

    /// The retained source columns
    pub fn columns(&self) -> &[usize] {
        &self.columns
    }

    /// Number of retained columns
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// True if every column was pruned
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::features::Vectorizer;

    use super::*;

    #[test]
    fn test_from_column_sums() {
        let selection = FeatureSelection::from_column_sums(&[0.2, 0.5, 1.7, 0.49], 0.5);

        assert_eq!(selection.columns(), &[1, 2]);
        assert_eq!(selection.len(), 2);
    }

    #[test]
    fn test_apply_projects_columns() {
        let selection = FeatureSelection::from_column_sums(&[0.0, 1.0, 0.0, 1.0], 0.5);
        let matrix = selection.apply(&[vec![(0, 0.3), (1, 0.4), (3, 0.5)], vec![(2, 1.0)]]);

        assert_eq!(matrix.cols(), 2);
        assert_eq!(matrix.row(0), &[0.4, 0.5]);
        assert_eq!(matrix.row(1), &[0.0, 0.0]);
    }

    #[test]
    fn test_feature_count_follows_threshold() {
        let corpus = [
            "shares rose",
            "shares fell",
            "brokers expect results again soon",
            "shares",
        ];

        let (vectorizer, dense) = Vectorizer::fit_transform(&corpus);
        let sums = dense.column_sums();
        let expected = sums.iter().filter(|sum| **sum >= PRUNE_THRESHOLD).count();

        let rows = vectorizer.transform_sparse(&corpus);
        let selection = FeatureSelection::fit(&rows, vectorizer.len(), PRUNE_THRESHOLD);

        assert_eq!(selection.len(), expected);
        assert_eq!(FeatureSelection::fit_dense(&dense, PRUNE_THRESHOLD), selection);

        // "shares" carries the full weight of the last document, while "again" shares its
        // only document with four other equally rare terms
        let shares = vectorizer.column("shares").unwrap();
        let again = vectorizer.column("again").unwrap();
        assert!(selection.columns().contains(&shares));
        assert!(!selection.columns().contains(&again));
    }
}
