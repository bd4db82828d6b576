use std::collections::{BTreeMap, BTreeSet};

use lazy_static::lazy_static;
use regex::Regex;

use super::FeatureMatrix;

lazy_static! {
    /// Runs of two or more word characters
    static ref TOKEN_PATTERN: Regex = Regex::new(r"\b\w\w+\b").expect("valid token pattern");
}

/// The non-zero entries of a document vector as (column, weight) pairs, ordered by column
pub type SparseRow = Vec<(usize, f32)>;

/// Lowercase the text and split it into word tokens
pub fn tokenize(text: &str) -> Vec<String> {
    let text = text.to_lowercase();

    TOKEN_PATTERN
        .find_iter(&text)
        .map(|token| token.as_str().to_string())
        .collect()
}

/// Term-frequency / inverse-document-frequency vectorizer
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Vectorizer {
    /// A map from terms to their column, in lexicographic order
    vocabulary: BTreeMap<String, usize>,

    /// Smoothed inverse document frequency for each column
    idf: Vec<f32>,
}

impl Vectorizer {
    /// Learn the vocabulary and document frequencies of a corpus
    pub fn fit<S: AsRef<str>>(docs: &[S]) -> Self {
        let mut doc_freq: BTreeMap<String, usize> = BTreeMap::new();

        for doc in docs {
            let terms: BTreeSet<String> = tokenize(doc.as_ref()).into_iter().collect();

            for term in terms {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        let n_docs = docs.len() as f32;

        let idf = doc_freq
            .values()
            .map(|&df| ((1.0 + n_docs) / (1.0 + df as f32)).ln() + 1.0)
            .collect();

        let vocabulary = doc_freq
            .into_keys()
            .enumerate()
            .map(|(column, term)| (term, column))
            .collect();

        Self { vocabulary, idf }
    }

    /// Weight each document against the fitted vocabulary. Rows are L2-normalized and
    /// terms outside the vocabulary are ignored.
    pub fn transform_sparse<S: AsRef<str>>(&self, docs: &[S]) -> Vec<SparseRow> {
        docs.iter()
            .map(|doc| {
                let mut counts: BTreeMap<usize, f32> = BTreeMap::new();

                for term in tokenize(doc.as_ref()) {
                    if let Some(&column) = self.vocabulary.get(&term) {
                        *counts.entry(column).or_insert(0.0) += 1.0;
                    }
                }

                let mut row: SparseRow = counts
                    .into_iter()
                    .map(|(column, count)| (column, count * self.idf[column]))
                    .collect();

                let norm = row.iter().map(|(_, w)| w * w).sum::<f32>().sqrt();
                if norm > 0.0 {
                    row.iter_mut().for_each(|(_, w)| *w /= norm);
                }

                row
            })
            .collect()
    }

    /// Dense version of [`Vectorizer::transform_sparse`] over the full vocabulary
    pub fn transform<S: AsRef<str>>(&self, docs: &[S]) -> FeatureMatrix {
        let rows = self.transform_sparse(docs);
        let mut matrix = FeatureMatrix::zeros(rows.len(), self.len());

        for (index, row) in rows.iter().enumerate() {
            let dense = matrix.row_mut(index);

            for &(column, weight) in row {
                dense[column] = weight;
            }
        }

        matrix
    }

    /// Fit and transform in one pass
    pub fn fit_transform<S: AsRef<str>>(docs: &[S]) -> (Self, FeatureMatrix) {
        let vectorizer = Self::fit(docs);
        let matrix = vectorizer.transform(docs);

        (vectorizer, matrix)
    }

    /// The vocabulary in column order
    pub fn feature_names(&self) -> Vec<&str> {
        self.vocabulary.keys().map(String::as_str).collect()
    }

    /// The column for a term, if it is in the vocabulary
    pub fn column(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    /// The inverse document frequency of each column
    pub fn idf(&self) -> &[f32] {
        &self.idf
    }

    /// Vocabulary size
    pub fn len(&self) -> usize {
        self.vocabulary.len()
    }

    /// True before fitting, or when the corpus had no tokens
    pub fn is_empty(&self) -> bool {
        self.vocabulary.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_tokenize() {
        assert_eq!(
            tokenize("Nokia's Q3 profit: up 5 % to EUR 1.2 bn"),
            vec!["nokia", "q3", "profit", "up", "to", "eur", "bn"]
        );
    }

    #[test]
    fn test_vocabulary_is_sorted() {
        let vectorizer = Vectorizer::fit(&["zeta alpha", "mid alpha"]);

        assert_eq!(vectorizer.feature_names(), vec!["alpha", "mid", "zeta"]);
        assert_eq!(vectorizer.column("mid"), Some(1));
        assert_eq!(vectorizer.column("missing"), None);
    }

    #[test]
    fn test_smooth_idf() {
        let vectorizer = Vectorizer::fit(&["aa bb", "aa cc", "aa"]);
        let idf = vectorizer.idf();

        // aa appears everywhere, bb and cc once out of three documents
        assert!(approx(idf[0], 1.0));
        assert!(approx(idf[1], (4.0f32 / 2.0).ln() + 1.0));
        assert!(approx(idf[2], (4.0f32 / 2.0).ln() + 1.0));
    }

    #[test]
    fn test_rows_are_l2_normalized() {
        let (_, matrix) = Vectorizer::fit_transform(&["aa bb bb", "aa cc", "dd"]);

        for row in matrix.iter_rows() {
            let norm = row.iter().map(|w| w * w).sum::<f32>().sqrt();
            assert!(approx(norm, 1.0));
        }
    }

    #[test]
    fn test_term_counts_weight_columns() {
        let vectorizer = Vectorizer::fit(&["aa bb", "aa bb"]);
        let row = &vectorizer.transform_sparse(&["bb bb aa"])[0];

        // Equal idf, so the weights follow the raw counts before normalization
        assert_eq!(row.len(), 2);
        assert!(approx(row[1].1, 2.0 * row[0].1));
    }

    #[test]
    fn test_empty_document() {
        let vectorizer = Vectorizer::fit(&["aa bb"]);
        let rows = vectorizer.transform_sparse(&["", "x"]);

        assert!(rows.iter().all(Vec::is_empty));
    }
}
