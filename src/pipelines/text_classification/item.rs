use std::fmt::Debug;

use crate::features::FeatureMatrix;

/// A trait for items that can be used for text classification
pub trait Item: Send + Sync + Clone + Debug {
    /// Returns the input text for the item
    fn input(&self) -> &str;

    /// Returns the class label for the item
    fn class_label(&self) -> &str;
}

/// A vectorized item: the pruned TF-IDF row of a text and its class id
#[derive(Clone, Debug, PartialEq)]
pub struct Sample {
    /// Feature vector
    pub features: Vec<f32>,

    /// Encoded class
    pub class_id: usize,
}

impl Sample {
    /// Pair every row of a feature matrix with its class id
    pub fn from_matrix(matrix: &FeatureMatrix, class_ids: &[usize]) -> Vec<Self> {
        matrix
            .iter_rows()
            .zip(class_ids)
            .map(|(row, class_id)| Sample {
                features: row.to_vec(),
                class_id: *class_id,
            })
            .collect()
    }
}
