use std::collections::{BTreeMap, BTreeSet};

use crate::utils::classes::invert_map;

/// Maps class names to integer ids (in lexicographic order) and to one-hot vectors
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LabelEncoder {
    /// A mapping from class ids to class name labels
    id2label: BTreeMap<usize, String>,

    /// A mapping from class name labels to class ids
    label2id: BTreeMap<String, usize>,
}

impl LabelEncoder {
    /// Learn the classes present in a list of labels
    pub fn fit<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let classes: BTreeSet<String> = labels
            .into_iter()
            .map(|label| label.as_ref().to_string())
            .collect();

        Self::from_id2label(classes.into_iter().enumerate().collect())
    }

    /// Rebuild an encoder from a saved id to label map
    pub fn from_id2label(id2label: BTreeMap<usize, String>) -> Self {
        let label2id = invert_map(id2label.clone());

        Self { id2label, label2id }
    }

    /// The class id of a label
    pub fn encode(&self, label: &str) -> Result<usize, LabelError> {
        self.label2id
            .get(label)
            .copied()
            .ok_or_else(|| LabelError::UnknownLabel(label.to_string()))
    }

    /// The label of a class id
    pub fn decode(&self, id: usize) -> Result<&str, LabelError> {
        self.id2label
            .get(&id)
            .map(String::as_str)
            .ok_or(LabelError::UnknownId(id))
    }

    /// A one-hot vector for a class id, as wide as the number of classes
    pub fn one_hot(&self, id: usize) -> Result<Vec<f32>, LabelError> {
        if id >= self.len() {
            return Err(LabelError::UnknownId(id));
        }

        let mut vector = vec![0.0; self.len()];
        vector[id] = 1.0;

        Ok(vector)
    }

    /// The class names in id order
    pub fn classes(&self) -> Vec<&str> {
        self.id2label.values().map(String::as_str).collect()
    }

    /// A mapping from class ids to class name labels
    pub fn id2label(&self) -> &BTreeMap<usize, String> {
        &self.id2label
    }

    /// Number of classes
    pub fn len(&self) -> usize {
        self.id2label.len()
    }

    /// True if no classes were seen
    pub fn is_empty(&self) -> bool {
        self.id2label.is_empty()
    }
}

/// Label Error
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum LabelError {
    /// The label was not seen when fitting
    #[error("unknown class label: {0}")]
    UnknownLabel(String),

    /// The id is outside the fitted classes
    #[error("unknown class id: {0}")]
    UnknownId(usize),
}
