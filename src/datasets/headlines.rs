use std::io;

use async_trait::async_trait;
use burn::data::dataset::{self, Dataset as _, InMemDataset};
use derive_new::new;
use serde::{Deserialize, Serialize};

use crate::{
    pipelines::text_classification::{self, Item as _, Sentiment},
    utils::files::decode_text,
};

use super::{DatasetError, LoadableDataset};

/// The name of the headline dataset
pub static DATASET: &str = "headlines";

/// A labelled news headline
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, new)]
pub struct Item {
    /// The sentiment class name of the headline
    pub label: String,

    /// The headline text
    pub text: String,
}

impl text_classification::Item for Item {
    fn input(&self) -> &str {
        &self.text
    }

    fn class_label(&self) -> &str {
        &self.label
    }
}

/// Struct for the headline dataset
pub struct Dataset {
    /// Underlying In-Memory dataset
    dataset: InMemDataset<Item>,
}

/// Implement the Dataset trait for the headline dataset
impl dataset::Dataset<Item> for Dataset {
    /// Returns a specific item from the dataset
    fn get(&self, index: usize) -> Option<Item> {
        self.dataset.get(index)
    }

    /// Returns the length of the dataset
    fn len(&self) -> usize {
        self.dataset.len()
    }
}

#[async_trait]
impl LoadableDataset<Item> for Dataset {
    /// Load a headerless `label,headline` CSV file
    async fn load(path: &str) -> Result<Self, DatasetError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| DatasetError::Io {
                path: path.to_string(),
                source,
            })?;

        Self::from_reader(bytes.as_slice())
    }
}

impl Dataset {
    /// Wrap a list of items
    pub fn new(items: Vec<Item>) -> Self {
        Self {
            dataset: InMemDataset::new(items),
        }
    }

    /// Parse headerless `label,headline` CSV records. Fields that are not valid UTF-8 are read
    /// as Latin-1, and labels must name a known sentiment.
    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self, DatasetError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut items = Vec::new();

        for record in reader.byte_records() {
            let record = record?;
            let line = record
                .position()
                .map(|position| position.line())
                .unwrap_or(items.len() as u64 + 1);

            let (Some(label), Some(text)) = (record.get(0), record.get(1)) else {
                return Err(DatasetError::MissingField { line });
            };

            let label = decode_text(label).trim().to_string();

            if Sentiment::try_from(label.as_str()).is_err() {
                return Err(DatasetError::UnknownLabel { line, label });
            }

            items.push(Item::new(label, decode_text(text)));
        }

        if items.is_empty() {
            return Err(DatasetError::Empty);
        }

        Ok(Self::new(items))
    }

    /// All items, in file order
    pub fn items(&self) -> Vec<Item> {
        (0..self.len()).filter_map(|index| self.get(index)).collect()
    }

    /// The headline texts, in file order
    pub fn texts(&self) -> Vec<String> {
        self.items().iter().map(|item| item.input().to_string()).collect()
    }

    /// The labels, in file order
    pub fn labels(&self) -> Vec<String> {
        self.items()
            .iter()
            .map(|item| item.class_label().to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::features::tfidf::tokenize;

    const CSV: &str = "\
neutral,\"According to Gran , the company has no plans to move all production to Russia .\"
positive,Operating profit rose to EUR 13.1 mn from EUR 8.7 mn
negative,\"Sales in Finland decreased by 10.5 % in January , while sales outside Finland dropped .\"
";

    #[test]
    fn test_from_reader() {
        let dataset = Dataset::from_reader(CSV.as_bytes()).unwrap();

        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.labels(), vec!["neutral", "positive", "negative"]);
        assert_eq!(
            dataset.get(1),
            Some(Item::new(
                "positive".to_string(),
                "Operating profit rose to EUR 13.1 mn from EUR 8.7 mn".to_string()
            ))
        );
    }

    #[test]
    fn test_latin1_text_keeps_its_letters() {
        let bytes = b"neutral,Kone's CEO M\xe4kinen opened the plant in Espoo\npositive,Sales rose \xe2\x82\xac 5 mn\n";
        let dataset = Dataset::from_reader(&bytes[..]).unwrap();

        assert_eq!(
            dataset.texts(),
            vec![
                "Kone's CEO M\u{e4}kinen opened the plant in Espoo",
                "Sales rose \u{20ac} 5 mn"
            ]
        );
        assert!(tokenize(&dataset.texts()[0]).contains(&"m\u{e4}kinen".to_string()));
    }

    #[test]
    fn test_unknown_label() {
        let result = Dataset::from_reader("neutral,fine\nbullish,shares soared\n".as_bytes());

        match result {
            Err(DatasetError::UnknownLabel { line, label }) => {
                assert_eq!(line, 2);
                assert_eq!(label, "bullish");
            }
            _ => panic!("expected an unknown label error"),
        }
    }

    #[test]
    fn test_missing_text_column() {
        let result = Dataset::from_reader("neutral\n".as_bytes());

        assert!(matches!(result, Err(DatasetError::MissingField { line: 1 })));
    }

    #[test]
    fn test_empty_file() {
        assert!(matches!(
            Dataset::from_reader("".as_bytes()),
            Err(DatasetError::Empty)
        ));
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let result = Dataset::load("does/not/exist.csv").await;

        assert!(matches!(result, Err(DatasetError::Io { .. })));
    }

    #[tokio::test]
    async fn test_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("all-data.csv");
        std::fs::write(&path, CSV).unwrap();

        let dataset = Dataset::load(path.to_str().unwrap()).await.unwrap();

        assert_eq!(dataset.len(), 3);
        assert_eq!(DATASET, "headlines");
    }
}
