use std::fmt::Display;

use derive_new::new;
use serde::{Deserialize, Serialize};

/// The sentiment classes of a headline, in label-encoder order
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    /// Bad news
    Negative,

    /// Neither good nor bad news
    Neutral,

    /// Good news
    Positive,
}

impl Sentiment {
    /// Every sentiment, in label-encoder order
    pub const ALL: [Sentiment; 3] = [Sentiment::Negative, Sentiment::Neutral, Sentiment::Positive];

    /// The label used for this sentiment in the dataset
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
            Sentiment::Positive => "positive",
        }
    }
}

impl TryFrom<&str> for Sentiment {
    type Error = SentimentError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Sentiment::ALL
            .into_iter()
            .find(|sentiment| sentiment.as_str() == value)
            .ok_or_else(|| SentimentError::Unknown(value.to_string()))
    }
}

impl Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Sentiment Error
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum SentimentError {
    /// No sentiment found for the given string
    #[error("no sentiment found for {0}")]
    Unknown(String),
}

/// The predicted sentiment of a text
#[derive(Debug, Clone, Copy, PartialEq, Serialize, new)]
pub struct Prediction {
    /// The most likely class
    pub sentiment: Sentiment,

    /// Softmax probability of that class, as a percentage
    pub confidence: f32,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_labels_round_trip() {
        for sentiment in Sentiment::ALL {
            assert_eq!(Sentiment::try_from(sentiment.as_str()), Ok(sentiment));
        }
    }

    #[test]
    fn test_order_is_alphabetical() {
        let mut labels: Vec<&str> = Sentiment::ALL.iter().map(Sentiment::as_str).collect();
        labels.sort();

        assert_eq!(labels, vec!["negative", "neutral", "positive"]);
        assert!(Sentiment::Negative < Sentiment::Neutral);
    }

    #[test]
    fn test_unknown() {
        assert_eq!(
            Sentiment::try_from("Positive"),
            Err(SentimentError::Unknown("Positive".to_string()))
        );
    }

    #[test]
    fn test_serialize_lowercase() {
        let json = serde_json::to_string(&Prediction::new(Sentiment::Neutral, 51.5)).unwrap();

        assert_eq!(json, r#"{"sentiment":"neutral","confidence":51.5}"#);
    }
}
