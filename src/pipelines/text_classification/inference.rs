use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use burn::{
    backend::{ndarray::NdArrayDevice, NdArray},
    config::Config as _,
    data::dataloader::batcher::Batcher as _,
    module::Module,
    record::{CompactRecorder, Recorder},
    tensor::{backend::Backend, Tensor},
};
use log::info;

use crate::{
    datasets::{
        headlines::{self, DATASET},
        DatasetError, LoadableDataset,
    },
    features::{Features, LabelEncoder, LabelError},
    models::dense,
    utils::{classes::argmax, tensors},
};

use super::{Batcher, Prediction, Sentiment, SentimentError};

/// Define inference function
pub fn infer<B: Backend>(
    device: B::Device,       // Device on which to perform computation
    features: Arc<Features>, // Vectorizer fitted on the training corpus
    model_path: &str,        // Path stem of the saved model, or its `.mpk` file
    samples: Vec<String>,    // Text samples for inference
) -> Result<(Tensor<B, 2>, dense::Config), AnalysisError> {
    let stem = model_stem(model_path);

    let weights = format!("{stem}.mpk");
    if !Path::new(&weights).exists() {
        return Err(AnalysisError::ModelNotFound(weights));
    }

    // Load the model configuration
    let config = dense::Config::load(format!("{stem}.json"))
        .map_err(|e| AnalysisError::Config(e.to_string()))?;

    // The vectorizer is re-fitted rather than restored, so its width has to be checked
    if config.input_size != features.len() {
        return Err(AnalysisError::FeatureMismatch {
            expected: config.input_size,
            actual: features.len(),
        });
    }

    let batcher = Batcher::<B>::new(features, device.clone());

    let record = CompactRecorder::new()
        .load(PathBuf::from(stem), &device)
        .map_err(|e| AnalysisError::Weights(e.to_string()))?;

    let model = config.init::<B>(&device).load_record(record);

    let item = batcher.batch(samples);

    Ok((model.infer(item.inputs), config))
}

/// The path stem shared by a model's weights and config
pub fn model_stem(model_path: &str) -> &str {
    model_path.strip_suffix(".mpk").unwrap_or(model_path)
}

/// Predicts headline sentiment with a vectorizer fitted on the training corpus
#[derive(Clone, Debug)]
pub struct Analyzer {
    features: Arc<Features>,
}

impl Analyzer {
    /// Wrap an already fitted vectorizer
    pub fn new(features: Features) -> Self {
        Self {
            features: Arc::new(features),
        }
    }

    /// Fit the vectorizer on the texts of a dataset
    pub fn fit(dataset: &headlines::Dataset) -> Self {
        Self::new(Features::fit(&dataset.texts()))
    }

    /// Load the training CSV and fit the vectorizer on it
    pub async fn load(data_path: &str) -> Result<Self, DatasetError> {
        info!("Loading {} dataset from {}...", DATASET, data_path);

        let dataset = headlines::Dataset::load(data_path).await?;

        Ok(Self::fit(&dataset))
    }

    /// The fitted vectorizer
    pub fn features(&self) -> &Features {
        &self.features
    }

    /// Predict the sentiment of one text with the model saved at `model_path`
    pub fn analyze(&self, text: &str, model_path: &str) -> Result<Prediction, AnalysisError> {
        let (probabilities, config) = infer::<NdArray>(
            NdArrayDevice::Cpu,
            self.features.clone(),
            model_path,
            vec![text.to_string()],
        )?;

        let scores = tensors::to_rows(probabilities)
            .into_iter()
            .next()
            .unwrap_or_default();

        let (class_id, probability) = argmax(&scores).ok_or(AnalysisError::NoOutput)?;

        let encoder = LabelEncoder::from_id2label(config.id2label);
        let sentiment = Sentiment::try_from(encoder.decode(class_id)?)?;

        Ok(Prediction::new(sentiment, probability * 100.0))
    }
}

/// Analysis Error
#[derive(thiserror::Error, Debug)]
pub enum AnalysisError {
    /// There is no trained model at the given path
    #[error("Model file '{0}' not found. You need to train the model first.")]
    ModelNotFound(String),

    /// The model configuration could not be read
    #[error("Unable to load model config: {0}")]
    Config(String),

    /// The model weights could not be read
    #[error("Unable to load trained model weights: {0}")]
    Weights(String),

    /// The vectorizer and the model disagree on the feature width
    #[error(
        "The model expects {expected} features but the vectorizer produces {actual}; \
         retrain the model on the current dataset"
    )]
    FeatureMismatch {
        /// Input width of the model
        expected: usize,

        /// Width of the re-fitted vectorizer
        actual: usize,
    },

    /// The model produced no scores
    #[error("The model produced no output")]
    NoOutput,

    /// The predicted class id has no label
    #[error(transparent)]
    Label(#[from] LabelError),

    /// The predicted label is not a sentiment
    #[error(transparent)]
    Sentiment(#[from] SentimentError),
}
