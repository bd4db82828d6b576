use std::{collections::BTreeMap, fmt::Display};

use burn::{
    module::AutodiffModule,
    tensor::{
        backend::{AutodiffBackend, Backend},
        Tensor,
    },
    train::{ClassificationOutput, TrainStep},
};

use crate::features::LabelEncoder;

use super::batcher::{Infer, Train};

/// A trait for models that can be trained in the Text Classification pipeline
pub trait Model<B>: AutodiffModule<B> + TrainStep<Train<B>, ClassificationOutput<B>> + Display
where
    B: AutodiffBackend,
{
    /// The model configuration
    type Config: ModelConfig;

    /// Initialize a fresh model from its configuration
    fn init(config: &Self::Config, device: &B::Device) -> Self;

    /// Perform a forward pass
    fn forward(&self, item: Train<B>) -> ClassificationOutput<B>;

    /// Defines forward pass for inference, returning class probabilities
    fn infer(&self, input: Infer<B>) -> Tensor<B, 2>;
}

/// A trait for configs that can be used for Text Classification models
pub trait ModelConfig: burn::config::Config + Clone {
    /// Configure a model for a feature width and a set of classes
    fn for_task(input_size: usize, labels: &LabelEncoder) -> Self;

    /// The feature width the model expects
    fn input_size(&self) -> usize;

    /// A mapping from class ids to class name labels
    fn id2label(&self) -> &BTreeMap<usize, String>;
}

/// Convert logits into class probabilities
pub fn probabilities<B: Backend>(logits: Tensor<B, 2>) -> Tensor<B, 2> {
    burn::tensor::activation::softmax(logits, 1)
}
