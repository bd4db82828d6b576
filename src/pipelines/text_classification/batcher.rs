use std::sync::Arc;

use burn::{
    data::dataloader,
    tensor::{backend::Backend, Int, Tensor},
};
use derive_new::new;

use crate::{features::Features, utils::tensors};

use super::Sample;

/// An inference batch for text classification
#[derive(Clone, Debug, new)]
pub struct Infer<B: Backend> {
    /// Feature vectors as a 2D tensor: [batch_size, n_features]
    pub inputs: Tensor<B, 2>,
}

/// A training batch for text classification
#[derive(Clone, Debug, new)]
pub struct Train<B: Backend> {
    /// Feature vectors as a 2D tensor: [batch_size, n_features]
    pub inputs: Tensor<B, 2>,

    /// Class ids for the batch
    pub targets: Tensor<B, 1, Int>,
}

/// Struct for batching text classification items
#[derive(Clone, new)]
pub struct Batcher<B: Backend> {
    /// The fitted vectorizer for raw text
    features: Arc<Features>,

    /// Device on which to perform computation (e.g., CPU or CUDA device)
    device: B::Device,
}

impl<B: Backend> Batcher<B> {
    /// Width of the feature vectors this batcher produces
    pub fn width(&self) -> usize {
        self.features.len()
    }
}

/// Implement Batcher trait for Batcher struct for inference
impl<B: Backend> dataloader::batcher::Batcher<String, Infer<B>> for Batcher<B> {
    /// Vectorizes raw texts into an inference batch
    fn batch(&self, items: Vec<String>) -> Infer<B> {
        let matrix = self.features.transform(&items);

        Infer {
            inputs: tensors::from_matrix(&matrix, &self.device),
        }
    }
}

/// Implement Batcher trait for Batcher struct for training
impl<B: Backend> dataloader::batcher::Batcher<Sample, Train<B>> for Batcher<B> {
    /// Stacks vectorized samples into a training batch
    fn batch(&self, items: Vec<Sample>) -> Train<B> {
        let rows: Vec<&[f32]> = items.iter().map(|item| item.features.as_slice()).collect();
        let class_ids: Vec<usize> = items.iter().map(|item| item.class_id).collect();

        Train {
            inputs: tensors::stack_rows(&rows, self.width(), &self.device),
            targets: tensors::class_ids(&class_ids, &self.device),
        }
    }
}

#[cfg(test)]
mod tests {
    use burn::{
        backend::{ndarray::NdArrayDevice, NdArray},
        data::dataloader::batcher::Batcher as _,
    };
    use pretty_assertions::assert_eq;

    use super::*;

    fn batcher() -> Batcher<NdArray> {
        let features = Features::fit(&["shares rose", "shares fell", "shares"]);

        Batcher::new(Arc::new(features), NdArrayDevice::Cpu)
    }

    #[test]
    fn test_infer_batch() {
        let batcher = batcher();
        let batch: Infer<NdArray> = batcher.batch(vec!["Shares rose".to_string()]);

        assert_eq!(batch.inputs.dims(), [1, batcher.width()]);
    }

    #[test]
    fn test_train_batch() {
        let batcher = batcher();
        let width = batcher.width();
        let samples = vec![
            Sample {
                features: vec![0.5; width],
                class_id: 2,
            },
            Sample {
                features: vec![0.0; width],
                class_id: 0,
            },
        ];

        let batch: Train<NdArray> = batcher.batch(samples);

        assert_eq!(batch.inputs.dims(), [2, width]);
        assert_eq!(batch.targets.into_data().convert::<i64>().value, vec![2, 0]);
    }
}
