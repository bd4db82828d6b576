use burn::{
    module::Module,
    nn::{loss::CrossEntropyLossConfig, Linear},
    tensor::{
        activation::relu,
        backend::{AutodiffBackend, Backend},
        Int, Tensor,
    },
    train::ClassificationOutput,
};
use derive_new::new;

use crate::pipelines::text_classification::{self, batcher, probabilities};

use super::Config;

/// A feed-forward classifier: ReLU hidden layers and a linear output over the classes
#[derive(Module, Debug, new)]
pub struct Model<B: Backend> {
    /// Hidden layers, applied in order
    pub hidden: Vec<Linear<B>>,

    /// Linear layer producing class logits
    pub output: Linear<B>,

    /// Total number of classes
    pub n_classes: usize,
}

/// Define model behavior
impl<B: Backend> Model<B> {
    /// Class logits for a batch of feature vectors
    pub fn logits(&self, inputs: Tensor<B, 2>) -> Tensor<B, 2> {
        let hidden = self
            .hidden
            .iter()
            .fold(inputs, |x, layer| relu(layer.forward(x)));

        self.output.forward(hidden)
    }

    /// Defines forward pass for training
    pub fn forward(&self, inputs: Tensor<B, 2>, targets: Tensor<B, 1, Int>) -> ClassificationOutput<B> {
        let output = self.logits(inputs);
        let targets = targets.to_device(&output.device());

        // Cross entropy over the softmax of the logits
        let loss = CrossEntropyLossConfig::new()
            .init(&output.device())
            .forward(output.clone(), targets.clone());

        ClassificationOutput {
            loss,
            output,
            targets,
        }
    }

    /// Defines forward pass for inference
    pub fn infer(&self, inputs: Tensor<B, 2>) -> Tensor<B, 2> {
        probabilities(self.logits(inputs))
    }
}

impl<B: AutodiffBackend> text_classification::Model<B> for Model<B> {
    type Config = Config;

    fn init(config: &Self::Config, device: &B::Device) -> Self {
        config.init(device)
    }

    fn forward(&self, item: batcher::Train<B>) -> ClassificationOutput<B> {
        self.forward(item.inputs, item.targets)
    }

    fn infer(&self, input: batcher::Infer<B>) -> Tensor<B, 2> {
        self.infer(input.inputs)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use burn::{
        backend::{ndarray::NdArrayDevice, NdArray},
        tensor::Distribution,
    };
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::utils::tensors;

    fn config() -> Config {
        let id2label = BTreeMap::from([
            (0, "negative".to_string()),
            (1, "neutral".to_string()),
            (2, "positive".to_string()),
        ]);

        Config::new(12, id2label)
    }

    #[test]
    fn test_layer_shapes() {
        let model = config().init::<NdArray>(&NdArrayDevice::Cpu);

        let widths: Vec<[usize; 2]> = model
            .hidden
            .iter()
            .map(|layer| layer.weight.val().dims())
            .collect();

        assert_eq!(widths, vec![[12, 64], [64, 32], [32, 16]]);
        assert_eq!(model.output.weight.val().dims(), [16, 3]);
        assert_eq!(model.n_classes, 3);
    }

    #[test]
    fn test_infer_returns_probabilities() {
        let device = NdArrayDevice::Cpu;
        let model = config().init::<NdArray>(&device);
        let inputs = Tensor::<NdArray, 2>::random([4, 12], Distribution::Default, &device);

        let probabilities = tensors::to_rows(model.infer(inputs));

        assert_eq!(probabilities.len(), 4);
        for row in probabilities {
            assert_eq!(row.len(), 3);
            assert!((row.iter().sum::<f32>() - 1.0).abs() < 1e-4);
            assert!(row.iter().all(|p| (0.0..=1.0).contains(p)));
        }
    }

    #[test]
    fn test_forward_loss_is_finite() {
        let device = NdArrayDevice::Cpu;
        let model = config().init::<NdArray>(&device);
        let inputs = Tensor::<NdArray, 2>::random([2, 12], Distribution::Default, &device);
        let targets = tensors::class_ids::<NdArray>(&[0, 2], &device);

        let output = model.forward(inputs, targets);
        let loss = output.loss.into_data().convert::<f32>().value[0];

        assert_eq!(output.output.dims(), [2, 3]);
        assert!(loss.is_finite() && loss > 0.0);
    }
}
