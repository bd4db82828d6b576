//! Adapt the dense classifier to the Text Classification pipeline

use std::collections::BTreeMap;

use burn::{nn::LinearConfig, tensor::backend::Backend};

use crate::{features::LabelEncoder, pipelines::text_classification};

use super::Model;

/// The Model Configuration
#[derive(burn::config::Config)]
pub struct Config {
    /// Width of the TF-IDF feature vectors
    pub input_size: usize,

    /// A map from class ids to class name labels
    pub id2label: BTreeMap<usize, String>,

    /// Widths of the ReLU hidden layers
    #[config(default = "vec![64, 32, 16]")]
    pub hidden_sizes: Vec<usize>,
}

impl Config {
    /// Initialize the model
    pub fn init<B: Backend>(&self, device: &B::Device) -> Model<B> {
        let mut d_input = self.input_size;
        let mut hidden = Vec::with_capacity(self.hidden_sizes.len());

        for &d_output in &self.hidden_sizes {
            hidden.push(LinearConfig::new(d_input, d_output).init(device));
            d_input = d_output;
        }

        let n_classes = self.id2label.len();
        let output = LinearConfig::new(d_input, n_classes).init(device);

        Model {
            hidden,
            output,
            n_classes,
        }
    }
}

impl text_classification::ModelConfig for Config {
    fn for_task(input_size: usize, labels: &LabelEncoder) -> Self {
        Config::new(input_size, labels.id2label().clone())
    }

    fn input_size(&self) -> usize {
        self.input_size
    }

    fn id2label(&self) -> &BTreeMap<usize, String> {
        &self.id2label
    }
}
