use std::sync::Arc;

use burn::{
    config::Config as _,
    data::{dataloader::DataLoaderBuilder, dataset::InMemDataset},
    module::{AutodiffModule, Module},
    optim::AdamConfig,
    record::{CompactRecorder, Recorder as _},
    tensor::{
        activation::log_softmax,
        backend::{AutodiffBackend, Backend},
        Data, ElementConversion, Shape, Tensor,
    },
    train::{
        metric::{AccuracyMetric, LossMetric},
        ClassificationOutput, LearnerBuilder, ValidStep,
    },
    LearningRate,
};
use log::info;
use serde::Serialize;

use crate::{
    datasets::{self, headlines},
    features::{Features, LabelEncoder},
    utils::{
        files::ensure_parent,
        plot::history_svg,
        renderer::{History, Recorder},
    },
};

use super::{batcher::Train, Batcher, Model, ModelConfig, Sample};

/// Define configuration struct for the experiment
#[derive(burn::config::Config)]
pub struct Config {
    /// Batch size
    #[config(default = 32)]
    pub batch_size: usize,

    /// Number of epochs
    #[config(default = 30)]
    pub num_epochs: usize,

    /// Adam learning rate
    #[config(default = 1e-3)]
    pub learning_rate: LearningRate,

    /// Seed for weight initialization, the train/test split and batch shuffling
    #[config(default = 42)]
    pub seed: u64,

    /// Share of the dataset held out for testing
    #[config(default = 0.2)]
    pub test_split: f64,

    /// Share of the training partition used for validation during fitting
    #[config(default = 0.1)]
    pub validation_split: f64,

    /// Path stem of the saved model; weights go to `<stem>.mpk`, the config to `<stem>.json`
    #[config(default = "\"models/headline_model\".to_string()")]
    pub model_path: String,

    /// Where to write the accuracy and loss chart
    #[config(default = "\"training_history.svg\".to_string()")]
    pub plot_path: String,

    /// Directory for the learner's metric logs
    #[config(default = "\"artifacts\".to_string()")]
    pub artifact_dir: String,
}

/// Accuracy and loss of the trained model on one partition
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Scores {
    /// Share of correct predictions, as a percentage
    pub accuracy: f32,

    /// Mean categorical cross-entropy against the one-hot targets
    pub loss: f32,
}

impl Scores {
    /// Share of wrong predictions, as a percentage
    pub fn error(&self) -> f32 {
        100.0 - self.accuracy
    }
}

/// The outcome of a training run
#[derive(Clone, Debug)]
pub struct Report {
    /// Vocabulary size before pruning
    pub vocabulary_size: usize,

    /// Feature width after pruning, which is the model's input width
    pub n_features: usize,

    /// Scores on the training partition
    pub train: Scores,

    /// Scores on the held-out test partition
    pub test: Scores,

    /// Per-epoch metrics recorded while fitting
    pub history: History,
}

/// Define train function
pub async fn train<B, M>(
    device: B::Device,            // Device on which to perform computation
    dataset: headlines::Dataset, // The full labelled dataset
    config: Config,              // Experiment configuration
) -> anyhow::Result<Report>
where
    B: AutodiffBackend,
    M: Model<B> + 'static,
    M::InnerModule: ValidStep<
        Train<<B as AutodiffBackend>::InnerBackend>,
        ClassificationOutput<<B as AutodiffBackend>::InnerBackend>,
    >,
{
    B::seed(config.seed);

    info!("Performing TF-IDF vectorization...");

    let (features, matrix) = Features::fit_transform(&dataset.texts());
    if features.is_empty() {
        return Err(anyhow!("No features survived pruning; the dataset is too small"));
    }

    let labels = dataset.labels();
    let encoder = LabelEncoder::fit(&labels);
    let class_ids = labels
        .iter()
        .map(|label| encoder.encode(label))
        .collect::<Result<Vec<_>, _>>()?;

    let samples = Sample::from_matrix(&matrix, &class_ids);
    let (train_samples, test_samples) =
        datasets::train_test_split(samples, config.test_split, config.seed);
    let (fit_samples, valid_samples) =
        datasets::validation_split(train_samples.clone(), config.validation_split);

    info!(
        "Training on {} samples, validating on {}, testing on {}",
        fit_samples.len(),
        valid_samples.len(),
        test_samples.len()
    );

    let model_config = M::Config::for_task(features.len(), &encoder);
    let model = M::init(&model_config, &device);

    let features = Arc::new(features);

    // Initialize batchers for training and validation data
    let batcher_train = Batcher::<B>::new(features.clone(), device.clone());
    let batcher_valid = Batcher::<B::InnerBackend>::new(features.clone(), device.clone());

    let dataloader_train = DataLoaderBuilder::new(batcher_train)
        .batch_size(config.batch_size)
        .shuffle(config.seed)
        .num_workers(1)
        .build(InMemDataset::new(fit_samples));

    let dataloader_valid = DataLoaderBuilder::new(batcher_valid.clone())
        .batch_size(config.batch_size)
        .num_workers(1)
        .build(InMemDataset::new(valid_samples));

    let optimizer = AdamConfig::new().init();

    let (recorder, history) = Recorder::new();

    info!("Training the model...");

    let learner = LearnerBuilder::new(&config.artifact_dir)
        .metric_train_numeric(AccuracyMetric::new())
        .metric_valid_numeric(AccuracyMetric::new())
        .metric_train_numeric(LossMetric::new())
        .metric_valid_numeric(LossMetric::new())
        .renderer(recorder)
        .devices(vec![device.clone()])
        .num_epochs(config.num_epochs)
        .summary()
        .build(model, optimizer, config.learning_rate);

    let model_trained = learner.fit(dataloader_train, dataloader_valid);

    let model_valid = model_trained.valid();
    let train_scores = evaluate(
        &model_valid,
        &batcher_valid,
        &encoder,
        &train_samples,
        config.batch_size,
    )?;
    let test_scores = evaluate(
        &model_valid,
        &batcher_valid,
        &encoder,
        &test_samples,
        config.batch_size,
    )?;

    // Save the configuration and the trained model
    ensure_parent(&config.model_path).await?;

    model_config
        .save(format!("{}.json", config.model_path))
        .map_err(|e| anyhow!("Unable to save model config: {}", e))?;

    CompactRecorder::new()
        .record(model_trained.into_record(), config.model_path.clone().into())
        .map_err(|e| anyhow!("Unable to save trained model weights: {}", e))?;

    info!("Model saved as {}.mpk", config.model_path);

    let history = history
        .lock()
        .map_err(|_| anyhow!("Training history is unavailable"))?
        .clone();

    ensure_parent(&config.plot_path).await?;
    tokio::fs::write(&config.plot_path, history_svg(&history)).await?;

    info!("Training history saved as {}", config.plot_path);

    Ok(Report {
        vocabulary_size: features.vocabulary_len(),
        n_features: features.len(),
        train: train_scores,
        test: test_scores,
        history,
    })
}

/// Score a model on a set of samples, batch by batch
pub fn evaluate<B, M>(
    model: &M,
    batcher: &Batcher<B>,
    encoder: &LabelEncoder,
    samples: &[Sample],
    batch_size: usize,
) -> anyhow::Result<Scores>
where
    B: Backend,
    M: ValidStep<Train<B>, ClassificationOutput<B>>,
{
    if samples.is_empty() {
        return Ok(Scores::default());
    }

    let mut correct = 0i64;
    let mut loss = 0.0f32;

    for chunk in samples.chunks(batch_size.max(1)) {
        let batch: Train<B> = burn::data::dataloader::batcher::Batcher::batch(batcher, chunk.to_vec());
        let ClassificationOutput { output, targets, .. } = model.step(batch);
        let [n, n_classes] = output.dims();

        let one_hot = chunk
            .iter()
            .map(|sample| encoder.one_hot(sample.class_id))
            .collect::<Result<Vec<_>, _>>()?
            .concat();
        let one_hot: Tensor<B, 2> = Tensor::from_data(
            Data::new(
                one_hot.into_iter().map(|value| value.elem()).collect(),
                Shape::new([n, n_classes]),
            ),
            &output.device(),
        );

        let batch_loss = (one_hot * log_softmax(output.clone(), 1)).sum().neg();
        loss += batch_loss.into_scalar().elem::<f32>();

        let predicted = output.argmax(1).reshape([n]);
        correct += predicted.equal(targets).int().sum().into_scalar().elem::<i64>();
    }

    let total = samples.len() as f32;

    Ok(Scores {
        accuracy: 100.0 * correct as f32 / total,
        loss: loss / total,
    })
}
