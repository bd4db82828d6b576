//! Command line tool to train the headline sentiment model

use anyhow::anyhow;
use burn::backend::{ndarray::NdArrayDevice, Autodiff, NdArray};
use headline_sentiment::{
    cli::{init_logger, DEFAULT_DATA_PATH},
    datasets::{headlines, LoadableDataset},
    models::dense,
    pipelines::text_classification::{self, TrainingConfig},
};
use log::info;
use pico_args::Arguments;

const HELP: &str = "\
Usage: train [OPTIONS]

Options:
  -h, --help           Print help
  -d, --data           The labelled headline CSV (defaults to 'data/raw/all-data.csv')
  -m, --model          Path stem of the saved model (defaults to 'models/headline_model')
  -n, --num-epochs     Number of epochs to train for
  -b, --batch-size     Batch size
  -p, --plot           Where to write the training history chart (defaults to 'training_history.svg')
  -a, --artifact-dir   Directory for training logs (defaults to 'artifacts')
";

#[derive(Debug)]
struct Args {
    data: String,
    model: Option<String>,
    num_epochs: Option<usize>,
    batch_size: Option<usize>,
    plot: Option<String>,
    artifact_dir: Option<String>,
}

impl Args {
    fn parse() -> anyhow::Result<Option<Self>> {
        let mut pargs = Arguments::from_env();

        // Help has a higher priority and should be handled separately.
        if pargs.contains(["-h", "--help"]) {
            return Ok(None);
        }

        let args = Args {
            data: pargs
                .opt_value_from_str(["-d", "--data"])?
                .unwrap_or_else(|| DEFAULT_DATA_PATH.to_string()),
            model: pargs.opt_value_from_str(["-m", "--model"])?,
            num_epochs: pargs.opt_value_from_str(["-n", "--num-epochs"])?,
            batch_size: pargs.opt_value_from_str(["-b", "--batch-size"])?,
            plot: pargs.opt_value_from_str(["-p", "--plot"])?,
            artifact_dir: pargs.opt_value_from_str(["-a", "--artifact-dir"])?,
        };

        let remaining = pargs.finish();
        if !remaining.is_empty() {
            return Err(anyhow!("Unexpected arguments: {:?}", remaining));
        }

        Ok(Some(args))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logger();

    let Some(args) = Args::parse()? else {
        print!("{}", HELP);

        return Ok(());
    };

    let mut config = TrainingConfig::new();

    if let Some(model) = args.model {
        config.model_path = model;
    }

    if let Some(num_epochs) = args.num_epochs {
        config.num_epochs = num_epochs;
    }

    if let Some(batch_size) = args.batch_size {
        config.batch_size = batch_size;
    }

    if let Some(plot) = args.plot {
        config.plot_path = plot;
    }

    if let Some(artifact_dir) = args.artifact_dir {
        config.artifact_dir = artifact_dir;
    }

    info!("Loading {} dataset from {}...", headlines::DATASET, args.data);
    let dataset = headlines::Dataset::load(&args.data).await?;

    let device = NdArrayDevice::Cpu;
    let report = text_classification::train::<
        Autodiff<NdArray>,
        dense::Model<Autodiff<NdArray>>,
    >(device, dataset, config)
    .await?;

    println!(
        "Vocabulary size: {}\nFeatures after selection: {}",
        report.vocabulary_size, report.n_features
    );
    println!(
        "Accuracy on training data: {:.2}% \nError on training data: {:.2}%",
        report.train.accuracy,
        report.train.error()
    );
    println!(
        "Accuracy on test data: {:.2}% \nError on test data: {:.2}%",
        report.test.accuracy,
        report.test.error()
    );

    Ok(())
}
