//! Command line tool to classify headlines with a trained model

use std::io;

use headline_sentiment::{
    cli::{display, init_logger, interactive, DEFAULT_DATA_PATH, DEFAULT_MODEL_PATH},
    pipelines::text_classification::Analyzer,
    utils::files::read_text,
};
use pico_args::Arguments;

const HELP: &str = "\
Usage: analyze [OPTIONS]

Without a headline or a file, headlines are read interactively.

Options:
  -h, --help           Print help
  -t, --headline       The headline to analyze
  -f, --file           Analyze the contents of a file as one text
  -m, --model          Path stem of the trained model (defaults to 'models/headline_model')
  -d, --data           The CSV the model was trained on (defaults to 'data/raw/all-data.csv')
";

#[derive(Debug)]
struct Args {
    /// Prints the usage menu
    help: bool,

    headline: Option<String>,
    file: Option<String>,
    model: String,
    data: String,
}

fn parse_args() -> Result<Args, pico_args::Error> {
    let mut pargs = Arguments::from_env();

    let args = Args {
        help: pargs.contains(["-h", "--help"]),
        headline: pargs.opt_value_from_str(["-t", "--headline"])?,
        file: pargs.opt_value_from_str(["-f", "--file"])?,
        model: pargs
            .opt_value_from_str(["-m", "--model"])?
            .unwrap_or_else(|| DEFAULT_MODEL_PATH.to_string()),
        data: pargs
            .opt_value_from_str(["-d", "--data"])?
            .unwrap_or_else(|| DEFAULT_DATA_PATH.to_string()),
    };

    Ok(args)
}

#[tokio::main]
async fn main() {
    init_logger();

    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let args = parse_args()?;

    if args.help {
        println!("{}", HELP);
        return Ok(());
    }

    let analyzer = Analyzer::load(&args.data).await?;

    let analyze = |text: &str| display::outcome(text, &analyzer.analyze(text, &args.model));

    if let Some(headline) = &args.headline {
        println!("{}", analyze(headline));
    } else if let Some(file) = &args.file {
        match read_text(file).await {
            Ok(text) => println!("{}", analyze(&text)),
            Err(e) => println!("{}", display::read_error(&e)),
        }
    } else {
        interactive::run(io::stdin().lock(), io::stdout(), analyze)?;
    }

    Ok(())
}
