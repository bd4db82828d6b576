//! HTTP server for headline analysis

use std::sync::Arc;

use headline_sentiment::{
    cli::{init_logger, DEFAULT_DATA_PATH, DEFAULT_MODEL_PATH},
    pipelines::text_classification::Analyzer,
    server::{create_router, AppState, ServerConfig},
};
use log::{error, info};
use pico_args::Arguments;

const HELP: &str = "\
Usage: serve [OPTIONS]

Options:
  -h, --help           Print help
  --host               Host to bind to (defaults to '0.0.0.0')
  --port               Port to bind to (defaults to 8000)
  -m, --model          Path stem of the trained model (defaults to 'models/headline_model')
  -d, --data           The CSV the model was trained on (defaults to 'data/raw/all-data.csv')
";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logger();

    let mut pargs = Arguments::from_env();

    if pargs.contains(["-h", "--help"]) {
        print!("{}", HELP);
        return Ok(());
    }

    let mut config = ServerConfig::default();

    if let Some(host) = pargs.opt_value_from_str("--host")? {
        config.host = host;
    }

    if let Some(port) = pargs.opt_value_from_str("--port")? {
        config.port = port;
    }

    config.model_path = pargs
        .opt_value_from_str(["-m", "--model"])?
        .unwrap_or_else(|| DEFAULT_MODEL_PATH.to_string());

    let data: String = pargs
        .opt_value_from_str(["-d", "--data"])?
        .unwrap_or_else(|| DEFAULT_DATA_PATH.to_string());

    // The server still answers requests when the dataset is unavailable
    let analyzer = match Analyzer::load(&data).await {
        Ok(analyzer) => {
            info!("Vectorizer fitted with {} features", analyzer.features().len());
            Some(analyzer)
        }
        Err(e) => {
            error!("Unable to fit the vectorizer: {}", e);
            None
        }
    };

    let state = Arc::new(AppState::new(analyzer, config.model_path.clone()));
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    info!("Listening on http://{}", config.bind_addr());

    axum::serve(listener, app).await?;

    Ok(())
}
