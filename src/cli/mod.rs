//! Shared pieces of the command line tools

/// Printing analysis results
pub mod display;

/// The interactive prompt
pub mod interactive;

/// The default path of the labelled headline CSV
pub static DEFAULT_DATA_PATH: &str = "data/raw/all-data.csv";

/// The default path stem of the trained model
pub static DEFAULT_MODEL_PATH: &str = "models/headline_model";

/// Initialize logging, showing `info` messages unless `RUST_LOG` says otherwise
pub fn init_logger() {
    if std::env::var_os("RUST_LOG").is_none() {
        std::env::set_var("RUST_LOG", "info");
    }

    pretty_env_logger::init();
}
