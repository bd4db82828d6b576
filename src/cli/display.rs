use crate::pipelines::text_classification::{AnalysisError, Prediction};

const RULE: &str = "==================================================";

/// Frame a prediction for the terminal
pub fn framed(text: &str, prediction: &Prediction) -> String {
    format!(
        "\n{RULE}\
         \nText analyzed: {text}\
         \nSentiment: {}\
         \nConfidence: {:.2}%\
         \n{RULE}",
        prediction.sentiment.as_str().to_uppercase(),
        prediction.confidence,
    )
}

/// Render the outcome of one analysis, successful or not
pub fn outcome(text: &str, result: &Result<Prediction, AnalysisError>) -> String {
    match result {
        Ok(prediction) => framed(text, prediction),
        Err(error @ AnalysisError::ModelNotFound(_)) => format!("Warning: {error}"),
        Err(error) => format!("Error during analysis: {error}"),
    }
}

/// Render a file that could not be read
pub fn read_error(error: &std::io::Error) -> String {
    format!("Error reading file: {error}")
}
