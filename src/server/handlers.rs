use std::sync::Arc;

use axum::{
    extract::{rejection::FormRejection, State},
    Form, Json,
};
use log::{error, info, warn};
use serde::{Deserialize, Serialize};

use crate::pipelines::text_classification::Prediction;

use super::AppState;

/// The submitted form
#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeForm {
    /// The headline to classify; a missing field reads as empty
    #[serde(default)]
    pub headline: String,
}

/// The JSON body returned by `POST /analyze`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnalyzeResponse {
    /// The headline was classified
    Success {
        /// The trimmed headline that was analyzed
        headline: String,
        /// The predicted sentiment, in lower case
        sentiment: String,
        /// Formatted as a percentage with two decimals
        confidence: String,
    },
    /// Nothing was classified
    Failure {
        /// What went wrong
        error: String,
    },
}

impl AnalyzeResponse {
    /// Report a prediction for a headline
    pub fn success(headline: String, prediction: &Prediction) -> Self {
        AnalyzeResponse::Success {
            headline,
            sentiment: prediction.sentiment.to_string(),
            confidence: format!("{:.2}%", prediction.confidence),
        }
    }

    /// Report an error
    pub fn failure(error: impl ToString) -> Self {
        AnalyzeResponse::Failure {
            error: error.to_string(),
        }
    }
}

/// Classify a submitted headline
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    form: Result<Form<AnalyzeForm>, FormRejection>,
) -> Json<AnalyzeResponse> {
    // A body that is not a urlencoded form carries no headline
    let form = form.map(|Form(form)| form).unwrap_or_else(|rejection| {
        warn!("Unreadable form: {}", rejection);
        AnalyzeForm::default()
    });

    let headline = form.headline.trim().to_string();

    if headline.is_empty() {
        return Json(AnalyzeResponse::failure("No headline provided"));
    }

    let Some(analyzer) = state.analyzer.clone() else {
        return Json(AnalyzeResponse::failure("Vectorizer not loaded"));
    };

    let model_path = state.model_path.clone();
    let text = headline.clone();

    // Inference is CPU bound
    let result = tokio::task::spawn_blocking(move || analyzer.analyze(&text, &model_path)).await;

    let response = match result {
        Ok(Ok(prediction)) => {
            info!("{} -> {}", headline, prediction.sentiment);
            AnalyzeResponse::success(headline, &prediction)
        }
        Ok(Err(e)) => {
            error!("Analysis failed: {}", e);
            AnalyzeResponse::failure(e)
        }
        Err(e) => {
            error!("Analysis task failed: {}", e);
            AnalyzeResponse::failure(e)
        }
    };

    Json(response)
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::{
        features::Features,
        pipelines::text_classification::{Analyzer, Sentiment},
        server::create_router,
    };

    async fn post(state: AppState, body: &'static str) -> (StatusCode, Value) {
        send(state, Some("application/x-www-form-urlencoded"), body).await
    }

    async fn send(
        state: AppState,
        content_type: Option<&str>,
        body: &'static str,
    ) -> (StatusCode, Value) {
        let mut request = Request::builder().method("POST").uri("/analyze");
        if let Some(content_type) = content_type {
            request = request.header(header::CONTENT_TYPE, content_type);
        }
        let request = request.body(Body::from(body)).unwrap();

        let response = create_router(Arc::new(state)).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn analyzer() -> Analyzer {
        Analyzer::new(Features::fit(&["shares rose", "shares fell", "shares"]))
    }

    #[tokio::test]
    async fn test_missing_headline() {
        let state = AppState::new(Some(analyzer()), "models/headline_model");

        let (status, body) = post(state, "").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "error": "No headline provided" }));
    }

    #[tokio::test]
    async fn test_blank_headline() {
        let state = AppState::new(Some(analyzer()), "models/headline_model");

        let (_, body) = post(state, "headline=+++").await;

        assert_eq!(body, json!({ "error": "No headline provided" }));
    }

    const JSON_BODY: &str = r#"{"headline": "Shares rose"}"#;

    #[tokio::test]
    async fn test_body_that_is_not_a_form() {
        for content_type in [None, Some("application/json")] {
            let state = AppState::new(Some(analyzer()), "models/headline_model");

            let (status, body) = send(state, content_type, JSON_BODY).await;

            assert_eq!(status, StatusCode::OK);
            assert_eq!(body, json!({ "error": "No headline provided" }));
        }
    }

    #[tokio::test]
    async fn test_vectorizer_not_loaded() {
        let state = AppState::new(None, "models/headline_model");

        let (_, body) = post(state, "headline=Shares+rose").await;

        assert_eq!(body, json!({ "error": "Vectorizer not loaded" }));
    }

    #[tokio::test]
    async fn test_missing_model() {
        let dir = tempfile::tempdir().unwrap();
        let model_path = dir.path().join("headline_model");
        let state = AppState::new(Some(analyzer()), model_path.to_str().unwrap());

        let (_, body) = post(state, "headline=Shares+rose").await;

        assert_eq!(
            body["error"],
            format!(
                "Model file '{}' not found. You need to train the model first.",
                model_path.with_extension("mpk").display()
            )
        );
    }

    #[test]
    fn test_success_body() {
        let response = AnalyzeResponse::success(
            "Shares rose".to_string(),
            &Prediction::new(Sentiment::Positive, 91.234),
        );

        assert_eq!(
            serde_json::to_value(response).unwrap(),
            json!({
                "headline": "Shares rose",
                "sentiment": "positive",
                "confidence": "91.23%"
            })
        );
    }
}
