use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tb_core::config::non_blank;
use tb_core::{Error, InferenceModel, Result};

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
struct Content {
    role: &'static str,
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ApiError,
}

#[derive(Deserialize)]
struct ApiError {
    message: String,
}

pub struct GeminiModel {
    client: Client,
    api_key: String,
    model_name: String,
    base_url: String,
}

impl GeminiModel {
    /// Fails when no API key is given, so a broken setup is caught at startup
    /// instead of on the first request.
    pub fn new(api_key: Option<&str>, model_name: &str) -> Result<Self> {
        let api_key = non_blank(api_key)
            .ok_or_else(|| Error::ConfigurationMissing("GEMINI_API_KEY".to_string()))?;
        let client = Client::builder().timeout(Duration::from_secs(120)).build()?;
        Ok(Self {
            client,
            api_key: api_key.to_string(),
            model_name: model_name.to_string(),
            base_url: GEMINI_BASE_URL.to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl fmt::Debug for GeminiModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiModel")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .field("model_name", &self.model_name)
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl InferenceModel for GeminiModel {
    fn name(&self) -> &str {
        &self.model_name
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let request = GenerateRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self
            .client
            .post(format!("{}/models/{}:generateContent", self.base_url, self.model_name))
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(Error::Generation(format!("HTTP {}: {}", status.as_u16(), message.trim())));
        }

        let data: GenerateResponse = response.json().await?;
        if data.candidates.is_empty() {
            let reason = data
                .prompt_feedback
                .and_then(|f| f.block_reason)
                .unwrap_or_else(|| "no candidates returned".to_string());
            return Err(Error::Generation(reason));
        }

        let text: String = data
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(Error::Generation("empty response text".to_string()));
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{SummaryGenerator, GENERATION_FAILED};
    use std::sync::Arc;
    use axum::extract::Path;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{json, Value};

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/v1beta", addr)
    }

    #[test]
    fn test_model_requires_api_key() {
        let err = GeminiModel::new(None, "gemini-2.5-flash").unwrap_err();
        assert_eq!(err.to_string(), "Missing configuration: GEMINI_API_KEY");
        assert!(GeminiModel::new(Some(" "), "gemini-2.5-flash").is_err());
        assert!(GeminiModel::new(Some("test-key"), "gemini-2.5-flash").is_ok());
    }

    #[test]
    fn test_debug_redacts_key() {
        let model = GeminiModel::new(Some("super-secret"), "gemini-2.5-flash").unwrap();
        assert!(!format!("{:?}", model).contains("super-secret"));
    }

    #[tokio::test]
    async fn test_generate_joins_parts() {
        let router = Router::new().route(
            "/v1beta/models/:call",
            post(|Path(call): Path<String>, headers: HeaderMap, Json(body): Json<Value>| async move {
                assert_eq!(call, "test-model:generateContent");
                assert_eq!(headers["x-goog-api-key"], "test-key");
                assert_eq!(body["contents"][0]["parts"][0]["text"], "the prompt");
                Json(json!({
                    "candidates": [{
                        "content": { "parts": [{ "text": "- Alpha " }, { "text": "is beta." }] },
                        "finishReason": "STOP"
                    }]
                }))
            }),
        );
        let model = GeminiModel::new(Some("test-key"), "test-model")
            .unwrap()
            .with_base_url(serve(router).await);

        assert_eq!(model.generate("the prompt").await.unwrap(), "- Alpha is beta.");
    }

    #[tokio::test]
    async fn test_api_error_is_reported() {
        let router = Router::new().route(
            "/v1beta/models/:call",
            post(|| async {
                (
                    StatusCode::TOO_MANY_REQUESTS,
                    Json(json!({ "error": { "code": 429, "message": "Resource has been exhausted" } })),
                )
            }),
        );
        let model = GeminiModel::new(Some("k"), "m").unwrap().with_base_url(serve(router).await);
        let err = model.generate("p").await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Generation error: HTTP 429: Resource has been exhausted"
        );
    }

    #[tokio::test]
    async fn test_blocked_prompt_has_no_candidates() {
        let router = Router::new().route(
            "/v1beta/models/:call",
            post(|| async { Json(json!({ "promptFeedback": { "blockReason": "SAFETY" } })) }),
        );
        let model = GeminiModel::new(Some("k"), "m").unwrap().with_base_url(serve(router).await);
        let err = model.generate("p").await.unwrap_err();
        assert!(matches!(err, Error::Generation(ref r) if r == "SAFETY"));
    }

    #[tokio::test]
    async fn test_malformed_body_fails_generation() {
        let router = Router::new().route(
            "/v1beta/models/:call",
            post(|| async { "<html>upstream proxy error</html>" }),
        );
        let model = Arc::new(GeminiModel::new(Some("k"), "m").unwrap().with_base_url(serve(router).await));
        assert!(matches!(model.generate("p").await, Err(Error::Http(_))));

        let generator = SummaryGenerator::new(Some(model), 20000);
        assert_eq!(generator.generate("x", &["Alpha beta."]).await, GENERATION_FAILED);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_fails_generation() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let model = Arc::new(
            GeminiModel::new(Some("k"), "m")
                .unwrap()
                .with_base_url(format!("http://{}/v1beta", addr)),
        );
        assert!(matches!(model.generate("p").await, Err(Error::Http(_))));

        let generator = SummaryGenerator::new(Some(model), 20000);
        assert_eq!(generator.generate("x", &["Alpha beta."]).await, GENERATION_FAILED);
    }
}
