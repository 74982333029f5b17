//! Hugging Face Inference API backend.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::model::{Completion, ModelError};

const INFERENCE_BASE_URL: &str = "https://api-inference.huggingface.co/models";

/// Generation cap sent with every request.
const MAX_NEW_TOKENS: u32 = 200;
/// Sampling temperature sent with every request.
const TEMPERATURE: f64 = 0.7;
/// End-to-end budget for the single attempt. No retries.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Returned when the provider answers with no candidates.
///
/// TODO: this literal does not contain "No significant historical events",
/// so the handler passes it through under its normal "On {date}:" wrapper
/// instead of emitting its own fallback sentence. Align the two phrasings.
pub const EMPTY_REPLY_TEXT: &str = "No historical events found for this date";

// ─────────────────────────────────────────────────────────────────────────────
// API Wire Types
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ApiRequest<'a> {
    inputs: &'a str,
    parameters: ApiParameters,
}

#[derive(Debug, Serialize)]
struct ApiParameters {
    max_new_tokens: u32,
    temperature: f64,
}

#[derive(Debug, Deserialize)]
struct ApiGeneration {
    #[serde(default)]
    generated_text: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Backend Implementation
// ─────────────────────────────────────────────────────────────────────────────

/// Builder for creating a Hugging Face backend.
#[derive(Debug, Clone)]
pub struct HuggingFaceBackendBuilder {
    token: String,
    endpoint: String,
}

impl HuggingFaceBackendBuilder {
    pub fn new(token: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            endpoint: format!("{INFERENCE_BASE_URL}/{}", model.into()),
        }
    }

    /// Override the full endpoint URL (self-hosted inference, test servers).
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn build(self) -> HuggingFaceBackend {
        HuggingFaceBackend {
            client: reqwest::Client::new(),
            token: self.token,
            endpoint: self.endpoint,
        }
    }
}

/// Hugging Face Inference API backend.
pub struct HuggingFaceBackend {
    client: reqwest::Client,
    token: String,
    endpoint: String,
}

impl HuggingFaceBackend {
    pub fn builder(
        token: impl Into<String>,
        model: impl Into<String>,
    ) -> HuggingFaceBackendBuilder {
        HuggingFaceBackendBuilder::new(token, model)
    }

    fn decode(body: &str) -> Result<String, ModelError> {
        let generations: Vec<ApiGeneration> =
            serde_json::from_str(body).map_err(|e| ModelError::InvalidResponse(e.to_string()))?;

        match generations.into_iter().next() {
            Some(generation) if !generation.generated_text.is_empty() => {
                Ok(generation.generated_text)
            }
            _ => Ok(EMPTY_REPLY_TEXT.to_string()),
        }
    }
}

impl std::fmt::Display for HuggingFaceBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "huggingface({})", self.endpoint)
    }
}

impl Completion for HuggingFaceBackend {
    async fn complete(&self, prompt: &str) -> Result<String, ModelError> {
        let request = ApiRequest {
            inputs: prompt,
            parameters: ApiParameters {
                max_new_tokens: MAX_NEW_TOKENS,
                temperature: TEMPERATURE,
            },
        };
        let body =
            serde_json::to_string(&request).map_err(|e| ModelError::Serialize(e.to_string()))?;

        let response = self
            .client
            .post(&self.endpoint)
            .timeout(REQUEST_TIMEOUT)
            .header("authorization", format!("Bearer {}", self.token))
            .header("content-type", "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| ModelError::Network(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ModelError::Network(e.to_string()))?;

        if status != reqwest::StatusCode::OK {
            return Err(ModelError::Api {
                status: status.as_u16(),
                body: text,
            });
        }

        Self::decode(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_body_shape() {
        let request = ApiRequest {
            inputs: "what happened",
            parameters: ApiParameters {
                max_new_tokens: MAX_NEW_TOKENS,
                temperature: TEMPERATURE,
            },
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "inputs": "what happened",
                "parameters": {"max_new_tokens": 200, "temperature": 0.7}
            })
        );
    }

    #[test]
    fn decode_uses_first_generation() {
        let body = r#"[{"generated_text":"1. [1973] A.\n2. [1990] B."},{"generated_text":"ignored"}]"#;
        assert_eq!(
            HuggingFaceBackend::decode(body).unwrap(),
            "1. [1973] A.\n2. [1990] B."
        );
    }

    #[test]
    fn decode_empty_array_yields_literal() {
        assert_eq!(HuggingFaceBackend::decode("[]").unwrap(), EMPTY_REPLY_TEXT);
    }

    #[test]
    fn decode_empty_text_yields_literal() {
        let body = r#"[{"generated_text":""}]"#;
        assert_eq!(HuggingFaceBackend::decode(body).unwrap(), EMPTY_REPLY_TEXT);
    }

    #[test]
    fn decode_missing_field_yields_literal() {
        // serde defaults the field; an object without it counts as empty.
        let body = r#"[{"something_else":1}]"#;
        assert_eq!(HuggingFaceBackend::decode(body).unwrap(), EMPTY_REPLY_TEXT);
    }

    #[test]
    fn decode_rejects_non_array_shape() {
        let err = HuggingFaceBackend::decode(r#"{"error":"loading"}"#).unwrap_err();
        assert!(matches!(err, ModelError::InvalidResponse(_)));
    }

    #[test]
    fn decode_rejects_invalid_json() {
        let err = HuggingFaceBackend::decode("not json").unwrap_err();
        assert!(matches!(err, ModelError::InvalidResponse(_)));
    }

    #[test]
    fn builder_derives_endpoint_from_model() {
        let backend = HuggingFaceBackend::builder("tok", "google/gemma-3-27b-it").build();
        assert_eq!(
            backend.endpoint,
            "https://api-inference.huggingface.co/models/google/gemma-3-27b-it"
        );
    }

    #[test]
    fn builder_endpoint_override() {
        let backend = HuggingFaceBackend::builder("tok", "unused")
            .endpoint("http://127.0.0.1:9000/generate")
            .build();
        assert_eq!(backend.endpoint, "http://127.0.0.1:9000/generate");
    }

    // ── complete() against a local stub server ──

    use std::net::SocketAddr;
    use std::sync::{Arc, Mutex};

    use axum::Router;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;

    struct SeenRequest {
        authorization: Option<String>,
        body: String,
    }

    async fn spawn_stub(
        status: StatusCode,
        reply: &'static str,
        seen: Arc<Mutex<Option<SeenRequest>>>,
    ) -> String {
        let app = Router::new().route(
            "/generate",
            post(move |headers: HeaderMap, body: String| {
                let seen = seen.clone();
                async move {
                    *seen.lock().unwrap() = Some(SeenRequest {
                        authorization: headers
                            .get("authorization")
                            .and_then(|v| v.to_str().ok())
                            .map(str::to_string),
                        body,
                    });
                    (status, reply)
                }
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr: SocketAddr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}/generate")
    }

    #[tokio::test]
    async fn complete_sends_bearer_token_and_returns_first_generation() {
        let seen = Arc::new(Mutex::new(None));
        let endpoint = spawn_stub(
            StatusCode::OK,
            r#"[{"generated_text":"1. [1973] A.\n2. [1990] B."}]"#,
            seen.clone(),
        )
        .await;

        let backend = HuggingFaceBackend::builder("tok", "unused")
            .endpoint(endpoint)
            .build();
        let reply = backend.complete("what happened").await.unwrap();

        assert_eq!(reply, "1. [1973] A.\n2. [1990] B.");
        let seen = seen.lock().unwrap();
        let request = seen.as_ref().unwrap();
        assert_eq!(request.authorization.as_deref(), Some("Bearer tok"));
        let body: serde_json::Value = serde_json::from_str(&request.body).unwrap();
        assert_eq!(body["inputs"], "what happened");
        assert_eq!(body["parameters"]["max_new_tokens"], 200);
        assert_eq!(body["parameters"]["temperature"], 0.7);
    }

    #[tokio::test]
    async fn complete_surfaces_non_ok_status_and_body() {
        let seen = Arc::new(Mutex::new(None));
        let endpoint =
            spawn_stub(StatusCode::SERVICE_UNAVAILABLE, "model is loading", seen).await;

        let backend = HuggingFaceBackend::builder("tok", "unused")
            .endpoint(endpoint)
            .build();
        let err = backend.complete("what happened").await.unwrap_err();

        match err {
            ModelError::Api { status, body } => {
                assert_eq!(status, 503);
                assert_eq!(body, "model is loading");
            }
            other => panic!("expected api error, got {other}"),
        }
    }

    #[tokio::test]
    async fn complete_maps_connect_failure_to_network_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let backend = HuggingFaceBackend::builder("tok", "unused")
            .endpoint(format!("http://{addr}/generate"))
            .build();
        let err = backend.complete("what happened").await.unwrap_err();

        assert!(matches!(err, ModelError::Network(_)));
    }
}
