//! Remote text-generation client.
//!
//! Calls the generation REST API directly. The request carries the
//! ordered role/text turn history plus the latest user utterance; the
//! response is a single reply string extracted from the first
//! candidate. The adapter makes exactly one attempt; retries and the
//! time bound belong to the caller.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use triage_core::error::TriageError;
use triage_core::generation::{GenerationBackend, MessageRole, TurnMessage};
use triage_core::Result;

use crate::config::load_generation_config;

const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// System instruction framing every request.
const SYSTEM_INSTRUCTION: &str = "You are a cautious health-assistant chatbot. \
Answer general health questions briefly and plainly. Never diagnose; for \
anything that sounds urgent, tell the user to contact emergency services.";

/// Backend implementation that talks to the generation HTTP API.
#[derive(Clone)]
pub struct RemoteGenerationClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl RemoteGenerationClient {
    /// Creates a new client with the provided API key and model.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Loads configuration from secret.json / environment.
    ///
    /// Model name defaults to `gemini-2.5-flash` if not specified.
    pub fn try_from_env() -> Result<Self> {
        let config = load_generation_config()?;
        let model = config
            .model_name
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());
        Ok(Self::new(config.api_key, model))
    }

    /// Overrides the endpoint base URL (tests, self-hosted proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn build_request(&self, history: &[TurnMessage], text: &str) -> GenerateContentRequest {
        let mut contents: Vec<Content> = history.iter().map(Content::from_message).collect();
        contents.push(Content {
            role: "user".to_string(),
            parts: vec![Part {
                text: text.to_string(),
            }],
        });

        GenerateContentRequest {
            contents,
            system_instruction: Some(Content {
                role: "system".to_string(),
                parts: vec![Part {
                    text: SYSTEM_INSTRUCTION.to_string(),
                }],
            }),
        }
    }

    async fn send_request(&self, body: &GenerateContentRequest) -> Result<String> {
        let url = format!(
            "{}/{model}:generateContent?key={api_key}",
            self.base_url,
            model = self.model,
            api_key = self.api_key
        );

        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|err| TriageError::generation(format!("request failed: {err}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to read error body".to_string());
            return Err(map_http_error(status, body_text));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|err| TriageError::generation(format!("failed to parse response: {err}")))?;

        extract_text_response(parsed)
    }
}

#[async_trait]
impl GenerationBackend for RemoteGenerationClient {
    async fn generate(&self, history: &[TurnMessage], text: &str) -> Result<String> {
        let request = self.build_request(history, text);
        self.send_request(&request).await
    }
}

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "systemInstruction", skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

impl Content {
    fn from_message(message: &TurnMessage) -> Self {
        Self {
            role: match message.role {
                MessageRole::User => "user".to_string(),
                MessageRole::Model => "model".to_string(),
            },
            parts: vec![Part {
                text: message.text.clone(),
            }],
        }
    }
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Deserialize)]
struct ContentResponse {
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

fn extract_text_response(response: GenerateContentResponse) -> Result<String> {
    response
        .candidates
        .and_then(|mut candidates| candidates.pop())
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().find_map(|part| part.text))
        .ok_or_else(|| {
            TriageError::generation("generation API returned no text in the response candidates")
        })
}

fn map_http_error(status: StatusCode, body: String) -> TriageError {
    let message = serde_json::from_str::<ErrorWrapper>(&body)
        .map(|wrapper| {
            let status_text = wrapper.error.status.unwrap_or_default();
            let msg = wrapper.error.message.unwrap_or_else(|| body.clone());
            if status_text.is_empty() {
                msg
            } else {
                format!("{status_text}: {msg}")
            }
        })
        .unwrap_or_else(|_| body.clone());

    TriageError::generation(format!("HTTP {}: {}", status.as_u16(), message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_request_appends_latest_utterance() {
        let client = RemoteGenerationClient::new("key", "model");
        let history = vec![
            TurnMessage {
                role: MessageRole::User,
                text: "hello".to_string(),
            },
            TurnMessage {
                role: MessageRole::Model,
                text: "hi, how can I help?".to_string(),
            },
        ];
        let request = client.build_request(&history, "my head hurts");

        assert_eq!(request.contents.len(), 3);
        assert_eq!(request.contents[0].role, "user");
        assert_eq!(request.contents[1].role, "model");
        assert_eq!(request.contents[2].role, "user");
        assert_eq!(request.contents[2].parts[0].text, "my head hurts");
    }

    #[test]
    fn test_extract_text_from_first_candidate() {
        let response = GenerateContentResponse {
            candidates: Some(vec![Candidate {
                content: Some(ContentResponse {
                    parts: vec![PartResponse {
                        text: Some("rest and hydrate".to_string()),
                    }],
                }),
            }]),
        };
        assert_eq!(extract_text_response(response).unwrap(), "rest and hydrate");
    }

    #[test]
    fn test_empty_candidates_is_an_error() {
        let response = GenerateContentResponse { candidates: None };
        let err = extract_text_response(response).unwrap_err();
        assert!(err.is_generation_failure());
    }

    #[test]
    fn test_map_http_error_parses_structured_body() {
        let body = r#"{"error": {"message": "quota exceeded", "status": "RESOURCE_EXHAUSTED"}}"#;
        let err = map_http_error(StatusCode::TOO_MANY_REQUESTS, body.to_string());
        assert!(err.to_string().contains("RESOURCE_EXHAUSTED"));
        assert!(err.to_string().contains("quota exceeded"));
    }
}
