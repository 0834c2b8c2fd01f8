use std::time::Duration;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use thiserror::Error;

use crate::models::domain::Attachment;
use crate::services::credential_pool::Credential;

const MAX_ERROR_BODY_CHARS: usize = 300;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProviderError {
    #[error("request to {model} failed: {message}")]
    Transport { model: String, message: String },

    #[error("{model} returned status {status}: {body}")]
    Status {
        model: String,
        status: u16,
        body: String,
    },

    #[error("{model} blocked the prompt: {reason}")]
    Blocked { model: String, reason: String },

    #[error("{model} returned no text")]
    EmptyResponse { model: String },
}

/// One generation call against a model, authenticated by a single credential.
#[async_trait]
pub trait ContentProvider: Send + Sync {
    async fn generate_content(
        &self,
        model: &str,
        credential: &Credential,
        instruction: &str,
        attachment: Option<&Attachment>,
    ) -> Result<String, ProviderError>;
}

/// Gemini `generateContent` over REST.
pub struct GeminiProvider {
    http: Client,
    base_url: String,
}

impl GeminiProvider {
    pub fn new(base_url: impl Into<String>) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, model)
    }
}

pub fn build_request_body(instruction: &str, attachment: Option<&Attachment>) -> Value {
    let mut parts = Vec::new();
    if let Some(attachment) = attachment {
        parts.push(json!({
            "inline_data": {
                "mime_type": attachment.mime_type,
                "data": BASE64.encode(&attachment.bytes),
            }
        }));
    }
    parts.push(json!({ "text": instruction }));

    json!({
        "contents": [
            {
                "role": "user",
                "parts": parts,
            }
        ]
    })
}

/// Joins the text parts of the first candidate.
pub fn extract_text(payload: &Value) -> Option<String> {
    let text = payload
        .get("candidates")
        .and_then(|candidates| candidates.as_array())
        .and_then(|array| array.first())
        .and_then(|cand| cand.get("content"))
        .and_then(|content| content.get("parts"))
        .and_then(|parts| parts.as_array())
        .map(|parts| {
            parts
                .iter()
                .filter_map(|part| part.get("text").and_then(|t| t.as_str()))
                .collect::<Vec<_>>()
                .join("\n")
        })?;

    (!text.trim().is_empty()).then_some(text)
}

fn block_reason(payload: &Value) -> Option<String> {
    payload
        .get("promptFeedback")
        .and_then(|feedback| feedback.get("blockReason"))
        .and_then(|reason| reason.as_str())
        .map(str::to_string)
}

fn truncate(text: &str) -> String {
    text.chars().take(MAX_ERROR_BODY_CHARS).collect()
}

#[async_trait]
impl ContentProvider for GeminiProvider {
    async fn generate_content(
        &self,
        model: &str,
        credential: &Credential,
        instruction: &str,
        attachment: Option<&Attachment>,
    ) -> Result<String, ProviderError> {
        let transport = |err: reqwest::Error| ProviderError::Transport {
            model: model.to_string(),
            message: err.to_string(),
        };

        let response = self
            .http
            .post(self.endpoint(model))
            .header("x-goog-api-key", credential.expose())
            .json(&build_request_body(instruction, attachment))
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                model: model.to_string(),
                status: status.as_u16(),
                body: truncate(&body),
            });
        }

        let payload: Value = response.json().await.map_err(transport)?;

        if let Some(reason) = block_reason(&payload) {
            return Err(ProviderError::Blocked {
                model: model.to_string(),
                reason,
            });
        }

        extract_text(&payload).ok_or_else(|| ProviderError::EmptyResponse {
            model: model.to_string(),
        })
    }
}
