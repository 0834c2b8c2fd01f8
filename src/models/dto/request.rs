use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde::Deserialize;
use validator::Validate;

use crate::errors::{AppError, AppResult};
use crate::models::domain::{Attachment, GenerationRequest, Level, Mode};

/// Body of `POST /api/generate`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequestDto {
    #[validate(length(max = 500))]
    pub topic: Option<String>,

    pub level: Level,

    #[validate(length(min = 1, max = 64))]
    pub language: String,

    #[serde(default)]
    pub mode: Mode,

    /// Base64 payload, optionally wrapped in a `data:<mime>;base64,` URL.
    pub file_data: Option<String>,

    #[validate(length(min = 1, max = 128))]
    pub mime_type: Option<String>,

    #[validate(length(max = 64))]
    pub explanation_style: Option<String>,

    #[validate(length(max = 64))]
    pub complexity: Option<String>,

    #[validate(length(max = 64))]
    pub format: Option<String>,
}

impl GenerateRequestDto {
    pub fn into_request(self, max_attachment_bytes: usize) -> AppResult<GenerationRequest> {
        self.validate()?;

        let language = non_blank(Some(self.language)).ok_or_else(|| {
            AppError::ValidationError("language must not be blank".to_string())
        })?;
        let topic = non_blank(self.topic);
        let attachment = match non_blank(self.file_data) {
            Some(data) => Some(decode_attachment(
                &data,
                non_blank(self.mime_type),
                max_attachment_bytes,
            )?),
            None => None,
        };

        if topic.is_none() && attachment.is_none() {
            return Err(AppError::ValidationError(
                "Either a topic or an attached file is required".to_string(),
            ));
        }

        Ok(GenerationRequest {
            topic,
            level: self.level,
            language,
            mode: self.mode,
            attachment,
            style: non_blank(self.explanation_style),
            complexity: non_blank(self.complexity),
            format: non_blank(self.format),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn decode_attachment(
    data: &str,
    mime_type: Option<String>,
    max_bytes: usize,
) -> AppResult<Attachment> {
    let (url_mime, payload) = split_data_url(data);

    let mime_type = mime_type.or(url_mime).ok_or_else(|| {
        AppError::ValidationError("mimeType is required when fileData is present".to_string())
    })?;

    // base64 expands by 4/3; reject before allocating for the decode
    if payload.len() / 4 * 3 > max_bytes + 3 {
        return Err(too_large(max_bytes));
    }

    let bytes = BASE64
        .decode(payload)
        .map_err(|e| AppError::ValidationError(format!("fileData is not valid base64: {}", e)))?;

    if bytes.is_empty() {
        return Err(AppError::ValidationError("fileData is empty".to_string()));
    }
    if bytes.len() > max_bytes {
        return Err(too_large(max_bytes));
    }

    Ok(Attachment { bytes, mime_type })
}

fn split_data_url(data: &str) -> (Option<String>, &str) {
    let Some(rest) = data.strip_prefix("data:") else {
        return (None, data);
    };
    match rest.split_once(',') {
        Some((header, payload)) => {
            let mime = header
                .strip_suffix(";base64")
                .unwrap_or(header)
                .trim()
                .to_string();
            ((!mime.is_empty()).then_some(mime), payload)
        }
        None => (None, data),
    }
}

fn too_large(max_bytes: usize) -> AppError {
    AppError::PayloadTooLarge(format!("attached file exceeds {} bytes", max_bytes))
}
