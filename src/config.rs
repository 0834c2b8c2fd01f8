use std::env;
use std::time::Duration;

use secrecy::SecretString;

use crate::constants::models::{
    default_model_candidates, DEFAULT_ATTEMPT_TIMEOUT_SECS, DEFAULT_MAX_ATTACHMENT_BYTES,
    GEMINI_BASE_URL, YOUTUBE_BASE_URL,
};
use crate::errors::{AppError, AppResult};
use crate::services::model_waterfall::ModelCandidate;

const TEXT_ONLY_SUFFIX: &str = ":text";

#[derive(Clone, Debug)]
pub struct Config {
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub cache_collection: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub gemini_api_keys: Vec<SecretString>,
    pub gemini_base_url: String,
    pub model_candidates: Vec<ModelCandidate>,
    pub attempt_timeout: Duration,
    pub max_attachment_bytes: usize,
    pub youtube_api_key: Option<SecretString>,
    pub youtube_base_url: String,
    pub cors_allowed_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Self {
        let gemini_api_keys = env::var("GEMINI_API_KEYS")
            .or_else(|_| env::var("GEMINI_API_KEY"))
            .map(|keys| parse_api_keys(&keys))
            .unwrap_or_default();

        let model_candidates = env::var("MODEL_CANDIDATES")
            .ok()
            .map(|raw| parse_model_candidates(&raw))
            .filter(|candidates| !candidates.is_empty())
            .unwrap_or_else(default_model_candidates);

        Self {
            mongo_conn_string: env::var("MONGO_CONN_STRING")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            mongo_db_name: env::var("MONGO_DB_NAME")
                .unwrap_or_else(|_| "lesson-gateway-local".to_string()),
            cache_collection: env::var("CACHE_COLLECTION")
                .unwrap_or_else(|_| "generation_cache".to_string()),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            gemini_api_keys,
            gemini_base_url: env::var("GEMINI_BASE_URL")
                .unwrap_or_else(|_| GEMINI_BASE_URL.to_string()),
            model_candidates,
            attempt_timeout: Duration::from_secs(
                env::var("ATTEMPT_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .filter(|secs| *secs > 0)
                    .unwrap_or(DEFAULT_ATTEMPT_TIMEOUT_SECS),
            ),
            max_attachment_bytes: env::var("MAX_ATTACHMENT_BYTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_MAX_ATTACHMENT_BYTES),
            youtube_api_key: env::var("YOUTUBE_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty())
                .map(SecretString::from),
            youtube_base_url: env::var("YOUTUBE_BASE_URL")
                .unwrap_or_else(|_| YOUTUBE_BASE_URL.to_string()),
            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .map(|raw| split_list(&raw).map(str::to_string).collect())
                .unwrap_or_default(),
        }
    }

    /// Fails when the service could never complete a generation.
    pub fn validate(&self) -> AppResult<()> {
        if self.gemini_api_keys.is_empty() {
            return Err(AppError::ConfigurationError(
                "no Gemini API keys configured; set GEMINI_API_KEYS".to_string(),
            ));
        }
        if self.model_candidates.is_empty() {
            return Err(AppError::ConfigurationError(
                "model candidate list is empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Largest JSON body accepted: the attachment after base64 expansion plus room for the
    /// remaining fields.
    pub fn json_body_limit(&self) -> usize {
        self.max_attachment_bytes / 3 * 4 + 64 * 1024
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: "lesson-gateway-test".to_string(),
            cache_collection: "generation_cache".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            gemini_api_keys: vec![
                SecretString::from("test-key-1".to_string()),
                SecretString::from("test-key-2".to_string()),
            ],
            gemini_base_url: "http://127.0.0.1:9".to_string(),
            model_candidates: default_model_candidates(),
            attempt_timeout: Duration::from_secs(DEFAULT_ATTEMPT_TIMEOUT_SECS),
            max_attachment_bytes: DEFAULT_MAX_ATTACHMENT_BYTES,
            youtube_api_key: None,
            youtube_base_url: YOUTUBE_BASE_URL.to_string(),
            cors_allowed_origins: Vec::new(),
        }
    }
}

fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|s| !s.is_empty())
}

fn parse_api_keys(raw: &str) -> Vec<SecretString> {
    split_list(raw)
        .map(|key| SecretString::from(key.to_string()))
        .collect()
}

/// Parses `id[:text],id[:text],...`; a `:text` suffix marks a model that cannot take
/// attachments.
pub fn parse_model_candidates(raw: &str) -> Vec<ModelCandidate> {
    split_list(raw)
        .map(|entry| match entry.strip_suffix(TEXT_ONLY_SUFFIX) {
            Some(identifier) => ModelCandidate::new(identifier.trim(), false),
            None => ModelCandidate::new(entry, true),
        })
        .filter(|candidate| !candidate.identifier.is_empty())
        .collect()
}
