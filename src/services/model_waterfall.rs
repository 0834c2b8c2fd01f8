use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::errors::{AppError, AppResult};
use crate::services::content_provider::{ContentProvider, ProviderError};
use crate::services::credential_pool::{Credential, CredentialPool};
use crate::services::prompt_builder::Prompt;
use crate::services::response_parser::ParseError;

const NO_ELIGIBLE_CANDIDATE: &str = "no configured model accepts attachments";

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ModelCandidate {
    pub identifier: String,
    pub accepts_attachments: bool,
}

impl ModelCandidate {
    pub fn new(identifier: impl Into<String>, accepts_attachments: bool) -> Self {
        Self {
            identifier: identifier.into(),
            accepts_attachments,
        }
    }
}

/// Why a single attempt did not produce a usable result.
#[derive(Debug, Clone, Error)]
pub enum AttemptFailure {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("{model} timed out after {}s", .timeout.as_secs_f32())]
    Timeout { model: String, timeout: Duration },

    #[error("{model} returned an unusable response: {source}")]
    Parse { model: String, source: ParseError },
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WaterfallError {
    #[error("{last_failure} ({attempts} attempts)")]
    Exhausted { attempts: usize, last_failure: String },
}

impl From<WaterfallError> for AppError {
    fn from(err: WaterfallError) -> Self {
        match err {
            WaterfallError::Exhausted { last_failure, .. } => {
                AppError::AllCandidatesExhausted(last_failure)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaterfallOutcome<T> {
    pub value: T,
    pub model: String,
    pub attempts: usize,
}

/// Ordered fallback across model candidates. Each candidate gets at most one timed
/// attempt per run, with a freshly drawn credential.
pub struct ModelWaterfall {
    candidates: Vec<ModelCandidate>,
    credentials: Arc<CredentialPool>,
    provider: Arc<dyn ContentProvider>,
    attempt_timeout: Duration,
}

impl ModelWaterfall {
    pub fn new(
        candidates: Vec<ModelCandidate>,
        credentials: Arc<CredentialPool>,
        provider: Arc<dyn ContentProvider>,
        attempt_timeout: Duration,
    ) -> AppResult<Self> {
        if candidates.is_empty() {
            return Err(AppError::ConfigurationError(
                "model waterfall requires at least one candidate".to_string(),
            ));
        }

        Ok(Self {
            candidates,
            credentials,
            provider,
            attempt_timeout,
        })
    }

    pub fn candidates(&self) -> &[ModelCandidate] {
        &self.candidates
    }

    /// Runs candidates in order until one returns text that `accept` turns into a value.
    /// A rejection by `accept` counts as a failed attempt, so validation sits inside the
    /// fallback loop.
    pub async fn run<T, F>(
        &self,
        prompt: &Prompt,
        accept: F,
    ) -> Result<WaterfallOutcome<T>, WaterfallError>
    where
        F: Fn(&str) -> Result<T, ParseError>,
    {
        let mut attempts = 0;
        let mut last_failure: Option<AttemptFailure> = None;

        for candidate in &self.candidates {
            if prompt.has_attachment() && !candidate.accepts_attachments {
                log::debug!(
                    "Skipping {}: model does not accept attachments",
                    candidate.identifier
                );
                continue;
            }

            attempts += 1;
            let credential = self.credentials.pick();
            log::info!(
                "Attempt {} using {} (key {})",
                attempts,
                candidate.identifier,
                credential.fingerprint()
            );

            match self.attempt(candidate, credential, prompt, &accept).await {
                Ok(value) => {
                    log::info!(
                        "{} succeeded after {} attempt(s)",
                        candidate.identifier,
                        attempts
                    );
                    return Ok(WaterfallOutcome {
                        value,
                        model: candidate.identifier.clone(),
                        attempts,
                    });
                }
                Err(failure) => {
                    log::warn!("Attempt {} failed: {}", attempts, failure);
                    last_failure = Some(failure);
                }
            }
        }

        Err(WaterfallError::Exhausted {
            attempts,
            last_failure: last_failure
                .map(|failure| failure.to_string())
                .unwrap_or_else(|| NO_ELIGIBLE_CANDIDATE.to_string()),
        })
    }

    async fn attempt<T, F>(
        &self,
        candidate: &ModelCandidate,
        credential: &Credential,
        prompt: &Prompt,
        accept: &F,
    ) -> Result<T, AttemptFailure>
    where
        F: Fn(&str) -> Result<T, ParseError>,
    {
        let call = self.provider.generate_content(
            &candidate.identifier,
            credential,
            &prompt.instruction,
            prompt.attachment.as_ref(),
        );

        // On timeout the call future is dropped; the provider may still finish it.
        let raw = match tokio::time::timeout(self.attempt_timeout, call).await {
            Ok(result) => result?,
            Err(_) => {
                return Err(AttemptFailure::Timeout {
                    model: candidate.identifier.clone(),
                    timeout: self.attempt_timeout,
                })
            }
        };

        accept(&raw).map_err(|source| AttemptFailure::Parse {
            model: candidate.identifier.clone(),
            source,
        })
    }
}
