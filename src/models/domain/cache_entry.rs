use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::generation_result::GenerationResult;

/// Persisted result for a cache slug. Written once, never updated.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct CacheEntry {
    pub key: String,
    pub value: GenerationResult,
    pub created_at: DateTime<Utc>,
}

impl CacheEntry {
    pub fn new(key: impl Into<String>, value: GenerationResult) -> Self {
        Self {
            key: key.into(),
            value,
            created_at: Utc::now(),
        }
    }
}
