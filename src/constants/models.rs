use crate::services::model_waterfall::ModelCandidate;

pub const GEMINI_2_5_FLASH: &str = "gemini-2.5-flash";
pub const GEMINI_2_0_FLASH: &str = "gemini-2.0-flash";
pub const GEMINI_2_5_FLASH_LITE: &str = "gemini-2.5-flash-lite";
pub const GEMINI_2_0_FLASH_LITE: &str = "gemini-2.0-flash-lite";
pub const GEMMA_3_27B: &str = "gemma-3-27b-it";

pub const DEFAULT_ATTEMPT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_MAX_ATTACHMENT_BYTES: usize = 10 * 1024 * 1024;

pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const YOUTUBE_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Preference order for the waterfall, best first. Gemma is text only.
pub fn default_model_candidates() -> Vec<ModelCandidate> {
    vec![
        ModelCandidate::new(GEMINI_2_5_FLASH, true),
        ModelCandidate::new(GEMINI_2_0_FLASH, true),
        ModelCandidate::new(GEMINI_2_5_FLASH_LITE, true),
        ModelCandidate::new(GEMINI_2_0_FLASH_LITE, true),
        ModelCandidate::new(GEMMA_3_27B, false),
    ]
}
