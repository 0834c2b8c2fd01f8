use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use thiserror::Error;
use validator::Validate;

use crate::models::domain::{GenerationResult, Lesson, Mode, Quiz};

// Only a fence wrapping the whole response; fences inside string fields stay put.
static CODE_FENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)\A```[a-zA-Z0-9_-]*\s*(.*?)\s*```\z")
        .expect("CODE_FENCE is a valid regex pattern")
});

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("response contained no JSON object")]
    NoJson,

    #[error("response is not valid JSON: {0}")]
    Json(String),

    #[error("expected a {expected} but response type was '{found}'")]
    WrongType { expected: Mode, found: String },

    #[error("response does not match the {mode} schema: {message}")]
    Shape { mode: Mode, message: String },

    #[error("response failed validation: {0}")]
    Invalid(String),
}

/// Removes code fences and any prose surrounding the outermost JSON object.
pub fn strip_formatting(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    let unfenced = CODE_FENCE
        .captures(trimmed)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .unwrap_or(trimmed)
        .trim();

    let start = unfenced.find('{')?;
    let end = unfenced.rfind('}')?;
    (start < end).then(|| &unfenced[start..=end])
}

/// Decodes provider text into the result for `mode`, rejecting anything that breaks the
/// schema or the answer-in-options rule.
pub fn parse_response(raw: &str, mode: Mode) -> Result<GenerationResult, ParseError> {
    let json = strip_formatting(raw).ok_or(ParseError::NoJson)?;
    let mut value: Value = serde_json::from_str(json).map_err(|e| ParseError::Json(e.to_string()))?;

    let object = value.as_object_mut().ok_or(ParseError::NoJson)?;
    if let Some(found) = object.remove("type") {
        let found = found.as_str().unwrap_or_default().trim().to_lowercase();
        if found != mode.to_string() {
            return Err(ParseError::WrongType {
                expected: mode,
                found,
            });
        }
    }

    let shape = |e: serde_json::Error| ParseError::Shape {
        mode,
        message: e.to_string(),
    };

    match mode {
        Mode::Lesson => {
            let mut lesson: Lesson = serde_json::from_value(value).map_err(shape)?;
            lesson.video_url = None;
            lesson.validate().map_err(|e| ParseError::Invalid(e.to_string()))?;
            Ok(GenerationResult::Lesson(lesson))
        }
        Mode::Quiz => {
            let quiz: Quiz = serde_json::from_value(value).map_err(shape)?;
            quiz.validate().map_err(|e| ParseError::Invalid(e.to_string()))?;
            Ok(GenerationResult::Quiz(quiz))
        }
    }
}
