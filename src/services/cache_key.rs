use crate::models::domain::GenerationRequest;

/// Stands in for an absent or blank knob.
pub const DEFAULT_KNOB_TOKEN: &str = "default";
const DELIMITER: &str = "-";

/// Builds the cache slug for a request.
///
/// Fields are trimmed, lower-cased and have internal whitespace collapsed to single
/// hyphens, then joined in a fixed order: topic, level, language, mode, style,
/// complexity, format. The result is stable for identical normalized inputs. Callers
/// decide whether the request is cacheable at all (attachments never are).
pub fn build_cache_key(request: &GenerationRequest) -> String {
    let level = request.level.to_string();
    let mode = request.mode.to_string();

    [
        Some(request.topic.as_deref().unwrap_or_default()),
        Some(level.as_str()),
        Some(request.language.as_str()),
        Some(mode.as_str()),
        request.style.as_deref(),
        request.complexity.as_deref(),
        request.format.as_deref(),
    ]
    .into_iter()
    .map(normalize_field)
    .collect::<Vec<_>>()
    .join(DELIMITER)
}

fn normalize_field(value: Option<&str>) -> String {
    let normalized = value
        .unwrap_or_default()
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(DELIMITER);

    if normalized.is_empty() {
        DEFAULT_KNOB_TOKEN.to_string()
    } else {
        normalized
    }
}
