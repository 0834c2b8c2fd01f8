use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum Level {
    #[serde(alias = "beginner")]
    Beginner,
    #[serde(alias = "intermediate")]
    Intermediate,
    #[serde(alias = "expert")]
    Expert,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Beginner => write!(f, "Beginner"),
            Level::Intermediate => write!(f, "Intermediate"),
            Level::Expert => write!(f, "Expert"),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Lesson,
    Quiz,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Lesson => write!(f, "lesson"),
            Mode::Quiz => write!(f, "quiz"),
        }
    }
}

/// Uploaded document or image, already decoded from base64.
#[derive(Clone, PartialEq, Eq)]
pub struct Attachment {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl fmt::Debug for Attachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attachment")
            .field("mime_type", &self.mime_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExplanationStyle {
    Simple,
    Detailed,
    Technical,
    #[default]
    Balanced,
}

impl ExplanationStyle {
    pub fn from_knob(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_lowercase()).as_deref() {
            Some("simple") => ExplanationStyle::Simple,
            Some("detailed") => ExplanationStyle::Detailed,
            Some("technical") => ExplanationStyle::Technical,
            _ => ExplanationStyle::Balanced,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Complexity {
    Low,
    #[default]
    Medium,
    High,
}

impl Complexity {
    pub fn from_knob(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_lowercase()).as_deref() {
            Some("low") => Complexity::Low,
            Some("high") => Complexity::High,
            _ => Complexity::Medium,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExplanationFormat {
    #[default]
    Paragraph,
    Bullets,
    Steps,
}

impl ExplanationFormat {
    pub fn from_knob(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_lowercase()).as_deref() {
            Some("bullets") | Some("bullet") | Some("bullet-points") => ExplanationFormat::Bullets,
            Some("steps") | Some("numbered") | Some("step-by-step") => ExplanationFormat::Steps,
            _ => ExplanationFormat::Paragraph,
        }
    }
}

/// One generation call. Built per HTTP request and dropped afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationRequest {
    pub topic: Option<String>,
    pub level: Level,
    pub language: String,
    pub mode: Mode,
    pub attachment: Option<Attachment>,
    pub style: Option<String>,
    pub complexity: Option<String>,
    pub format: Option<String>,
}

impl GenerationRequest {
    pub fn new(topic: impl Into<String>, level: Level, language: impl Into<String>, mode: Mode) -> Self {
        Self {
            topic: Some(topic.into()),
            level,
            language: language.into(),
            mode,
            attachment: None,
            style: None,
            complexity: None,
            format: None,
        }
    }

    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachment = Some(attachment);
        self
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    pub fn with_complexity(mut self, complexity: impl Into<String>) -> Self {
        self.complexity = Some(complexity.into());
        self
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn has_attachment(&self) -> bool {
        self.attachment.is_some()
    }

    pub fn explanation_style(&self) -> ExplanationStyle {
        ExplanationStyle::from_knob(self.style.as_deref())
    }

    pub fn complexity_level(&self) -> Complexity {
        Complexity::from_knob(self.complexity.as_deref())
    }

    pub fn explanation_format(&self) -> ExplanationFormat {
        ExplanationFormat::from_knob(self.format.as_deref())
    }
}
