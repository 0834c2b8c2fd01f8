use crate::constants::prompts::{
    LESSON_RESPONSE_SCHEMA, LESSON_SYSTEM_PROMPT, OUTPUT_RULES, QUIZ_RESPONSE_SCHEMA,
    QUIZ_SYSTEM_PROMPT, SAFETY_CLAUSE,
};
use crate::models::domain::generation_request::{Complexity, ExplanationFormat, ExplanationStyle};
use crate::models::domain::generation_result::{
    MAX_KEY_POINTS, MIN_KEY_POINTS, OPTIONS_PER_QUESTION, QUIZ_QUESTION_COUNT,
};
use crate::models::domain::{Attachment, GenerationRequest, Mode};

/// Provider-agnostic instruction payload for one request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Prompt {
    pub instruction: String,
    pub attachment: Option<Attachment>,
}

impl Prompt {
    pub fn has_attachment(&self) -> bool {
        self.attachment.is_some()
    }
}

pub fn build_prompt(request: &GenerationRequest) -> Prompt {
    let instruction = match request.mode {
        Mode::Quiz => quiz_instruction(request),
        Mode::Lesson => lesson_instruction(request),
    };

    Prompt {
        instruction,
        attachment: request.attachment.clone(),
    }
}

fn source_clause(request: &GenerationRequest) -> String {
    match (&request.attachment, request.topic.as_deref()) {
        (Some(_), Some(topic)) => format!(
            "Base the content on the attached file, focusing on \"{}\". Use only facts supported by the file.",
            topic
        ),
        (Some(_), None) => {
            "Base the content on the attached file. Use only facts supported by the file, and derive the title from its main subject.".to_string()
        }
        (None, Some(topic)) => format!("The topic is \"{}\".", topic),
        (None, None) => "Choose a foundational topic suitable for the learner.".to_string(),
    }
}

fn audience_clause(request: &GenerationRequest) -> String {
    format!(
        "The learner is at {} level. Write every field entirely in {}.",
        request.level, request.language
    )
}

fn quiz_instruction(request: &GenerationRequest) -> String {
    format!(
        "{system}\n\n\
         Create a multiple-choice quiz with exactly {count} questions. Each question must have exactly {options} options and exactly one correct answer.\n\
         {source}\n\
         {audience}\n\
         Questions should progress from recall to application, and wrong options must be plausible.\n\
         {safety}\n\n\
         Respond with JSON in exactly this shape:\n\
         {schema}\n\
         The \"questions\" array must contain exactly {count} items.\n\
         {rules}",
        system = QUIZ_SYSTEM_PROMPT,
        count = QUIZ_QUESTION_COUNT,
        options = OPTIONS_PER_QUESTION,
        source = source_clause(request),
        audience = audience_clause(request),
        safety = SAFETY_CLAUSE,
        schema = QUIZ_RESPONSE_SCHEMA,
        rules = OUTPUT_RULES,
    )
}

fn lesson_instruction(request: &GenerationRequest) -> String {
    format!(
        "{system}\n\n\
         Create a short lesson.\n\
         {source}\n\
         {audience}\n\
         {style}\n\
         {complexity}\n\
         The lesson must contain:\n\
         - \"explanation\": {format}\n\
         - \"analogy\": one everyday analogy that makes the idea intuitive.\n\
         - \"key_points\": between {min_points} and {max_points} short takeaways.\n\
         - \"quiz_question\": one practice question with exactly {options} \"options\" and one \"correct_answer\".\n\n\
         Respond with JSON in exactly this shape:\n\
         {schema}\n\
         {rules}",
        system = LESSON_SYSTEM_PROMPT,
        source = source_clause(request),
        audience = audience_clause(request),
        style = style_clause(request.explanation_style()),
        complexity = complexity_clause(request.complexity_level()),
        format = format_clause(request.explanation_format()),
        min_points = MIN_KEY_POINTS,
        max_points = MAX_KEY_POINTS,
        options = OPTIONS_PER_QUESTION,
        schema = LESSON_RESPONSE_SCHEMA,
        rules = OUTPUT_RULES,
    )
}

fn style_clause(style: ExplanationStyle) -> &'static str {
    match style {
        ExplanationStyle::Simple => {
            "Tone: simple. Use short sentences and everyday words; avoid jargon entirely."
        }
        ExplanationStyle::Detailed => {
            "Tone: detailed. Cover the reasoning behind each idea and include a concrete example."
        }
        ExplanationStyle::Technical => {
            "Tone: technical. Use precise domain terminology and define each term once."
        }
        ExplanationStyle::Balanced => {
            "Tone: balanced. Be clear and friendly, introducing terminology only where it helps."
        }
    }
}

fn complexity_clause(complexity: Complexity) -> &'static str {
    match complexity {
        Complexity::Low => "Depth: low. Stick to the core idea and skip edge cases.",
        Complexity::Medium => "Depth: medium. Cover the core idea and its most common applications.",
        Complexity::High => {
            "Depth: high. Include nuances, exceptions and connections to related concepts."
        }
    }
}

fn format_clause(format: ExplanationFormat) -> &'static str {
    match format {
        ExplanationFormat::Paragraph => "a clear explanation written as flowing prose paragraphs.",
        ExplanationFormat::Bullets => {
            "a clear explanation written as bullet points, each line starting with \"- \", inside a single string."
        }
        ExplanationFormat::Steps => {
            "a clear explanation written as numbered steps (\"1.\", \"2.\", ...), inside a single string."
        }
    }
}
