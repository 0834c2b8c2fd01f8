use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::generation_request::Mode;

pub const OPTIONS_PER_QUESTION: usize = 4;
pub const QUIZ_QUESTION_COUNT: usize = 5;
pub const MIN_KEY_POINTS: usize = 3;
pub const MAX_KEY_POINTS: usize = 5;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum GenerationResult {
    Lesson(Lesson),
    Quiz(Quiz),
}

impl GenerationResult {
    pub fn mode(&self) -> Mode {
        match self {
            GenerationResult::Lesson(_) => Mode::Lesson,
            GenerationResult::Quiz(_) => Mode::Quiz,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            GenerationResult::Lesson(lesson) => &lesson.title,
            GenerationResult::Quiz(quiz) => &quiz.title,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Validate)]
#[validate(schema(function = "lesson_answer_in_options"))]
pub struct Lesson {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub explanation: String,
    #[validate(length(min = 1))]
    pub analogy: String,
    #[validate(length(min = 3, max = 5))]
    pub key_points: Vec<String>,
    #[validate(length(min = 1))]
    pub quiz_question: String,
    #[validate(length(equal = 4))]
    pub options: Vec<String>,
    pub correct_answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Validate)]
pub struct Quiz {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(equal = 5), nested)]
    pub questions: Vec<QuizQuestion>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Validate)]
#[validate(schema(function = "question_answer_in_options"))]
pub struct QuizQuestion {
    #[validate(length(min = 1))]
    pub question: String,
    #[validate(length(equal = 4))]
    pub options: Vec<String>,
    pub correct_answer: String,
}

fn answer_in_options(options: &[String], correct_answer: &str) -> Result<(), ValidationError> {
    if options.iter().any(|option| option == correct_answer) {
        Ok(())
    } else {
        let mut error = ValidationError::new("answer_not_in_options");
        error.message = Some("correct_answer must match one of the options".into());
        Err(error)
    }
}

fn lesson_answer_in_options(lesson: &Lesson) -> Result<(), ValidationError> {
    answer_in_options(&lesson.options, &lesson.correct_answer)
}

fn question_answer_in_options(question: &QuizQuestion) -> Result<(), ValidationError> {
    answer_in_options(&question.options, &question.correct_answer)
}
