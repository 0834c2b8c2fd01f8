#[cfg(test)]
pub mod fixtures {
    use serde_json::json;

    use crate::models::domain::{Attachment, GenerationRequest, Level, Mode};

    pub fn lesson_request(topic: &str) -> GenerationRequest {
        GenerationRequest::new(topic, Level::Beginner, "English", Mode::Lesson)
    }

    pub fn quiz_request(topic: &str) -> GenerationRequest {
        GenerationRequest::new(topic, Level::Intermediate, "English", Mode::Quiz)
    }

    pub fn attachment() -> Attachment {
        Attachment {
            bytes: b"%PDF-1.4 test".to_vec(),
            mime_type: "application/pdf".to_string(),
        }
    }

    /// A well-formed lesson as the provider would return it.
    pub fn lesson_json() -> String {
        json!({
            "type": "lesson",
            "title": "Photosynthesis",
            "explanation": "Plants capture sunlight and use it to turn water and carbon dioxide into sugar.",
            "analogy": "A leaf works like a tiny solar-powered kitchen.",
            "key_points": [
                "Light is the energy source",
                "Chlorophyll absorbs light",
                "Oxygen is released as a by-product"
            ],
            "quiz_question": "Which gas do plants absorb during photosynthesis?",
            "options": ["Oxygen", "Nitrogen", "Carbon dioxide", "Helium"],
            "correct_answer": "Carbon dioxide"
        })
        .to_string()
    }

    /// A well-formed five question quiz.
    pub fn quiz_json() -> String {
        let questions: Vec<_> = (1..=5)
            .map(|n| {
                json!({
                    "question": format!("Question {n}?"),
                    "options": [
                        format!("Answer {n}"),
                        "Wrong A",
                        "Wrong B",
                        "Wrong C"
                    ],
                    "correct_answer": format!("Answer {n}")
                })
            })
            .collect();

        json!({
            "type": "quiz",
            "title": "Volcanoes",
            "questions": questions
        })
        .to_string()
    }
}

#[cfg(test)]
pub mod fakes {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::models::domain::Attachment;
    use crate::services::content_provider::{ContentProvider, ProviderError};
    use crate::services::credential_pool::Credential;

    #[derive(Clone, Debug)]
    pub enum Behavior {
        Respond(String),
        Fail(ProviderError),
        /// Never settles; only a timeout ends the attempt.
        Hang,
    }

    #[derive(Clone, Debug)]
    pub struct RecordedCall {
        pub model: String,
        pub fingerprint: String,
        pub with_attachment: bool,
    }

    /// Provider whose answer per model is fixed up front. Records every call.
    #[derive(Default)]
    pub struct ScriptedProvider {
        script: HashMap<String, Behavior>,
        calls: Mutex<Vec<RecordedCall>>,
    }

    impl ScriptedProvider {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn script(mut self, model: &str, behavior: Behavior) -> Self {
            self.script.insert(model.to_string(), behavior);
            self
        }

        pub fn calls(&self) -> Vec<RecordedCall> {
            self.calls.lock().unwrap().clone()
        }

        pub fn called_models(&self) -> Vec<String> {
            self.calls().into_iter().map(|call| call.model).collect()
        }
    }

    #[async_trait]
    impl ContentProvider for ScriptedProvider {
        async fn generate_content(
            &self,
            model: &str,
            credential: &Credential,
            _instruction: &str,
            attachment: Option<&Attachment>,
        ) -> Result<String, ProviderError> {
            self.calls.lock().unwrap().push(RecordedCall {
                model: model.to_string(),
                fingerprint: credential.fingerprint().to_string(),
                with_attachment: attachment.is_some(),
            });

            match self.script.get(model).cloned() {
                Some(Behavior::Respond(text)) => Ok(text),
                Some(Behavior::Fail(err)) => Err(err),
                Some(Behavior::Hang) => futures::future::pending().await,
                None => Err(ProviderError::Transport {
                    model: model.to_string(),
                    message: "unscripted model".to_string(),
                }),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use crate::models::domain::{GenerationResult, Mode};
    use crate::services::response_parser::parse_response;

    #[test]
    fn test_fixture_lesson_is_valid() {
        assert!(matches!(
            parse_response(&lesson_json(), Mode::Lesson),
            Ok(GenerationResult::Lesson(_))
        ));
    }

    #[test]
    fn test_fixture_quiz_is_valid() {
        assert!(matches!(
            parse_response(&quiz_json(), Mode::Quiz),
            Ok(GenerationResult::Quiz(_))
        ));
    }

    #[test]
    fn test_fixture_requests() {
        assert_eq!(lesson_request("x").mode, Mode::Lesson);
        assert_eq!(quiz_request("x").mode, Mode::Quiz);
        assert_eq!(attachment().mime_type, "application/pdf");
    }
}
