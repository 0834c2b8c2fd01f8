#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use secrecy::SecretString;
use serde_json::json;
use tokio::sync::RwLock;

use lesson_gateway::{
    app_state::AppState,
    errors::{AppError, AppResult},
    models::domain::{Attachment, CacheEntry},
    repositories::CacheRepository,
    services::{
        content_provider::{ContentProvider, ProviderError},
        credential_pool::{Credential, CredentialPool},
        model_waterfall::{ModelCandidate, ModelWaterfall},
        video_search::{VideoSearch, VideoSearchError},
        GenerationService,
    },
};

pub const PRIMARY: &str = "primary-model";
pub const SECONDARY: &str = "secondary-model";
pub const TEXT_ONLY: &str = "text-only-model";
pub const ATTEMPT_TIMEOUT: Duration = Duration::from_millis(50);
pub const MAX_ATTACHMENT_BYTES: usize = 1024;

/// Cache keyed the same way as the Mongo collection: duplicates allowed, oldest first.
#[derive(Default)]
pub struct InMemoryCacheRepository {
    entries: RwLock<HashMap<String, Vec<CacheEntry>>>,
    fail: bool,
}

impl InMemoryCacheRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub async fn count(&self, key: &str) -> usize {
        self.entries.read().await.get(key).map_or(0, Vec::len)
    }

    pub async fn total(&self) -> usize {
        self.entries.read().await.values().map(Vec::len).sum()
    }

    pub async fn keys(&self) -> Vec<String> {
        self.entries.read().await.keys().cloned().collect()
    }
}

#[async_trait]
impl CacheRepository for InMemoryCacheRepository {
    async fn find_by_key(&self, key: &str) -> AppResult<Option<CacheEntry>> {
        if self.fail {
            return Err(AppError::DatabaseError("cache offline".to_string()));
        }
        let entries = self.entries.read().await;
        Ok(entries.get(key).and_then(|list| list.first()).cloned())
    }

    async fn insert(&self, entry: CacheEntry) -> AppResult<()> {
        if self.fail {
            return Err(AppError::DatabaseError("cache offline".to_string()));
        }
        self.entries
            .write()
            .await
            .entry(entry.key.clone())
            .or_default()
            .push(entry);
        Ok(())
    }

    async fn ping(&self) -> AppResult<()> {
        if self.fail {
            Err(AppError::DatabaseError("cache offline".to_string()))
        } else {
            Ok(())
        }
    }
}

#[derive(Clone, Debug)]
pub enum Reply {
    Text(String),
    Error(ProviderError),
    Hang,
}

/// Answers per model from a fixed table and records the order models were tried in.
#[derive(Default)]
pub struct FakeProvider {
    replies: HashMap<String, Reply>,
    calls: Mutex<Vec<(String, bool)>>,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(mut self, model: &str, reply: Reply) -> Self {
        self.replies.insert(model.to_string(), reply);
        self
    }

    pub fn called_models(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(model, _)| model.clone())
            .collect()
    }

    pub fn attachment_flags(&self) -> Vec<bool> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(_, with_attachment)| *with_attachment)
            .collect()
    }
}

#[async_trait]
impl ContentProvider for FakeProvider {
    async fn generate_content(
        &self,
        model: &str,
        _credential: &Credential,
        _instruction: &str,
        attachment: Option<&Attachment>,
    ) -> Result<String, ProviderError> {
        self.calls
            .lock()
            .unwrap()
            .push((model.to_string(), attachment.is_some()));

        match self.replies.get(model).cloned() {
            Some(Reply::Text(text)) => Ok(text),
            Some(Reply::Error(err)) => Err(err),
            Some(Reply::Hang) => futures::future::pending().await,
            None => Err(ProviderError::Status {
                model: model.to_string(),
                status: 404,
                body: "model not found".to_string(),
            }),
        }
    }
}

/// Returns a fixed video id and remembers the queries it was asked.
pub struct FixedVideoSearch {
    video_id: Option<String>,
    queries: Mutex<Vec<String>>,
}

impl FixedVideoSearch {
    pub fn found(video_id: &str) -> Self {
        Self {
            video_id: Some(video_id.to_string()),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl VideoSearch for FixedVideoSearch {
    async fn search(&self, query: &str) -> Result<Option<String>, VideoSearchError> {
        self.queries.lock().unwrap().push(query.to_string());
        Ok(self.video_id.clone())
    }
}

pub struct BrokenVideoSearch;

#[async_trait]
impl VideoSearch for BrokenVideoSearch {
    async fn search(&self, _query: &str) -> Result<Option<String>, VideoSearchError> {
        Err(VideoSearchError::Status(403))
    }
}

pub fn candidates() -> Vec<ModelCandidate> {
    vec![
        ModelCandidate::new(PRIMARY, true),
        ModelCandidate::new(SECONDARY, true),
        ModelCandidate::new(TEXT_ONLY, false),
    ]
}

pub fn service(
    cache: Arc<dyn CacheRepository>,
    provider: Arc<FakeProvider>,
    video_search: Option<Arc<dyn VideoSearch>>,
) -> GenerationService {
    let credentials = Arc::new(
        CredentialPool::new(vec![
            SecretString::from("key-one".to_string()),
            SecretString::from("key-two".to_string()),
        ])
        .expect("credential pool"),
    );
    let waterfall = ModelWaterfall::new(candidates(), credentials, provider, ATTEMPT_TIMEOUT)
        .expect("waterfall");
    GenerationService::new(cache, waterfall, video_search)
}

pub fn app_state(
    cache: Arc<dyn CacheRepository>,
    provider: Arc<FakeProvider>,
    video_search: Option<Arc<dyn VideoSearch>>,
) -> AppState {
    let service = Arc::new(service(cache.clone(), provider, video_search));
    AppState::from_parts(service, cache, MAX_ATTACHMENT_BYTES)
}

pub fn lesson_json(title: &str) -> String {
    json!({
        "type": "lesson",
        "title": title,
        "explanation": "Plants capture sunlight and turn water and carbon dioxide into sugar.",
        "analogy": "A leaf works like a tiny solar-powered kitchen.",
        "key_points": [
            "Light is the energy source",
            "Chlorophyll absorbs light",
            "Oxygen is released"
        ],
        "quiz_question": "Which gas do plants absorb?",
        "options": ["Oxygen", "Nitrogen", "Carbon dioxide", "Helium"],
        "correct_answer": "Carbon dioxide"
    })
    .to_string()
}

pub fn quiz_json(title: &str) -> String {
    let questions: Vec<_> = (1..=5)
        .map(|n| {
            json!({
                "question": format!("Question {n}?"),
                "options": [format!("Answer {n}"), "Wrong A", "Wrong B", "Wrong C"],
                "correct_answer": format!("Answer {n}")
            })
        })
        .collect();

    json!({ "type": "quiz", "title": title, "questions": questions }).to_string()
}
