use std::sync::Arc;

use crate::{
    errors::AppResult,
    models::domain::{CacheEntry, GenerationRequest, GenerationResult, Lesson},
    repositories::CacheRepository,
    services::{
        cache_key::build_cache_key,
        model_waterfall::ModelWaterfall,
        prompt_builder::build_prompt,
        response_parser::parse_response,
        video_search::{lesson_video_query, video_url, VideoSearch},
    },
};

/// Entry point for `generate`: cache lookup, prompt, waterfall, cache write, enrichment.
pub struct GenerationService {
    cache: Arc<dyn CacheRepository>,
    waterfall: ModelWaterfall,
    video_search: Option<Arc<dyn VideoSearch>>,
}

impl GenerationService {
    pub fn new(
        cache: Arc<dyn CacheRepository>,
        waterfall: ModelWaterfall,
        video_search: Option<Arc<dyn VideoSearch>>,
    ) -> Self {
        Self {
            cache,
            waterfall,
            video_search,
        }
    }

    pub async fn generate(&self, request: GenerationRequest) -> AppResult<GenerationResult> {
        // Uploads are not content-addressed, so they never touch the cache.
        let cache_key = (!request.has_attachment()).then(|| build_cache_key(&request));

        if let Some(key) = &cache_key {
            if let Some(cached) = self.lookup(key).await {
                return Ok(cached);
            }
        }

        let prompt = build_prompt(&request);
        let mode = request.mode;
        let outcome = self
            .waterfall
            .run(&prompt, |raw| parse_response(raw, mode))
            .await?;

        log::info!(
            "Generated {} '{}' with {} after {} attempt(s)",
            mode,
            outcome.value.title(),
            outcome.model,
            outcome.attempts
        );

        let mut result = outcome.value;

        if let Some(key) = cache_key {
            self.store(key, result.clone()).await;
        }

        if let GenerationResult::Lesson(lesson) = &mut result {
            self.enrich(lesson).await;
        }

        Ok(result)
    }

    async fn lookup(&self, key: &str) -> Option<GenerationResult> {
        match self.cache.find_by_key(key).await {
            Ok(Some(entry)) => {
                log::info!("Cache hit for {}", key);
                Some(entry.value)
            }
            Ok(None) => {
                log::debug!("Cache miss for {}", key);
                None
            }
            Err(err) => {
                log::warn!("Cache lookup for {} failed, generating instead: {}", key, err);
                None
            }
        }
    }

    async fn store(&self, key: String, value: GenerationResult) {
        if let Err(err) = self.cache.insert(CacheEntry::new(key.clone(), value)).await {
            log::warn!("Failed to cache result for {}: {}", key, err);
        }
    }

    async fn enrich(&self, lesson: &mut Lesson) {
        let Some(search) = &self.video_search else {
            return;
        };

        match search.search(&lesson_video_query(&lesson.title)).await {
            Ok(Some(video_id)) => lesson.video_url = Some(video_url(&video_id)),
            Ok(None) => log::debug!("No video found for '{}'", lesson.title),
            Err(err) => log::warn!("Video lookup for '{}' failed: {}", lesson.title, err),
        }
    }
}
