use std::sync::Arc;

use crate::{
    config::Config,
    db::Database,
    errors::{AppError, AppResult},
    repositories::{CacheRepository, MongoCacheRepository},
    services::{
        content_provider::GeminiProvider,
        credential_pool::CredentialPool,
        generation_service::GenerationService,
        model_waterfall::ModelWaterfall,
        video_search::{VideoSearch, YouTubeVideoSearch},
    },
};

#[derive(Clone)]
pub struct AppState {
    pub generation_service: Arc<GenerationService>,
    pub cache: Arc<dyn CacheRepository>,
    pub max_attachment_bytes: usize,
}

impl AppState {
    pub async fn new(config: &Config) -> AppResult<Self> {
        config.validate()?;

        let credentials = Arc::new(CredentialPool::new(config.gemini_api_keys.clone())?);
        log::info!(
            "Loaded {} API key(s) and {} model candidate(s)",
            credentials.len(),
            config.model_candidates.len()
        );

        let provider = GeminiProvider::new(config.gemini_base_url.clone())
            .map_err(|e| AppError::InternalError(format!("HTTP client: {}", e)))?;
        let waterfall = ModelWaterfall::new(
            config.model_candidates.clone(),
            credentials,
            Arc::new(provider),
            config.attempt_timeout,
        )?;

        let video_search: Option<Arc<dyn VideoSearch>> = match &config.youtube_api_key {
            Some(key) => {
                let search = YouTubeVideoSearch::new(config.youtube_base_url.clone(), key.clone())
                    .map_err(|e| AppError::InternalError(format!("HTTP client: {}", e)))?;
                Some(Arc::new(search))
            }
            None => {
                log::info!("YOUTUBE_API_KEY not set; lesson video enrichment disabled");
                None
            }
        };

        let db = Database::connect(config).await?;
        let cache_repository = Arc::new(MongoCacheRepository::new(&db, &config.cache_collection));
        if let Err(e) = cache_repository.ensure_indexes().await {
            log::warn!("Cache store unavailable at startup, serving without it until it recovers: {}", e);
        }
        let cache: Arc<dyn CacheRepository> = cache_repository;

        let generation_service = Arc::new(GenerationService::new(
            cache.clone(),
            waterfall,
            video_search,
        ));

        Ok(Self::from_parts(
            generation_service,
            cache,
            config.max_attachment_bytes,
        ))
    }

    pub fn from_parts(
        generation_service: Arc<GenerationService>,
        cache: Arc<dyn CacheRepository>,
        max_attachment_bytes: usize,
    ) -> Self {
        Self {
            generation_service,
            cache,
            max_attachment_bytes,
        }
    }
}
