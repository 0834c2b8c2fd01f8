pub mod cache_key;
pub mod content_provider;
pub mod credential_pool;
pub mod generation_service;
pub mod model_waterfall;
pub mod prompt_builder;
pub mod response_parser;
pub mod video_search;

pub use generation_service::GenerationService;
