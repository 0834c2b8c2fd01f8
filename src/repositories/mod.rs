pub mod cache_repository;

pub use cache_repository::{CacheRepository, MongoCacheRepository};
