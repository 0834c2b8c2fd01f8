use async_trait::async_trait;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{db::Database, errors::AppResult, models::domain::CacheEntry};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheRepository: Send + Sync {
    /// Oldest entry for `key`; duplicates may exist and the first one wins.
    async fn find_by_key(&self, key: &str) -> AppResult<Option<CacheEntry>>;
    async fn insert(&self, entry: CacheEntry) -> AppResult<()>;
    async fn ping(&self) -> AppResult<()>;
}

pub struct MongoCacheRepository {
    db: Database,
    collection: Collection<CacheEntry>,
}

impl MongoCacheRepository {
    pub fn new(db: &Database, collection_name: &str) -> Self {
        let collection = db.get_collection(collection_name);
        Self {
            db: db.clone(),
            collection,
        }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for cache collection");

        // Not unique: concurrent misses for one key may both insert.
        let key_index = IndexModel::builder()
            .keys(doc! { "key": 1 })
            .options(IndexOptions::builder().name("key".to_string()).build())
            .build();

        self.collection.create_index(key_index).await?;

        log::info!("Successfully created indexes for cache collection");
        Ok(())
    }
}

#[async_trait]
impl CacheRepository for MongoCacheRepository {
    async fn find_by_key(&self, key: &str) -> AppResult<Option<CacheEntry>> {
        let entry = self
            .collection
            .find_one(doc! { "key": key })
            .sort(doc! { "_id": 1 })
            .await?;
        Ok(entry)
    }

    async fn insert(&self, entry: CacheEntry) -> AppResult<()> {
        self.collection.insert_one(&entry).await?;
        Ok(())
    }

    async fn ping(&self) -> AppResult<()> {
        self.db.health_check().await
    }
}
