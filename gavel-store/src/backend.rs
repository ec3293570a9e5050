use gavel_core::{AuctionRepository, BidRepository, SessionStore, UserRepository};
use std::sync::Arc;
use tracing::{info, warn};

use crate::app_config::{Config, StorageBackend};
use crate::{
    DbClient, InMemoryStore, RedisClient, RedisSessionStore, StoreAuctionRepository,
    StoreBidRepository, StoreUserRepository,
};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database connection failed: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("Redis connection failed: {0}")]
    Redis(#[from] redis::RedisError),
}

/// The collaborators the bid handler needs, backed by one storage choice.
#[derive(Clone)]
pub struct Stores {
    pub sessions: Arc<dyn SessionStore>,
    pub users: Arc<dyn UserRepository>,
    pub auctions: Arc<dyn AuctionRepository>,
    pub bids: Arc<dyn BidRepository>,
}

impl Stores {
    pub fn in_memory(store: Arc<InMemoryStore>) -> Self {
        Self {
            sessions: store.clone(),
            users: store.clone(),
            auctions: store.clone(),
            bids: store,
        }
    }
}

pub async fn connect(config: &Config) -> Result<Stores, StoreError> {
    match config.storage.backend {
        StorageBackend::Memory => {
            warn!("Using in-memory storage; data is lost on restart");
            Ok(Stores::in_memory(Arc::new(InMemoryStore::new())))
        }
        StorageBackend::Postgres => {
            let db = DbClient::new(&config.database).await?;
            db.migrate().await?;

            let redis = RedisClient::new(&config.redis.url).await?;
            redis.ping().await?;
            info!("Connected to Postgres and Redis");

            Ok(Stores {
                sessions: Arc::new(RedisSessionStore::new(redis, config.redis.session_ttl_seconds)),
                users: Arc::new(StoreUserRepository::new(db.pool.clone())),
                auctions: Arc::new(StoreAuctionRepository::new(db.pool.clone())),
                bids: Arc::new(StoreBidRepository::new(db.pool)),
            })
        }
    }
}
