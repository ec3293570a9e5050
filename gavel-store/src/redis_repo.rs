use async_trait::async_trait;
use gavel_core::session::PENDING_BID_KEY;
use gavel_core::{BoxError, PendingBid, SessionId, SessionStore};
use redis::{AsyncCommands, RedisResult};
use tracing::info;

#[derive(Clone)]
pub struct RedisClient {
    client: redis::Client,
}

impl RedisClient {
    pub async fn new(connection_string: &str) -> Result<Self, redis::RedisError> {
        let client = redis::Client::open(connection_string)?;
        Ok(Self { client })
    }

    // Hash Operations for Sessions
    pub async fn hset_session_field(&self, session_id: &str, field: &str, value: &str, ttl_seconds: u64) -> RedisResult<()> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let key = session_key(session_id);

        redis::pipe()
            .atomic()
            .hset(&key, field, value)
            .ignore()
            .expire(&key, ttl_seconds as i64)
            .ignore()
            .query_async(&mut conn)
            .await
    }

    pub async fn hget_session_field(&self, session_id: &str, field: &str) -> RedisResult<Option<String>> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.hget(session_key(session_id), field).await
    }

    pub async fn hdel_session_field(&self, session_id: &str, field: &str) -> RedisResult<()> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.hdel(session_key(session_id), field).await
    }

    pub async fn ping(&self) -> RedisResult<()> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        redis::cmd("PING").query_async(&mut conn).await
    }
}

fn session_key(session_id: &str) -> String {
    format!("session:{}", session_id)
}

/// Session store keeping each session as a Redis hash with a sliding TTL.
#[derive(Clone)]
pub struct RedisSessionStore {
    redis: RedisClient,
    ttl_seconds: u64,
}

impl RedisSessionStore {
    pub fn new(redis: RedisClient, ttl_seconds: u64) -> Self {
        Self { redis, ttl_seconds }
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn pending_bid(&self, session: &SessionId) -> Result<Option<PendingBid>, BoxError> {
        let raw = self.redis.hget_session_field(session.as_str(), PENDING_BID_KEY).await?;
        match raw {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    async fn store_pending_bid(&self, session: &SessionId, entry: &PendingBid) -> Result<(), BoxError> {
        let payload = serde_json::to_string(entry)?;
        self.redis
            .hset_session_field(session.as_str(), PENDING_BID_KEY, &payload, self.ttl_seconds)
            .await?;
        info!("Pending bid saved for auction {}", entry.auction_id);
        Ok(())
    }

    async fn clear_pending_bid(&self, session: &SessionId) -> Result<(), BoxError> {
        self.redis.hdel_session_field(session.as_str(), PENDING_BID_KEY).await?;
        Ok(())
    }
}
