use async_trait::async_trait;
use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use gavel_core::{Auction, AuctionRepository, BoxError};
use sqlx::PgPool;
use uuid::Uuid;

pub struct StoreAuctionRepository {
    pool: PgPool,
}

impl StoreAuctionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct AuctionRow {
    id: Uuid,
    product_id: Uuid,
    starting_price: BigDecimal,
    ends_at: Option<DateTime<Utc>>,
}

#[async_trait]
impl AuctionRepository for StoreAuctionRepository {
    async fn find_auction(&self, id: Uuid) -> Result<Option<Auction>, BoxError> {
        let row = sqlx::query_as::<_, AuctionRow>(
            "SELECT id, product_id, starting_price, ends_at FROM auctions WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| Auction {
            id: r.id,
            product_id: r.product_id,
            starting_price: r.starting_price,
            ends_at: r.ends_at,
        }))
    }
}
