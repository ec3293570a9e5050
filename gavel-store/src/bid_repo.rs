use async_trait::async_trait;
use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use gavel_core::rules::check_bid_amount;
use gavel_core::{
    Auction, Bid, BidListing, BidRejection, BidRepository, BoxError, NewBid, Product, SaveOutcome,
};
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

pub struct StoreBidRepository {
    pool: PgPool,
}

impl StoreBidRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct BidRow {
    id: Uuid,
    auction_id: Uuid,
    user_id: Uuid,
    amount: BigDecimal,
    created_at: DateTime<Utc>,
}

impl From<BidRow> for Bid {
    fn from(row: BidRow) -> Self {
        Bid {
            id: row.id,
            amount: row.amount,
            auction_id: row.auction_id,
            user_id: row.user_id,
            created_at: row.created_at,
        }
    }
}

// One row per bid, joined through the auction to its product
#[derive(sqlx::FromRow)]
struct BidListingRow {
    bid_id: Uuid,
    user_id: Uuid,
    amount: BigDecimal,
    bid_created_at: DateTime<Utc>,
    auction_id: Uuid,
    starting_price: BigDecimal,
    ends_at: Option<DateTime<Utc>>,
    product_id: Uuid,
    product_name: String,
    product_description: Option<String>,
}

impl From<BidListingRow> for BidListing {
    fn from(row: BidListingRow) -> Self {
        BidListing {
            bid: Bid {
                id: row.bid_id,
                amount: row.amount,
                auction_id: row.auction_id,
                user_id: row.user_id,
                created_at: row.bid_created_at,
            },
            auction: Auction {
                id: row.auction_id,
                product_id: row.product_id,
                starting_price: row.starting_price,
                ends_at: row.ends_at,
            },
            product: Product {
                id: row.product_id,
                name: row.product_name,
                description: row.product_description,
            },
        }
    }
}

#[async_trait]
impl BidRepository for StoreBidRepository {
    async fn list_bids_for_user(&self, user_id: Uuid) -> Result<Vec<BidListing>, BoxError> {
        let rows = sqlx::query_as::<_, BidListingRow>(
            r#"
            SELECT b.id AS bid_id, b.user_id, b.amount, b.created_at AS bid_created_at,
                   a.id AS auction_id, a.starting_price, a.ends_at,
                   p.id AS product_id, p.name AS product_name, p.description AS product_description
            FROM bids b
            JOIN auctions a ON a.id = b.auction_id
            JOIN products p ON p.id = a.product_id
            WHERE b.user_id = $1
            ORDER BY b.created_at ASC, b.id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(BidListing::from).collect())
    }

    async fn save_bid(&self, bid: NewBid) -> Result<SaveOutcome, BoxError> {
        let mut tx = self.pool.begin().await?;

        // Row lock serializes concurrent bids on the same auction
        let starting_price: Option<BigDecimal> = sqlx::query_scalar(
            "SELECT starting_price FROM auctions WHERE id = $1 FOR UPDATE",
        )
        .bind(bid.auction_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(starting_price) = starting_price else {
            tx.rollback().await?;
            return Ok(SaveOutcome::Rejected(BidRejection::AuctionNotFound));
        };

        let high_bid: Option<BigDecimal> = sqlx::query_scalar(
            "SELECT MAX(amount) FROM bids WHERE auction_id = $1",
        )
        .bind(bid.auction_id)
        .fetch_one(&mut *tx)
        .await?;

        if let Err(reason) = check_bid_amount(&bid.amount, &starting_price, high_bid.as_ref()) {
            debug!("Rejecting bid on auction {}: {}", bid.auction_id, reason);
            tx.rollback().await?;
            return Ok(SaveOutcome::Rejected(reason));
        }

        let row = sqlx::query_as::<_, BidRow>(
            r#"
            INSERT INTO bids (id, auction_id, user_id, amount)
            VALUES ($1, $2, $3, $4)
            RETURNING id, auction_id, user_id, amount, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(bid.auction_id)
        .bind(bid.user_id)
        .bind(&bid.amount)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(SaveOutcome::Saved(row.into()))
    }
}
