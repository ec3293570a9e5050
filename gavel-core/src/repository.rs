use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(test)]
use mockall::automock;

use crate::models::{Auction, Bid, BidListing, NewBid, User};
use crate::BoxError;

/// Why the data store refused a bid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, thiserror::Error)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BidRejection {
    #[error("auction does not exist")]
    AuctionNotFound,
    #[error("amount is not a valid number")]
    InvalidAmount,
    #[error("amount must be greater than zero")]
    NotPositive,
    #[error("amount is below the starting price")]
    BelowStartingPrice,
    #[error("amount does not exceed the current high bid")]
    NotAboveHighBid,
}

/// Result of a single save attempt. A rejection is an expected outcome, not a fault.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    Saved(Bid),
    Rejected(BidRejection),
}

/// Repository trait for user lookups
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_user(&self, id: Uuid) -> Result<Option<User>, BoxError>;
}

/// Repository trait for auction lookups
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AuctionRepository: Send + Sync {
    async fn find_auction(&self, id: Uuid) -> Result<Option<Auction>, BoxError>;
}

/// Repository trait for bid data access
#[cfg_attr(test, automock)]
#[async_trait]
pub trait BidRepository: Send + Sync {
    /// All bids placed by the user, oldest first, with auction and product.
    async fn list_bids_for_user(&self, user_id: Uuid) -> Result<Vec<BidListing>, BoxError>;

    /// Validates against the auction's current high bid and persists on success.
    /// The check and the insert are atomic per auction.
    async fn save_bid(&self, bid: NewBid) -> Result<SaveOutcome, BoxError>;
}
