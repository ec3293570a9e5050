use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted monetary offer by a user on an auction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bid {
    pub id: Uuid,
    pub amount: BigDecimal,
    pub auction_id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Candidate bid handed to the data store. Ids and timestamps are assigned on save.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBid {
    pub amount: BigDecimal,
    pub auction_id: Uuid,
    pub user_id: Uuid,
}

impl NewBid {
    pub fn into_bid(self, id: Uuid, created_at: DateTime<Utc>) -> Bid {
        Bid {
            id,
            amount: self.amount,
            auction_id: self.auction_id,
            user_id: self.user_id,
            created_at,
        }
    }
}

/// Unsaved bid backing the form on a re-displayed auction page.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BidForm {
    pub amount: Option<BigDecimal>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub has_valid_payment_method: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Auction {
    pub id: Uuid,
    pub product_id: Uuid,
    pub starting_price: BigDecimal,
    pub ends_at: Option<DateTime<Utc>>,
}

/// A bid joined with its auction and the auction's product, for display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BidListing {
    pub bid: Bid,
    pub auction: Auction,
    pub product: Product,
}
