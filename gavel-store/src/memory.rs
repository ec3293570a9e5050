use async_trait::async_trait;
use chrono::Utc;
use gavel_core::rules::check_bid_amount;
use gavel_core::{
    Auction, AuctionRepository, Bid, BidListing, BidRejection, BidRepository, BoxError, NewBid,
    PendingBid, Product, SaveOutcome, SessionId, SessionStore, User, UserRepository,
};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    products: HashMap<Uuid, Product>,
    auctions: HashMap<Uuid, Auction>,
    // Insertion order doubles as creation order
    bids: Vec<Bid>,
    sessions: HashMap<SessionId, PendingBid>,
}

/// Process-local implementation of every store trait, for tests and the
/// `memory` storage backend.
#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_user(&self, user: User) {
        self.tables.write().await.users.insert(user.id, user);
    }

    pub async fn insert_product(&self, product: Product) {
        self.tables.write().await.products.insert(product.id, product);
    }

    pub async fn insert_auction(&self, auction: Auction) {
        self.tables.write().await.auctions.insert(auction.id, auction);
    }

    pub async fn bids_for_auction(&self, auction_id: Uuid) -> Vec<Bid> {
        self.tables.read().await.bids.iter()
            .filter(|b| b.auction_id == auction_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_user(&self, id: Uuid) -> Result<Option<User>, BoxError> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }
}

#[async_trait]
impl AuctionRepository for InMemoryStore {
    async fn find_auction(&self, id: Uuid) -> Result<Option<Auction>, BoxError> {
        Ok(self.tables.read().await.auctions.get(&id).cloned())
    }
}

#[async_trait]
impl BidRepository for InMemoryStore {
    async fn list_bids_for_user(&self, user_id: Uuid) -> Result<Vec<BidListing>, BoxError> {
        let tables = self.tables.read().await;
        let mut listings = Vec::new();

        for bid in tables.bids.iter().filter(|b| b.user_id == user_id) {
            let auction = tables.auctions.get(&bid.auction_id)
                .ok_or_else(|| format!("bid {} references missing auction {}", bid.id, bid.auction_id))?;
            let product = tables.products.get(&auction.product_id)
                .ok_or_else(|| format!("auction {} references missing product {}", auction.id, auction.product_id))?;

            listings.push(BidListing {
                bid: bid.clone(),
                auction: auction.clone(),
                product: product.clone(),
            });
        }

        Ok(listings)
    }

    async fn save_bid(&self, bid: NewBid) -> Result<SaveOutcome, BoxError> {
        // Check and insert under one write lock
        let mut tables = self.tables.write().await;

        let Some(auction) = tables.auctions.get(&bid.auction_id) else {
            return Ok(SaveOutcome::Rejected(BidRejection::AuctionNotFound));
        };

        let high_bid = tables.bids.iter()
            .filter(|b| b.auction_id == bid.auction_id)
            .map(|b| &b.amount)
            .max();

        if let Err(reason) = check_bid_amount(&bid.amount, &auction.starting_price, high_bid) {
            return Ok(SaveOutcome::Rejected(reason));
        }

        let saved = bid.into_bid(Uuid::new_v4(), Utc::now());
        tables.bids.push(saved.clone());
        Ok(SaveOutcome::Saved(saved))
    }
}

#[async_trait]
impl SessionStore for InMemoryStore {
    async fn pending_bid(&self, session: &SessionId) -> Result<Option<PendingBid>, BoxError> {
        Ok(self.tables.read().await.sessions.get(session).cloned())
    }

    async fn store_pending_bid(&self, session: &SessionId, entry: &PendingBid) -> Result<(), BoxError> {
        self.tables.write().await.sessions.insert(session.clone(), entry.clone());
        Ok(())
    }

    async fn clear_pending_bid(&self, session: &SessionId) -> Result<(), BoxError> {
        self.tables.write().await.sessions.remove(session);
        Ok(())
    }
}
