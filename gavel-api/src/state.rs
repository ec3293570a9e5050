use std::sync::Arc;
use gavel_core::BidSubmissionHandler;
use gavel_store::Stores;

use crate::metrics::Metrics;

#[derive(Clone)]
pub struct AuthConfig {
    pub secret: String,
    pub expiration: u64,
    pub enable_token_helper: bool,
}

#[derive(Clone)]
pub struct AppState {
    pub bids: Arc<BidSubmissionHandler>,
    pub auth: AuthConfig,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    pub fn new(stores: Stores, auth: AuthConfig) -> Self {
        let handler = BidSubmissionHandler::new(stores.sessions, stores.users, stores.auctions, stores.bids);
        Self {
            bids: Arc::new(handler),
            auth,
            metrics: Arc::new(Metrics::new()),
        }
    }
}
