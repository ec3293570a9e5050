pub mod models;
pub mod repository;
pub mod session;
pub mod rules;
pub mod presentation;
pub mod bidding;

pub use bidding::{BidSubmission, BidSubmissionHandler};
pub use models::{Auction, Bid, BidForm, BidListing, NewBid, Product, User};
pub use presentation::{Flash, FlashKind, MessageKind, Outcome, View, ViewContext};
pub use repository::{AuctionRepository, BidRejection, BidRepository, SaveOutcome, UserRepository};
pub use session::{PendingBid, SessionId, SessionStore};

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Data store error: {0}")]
    Store(#[source] BoxError),
    #[error("Session store error: {0}")]
    Session(#[source] BoxError),
}

pub type CoreResult<T> = Result<T, CoreError>;
