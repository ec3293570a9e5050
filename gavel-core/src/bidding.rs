use std::str::FromStr;
use std::sync::Arc;

use bigdecimal::BigDecimal;
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::{BidForm, NewBid};
use crate::presentation::{auction_path, Flash, MessageKind, Outcome, View, EDIT_PROFILE_PATH, LOGIN_PATH};
use crate::repository::{AuctionRepository, BidRejection, BidRepository, SaveOutcome, UserRepository};
use crate::session::{PendingBid, SessionId, SessionStore};
use crate::{CoreError, CoreResult};

/// Parameters of a bid submission, as received from the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BidSubmission {
    pub amount: String,
    pub auction_id: Uuid,
}

impl BidSubmission {
    fn pending(&self) -> PendingBid {
        PendingBid {
            amount: self.amount.clone(),
            auction_id: self.auction_id,
        }
    }
}

/// Lists a user's bids and accepts new bid submissions.
pub struct BidSubmissionHandler {
    sessions: Arc<dyn SessionStore>,
    users: Arc<dyn UserRepository>,
    auctions: Arc<dyn AuctionRepository>,
    bids: Arc<dyn BidRepository>,
}

impl BidSubmissionHandler {
    pub fn new(
        sessions: Arc<dyn SessionStore>,
        users: Arc<dyn UserRepository>,
        auctions: Arc<dyn AuctionRepository>,
        bids: Arc<dyn BidRepository>,
    ) -> Self {
        Self { sessions, users, auctions, bids }
    }

    /// Renders the caller's bids. The caller has already passed the authentication gate.
    pub async fn list_bids(&self, user_id: Uuid) -> CoreResult<Outcome> {
        let bids = self.bids.list_bids_for_user(user_id).await.map_err(CoreError::Store)?;
        Ok(Outcome::Render(View::bid_index(bids)))
    }

    pub async fn submit_bid(
        &self,
        session: &SessionId,
        caller: Option<Uuid>,
        submission: BidSubmission,
    ) -> CoreResult<Outcome> {
        // 1. Forget any earlier attempt before deciding anything else
        self.sessions.clear_pending_bid(session).await.map_err(CoreError::Session)?;

        // 2. Authentication
        let user = match caller {
            Some(id) => self.users.find_user(id).await.map_err(CoreError::Store)?,
            None => None,
        };
        let Some(user) = user else {
            self.remember(session, &submission).await?;
            info!("Bid on auction {} deferred: caller not logged in", submission.auction_id);
            return Ok(Outcome::redirect(LOGIN_PATH, Flash::alert(MessageKind::LoginRequired)));
        };

        // 3. Payment method on file
        if !user.has_valid_payment_method {
            self.remember(session, &submission).await?;
            let auction = self.auctions.find_auction(submission.auction_id).await
                .map_err(CoreError::Store)?
                .ok_or_else(|| CoreError::NotFound(format!("auction {}", submission.auction_id)))?;

            info!("Bid on auction {} deferred: user {} has no payment method", auction.id, user.id);
            let flash = Flash::notice(MessageKind::PaymentMethodRequired {
                edit_account_path: EDIT_PROFILE_PATH.to_string(),
            });
            return Ok(Outcome::Render(View::auction_show(auction, BidForm::default(), Some(flash))));
        }

        // 4. Save attempt
        let destination = auction_path(submission.auction_id);
        let amount = match BigDecimal::from_str(submission.amount.trim()) {
            Ok(amount) => amount,
            Err(_) => return Ok(Self::rejected(destination, BidRejection::InvalidAmount)),
        };

        let candidate = NewBid {
            amount,
            auction_id: submission.auction_id,
            user_id: user.id,
        };

        match self.bids.save_bid(candidate).await.map_err(CoreError::Store)? {
            SaveOutcome::Saved(bid) => {
                info!("Bid {} of {} accepted on auction {}", bid.id, bid.amount, bid.auction_id);
                Ok(Outcome::redirect(destination, Flash::notice(MessageKind::HighestBidder)))
            }
            SaveOutcome::Rejected(reason) => Ok(Self::rejected(destination, reason)),
        }
    }

    async fn remember(&self, session: &SessionId, submission: &BidSubmission) -> CoreResult<()> {
        self.sessions
            .store_pending_bid(session, &submission.pending())
            .await
            .map_err(CoreError::Session)
    }

    fn rejected(destination: String, reason: BidRejection) -> Outcome {
        warn!("Bid rejected for {}: {}", destination, reason);
        Outcome::redirect(destination, Flash::alert(MessageKind::BidTooLow))
    }
}
