use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{Auction, BidForm, BidListing};

pub const LOGIN_PATH: &str = "/login";
pub const EDIT_PROFILE_PATH: &str = "/profile/edit";

pub fn auction_path(auction_id: Uuid) -> String {
    format!("/auctions/{}", auction_id)
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FlashKind {
    Notice,
    Alert,
}

/// User-facing message, described by kind and parameters. Text and markup are
/// produced by the presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum MessageKind {
    LoginRequired,
    PaymentMethodRequired { edit_account_path: String },
    HighestBidder,
    BidTooLow,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: MessageKind,
}

impl Flash {
    pub fn notice(message: MessageKind) -> Self {
        Self { kind: FlashKind::Notice, message }
    }

    pub fn alert(message: MessageKind) -> Self {
        Self { kind: FlashKind::Alert, message }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum ViewContext {
    BidIndex { bids: Vec<BidListing> },
    AuctionShow { auction: Auction, bid: BidForm },
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct View {
    pub name: &'static str,
    pub layout: Option<&'static str>,
    pub flash: Option<Flash>,
    pub context: ViewContext,
}

impl View {
    pub fn bid_index(bids: Vec<BidListing>) -> Self {
        Self {
            name: "bids/index",
            layout: Some("profile"),
            flash: None,
            context: ViewContext::BidIndex { bids },
        }
    }

    pub fn auction_show(auction: Auction, bid: BidForm, flash: Option<Flash>) -> Self {
        Self {
            name: "auctions/show",
            layout: None,
            flash,
            context: ViewContext::AuctionShow { auction, bid },
        }
    }
}

/// The single terminal action of a request: redirect or render, never both.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Redirect { to: String, flash: Option<Flash> },
    Render(View),
}

impl Outcome {
    pub fn redirect(to: impl Into<String>, flash: Flash) -> Self {
        Outcome::Redirect { to: to.into(), flash: Some(flash) }
    }
}
