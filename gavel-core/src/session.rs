use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[cfg(test)]
use mockall::automock;

use crate::BoxError;

/// Session field holding the pending bid.
pub const PENDING_BID_KEY: &str = "bid_data";

/// Opaque identifier of a browser session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Accepts an id received from a client. Empty or oversized values are refused.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() || raw.len() > 128 || !raw.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return None;
        }
        Some(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A bid attempt that could not be completed, kept so the form can be restored later.
///
/// `amount` is the text exactly as the caller submitted it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PendingBid {
    pub amount: String,
    pub auction_id: Uuid,
}

/// Per-session storage of the pending bid. Each session holds at most one entry.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn pending_bid(&self, session: &SessionId) -> Result<Option<PendingBid>, BoxError>;

    /// Replaces any entry already held by the session.
    async fn store_pending_bid(&self, session: &SessionId, entry: &PendingBid) -> Result<(), BoxError>;

    async fn clear_pending_bid(&self, session: &SessionId) -> Result<(), BoxError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_id_parse() {
        let id = SessionId::generate();
        assert_eq!(SessionId::parse(id.as_str()), Some(id));

        assert!(SessionId::parse("").is_none());
        assert!(SessionId::parse("abc;def").is_none());
        assert!(SessionId::parse(&"a".repeat(129)).is_none());
    }

    #[test]
    fn test_pending_bid_keeps_raw_amount() {
        let entry = PendingBid { amount: "12.50".to_string(), auction_id: Uuid::new_v4() };
        let json = serde_json::to_string(&entry).unwrap();
        let back: PendingBid = serde_json::from_str(&json).unwrap();
        assert_eq!(back.amount, "12.50");
    }
}
