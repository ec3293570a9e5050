pub mod auth;
pub mod session;

pub use auth::{identify_caller, require_current_user, BidderClaims, CurrentUser};
pub use session::{ensure_session, SESSION_COOKIE};
