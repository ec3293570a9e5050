use axum::{
    extract::{Path, State},
    middleware,
    response::Response,
    routing::{get, post},
    Extension, Form, Router,
};
use axum_extra::extract::cookie::CookieJar;
use gavel_core::{BidSubmission, FlashKind, MessageKind, Outcome};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::middleware::{ensure_session, require_current_user, CurrentUser};
use crate::presentation::respond;
use crate::state::AppState;

/// Form body of a bid submission (`bid[amount]=...`).
#[derive(Debug, Deserialize)]
pub struct BidParams {
    #[serde(rename = "bid[amount]", default)]
    pub amount: String,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/bids", get(list_bids).route_layer(middleware::from_fn(require_current_user)))
        .route("/auctions/{auction_id}/bids", post(create_bid))
}

/// GET /bids
/// The caller's bids with auction and product
async fn list_bids(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let user_id = user.ok_or_else(|| AppError::AuthenticationError("login required".to_string()))?;
    let outcome = state.bids.list_bids(user_id).await?;
    Ok(respond(jar, outcome))
}

/// POST /auctions/{auction_id}/bids
/// Submit a bid
async fn create_bid(
    State(state): State<AppState>,
    Path(auction_id): Path<Uuid>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    jar: CookieJar,
    Form(form): Form<BidParams>,
) -> Result<Response, AppError> {
    let (jar, session) = ensure_session(jar);
    let submission = BidSubmission { amount: form.amount, auction_id };

    let outcome = state.bids.submit_bid(&session, user, submission).await?;

    state.metrics.bid_submissions.with_label_values(&[outcome_label(&outcome)]).inc();
    Ok(respond(jar, outcome))
}

fn outcome_label(outcome: &Outcome) -> &'static str {
    let flash = match outcome {
        Outcome::Redirect { flash, .. } => flash.as_ref(),
        Outcome::Render(view) => view.flash.as_ref(),
    };

    match flash.map(|f| (f.kind, &f.message)) {
        Some((_, MessageKind::LoginRequired)) => "login_required",
        Some((_, MessageKind::PaymentMethodRequired { .. })) => "payment_method_required",
        Some((FlashKind::Notice, MessageKind::HighestBidder)) => "accepted",
        Some((_, MessageKind::BidTooLow)) => "rejected",
        _ => "other",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gavel_core::Flash;

    #[test]
    fn test_outcome_labels() {
        let accepted = Outcome::redirect("/auctions/1", Flash::notice(MessageKind::HighestBidder));
        let rejected = Outcome::redirect("/auctions/1", Flash::alert(MessageKind::BidTooLow));
        let login = Outcome::redirect("/login", Flash::alert(MessageKind::LoginRequired));

        assert_eq!(outcome_label(&accepted), "accepted");
        assert_eq!(outcome_label(&rejected), "rejected");
        assert_eq!(outcome_label(&login), "login_required");
    }
}
