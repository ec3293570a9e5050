use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use gavel_core::presentation::LOGIN_PATH;
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::state::AppState;

// ============================================================================
// JWT Claims
// ============================================================================

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BidderClaims {
    pub sub: String,
    pub exp: usize,
}

/// Identity resolved for the current request, `None` when the caller is anonymous.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser(pub Option<Uuid>);

// ============================================================================
// Caller Identification Middleware
// ============================================================================

/// Decodes the bearer token if one is present. Missing, malformed or expired
/// tokens leave the request anonymous rather than failing it.
pub async fn identify_caller(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let user_id = req.headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .and_then(|token| caller_from_token(token, &state.auth.secret));

    req.extensions_mut().insert(CurrentUser(user_id));

    next.run(req).await
}

fn caller_from_token(token: &str, secret: &str) -> Option<Uuid> {
    let token_data = decode::<BidderClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| tracing::debug!("Ignoring bearer token: {}", e))
    .ok()?;

    Uuid::parse_str(&token_data.claims.sub).ok()
}

// ============================================================================
// Authentication Gate
// ============================================================================

/// Sends anonymous callers to the login page before the handler runs.
pub async fn require_current_user(req: Request, next: Next) -> Response {
    match req.extensions().get::<CurrentUser>() {
        Some(CurrentUser(Some(_))) => next.run(req).await,
        _ => Redirect::to(LOGIN_PATH).into_response(),
    }
}
