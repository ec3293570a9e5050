use axum::{
    extract::State,
    Json,
    routing::post,
    Router,
};
use serde::{Deserialize, Serialize};
use jsonwebtoken::{encode, Header, EncodingKey};
use chrono::{Utc, Duration};
use uuid::Uuid;
use crate::{state::AppState, error::AppError, middleware::BidderClaims};

#[derive(Debug, Deserialize)]
struct TokenRequest {
    user_id: Uuid,
}

#[derive(Debug, Serialize)]
struct AuthResponse {
    token: String,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/auth/token", post(issue_token))
}

/// Development helper minting a bearer token for an existing user id.
async fn issue_token(
    State(state): State<AppState>,
    Json(req): Json<TokenRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    if !state.auth.enable_token_helper {
        return Err(AppError::NotFoundError("Not Found".to_string()));
    }

    let claims = BidderClaims {
        sub: req.user_id.to_string(),
        exp: (Utc::now() + Duration::seconds(state.auth.expiration as i64)).timestamp() as usize,
    };

    let token = encode(&Header::default(), &claims, &EncodingKey::from_secret(state.auth.secret.as_bytes()))
        .map_err(|e| AppError::InternalServerError(format!("Token encoding failed: {}", e)))?;

    tracing::info!("Issued development token for user {}", req.user_id);
    Ok(Json(AuthResponse { token }))
}
