use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use bigdecimal::BigDecimal;
use chrono::{Duration, Utc};
use gavel_api::{app, middleware::BidderClaims, AppState, AuthConfig};
use gavel_core::{Auction, PendingBid, Product, SessionId, SessionStore, User};
use gavel_store::{InMemoryStore, Stores};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::Value;
use std::str::FromStr;
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

const SECRET: &str = "test-secret";

struct Fixture {
    store: Arc<InMemoryStore>,
    router: Router,
    auction: Auction,
    with_card: User,
    without_card: User,
}

async fn fixture() -> Fixture {
    let store = Arc::new(InMemoryStore::new());

    let product = Product {
        id: Uuid::new_v4(),
        name: "Brass telescope".to_string(),
        description: Some("Folding, 1890s".to_string()),
    };
    let auction = Auction {
        id: Uuid::new_v4(),
        product_id: product.id,
        starting_price: BigDecimal::from(20),
        ends_at: None,
    };
    let with_card = User {
        id: Uuid::new_v4(),
        email: "carded@example.com".to_string(),
        has_valid_payment_method: true,
    };
    let without_card = User {
        id: Uuid::new_v4(),
        email: "cardless@example.com".to_string(),
        has_valid_payment_method: false,
    };

    store.insert_product(product).await;
    store.insert_auction(auction.clone()).await;
    store.insert_user(with_card.clone()).await;
    store.insert_user(without_card.clone()).await;

    let state = AppState::new(
        Stores::in_memory(store.clone()),
        AuthConfig {
            secret: SECRET.to_string(),
            expiration: 3600,
            enable_token_helper: false,
        },
    );

    Fixture { store, router: app(state), auction, with_card, without_card }
}

fn token_for(user: &User) -> String {
    let claims = BidderClaims {
        sub: user.id.to_string(),
        exp: (Utc::now() + Duration::hours(1)).timestamp() as usize,
    };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(SECRET.as_bytes())).unwrap()
}

fn bid_request(auction_id: Uuid, amount: &str, user: Option<&User>, session: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(format!("/auctions/{}/bids", auction_id))
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");

    if let Some(user) = user {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token_for(user)));
    }
    if let Some(session) = session {
        builder = builder.header(header::COOKIE, format!("gavel_session={}", session));
    }

    builder.body(Body::from(format!("bid%5Bamount%5D={}", amount))).unwrap()
}

fn location(response: &Response) -> &str {
    response.headers().get(header::LOCATION).unwrap().to_str().unwrap()
}

fn cookie_value(response: &Response, name: &str) -> Option<String> {
    response.headers().get_all(header::SET_COOKIE).iter()
        .filter_map(|v| v.to_str().ok())
        .find_map(|v| {
            let pair = v.split(';').next()?;
            let (key, value) = pair.split_once('=')?;
            (key == name).then(|| value.to_string())
        })
}

async fn json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_anonymous_bid_redirects_to_login_and_keeps_pending_bid() {
    let fx = fixture().await;

    let response = fx.router.clone()
        .oneshot(bid_request(fx.auction.id, "25.00", None, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
    assert!(cookie_value(&response, "flash").is_some());

    let session = SessionId::parse(&cookie_value(&response, "gavel_session").unwrap()).unwrap();
    let pending = fx.store.pending_bid(&session).await.unwrap();
    assert_eq!(pending, Some(PendingBid { amount: "25.00".to_string(), auction_id: fx.auction.id }));
    assert!(fx.store.bids_for_auction(fx.auction.id).await.is_empty());
}

#[tokio::test]
async fn test_missing_payment_method_renders_auction_page() {
    let fx = fixture().await;

    let response = fx.router.clone()
        .oneshot(bid_request(fx.auction.id, "30", Some(&fx.without_card), Some("cardless1")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(header::LOCATION).is_none());

    let body = json_body(response).await;
    assert_eq!(body["view"], "auctions/show");
    assert_eq!(body["flash"]["kind"], "notice");
    assert_eq!(body["flash"]["link"]["href"], "/profile/edit");
    assert_eq!(body["context"]["auction"]["id"], fx.auction.id.to_string());
    assert!(body["context"]["bid"]["amount"].is_null());

    let session = SessionId::parse("cardless1").unwrap();
    let pending = fx.store.pending_bid(&session).await.unwrap();
    assert_eq!(pending, Some(PendingBid { amount: "30".to_string(), auction_id: fx.auction.id }));
    assert!(fx.store.bids_for_auction(fx.auction.id).await.is_empty());
}

#[tokio::test]
async fn test_missing_auction_on_redisplay_is_not_found() {
    let fx = fixture().await;

    let response = fx.router.clone()
        .oneshot(bid_request(Uuid::new_v4(), "30", Some(&fx.without_card), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_winning_bid_is_saved_and_clears_pending_bid() {
    let fx = fixture().await;

    // An earlier anonymous attempt leaves a pending bid behind
    let first = fx.router.clone()
        .oneshot(bid_request(fx.auction.id, "21", None, Some("returning1")))
        .await
        .unwrap();
    assert_eq!(location(&first), "/login");

    let response = fx.router.clone()
        .oneshot(bid_request(fx.auction.id, "21", Some(&fx.with_card), Some("returning1")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), format!("/auctions/{}", fx.auction.id));

    let session = SessionId::parse("returning1").unwrap();
    assert_eq!(fx.store.pending_bid(&session).await.unwrap(), None);

    let bids = fx.store.bids_for_auction(fx.auction.id).await;
    assert_eq!(bids.len(), 1);
    assert_eq!(bids[0].user_id, fx.with_card.id);
    assert_eq!(bids[0].amount, BigDecimal::from(21));
}

#[tokio::test]
async fn test_low_bid_is_rejected() {
    let fx = fixture().await;

    let accepted = fx.router.clone()
        .oneshot(bid_request(fx.auction.id, "40", Some(&fx.with_card), None))
        .await
        .unwrap();
    assert_eq!(location(&accepted), format!("/auctions/{}", fx.auction.id));

    let response = fx.router.clone()
        .oneshot(bid_request(fx.auction.id, "39.99", Some(&fx.with_card), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), format!("/auctions/{}", fx.auction.id));
    assert!(cookie_value(&response, "flash").is_some());

    let bids = fx.store.bids_for_auction(fx.auction.id).await;
    assert_eq!(bids.len(), 1);
    assert_eq!(bids[0].amount, BigDecimal::from_str("40").unwrap());
}

#[tokio::test]
async fn test_bid_listing_requires_login() {
    let fx = fixture().await;

    let response = fx.router.clone()
        .oneshot(Request::builder().uri("/bids").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn test_bid_listing_shows_only_own_bids() {
    let fx = fixture().await;
    let rival = User {
        id: Uuid::new_v4(),
        email: "rival@example.com".to_string(),
        has_valid_payment_method: true,
    };
    fx.store.insert_user(rival.clone()).await;

    for (user, amount) in [(&fx.with_card, "25"), (&rival, "26"), (&fx.with_card, "27")] {
        let response = fx.router.clone()
            .oneshot(bid_request(fx.auction.id, amount, Some(user), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
    }

    let response = fx.router.clone()
        .oneshot(
            Request::builder()
                .uri("/bids")
                .header(header::AUTHORIZATION, format!("Bearer {}", token_for(&fx.with_card)))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["view"], "bids/index");
    assert_eq!(body["layout"], "profile");

    let bids = body["context"]["bids"].as_array().unwrap();
    assert_eq!(bids.len(), 2);
    for listing in bids {
        assert_eq!(listing["bid"]["user_id"], fx.with_card.id.to_string());
        assert_eq!(listing["auction"]["id"], fx.auction.id.to_string());
        assert_eq!(listing["product"]["name"], "Brass telescope");
    }
}

#[tokio::test]
async fn test_token_helper_is_disabled_by_default() {
    let fx = fixture().await;

    let response = fx.router.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/token")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(format!(r#"{{"user_id":"{}"}}"#, fx.with_card.id)))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
