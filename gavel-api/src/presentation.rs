use axum::{
    response::{IntoResponse, Redirect, Response},
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use gavel_core::{Flash, FlashKind, MessageKind, Outcome, View, ViewContext};
use serde::Serialize;
use time::Duration;

/// Cookie carrying a redirect's flash. The page rendered after the redirect
/// consumes it; the short lifetime keeps it from reappearing on later pages.
pub const FLASH_COOKIE: &str = "flash";

pub const FLASH_MAX_AGE_SECONDS: i64 = 60;

#[derive(Debug, Serialize, PartialEq)]
pub struct Link {
    pub label: &'static str,
    pub href: String,
}

/// A flash message ready for display.
#[derive(Debug, Serialize, PartialEq)]
pub struct FlashBody {
    pub kind: FlashKind,
    pub text: &'static str,
    pub link: Option<Link>,
}

impl From<&Flash> for FlashBody {
    fn from(flash: &Flash) -> Self {
        let (text, link) = match &flash.message {
            MessageKind::LoginRequired => ("You must log in to bid.", None),
            MessageKind::PaymentMethodRequired { edit_account_path } => (
                "Oops, a valid credit card is required before you can submit a bid. \
                 Click here to add a credit card to your account:",
                Some(Link { label: "Edit Your Account", href: edit_account_path.clone() }),
            ),
            MessageKind::HighestBidder => ("You are currently the highest bidder!", None),
            MessageKind::BidTooLow => ("Your bid must be higher than the current bid", None),
        };

        FlashBody { kind: flash.kind, text, link }
    }
}

#[derive(Debug, Serialize)]
struct ViewDocument<'a> {
    view: &'static str,
    layout: Option<&'static str>,
    flash: Option<FlashBody>,
    context: &'a ViewContext,
}

impl<'a> From<&'a View> for ViewDocument<'a> {
    fn from(view: &'a View) -> Self {
        ViewDocument {
            view: view.name,
            layout: view.layout,
            flash: view.flash.as_ref().map(FlashBody::from),
            context: &view.context,
        }
    }
}

/// Turns the handler's terminal action into exactly one HTTP response.
///
/// Redirects carry their flash in a cookie for the next page; renders embed it.
pub fn respond(jar: CookieJar, outcome: Outcome) -> Response {
    match outcome {
        Outcome::Redirect { to, flash } => {
            let jar = match flash.as_ref().map(FlashBody::from) {
                Some(body) => match serde_json::to_string(&body) {
                    Ok(json) => jar.add(
                        Cookie::build((FLASH_COOKIE, json))
                            .path("/")
                            .http_only(true)
                            .max_age(Duration::seconds(FLASH_MAX_AGE_SECONDS)),
                    ),
                    Err(e) => {
                        tracing::error!("Failed to encode flash: {}", e);
                        jar
                    }
                },
                None => jar,
            };
            (jar, Redirect::to(&to)).into_response()
        }
        Outcome::Render(view) => (jar, Json(ViewDocument::from(&view))).into_response(),
    }
}
