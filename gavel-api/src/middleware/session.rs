use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use gavel_core::SessionId;

pub const SESSION_COOKIE: &str = "gavel_session";

/// Returns the session named by the request cookie, issuing a fresh one when
/// the cookie is missing or unusable. The returned jar must be sent back.
pub fn ensure_session(jar: CookieJar) -> (CookieJar, SessionId) {
    if let Some(id) = jar.get(SESSION_COOKIE).and_then(|c| SessionId::parse(c.value())) {
        return (jar, id);
    }

    let id = SessionId::generate();
    let cookie = Cookie::build((SESSION_COOKIE, id.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);

    (jar.add(cookie), id)
}
