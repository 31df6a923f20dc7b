//! Functions for keeping the bearer token in a private cookie.

use axum_extra::extract::{
    PrivateCookieJar,
    cookie::{Cookie, SameSite},
};
use time::{Duration, OffsetDateTime};

use super::Token;

pub(crate) const COOKIE_TOKEN: &str = "clarity_spend_token";
/// The default duration for which the token cookie is kept by the browser.
///
/// The API decides when a token expires, so the cookie only has to outlive it.
pub(crate) const DEFAULT_TOKEN_DURATION: Duration = Duration::days(365);

/// Add the token cookie to `jar`, expiring `duration` from now.
pub(crate) fn set_token_cookie(
    jar: PrivateCookieJar,
    token: &Token,
    duration: Duration,
) -> PrivateCookieJar {
    let expiry = OffsetDateTime::now_utc() + duration;

    jar.add(
        Cookie::build((COOKIE_TOKEN, token.as_str().to_owned()))
            .path("/")
            .expires(expiry)
            .http_only(true)
            .same_site(SameSite::Strict)
            .secure(true),
    )
}

/// Set the token cookie to an invalid value and set its max age to zero, which should delete the
/// cookie on the client side.
pub(crate) fn invalidate_token_cookie(jar: PrivateCookieJar) -> PrivateCookieJar {
    jar.add(
        Cookie::build((COOKIE_TOKEN, ""))
            .path("/")
            .expires(OffsetDateTime::UNIX_EPOCH)
            .max_age(Duration::ZERO)
            .http_only(true)
            .same_site(SameSite::Strict)
            .secure(true),
    )
}

/// Get the token from the cookie jar, if there is a non-empty one.
pub(crate) fn get_token_from_cookie(jar: &PrivateCookieJar) -> Option<Token> {
    jar.get(COOKIE_TOKEN)
        .map(|cookie| cookie.value_trimmed().to_owned())
        .filter(|value| !value.is_empty())
        .map(Token::new)
}
