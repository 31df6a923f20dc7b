//! Durable storage for the session token.

use std::convert::Infallible;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
    response::{IntoResponseParts, ResponseParts},
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};
use time::Duration;

use crate::AppState;

use super::{
    Session, Token,
    cookie::{get_token_from_cookie, invalidate_token_cookie, set_token_cookie},
};

/// The state needed to read and write the token cookie.
#[derive(Clone)]
pub struct TokenStoreState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,
    /// How long the browser should keep the token cookie.
    pub token_duration: Duration,
}

impl FromRef<AppState> for TokenStoreState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            token_duration: state.token_duration,
        }
    }
}

/// Keeps the session token in a private cookie and mirrors it into a [Session].
///
/// The store is extracted from each request with the token already loaded.
/// Return the store from the handler (it implements [IntoResponseParts]) so
/// that any change reaches the browser as a `Set-Cookie` header.
pub struct TokenStore {
    jar: PrivateCookieJar,
    session: Session,
    token_duration: Duration,
}

impl TokenStore {
    /// Create a store backed by `jar` with an empty session.
    pub fn new(jar: PrivateCookieJar, token_duration: Duration) -> Self {
        Self {
            jar,
            session: Session::default(),
            token_duration,
        }
    }

    /// Populate the session from the cookie jar.
    ///
    /// Returns whether a token was found.
    pub fn load(&mut self) -> bool {
        match get_token_from_cookie(&self.jar) {
            Some(token) => {
                self.session.set(token);
                true
            }
            None => {
                self.session.clear();
                false
            }
        }
    }

    /// Persist `token` and make it the current session.
    pub fn save(&mut self, token: Token) {
        self.jar = set_token_cookie(self.jar.clone(), &token, self.token_duration);
        self.session.set(token);
    }

    /// Remove the token from the cookie jar and the session.
    pub fn clear(&mut self) {
        self.jar = invalidate_token_cookie(self.jar.clone());
        self.session.clear();
    }

    /// The session mirrored from the cookie jar.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The cookie jar, including any pending `Set-Cookie` changes.
    #[cfg(test)]
    pub fn into_jar(self) -> PrivateCookieJar {
        self.jar
    }
}

impl<S> FromRequestParts<S> for TokenStore
where
    S: Send + Sync,
    TokenStoreState: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = TokenStoreState::from_ref(state);
        let jar = PrivateCookieJar::from_headers(&parts.headers, state.cookie_key);

        let mut store = TokenStore::new(jar, state.token_duration);
        if store.load() {
            tracing::debug!("Loaded session token from cookie.");
        }

        Ok(store)
    }
}

impl IntoResponseParts for TokenStore {
    type Error = Infallible;

    fn into_response_parts(self, res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        self.jar.into_response_parts(res)
    }
}
