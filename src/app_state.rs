//! Implements a struct that holds the state of the web client's server.

use std::sync::Arc;

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use sha2::{Digest, Sha512};
use time::Duration;

use crate::{api::FinanceApi, auth::DEFAULT_TOKEN_DURATION};

/// The state of the web client's server.
#[derive(Clone)]
pub struct AppState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,

    /// How long the browser keeps the token cookie.
    pub token_duration: Duration,

    /// The client for the ClaritySpend API.
    pub api: Arc<dyn FinanceApi>,
}

impl AppState {
    /// Create a new [AppState] that signs cookies with a key derived from
    /// `cookie_secret` and forwards requests to `api`.
    pub fn new(cookie_secret: &str, api: Arc<dyn FinanceApi>) -> Self {
        Self {
            cookie_key: create_cookie_key(cookie_secret),
            token_duration: DEFAULT_TOKEN_DURATION,
            api,
        }
    }
}

/// The state needed by handlers that call the API.
#[derive(Clone)]
pub struct ApiState {
    pub api: Arc<dyn FinanceApi>,
}

impl FromRef<AppState> for ApiState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            api: state.api.clone(),
        }
    }
}

/// Create a signing key for cookies from a `secret` string.
pub fn create_cookie_key(secret: &str) -> Key {
    let hash = Sha512::digest(secret);

    Key::from(&hash)
}
