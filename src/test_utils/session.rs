use std::sync::Arc;

use axum::{http::StatusCode, response::IntoResponse};
use axum_extra::extract::{PrivateCookieJar, cookie::Cookie};
use axum_test::TestServer;

use crate::{
    AppState,
    auth::{DEFAULT_TOKEN_DURATION, Token, TokenStore},
    build_router,
};

use super::{FakeApi, get_header};

pub(crate) fn get_test_state(api: Arc<FakeApi>) -> AppState {
    AppState::new("foobar", api)
}

pub(crate) fn get_test_server(api: Arc<FakeApi>) -> TestServer {
    TestServer::new(build_router(get_test_state(api))).expect("Could not create test server.")
}

/// The encrypted token cookie the browser would hold after logging in.
pub(crate) fn token_cookie(state: &AppState, token: &str) -> Cookie<'static> {
    let mut store = TokenStore::new(
        PrivateCookieJar::new(state.cookie_key.clone()),
        DEFAULT_TOKEN_DURATION,
    );
    store.save(Token::new(token));

    let response = (store, StatusCode::OK).into_response();
    let cookie_string = get_header(&response, "set-cookie");

    Cookie::parse(cookie_string).expect("Could not parse token cookie")
}
