//! Log-out route handler and the response sent when the API ends a session.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_htmx::HxRedirect;

use crate::{
    app_state::ApiState,
    auth::TokenStore,
    command::{CommandHandler, LogOut},
    endpoints,
    view::ViewController,
};

/// Invalidate the token cookie and redirect the client to the log-in page.
pub async fn get_log_out(State(state): State<ApiState>, mut store: TokenStore) -> Response {
    let mut view = ViewController::from_session(store.session());

    if let Err(error) = CommandHandler::new(state.api.as_ref(), &mut store, &mut view)
        .dispatch(LogOut)
        .await
    {
        tracing::error!("Could not log out: {error}");
    }

    tracing::info!("Logged out.");
    (store, Redirect::to(endpoints::ROOT)).into_response()
}

/// Send the browser back to the log-in page after an HTMX request found the
/// session gone or had its token rejected by the API.
///
/// `store` must already be cleared so the response invalidates the cookie.
pub fn session_ended_response(store: TokenStore) -> Response {
    (
        store,
        HxRedirect(endpoints::ROOT.to_owned()),
        StatusCode::OK,
    )
        .into_response()
}
