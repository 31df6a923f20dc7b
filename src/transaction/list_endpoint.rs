//! Defines the endpoint that fetches the transactions again and returns the
//! dashboard's list and chart.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};

use crate::{
    app_state::ApiState,
    auth::TokenStore,
    command::{CommandHandler, ListTransactions},
    dashboard::dashboard_data_view,
    log_out::session_ended_response,
    view::ViewController,
};

/// A route handler returning the transaction list and spending chart.
///
/// A failure other than a rejected token is shown in place of the list.
pub async fn get_transactions_endpoint(
    State(state): State<ApiState>,
    mut store: TokenStore,
) -> Response {
    let mut view = ViewController::from_session(store.session());

    let listing = CommandHandler::new(state.api.as_ref(), &mut store, &mut view)
        .dispatch(ListTransactions)
        .await;

    match listing {
        Err(error) if error.ends_session() => session_ended_response(store),
        listing => dashboard_data_view(&listing).into_response(),
    }
}
