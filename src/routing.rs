//! Application router configuration.
//!
//! No route is guarded by middleware: each handler reads the token cookie
//! itself, since a missing or rejected token is part of the normal flow
//! (the root page shows the log-in form, partials redirect with HTMX).

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::{
    AppState,
    csv_upload::upload_csv_endpoint,
    dashboard::get_dashboard_page,
    endpoints,
    log_in::post_log_in,
    log_out::get_log_out,
    not_found::get_404_not_found,
    register_user::register_user,
    transaction::{
        create_transaction_endpoint, get_transactions_endpoint, update_category_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_dashboard_page))
        .route(endpoints::LOG_IN_API, post(post_log_in))
        .route(endpoints::REGISTER_API, post(register_user))
        .route(endpoints::LOG_OUT, get(get_log_out))
        .route(
            endpoints::TRANSACTIONS_API,
            get(get_transactions_endpoint).post(create_transaction_endpoint),
        )
        .route(endpoints::TRANSACTION_API, put(update_category_endpoint))
        .route(endpoints::UPLOAD_CSV_API, post(upload_csv_endpoint))
        .fallback(get_404_not_found)
        .with_state(state)
}
