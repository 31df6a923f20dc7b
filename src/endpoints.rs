//! The browser-facing routes served by the web client.
//!
//! Routes under `/api` return HTMX partials, everything else returns full pages.

/// The dashboard when logged in, otherwise the log-in and register forms.
pub const ROOT: &str = "/";
pub const LOG_IN_API: &str = "/api/log_in";
pub const REGISTER_API: &str = "/api/register";
pub const LOG_OUT: &str = "/api/log_out";
/// The transaction list and spending chart partial, and the route for creating transactions.
pub const TRANSACTIONS_API: &str = "/api/transactions";
/// The route for changing a transaction's category.
pub const TRANSACTION_API: &str = "/api/transactions/{transaction_id}";
pub const UPLOAD_CSV_API: &str = "/api/transactions/upload-csv";

/// Replace the first parameter in `endpoint_path` with `id`.
///
/// Parameters are delimited by braces, e.g. `/api/transactions/{transaction_id}`.
/// A path without a parameter is returned unchanged.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_owned();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|end| param_start + end + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
