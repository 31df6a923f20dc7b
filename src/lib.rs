//! ClaritySpend is a web client for a personal finance tracker.
//!
//! This library serves the HTML pages and HTMX partials of the client and
//! forwards each user action to the remote ClaritySpend API, keeping the
//! user's bearer token in a private cookie between requests.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_server::Handle;
use tokio::signal;

mod alert;
mod api;
mod app_state;
mod auth;
mod command;
mod csv_upload;
mod dashboard;
mod endpoints;
mod html;
mod internal_server_error;
mod log_in;
mod log_out;
mod logging;
mod not_found;
mod register_user;
mod request;
mod routing;
mod transaction;
mod view;

#[cfg(test)]
mod test_utils;

pub use api::HttpFinanceApi;
pub use app_state::AppState;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;

use crate::internal_server_error::InternalServerError;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// An authenticated request was attempted without a token in the session.
    ///
    /// Callers should only send authenticated requests while the view is in
    /// the authenticated state.
    #[error("no token found")]
    Unauthenticated,

    /// The stored token cannot be used as an HTTP header value.
    #[error("the token contains characters that are not allowed in a header")]
    InvalidToken,

    /// The API rejected the token (401 or 403) and the session was ended.
    #[error("the session was rejected by the API")]
    SessionExpired,

    /// The API did not accept the username and password.
    #[error("incorrect username or password")]
    InvalidCredentials,

    /// The API refused to register the username.
    #[error("the username is unavailable")]
    UsernameUnavailable,

    /// A request to the API failed for a reason other than authorization.
    ///
    /// `server_message` holds the message from the API's error payload, if it
    /// sent one.
    #[error("the request to the API failed")]
    RequestFailed {
        /// The message from the API's error payload.
        server_message: Option<String>,
    },

    /// The CSV upload form was submitted without a file.
    #[error("no file was selected")]
    NoFileSelected,

    /// The uploaded file is not a CSV file.
    #[error("File is not a CSV")]
    NotCSV,

    /// The multipart form could not be parsed.
    #[error("Could not parse multipart form: {0}")]
    MultipartError(String),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::Unauthenticated | Error::SessionExpired => {
                Redirect::to(endpoints::ROOT).into_response()
            }
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// Whether the error means the user has to log in again.
    pub(crate) fn ends_session(&self) -> bool {
        matches!(self, Error::Unauthenticated | Error::SessionExpired)
    }

    /// The status code for a partial response reporting this error.
    pub(crate) fn alert_status(&self) -> StatusCode {
        match self {
            Error::RequestFailed { .. } => StatusCode::BAD_GATEWAY,
            Error::NoFileSelected | Error::NotCSV | Error::MultipartError(_) => {
                StatusCode::BAD_REQUEST
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The text shown to the user below an alert's message.
    pub(crate) fn alert_details(&self) -> String {
        match self {
            Error::RequestFailed {
                server_message: Some(message),
            } => message.clone(),
            Error::RequestFailed {
                server_message: None,
            } => "Could not reach the ClaritySpend API. Is the server running?".to_owned(),
            Error::NoFileSelected => "Please select a file.".to_owned(),
            Error::NotCSV => "File type must be CSV.".to_owned(),
            Error::MultipartError(error) => format!("Could not read the uploaded file: {error}"),
            _ => "An unexpected error occurred, check the server logs for more details."
                .to_owned(),
        }
    }
}
