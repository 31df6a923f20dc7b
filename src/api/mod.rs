//! The client for the remote ClaritySpend API.
//!
//! [FinanceApi] is the seam between the web client and the API: the HTTP
//! handlers only ever talk to a `dyn FinanceApi`, and [HttpFinanceApi] is the
//! implementation that sends real requests.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{
    request::AuthHeaders,
    transaction::{CategoryUpdate, NewTransaction, Transaction, TransactionId},
};

mod http;

pub use http::HttpFinanceApi;

/// The API routes used by the client.
pub(crate) mod routes {
    pub const LOG_IN: &str = "/api/auth/login";
    pub const REGISTER: &str = "/api/auth/register";
    pub const TRANSACTIONS: &str = "/api/transactions";
    pub const TRANSACTION: &str = "/api/transactions/{transaction_id}";
    pub const UPLOAD_CSV: &str = "/api/transactions/upload-csv";
}

/// A username and password for logging in or registering.
#[derive(Clone, PartialEq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"********")
            .finish()
    }
}

/// The body of a successful log-in response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LogInResponse {
    pub jwt: String,
}

/// The result of a successful CSV upload.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadSummary {
    pub transactions_uploaded: u64,
    #[serde(default)]
    pub message: Option<String>,
}

/// A CSV file to upload.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// The ways a call to the API can fail.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// The API rejected the request's credentials (401 or 403).
    #[error("the API rejected the request with status {0}")]
    Unauthorized(u16),

    /// The API responded with any other non-success status.
    #[error("the API responded with status {status}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The `message` field of the error body, if there was one.
        message: Option<String>,
    },

    /// The request could not be sent or the response could not be received.
    #[error("could not reach the API: {0}")]
    Transport(String),

    /// The response body was not what the client expected.
    #[error("could not read the API response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Classify a non-success status code.
    pub fn from_status(status: u16, message: Option<String>) -> Self {
        match status {
            401 | 403 => ApiError::Unauthorized(status),
            status => ApiError::Status { status, message },
        }
    }

    /// The message the API sent with the error, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

/// The operations of the ClaritySpend API.
///
/// Each method is one request/response exchange. Nothing is retried and no
/// timeout is applied.
#[async_trait]
pub trait FinanceApi: Send + Sync {
    /// Exchange a username and password for a token.
    async fn log_in(&self, credentials: &Credentials) -> Result<LogInResponse, ApiError>;

    /// Create an account.
    async fn register(&self, credentials: &Credentials) -> Result<(), ApiError>;

    /// Get all of the user's transactions.
    async fn list_transactions(&self, headers: AuthHeaders) -> Result<Vec<Transaction>, ApiError>;

    /// Create a transaction.
    async fn create_transaction(
        &self,
        headers: AuthHeaders,
        transaction: &NewTransaction,
    ) -> Result<(), ApiError>;

    /// Change the category of the transaction with `id`.
    async fn update_category(
        &self,
        headers: AuthHeaders,
        id: TransactionId,
        update: &CategoryUpdate,
    ) -> Result<(), ApiError>;

    /// Upload a CSV file of transactions for import and categorisation.
    async fn upload_csv(&self, headers: AuthHeaders, file: CsvFile)
    -> Result<UploadSummary, ApiError>;
}

#[cfg(test)]
mod tests {
    use super::{ApiError, Credentials, UploadSummary};

    #[test]
    fn unauthorized_statuses_are_classified() {
        assert_eq!(ApiError::from_status(401, None), ApiError::Unauthorized(401));
        assert_eq!(ApiError::from_status(403, None), ApiError::Unauthorized(403));
        assert_eq!(
            ApiError::from_status(500, Some("boom".to_owned())),
            ApiError::Status {
                status: 500,
                message: Some("boom".to_owned())
            }
        );
    }

    #[test]
    fn upload_summary_reads_camel_case() {
        let summary: UploadSummary =
            serde_json::from_str(r#"{"transactionsUploaded": 12, "message": "ok"}"#).unwrap();

        assert_eq!(summary.transactions_uploaded, 12);
        assert_eq!(summary.message.as_deref(), Some("ok"));
    }

    #[test]
    fn credentials_debug_hides_password() {
        let credentials = Credentials {
            username: "alice".to_owned(),
            password: "hunter2".to_owned(),
        };

        let debug = format!("{credentials:?}");

        assert!(debug.contains("alice"));
        assert!(!debug.contains("hunter2"));
    }
}
