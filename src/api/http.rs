//! [FinanceApi] over HTTP with reqwest.

use async_trait::async_trait;
use reqwest::{
    Client, Response,
    multipart::{Form, Part},
};
use serde::Deserialize;

use crate::{
    endpoints::format_endpoint,
    request::AuthHeaders,
    transaction::{CategoryUpdate, NewTransaction, Transaction, TransactionId},
};

use super::{ApiError, Credentials, CsvFile, FinanceApi, LogInResponse, UploadSummary, routes};

/// Sends requests to a ClaritySpend API at a base URL.
#[derive(Debug, Clone)]
pub struct HttpFinanceApi {
    client: Client,
    base_url: String,
}

impl HttpFinanceApi {
    /// Create a client for the API at `base_url`, e.g. `http://localhost:8080`.
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            ApiError::Decode(error.to_string())
        } else {
            ApiError::Transport(error.to_string())
        }
    }
}

/// Turn a non-success response into an [ApiError], reading the `message`
/// from a JSON error body when the API sent one.
async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    let message = response
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|body| body.message);

    Err(ApiError::from_status(status.as_u16(), message))
}

#[async_trait]
impl FinanceApi for HttpFinanceApi {
    async fn log_in(&self, credentials: &Credentials) -> Result<LogInResponse, ApiError> {
        let response = self
            .client
            .post(self.url(routes::LOG_IN))
            .json(credentials)
            .send()
            .await?;

        Ok(check_status(response).await?.json().await?)
    }

    async fn register(&self, credentials: &Credentials) -> Result<(), ApiError> {
        let response = self
            .client
            .post(self.url(routes::REGISTER))
            .json(credentials)
            .send()
            .await?;

        check_status(response).await?;
        Ok(())
    }

    async fn list_transactions(&self, headers: AuthHeaders) -> Result<Vec<Transaction>, ApiError> {
        let response = self
            .client
            .get(self.url(routes::TRANSACTIONS))
            .headers(headers.into_inner())
            .send()
            .await?;

        Ok(check_status(response).await?.json().await?)
    }

    async fn create_transaction(
        &self,
        headers: AuthHeaders,
        transaction: &NewTransaction,
    ) -> Result<(), ApiError> {
        let response = self
            .client
            .post(self.url(routes::TRANSACTIONS))
            .headers(headers.into_inner())
            .json(transaction)
            .send()
            .await?;

        check_status(response).await?;
        Ok(())
    }

    async fn update_category(
        &self,
        headers: AuthHeaders,
        id: TransactionId,
        update: &CategoryUpdate,
    ) -> Result<(), ApiError> {
        let response = self
            .client
            .put(self.url(&format_endpoint(routes::TRANSACTION, id)))
            .headers(headers.into_inner())
            .json(update)
            .send()
            .await?;

        check_status(response).await?;
        Ok(())
    }

    async fn upload_csv(
        &self,
        headers: AuthHeaders,
        file: CsvFile,
    ) -> Result<UploadSummary, ApiError> {
        let part = Part::bytes(file.bytes)
            .file_name(file.file_name)
            .mime_str("text/csv")?;
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(self.url(routes::UPLOAD_CSV))
            .headers(headers.into_inner())
            .multipart(form)
            .send()
            .await?;

        Ok(check_status(response).await?.json().await?)
    }
}
