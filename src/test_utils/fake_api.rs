use std::sync::Mutex;

use async_trait::async_trait;

use crate::{
    api::{ApiError, Credentials, CsvFile, FinanceApi, LogInResponse, UploadSummary},
    request::AuthHeaders,
    transaction::{CategoryUpdate, NewTransaction, Transaction, TransactionId},
};

/// A call received by [FakeApi].
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ApiCall {
    LogIn { username: String },
    Register { username: String },
    ListTransactions,
    CreateTransaction { description: String, amount: f64 },
    UpdateCategory { id: TransactionId, category: String },
    UploadCsv { file_name: String },
}

/// A [FinanceApi] that returns scripted results and records every call.
///
/// Unscripted operations succeed with empty results, except log-in which is
/// rejected.
pub(crate) struct FakeApi {
    log_in: Result<LogInResponse, ApiError>,
    register: Result<(), ApiError>,
    transactions: Result<Vec<Transaction>, ApiError>,
    create: Result<(), ApiError>,
    update: Result<(), ApiError>,
    upload: Result<UploadSummary, ApiError>,
    calls: Mutex<Vec<ApiCall>>,
    authorization: Mutex<Vec<String>>,
}

impl Default for FakeApi {
    fn default() -> Self {
        Self {
            log_in: Err(ApiError::Unauthorized(401)),
            register: Ok(()),
            transactions: Ok(Vec::new()),
            create: Ok(()),
            update: Ok(()),
            upload: Ok(UploadSummary {
                transactions_uploaded: 0,
                message: None,
            }),
            calls: Mutex::new(Vec::new()),
            authorization: Mutex::new(Vec::new()),
        }
    }
}

impl FakeApi {
    pub(crate) fn with_log_in(mut self, result: Result<LogInResponse, ApiError>) -> Self {
        self.log_in = result;
        self
    }

    pub(crate) fn with_register(mut self, result: Result<(), ApiError>) -> Self {
        self.register = result;
        self
    }

    pub(crate) fn with_transactions(mut self, result: Result<Vec<Transaction>, ApiError>) -> Self {
        self.transactions = result;
        self
    }

    pub(crate) fn with_create(mut self, result: Result<(), ApiError>) -> Self {
        self.create = result;
        self
    }

    pub(crate) fn with_update(mut self, result: Result<(), ApiError>) -> Self {
        self.update = result;
        self
    }

    pub(crate) fn with_upload(mut self, result: Result<UploadSummary, ApiError>) -> Self {
        self.upload = result;
        self
    }

    /// The calls received so far, in order.
    pub(crate) fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().unwrap().clone()
    }

    /// The `Authorization` header of each authenticated call, in order.
    pub(crate) fn authorization_headers(&self) -> Vec<String> {
        self.authorization.lock().unwrap().clone()
    }

    fn record(&self, call: ApiCall, headers: Option<&AuthHeaders>) {
        self.calls.lock().unwrap().push(call);

        if let Some(value) = headers.and_then(|headers| headers.get("authorization")) {
            self.authorization
                .lock()
                .unwrap()
                .push(value.to_str().unwrap().to_owned());
        }
    }
}

#[async_trait]
impl FinanceApi for FakeApi {
    async fn log_in(&self, credentials: &Credentials) -> Result<LogInResponse, ApiError> {
        self.record(
            ApiCall::LogIn {
                username: credentials.username.clone(),
            },
            None,
        );
        self.log_in.clone()
    }

    async fn register(&self, credentials: &Credentials) -> Result<(), ApiError> {
        self.record(
            ApiCall::Register {
                username: credentials.username.clone(),
            },
            None,
        );
        self.register.clone()
    }

    async fn list_transactions(&self, headers: AuthHeaders) -> Result<Vec<Transaction>, ApiError> {
        self.record(ApiCall::ListTransactions, Some(&headers));
        self.transactions.clone()
    }

    async fn create_transaction(
        &self,
        headers: AuthHeaders,
        transaction: &NewTransaction,
    ) -> Result<(), ApiError> {
        self.record(
            ApiCall::CreateTransaction {
                description: transaction.description.clone(),
                amount: transaction.amount,
            },
            Some(&headers),
        );
        self.create.clone()
    }

    async fn update_category(
        &self,
        headers: AuthHeaders,
        id: TransactionId,
        update: &CategoryUpdate,
    ) -> Result<(), ApiError> {
        self.record(
            ApiCall::UpdateCategory {
                id,
                category: update.category.clone(),
            },
            Some(&headers),
        );
        self.update.clone()
    }

    async fn upload_csv(
        &self,
        headers: AuthHeaders,
        file: CsvFile,
    ) -> Result<UploadSummary, ApiError> {
        self.record(
            ApiCall::UploadCsv {
                file_name: file.file_name,
            },
            Some(&headers),
        );
        self.upload.clone()
    }
}
