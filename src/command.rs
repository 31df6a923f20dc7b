//! The commands a user can issue, and the handler that runs them against the API.
//!
//! Every user action goes through [CommandHandler::dispatch], which builds the
//! request headers from the session, calls the API, and applies the session
//! and view transitions. Authorization failures are handled here, once: the
//! token store is cleared, the view reverts to logged out, and the command
//! fails with [Error::SessionExpired].

use async_trait::async_trait;

use crate::{
    Error,
    api::{ApiError, Credentials, CsvFile, FinanceApi},
    auth::{Token, TokenStore},
    request::AuthHeaders,
    transaction::{CategoryUpdate, NewTransaction, Transaction, TransactionId},
    view::ViewController,
};

/// The transactions fetched again after a successful change.
///
/// A failed re-fetch does not undo the change, so it is reported separately
/// from the command's own result.
pub type Refresh = Result<Vec<Transaction>, Error>;

/// A user action that can be dispatched by a [CommandHandler].
#[async_trait]
pub trait Command: Send {
    /// The value produced when the command succeeds.
    type Output;

    /// Run the command.
    async fn run(self, handler: &mut CommandHandler<'_>) -> Result<Self::Output, Error>;
}

/// Runs commands against the API for one request.
pub struct CommandHandler<'a> {
    api: &'a dyn FinanceApi,
    store: &'a mut TokenStore,
    view: &'a mut ViewController,
}

impl<'a> CommandHandler<'a> {
    pub fn new(
        api: &'a dyn FinanceApi,
        store: &'a mut TokenStore,
        view: &'a mut ViewController,
    ) -> Self {
        Self { api, store, view }
    }

    /// Run `command` and return its result.
    pub async fn dispatch<C: Command>(&mut self, command: C) -> Result<C::Output, Error> {
        command.run(self).await
    }

    fn json_headers(&self) -> Result<AuthHeaders, Error> {
        AuthHeaders::json(self.store.session())
    }

    /// Map an API failure from an authenticated call to an [Error], ending
    /// the session if the API rejected the token.
    fn authorize<T>(&mut self, result: Result<T, ApiError>) -> Result<T, Error> {
        result.map_err(|error| match error {
            ApiError::Unauthorized(status) => {
                tracing::warn!("The API rejected the session token with status {status}, logging out.");
                self.end_session();
                Error::SessionExpired
            }
            error => {
                tracing::error!("Request to the API failed: {error}");
                Error::RequestFailed {
                    server_message: error.server_message().map(ToOwned::to_owned),
                }
            }
        })
    }

    async fn fetch_transactions(&mut self) -> Refresh {
        let headers = self.json_headers()?;
        let result = self.api.list_transactions(headers).await;
        self.authorize(result)
    }

    fn end_session(&mut self) {
        self.store.clear();
        self.view.log_out();
    }
}

/// Exchange a username and password for a session token.
#[derive(Debug)]
pub struct LogIn {
    pub username: String,
    pub password: String,
}

#[async_trait]
impl Command for LogIn {
    type Output = ();

    async fn run(self, handler: &mut CommandHandler<'_>) -> Result<(), Error> {
        let credentials = Credentials {
            username: self.username,
            password: self.password,
        };

        match handler.api.log_in(&credentials).await {
            Ok(response) => {
                handler.store.save(Token::new(response.jwt));
                if handler.view.log_in() {
                    tracing::info!("Logged in as {}.", credentials.username);
                }
                Ok(())
            }
            Err(ApiError::Decode(error)) => {
                tracing::error!("Could not read the log-in response: {error}");
                Err(Error::RequestFailed {
                    server_message: None,
                })
            }
            Err(error) => {
                tracing::info!("Log-in failed for {}: {error}", credentials.username);
                Err(Error::InvalidCredentials)
            }
        }
    }
}

/// Create an account. Never logs the user in.
#[derive(Debug)]
pub struct Register {
    pub username: String,
    pub password: String,
}

#[async_trait]
impl Command for Register {
    type Output = ();

    async fn run(self, handler: &mut CommandHandler<'_>) -> Result<(), Error> {
        let credentials = Credentials {
            username: self.username,
            password: self.password,
        };

        handler.api.register(&credentials).await.map_err(|error| {
            tracing::info!("Registration failed for {}: {error}", credentials.username);
            Error::UsernameUnavailable
        })
    }
}

/// Fetch all of the user's transactions.
#[derive(Debug)]
pub struct ListTransactions;

#[async_trait]
impl Command for ListTransactions {
    type Output = Vec<Transaction>;

    async fn run(self, handler: &mut CommandHandler<'_>) -> Result<Vec<Transaction>, Error> {
        handler.fetch_transactions().await
    }
}

/// Create a transaction, then fetch the transactions again.
#[derive(Debug)]
pub struct CreateTransaction {
    pub description: String,
    pub amount: f64,
}

#[async_trait]
impl Command for CreateTransaction {
    type Output = Refresh;

    async fn run(self, handler: &mut CommandHandler<'_>) -> Result<Refresh, Error> {
        let headers = handler.json_headers()?;
        let transaction = NewTransaction {
            description: self.description,
            amount: self.amount,
        };

        let result = handler.api.create_transaction(headers, &transaction).await;
        handler.authorize(result)?;

        Ok(handler.fetch_transactions().await)
    }
}

/// Change a transaction's category, then fetch the transactions again.
#[derive(Debug)]
pub struct UpdateCategory {
    pub id: TransactionId,
    pub category: String,
}

#[async_trait]
impl Command for UpdateCategory {
    type Output = Refresh;

    async fn run(self, handler: &mut CommandHandler<'_>) -> Result<Refresh, Error> {
        let headers = handler.json_headers()?;
        let update = CategoryUpdate {
            category: self.category,
        };

        let result = handler.api.update_category(headers, self.id, &update).await;
        handler.authorize(result)?;

        Ok(handler.fetch_transactions().await)
    }
}

/// Upload a CSV file for import, then fetch the transactions again.
///
/// `file` is `None` when the user submitted the form without choosing a file.
#[derive(Debug)]
pub struct UploadCsv {
    pub file: Option<CsvFile>,
}

/// The result of a successful CSV upload.
#[derive(Debug)]
pub struct CsvUploaded {
    /// The number of transactions the API imported.
    pub uploaded: u64,
    pub refreshed: Refresh,
}

#[async_trait]
impl Command for UploadCsv {
    type Output = CsvUploaded;

    async fn run(self, handler: &mut CommandHandler<'_>) -> Result<CsvUploaded, Error> {
        let file = self.file.ok_or(Error::NoFileSelected)?;
        let headers = AuthHeaders::multipart(handler.store.session())?;

        let result = handler.api.upload_csv(headers, file).await;
        let summary = handler.authorize(result)?;
        tracing::info!(
            "Uploaded {} transactions from CSV.",
            summary.transactions_uploaded
        );

        Ok(CsvUploaded {
            uploaded: summary.transactions_uploaded,
            refreshed: handler.fetch_transactions().await,
        })
    }
}

/// End the session.
#[derive(Debug)]
pub struct LogOut;

#[async_trait]
impl Command for LogOut {
    type Output = ();

    async fn run(self, handler: &mut CommandHandler<'_>) -> Result<(), Error> {
        handler.end_session();
        Ok(())
    }
}
