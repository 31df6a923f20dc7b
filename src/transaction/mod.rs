//! Transactions owned by the ClaritySpend API and the endpoints that change
//! or list them.
//!
//! Every change is followed by fetching the full list again, which replaces
//! the dashboard's list and chart. Nothing is inserted locally.

mod create_endpoint;
mod list_endpoint;
mod models;
mod update_category_endpoint;

pub use create_endpoint::{create_transaction_endpoint, new_transaction_form};
pub use list_endpoint::get_transactions_endpoint;
pub use models::{CategoryUpdate, NewTransaction, Transaction, TransactionId};
pub use update_category_endpoint::update_category_endpoint;

#[cfg(test)]
pub use models::UNCATEGORIZED;
