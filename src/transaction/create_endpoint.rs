//! Defines the form and the endpoint for creating a new transaction.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    alert::Alert,
    app_state::ApiState,
    auth::TokenStore,
    command::{CommandHandler, CreateTransaction},
    dashboard::dashboard_data_oob_view,
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE},
    log_out::session_ended_response,
    view::ViewController,
};

/// The form data for creating a transaction.
#[derive(Debug, Deserialize)]
pub struct TransactionForm {
    /// Text detailing the transaction.
    pub description: String,
    /// The value of the transaction in dollars.
    pub amount: f64,
}

/// The form for adding a transaction, with `description` and `amount` as the
/// initial input values.
///
/// The form replaces itself with the response, so a successful request
/// clears it and a failed one keeps what the user typed.
pub fn new_transaction_form(description: &str, amount: &str) -> Markup {
    html! {
        form
            id="new-transaction-form"
            hx-post=(endpoints::TRANSACTIONS_API)
            hx-target="this"
            hx-swap="outerHTML"
            hx-target-error="this"
            hx-disabled-elt="find button"
            class="space-y-4"
        {
            div
            {
                label for="description" class=(FORM_LABEL_STYLE) { "Description" }

                input
                    type="text"
                    name="description"
                    id="description"
                    placeholder="Coffee"
                    value=(description)
                    class=(FORM_TEXT_INPUT_STYLE)
                    required;
            }

            div
            {
                label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

                input
                    type="number"
                    name="amount"
                    id="amount"
                    step="0.01"
                    placeholder="0.00"
                    value=(amount)
                    class=(FORM_TEXT_INPUT_STYLE)
                    required;
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Add Transaction" }
        }
    }
}

/// A route handler for creating a new transaction.
///
/// On success the form is cleared and the transaction list and chart are
/// swapped in out-of-band.
pub async fn create_transaction_endpoint(
    State(state): State<ApiState>,
    mut store: TokenStore,
    Form(form): Form<TransactionForm>,
) -> Response {
    let mut view = ViewController::from_session(store.session());

    let result = CommandHandler::new(state.api.as_ref(), &mut store, &mut view)
        .dispatch(CreateTransaction {
            description: form.description.clone(),
            amount: form.amount,
        })
        .await;

    match result {
        Ok(Err(error)) | Err(error) if error.ends_session() => session_ended_response(store),
        Ok(refreshed) => html! {
            (new_transaction_form("", ""))
            (dashboard_data_oob_view(&refreshed))
        }
        .into_response(),
        Err(error) => {
            let alert = Alert::Error {
                message: "Error adding transaction.".to_owned(),
                details: error.alert_details(),
            };

            (
                error.alert_status(),
                html! {
                    (new_transaction_form(&form.description, &form.amount.to_string()))
                    (alert.into_html())
                },
            )
                .into_response()
        }
    }
}
