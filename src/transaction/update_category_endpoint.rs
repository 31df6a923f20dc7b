//! Defines the endpoint for changing a transaction's category.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use maud::html;
use serde::Deserialize;

use crate::{
    alert::Alert,
    app_state::ApiState,
    auth::TokenStore,
    command::{CommandHandler, UpdateCategory},
    dashboard::{category_form, dashboard_data_view},
    log_out::session_ended_response,
    transaction::TransactionId,
    view::ViewController,
};

/// The category typed into a transaction's row.
#[derive(Debug, Deserialize)]
pub struct CategoryForm {
    pub category: String,
}

/// A route handler for changing the category of the transaction with the ID
/// `transaction_id`.
///
/// On success the transaction list and chart are replaced. On failure only
/// the row's form is replaced, with its input and save button as they were
/// before the request, and an alert is shown.
pub async fn update_category_endpoint(
    State(state): State<ApiState>,
    Path(transaction_id): Path<TransactionId>,
    mut store: TokenStore,
    Form(form): Form<CategoryForm>,
) -> Response {
    let mut view = ViewController::from_session(store.session());

    let result = CommandHandler::new(state.api.as_ref(), &mut store, &mut view)
        .dispatch(UpdateCategory {
            id: transaction_id,
            category: form.category.clone(),
        })
        .await;

    match result {
        Ok(Err(error)) | Err(error) if error.ends_session() => session_ended_response(store),
        Ok(refreshed) => dashboard_data_view(&refreshed).into_response(),
        Err(error) => {
            let alert = Alert::Error {
                message: "Error updating category.".to_owned(),
                details: error.alert_details(),
            };

            (
                error.alert_status(),
                html! {
                    (category_form(transaction_id, &form.category))
                    (alert.into_html())
                },
            )
                .into_response()
        }
    }
}
