//! The log-in form and the handler for log-in requests.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    Error,
    app_state::ApiState,
    auth::TokenStore,
    command::{CommandHandler, LogIn},
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, loading_spinner,
        password_input,
    },
    view::ViewController,
};

pub const INVALID_CREDENTIALS_ERROR_MSG: &str = "Incorrect username or password";
pub const LOG_IN_FAILED_ERROR_MSG: &str =
    "Could not log in right now. Please try again later.";

/// Render the log-in form, keeping `username` and showing `error_message`
/// under the password field.
pub fn log_in_form(username: &str, error_message: Option<&str>) -> Markup {
    html! {
        form
            hx-post=(endpoints::LOG_IN_API)
            hx-target="this"
            hx-swap="outerHTML"
            hx-indicator="#log-in-indicator"
            hx-disabled-elt="find button"
            class="space-y-4 md:space-y-6"
        {
            div
            {
                label for="log-in-username" class=(FORM_LABEL_STYLE) { "Username" }

                input
                    type="text"
                    name="username"
                    id="log-in-username"
                    autocomplete="username"
                    class=(FORM_TEXT_INPUT_STYLE)
                    value=(username)
                    required;
            }

            (password_input("log-in-password", error_message))

            button type="submit" class=(BUTTON_PRIMARY_STYLE)
            {
                span class="inline htmx-indicator" id="log-in-indicator"
                {
                    (loading_spinner())
                }
                "Log in"
            }
        }
    }
}

/// The data entered by the user in the log-in form.
#[derive(Clone, Deserialize)]
pub struct LogInData {
    pub username: String,
    pub password: String,
}

/// Handler for log-in requests via the POST method.
///
/// On success the token cookie is set and the client is redirected to the
/// dashboard. Otherwise, the form is returned with an error message.
pub async fn post_log_in(
    State(state): State<ApiState>,
    mut store: TokenStore,
    Form(user_data): Form<LogInData>,
) -> Response {
    let mut view = ViewController::from_session(store.session());
    let username = user_data.username.clone();

    let result = CommandHandler::new(state.api.as_ref(), &mut store, &mut view)
        .dispatch(LogIn {
            username: user_data.username,
            password: user_data.password,
        })
        .await;

    match result {
        Ok(()) => (
            store,
            HxRedirect(endpoints::ROOT.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(Error::InvalidCredentials) => {
            log_in_form(&username, Some(INVALID_CREDENTIALS_ERROR_MSG)).into_response()
        }
        Err(error) => {
            tracing::error!("Unhandled error while logging in: {error}");
            log_in_form(&username, Some(LOG_IN_FAILED_ERROR_MSG)).into_response()
        }
    }
}
