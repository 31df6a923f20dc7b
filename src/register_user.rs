//! The registration form and the handler for registration requests.
//!
//! Registering never logs the user in. On success the form is cleared and the
//! user is asked to log in with the new account.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    Error,
    app_state::ApiState,
    auth::TokenStore,
    command::{CommandHandler, Register},
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, loading_spinner,
        password_input,
    },
    view::ViewController,
};

pub const REGISTRATION_SUCCESS_MSG: &str = "Registration successful! Please log in.";
pub const USERNAME_UNAVAILABLE_MSG: &str = "Registration failed. Username may be taken.";

/// The outcome shown below the registration form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RegisterStatus {
    Idle,
    Registered,
    Failed,
}

pub fn register_form(username: &str, status: RegisterStatus) -> Markup {
    let error_message = match status {
        RegisterStatus::Failed => Some(USERNAME_UNAVAILABLE_MSG),
        _ => None,
    };

    html! {
        form
            hx-post=(endpoints::REGISTER_API)
            hx-target="this"
            hx-swap="outerHTML"
            hx-indicator="#register-indicator"
            hx-disabled-elt="find button"
            class="space-y-4 md:space-y-6"
        {
            div
            {
                label for="register-username" class=(FORM_LABEL_STYLE) { "Username" }

                input
                    type="text"
                    name="username"
                    id="register-username"
                    autocomplete="username"
                    class=(FORM_TEXT_INPUT_STYLE)
                    value=(username)
                    required;
            }

            (password_input("register-password", error_message))

            @if status == RegisterStatus::Registered
            {
                p id="register-status" class="text-green-600 dark:text-green-400 text-base"
                {
                    (REGISTRATION_SUCCESS_MSG)
                }
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE)
            {
                span class="inline htmx-indicator" id="register-indicator"
                {
                    (loading_spinner())
                }
                "Register"
            }
        }
    }
}

#[derive(Clone, Deserialize)]
pub struct RegisterForm {
    pub username: String,
    pub password: String,
}

/// Handler for registration requests via the POST method.
pub async fn register_user(
    State(state): State<ApiState>,
    mut store: TokenStore,
    Form(user_data): Form<RegisterForm>,
) -> Response {
    let mut view = ViewController::from_session(store.session());
    let username = user_data.username.clone();

    let result = CommandHandler::new(state.api.as_ref(), &mut store, &mut view)
        .dispatch(Register {
            username: user_data.username,
            password: user_data.password,
        })
        .await;

    match result {
        Ok(()) => {
            tracing::info!("Registered new user {username}.");
            register_form("", RegisterStatus::Registered).into_response()
        }
        Err(Error::UsernameUnavailable) => {
            register_form(&username, RegisterStatus::Failed).into_response()
        }
        Err(error) => {
            tracing::error!("Unhandled error while registering user: {error}");
            register_form(&username, RegisterStatus::Failed).into_response()
        }
    }
}
