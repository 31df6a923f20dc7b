//! The root page: the dashboard when logged in, otherwise the log-in and
//! register forms.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    app_state::ApiState,
    auth::TokenStore,
    command::{CommandHandler, ListTransactions, Refresh},
    csv_upload::{UploadStatus, upload_form},
    dashboard::{
        chart::{ECHARTS_SCRIPT, chart_view, spending_chart},
        transaction_list::{transaction_list_error_view, transaction_list_view},
    },
    endpoints,
    html::{BUTTON_SMALL_STYLE, CARD_STYLE, HeadElement, LINK_STYLE, base, form_card},
    log_in::log_in_form,
    register_user::{RegisterStatus, register_form},
    transaction::new_transaction_form,
    view::{ViewController, ViewState},
};

/// The id of the element holding the transaction list and the chart.
///
/// Every change to the transactions replaces this element with fresh data.
pub const DASHBOARD_DATA_ID: &str = "dashboard-data";

/// Display the dashboard if the session holds a token, otherwise the log-in
/// and register forms.
///
/// The transactions are fetched as soon as the dashboard is entered. If the
/// API rejects the stored token, the session is cleared and the log-in form
/// is shown instead.
pub async fn get_dashboard_page(State(state): State<ApiState>, mut store: TokenStore) -> Response {
    let mut view = ViewController::from_session(store.session());

    let listing = match view.state() {
        ViewState::Authenticated => Some(
            CommandHandler::new(state.api.as_ref(), &mut store, &mut view)
                .dispatch(ListTransactions)
                .await,
        ),
        ViewState::Unauthenticated => None,
    };

    let page = match (view.state(), listing) {
        (ViewState::Authenticated, Some(listing)) => dashboard_page(&listing),
        _ => auth_page(),
    };

    (store, page).into_response()
}

fn auth_page() -> Markup {
    let content = html! {
        div class="flex flex-col items-center px-6 py-8 mx-auto lg:py-16"
        {
            h1 class="mb-8 text-3xl font-bold text-gray-900 dark:text-white" { "ClaritySpend" }

            div class="grid w-full max-w-4xl gap-6 md:grid-cols-2"
            {
                (form_card("Log in", &log_in_form("", None)))
                (form_card("Create an account", &register_form("", RegisterStatus::Idle)))
            }
        }
    };

    base("Log in", &[], &content)
}

fn dashboard_page(listing: &Refresh) -> Markup {
    let content = html! {
        header class="flex items-center justify-between px-6 py-4 bg-white shadow dark:bg-gray-800"
        {
            h1 class="text-2xl font-bold text-gray-900 dark:text-white" { "ClaritySpend" }

            a href=(endpoints::LOG_OUT) class=(LINK_STYLE) { "Log out" }
        }

        main class="flex flex-col gap-6 px-6 py-8 mx-auto max-w-screen-xl"
        {
            div class="grid gap-6 lg:grid-cols-2"
            {
                div class=(CARD_STYLE)
                {
                    h2 class="mb-4 text-xl font-bold text-gray-900 dark:text-white" { "Add Transaction" }
                    (new_transaction_form("", ""))
                }

                div class=(CARD_STYLE)
                {
                    h2 class="mb-4 text-xl font-bold text-gray-900 dark:text-white" { "Upload CSV" }
                    (upload_form(&UploadStatus::Idle))
                }
            }

            (dashboard_data_view(listing))
        }
    };

    base(
        "Dashboard",
        &[HeadElement::ScriptLink(ECHARTS_SCRIPT.to_owned())],
        &content,
    )
}

/// Render the transaction list and the spending chart.
///
/// If the transactions could not be fetched, an error message is shown in
/// place of the list and the chart is left out.
pub fn dashboard_data_view(listing: &Refresh) -> Markup {
    data_section(listing, false)
}

/// Like [dashboard_data_view], but swapped out-of-band so that it can be sent
/// alongside a response that targets another element.
pub fn dashboard_data_oob_view(listing: &Refresh) -> Markup {
    data_section(listing, true)
}

fn data_section(listing: &Refresh, swap_oob: bool) -> Markup {
    html! {
        section
            id=(DASHBOARD_DATA_ID)
            hx-swap-oob=[swap_oob.then_some("true")]
            class="grid gap-6 lg:grid-cols-2"
        {
            div class=(CARD_STYLE)
            {
                div class="flex items-center justify-between mb-4"
                {
                    h2 class="text-xl font-bold text-gray-900 dark:text-white" { "Review Transactions" }

                    button
                        type="button"
                        hx-get=(endpoints::TRANSACTIONS_API)
                        hx-target={ "#" (DASHBOARD_DATA_ID) }
                        hx-swap="outerHTML"
                        class=(BUTTON_SMALL_STYLE)
                    {
                        "Refresh"
                    }
                }

                @match listing
                {
                    Ok(transactions) => (transaction_list_view(transactions)),
                    Err(_) => (transaction_list_error_view()),
                }
            }

            div class=(CARD_STYLE)
            {
                h2 class="mb-4 text-xl font-bold text-gray-900 dark:text-white" { "Spending by Category" }

                @if let Ok(transactions) = listing
                {
                    (chart_view(&spending_chart(transactions)))
                }
            }
        }
    }
}
