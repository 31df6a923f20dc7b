//! Alerts for displaying error messages to users.
//!
//! Alerts are swapped out-of-band into the `#alert-container` element that
//! [crate::html::base] places at the bottom of every page, so any HTMX
//! response can raise one regardless of its own target.

use maud::{Markup, html};

/// A dismissable message shown on top of the page.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    /// An error message with details.
    Error { message: String, details: String },
}

impl Alert {
    /// Render the alert as an out-of-band swap into `#alert-container`.
    pub fn into_html(self) -> Markup {
        let Alert::Error { message, details } = self;

        html! {
            div
                id="alert-container"
                hx-swap-oob="true"
                class="w-full max-w-md px-4"
                style="position: fixed; bottom: 1rem; left: 50%; transform: translateX(-50%); z-index: 9999;"
            {
                div
                    role="alert"
                    class="flex items-start justify-between gap-4 p-4 text-sm border rounded-lg
                        text-red-800 bg-red-50 border-red-300 dark:bg-gray-800
                        dark:text-red-400 dark:border-red-800"
                {
                    div
                    {
                        p class="font-medium" { (message) }
                        p class="mt-1" { (details) }
                    }

                    button
                        type="button"
                        aria-label="Dismiss"
                        class="font-bold"
                        onclick="this.closest('#alert-container').replaceChildren()"
                    {
                        "×"
                    }
                }
            }
        }
    }
}
