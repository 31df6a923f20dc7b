//! The view model that decides which screen the user sees, and the state of
//! controls that are disabled while a request is in flight.

use maud::{Markup, html};

use crate::auth::Session;

/// The screen shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    /// The log-in and register forms.
    Unauthenticated,
    /// The dashboard with the transaction forms, list and chart.
    Authenticated,
}

/// Tracks the [ViewState] for one request.
#[derive(Debug)]
pub struct ViewController {
    state: ViewState,
}

impl ViewController {
    /// Start in [ViewState::Authenticated] if the session holds a token.
    pub fn from_session(session: &Session) -> Self {
        let state = if session.is_active() {
            ViewState::Authenticated
        } else {
            ViewState::Unauthenticated
        };

        Self { state }
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    /// Enter [ViewState::Authenticated].
    ///
    /// Returns `true` if the state changed, in which case the caller should
    /// fetch the transactions before drawing the dashboard.
    pub fn log_in(&mut self) -> bool {
        let entered = self.state == ViewState::Unauthenticated;
        self.state = ViewState::Authenticated;
        entered
    }

    /// Return to [ViewState::Unauthenticated].
    pub fn log_out(&mut self) {
        self.state = ViewState::Unauthenticated;
    }
}

/// A submit button that is disabled and relabelled while its request is in flight.
///
/// The browser applies the busy state (see `hx-disabled-elt` and the
/// `.control-busy-label` styles in [crate::html::base]); the server always
/// renders the control idle again in its response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Control {
    label: &'static str,
    busy_label: &'static str,
    disabled: bool,
}

/// The button that saves a transaction's category.
pub const SAVE_CATEGORY: Control = Control::new("Save", "...");

/// The button that uploads a CSV file.
pub const UPLOAD_CSV: Control = Control::new("Upload & Auto-Categorize", "Uploading...");

impl Control {
    const fn new(label: &'static str, busy_label: &'static str) -> Self {
        Self {
            label,
            busy_label,
            disabled: false,
        }
    }

    /// The control while its request is in flight.
    pub fn busy(self) -> Self {
        Self {
            disabled: true,
            ..self
        }
    }

    /// The control ready for input, with its original label.
    pub fn idle(self) -> Self {
        Self {
            disabled: false,
            ..self
        }
    }

    /// The text the user currently sees on the control.
    pub fn label(&self) -> &'static str {
        if self.disabled {
            self.busy_label
        } else {
            self.label
        }
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Render the control as a submit button with the given classes.
    pub fn submit_button(&self, class: &str) -> Markup {
        html! {
            button type="submit" class=(class) disabled[self.is_disabled()]
            {
                span class="control-label" { (self.label()) }

                @if !self.is_disabled()
                {
                    span class="control-busy-label" aria-hidden="true" { (self.busy().label()) }
                }
            }
        }
    }
}
