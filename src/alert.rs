//! Alert fragments for telling the user how an htmx request went.
//!
//! Alerts are swapped out-of-band into the alert container that every page
//! renders, so they can be returned alongside (or instead of) the fragment
//! the request was targeting.

use axum::response::{IntoResponse, Response};
use maud::{Markup, html};

use crate::html::ALERT_CONTAINER_ID;

const SUCCESS_STYLE: &str = "p-4 mb-4 text-sm text-green-800 rounded-lg bg-green-50 \
    dark:bg-gray-800 dark:text-green-400 border border-green-300 dark:border-green-800";
const ERROR_STYLE: &str = "p-4 mb-4 text-sm text-red-800 rounded-lg bg-red-50 \
    dark:bg-gray-800 dark:text-red-400 border border-red-300 dark:border-red-800";

/// A dismissable message shown at the bottom of the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Alert {
    /// The request succeeded and there is nothing more to say.
    SuccessSimple {
        /// The headline.
        message: String,
    },
    /// The request failed.
    Error {
        /// The headline.
        message: String,
        /// What went wrong.
        details: String,
    },
}

impl Alert {
    /// Render the alert as an out-of-band swap into the alert container.
    pub fn into_html(self) -> Markup {
        let (style, message, details) = match self {
            Alert::SuccessSimple { message } => (SUCCESS_STYLE, message, String::new()),
            Alert::Error { message, details } => (ERROR_STYLE, message, details),
        };

        html! {
            div id=(ALERT_CONTAINER_ID) hx-swap-oob="true"
            {
                div class=(style) role="alert"
                {
                    div class="flex items-start justify-between gap-4"
                    {
                        div
                        {
                            p class="font-semibold" { (message) }

                            @if !details.is_empty() {
                                p class="mt-1" { (details) }
                            }
                        }

                        button
                            type="button"
                            aria-label="Dismiss"
                            class="font-bold"
                            onclick="this.closest('[role=alert]').remove()"
                        {
                            "×"
                        }
                    }
                }
            }
        }
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        self.into_html().into_response()
    }
}
