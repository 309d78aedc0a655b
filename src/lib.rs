//! Spendbook is a web app for tracking personal spending.
//!
//! Expenses are grouped by a mandatory category and any number of tags.
//! This library provides a REST API that directly serves HTML pages, plus
//! JSON listings of each entity.
//!
//! Every mutation follows the same pipeline: validate the raw form fields,
//! make exactly one call to the datastore, then mark the affected cached page
//! as stale.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde_json::json;
use tokio::signal;

mod alert;
mod app_state;
mod category;
mod database_id;
mod db;
mod endpoints;
mod expense;
mod form;
mod html;
mod internal_server_error;
mod logging;
mod navigation;
mod not_found;
mod page_cache;
mod routing;
mod stores;
mod tag;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use category::{
    Category, CategoryId, CategoryName, create_category, delete_category, list_categories,
    update_category,
};
pub use database_id::DatabaseId;
pub use db::initialize as initialize_db;
pub use expense::{
    Expense, ExpenseId, NewExpense, create_expense, delete_expense, list_expenses, update_expense,
};
pub use form::{FieldErrors, RawForm};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use page_cache::{CachedView, InvalidateView, PageCache};
pub use routing::build_router;
pub use stores::{
    CategoryStore, ExpenseStore, StoreError, TagStore,
    sqlite::{SQLiteCategoryStore, SQLiteExpenseStore, SQLiteTagStore},
};
pub use tag::{Tag, TagId, TagName, create_tag, delete_tag, list_tags, update_tag};

use crate::{alert::Alert, internal_server_error::InternalServerError};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The ways a create, update, delete or list operation can be rejected.
///
/// Both variants carry the message intended for the person using the app.
/// Details about datastore failures are logged where they happen and never
/// end up in the message.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    /// The input failed validation before the datastore was touched.
    ///
    /// The message lists every field-level problem, e.g.
    /// "Validation failed: Amount must be a positive number, Description is required".
    #[error("{0}")]
    Validation(String),

    /// The datastore call failed, e.g. "Failed to create expense".
    #[error("{0}")]
    Persistence(String),
}

impl Error {
    /// Log `error` with `message` as context and wrap `message` as a [Error::Persistence].
    pub(crate) fn persistence(message: &str, error: StoreError) -> Self {
        tracing::error!("{message}: {error}");
        Self::Persistence(message.to_owned())
    }

    /// The message to show to the user.
    pub fn message(&self) -> &str {
        match self {
            Error::Validation(message) | Error::Persistence(message) => message,
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Error::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Render the error as an alert fragment for HTMX requests.
    fn into_alert_response(self) -> Response {
        let status_code = self.status_code();
        let title = match self {
            Error::Validation(_) => "Invalid input",
            Error::Persistence(_) => "Something went wrong",
        };

        (
            status_code,
            Alert::Error {
                message: title.to_owned(),
                details: self.message().to_owned(),
            },
        )
            .into_response()
    }

    /// Render the error as a full error page.
    fn into_page_response(self) -> Response {
        InternalServerError {
            description: self.message(),
            fix: "Try again later or check the server logs",
        }
        .into_response()
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        (self.status_code(), Json(json!({ "error": self.message() }))).into_response()
    }
}
