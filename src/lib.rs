//! Finance Tracker is a small personal finance tool for recording income and
//! expenses.
//!
//! This library provides:
//! - a REST API, backed by SQLite, for creating, listing and deleting transactions,
//! - an HTTP client for that API,
//! - a terminal user interface that lists transactions and charts per-category totals.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde::{Deserialize, Serialize};
use tokio::signal;

mod api_client;
mod app_state;
mod db;
mod endpoints;
mod logging;
mod routing;
mod statistics;
mod transaction;
mod tui;

pub use api_client::{ApiClient, ApiError, TransactionApi};
pub use app_state::AppState;
pub use db::initialize as initialize_db;
pub use logging::{LOG_BODY_LENGTH_LIMIT, REQUEST_BODY_SIZE_LIMIT, logging_middleware};
pub use routing::build_router;
pub use statistics::{Aggregate, CategoryTotals, ChartMode, write_report};
pub use transaction::{
    DeleteCriteria, EXPENSE_TYPE, INCOME_TYPE, NewTransaction, Transaction, TransactionId,
};
pub use tui::{App, run_tui};

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

/// The errors that may occur in the API service.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A required field was absent from the body of a create request.
    #[error("Missing required field: '{0}'")]
    MissingField(&'static str),

    /// One or more of the fields used to select transactions for deletion
    /// were absent from the request body.
    #[error("Missing required fields (category, date, type)")]
    MissingDeleteFields,

    /// The request body could not be parsed as JSON of the expected shape.
    #[error("{0}")]
    InvalidJson(String),

    /// The requested resource was not found.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

/// The body of an error response for endpoints that report errors as
/// `{"error": ...}`.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ErrorBody {
    /// A description of what went wrong.
    pub error: String,
}

/// The body of a response for endpoints that report a status alongside a
/// message, e.g. `{"status": "error", "message": ...}`.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct StatusMessageBody {
    /// Either "success" or "error".
    pub status: String,
    /// A human readable description of the outcome.
    pub message: String,
}

impl Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::MissingField(_) | Error::MissingDeleteFields | Error::InvalidJson(_) => {
                StatusCode::BAD_REQUEST
            }
            Error::NotFound => StatusCode::NOT_FOUND,
            Error::SqlError(_) | Error::DatabaseLockError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Render the error as `{"error": <message>}`.
    fn into_error_response(self) -> Response {
        let status_code = self.status_code();

        (
            status_code,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }

    /// Render the error as `{"status": "error", "message": <message>}`.
    fn into_status_message_response(self) -> Response {
        let status_code = self.status_code();

        (
            status_code,
            Json(StatusMessageBody {
                status: "error".to_owned(),
                message: self.to_string(),
            }),
        )
            .into_response()
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound | Error::MissingField(_) | Error::InvalidJson(_) => {}
            ref error => tracing::error!("An unexpected error occurred: {}", error),
        }

        self.into_error_response()
    }
}
