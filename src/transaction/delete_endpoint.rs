//! Defines the endpoint for deleting every transaction that matches a category, date and type.
use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State, rejection::JsonRejection},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    transaction::{DeleteCriteria, core::delete_transactions},
};

/// The state needed to delete transactions.
#[derive(Debug, Clone)]
pub struct DeleteTransactionsState {
    /// The database connection for managing transactions.
    db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteTransactionsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The JSON body for deleting transactions.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct DeleteTransactionsRequest {
    category: Option<String>,
    date: Option<String>,
    #[serde(rename = "type")]
    transaction_type: Option<String>,
}

impl DeleteTransactionsRequest {
    fn validate(self) -> Result<DeleteCriteria, Error> {
        match (self.category, self.date, self.transaction_type) {
            (Some(category), Some(date), Some(transaction_type)) => Ok(DeleteCriteria {
                category,
                date,
                transaction_type,
            }),
            _ => Err(Error::MissingDeleteFields),
        }
    }
}

/// The body of a successful delete response.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct DeleteTransactionsResponse {
    /// Always "success".
    pub status: String,
    /// A summary, e.g. "Deleted 3 transactions".
    pub message: String,
    /// How many transactions were deleted. Zero is not an error.
    pub deleted_count: usize,
}

/// A route handler for deleting every transaction with an exactly matching
/// category, date and type.
pub async fn delete_transactions_endpoint(
    State(state): State<DeleteTransactionsState>,
    body: Result<Json<DeleteTransactionsRequest>, JsonRejection>,
) -> Response {
    let criteria = match body
        .map_err(|rejection| {
            tracing::debug!("rejected delete transactions body: {rejection}");
            Error::MissingDeleteFields
        })
        .and_then(|Json(request)| request.validate())
    {
        Ok(criteria) => criteria,
        Err(error) => return error.into_status_message_response(),
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_status_message_response();
        }
    };

    match delete_transactions(&criteria, &connection) {
        Ok(deleted_count) => {
            tracing::info!("deleted {deleted_count} transactions matching {criteria:?}");
            Json(DeleteTransactionsResponse {
                status: "success".to_owned(),
                message: format!("Deleted {deleted_count} transactions"),
                deleted_count,
            })
            .into_response()
        }
        Err(error) => {
            tracing::error!("could not delete transactions matching {criteria:?}: {error}");
            error.into_status_message_response()
        }
    }
}
