//! Defines the endpoint for creating a new transaction.
use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    transaction::{NewTransaction, TransactionId, core::create_transaction},
};

/// The state needed to create a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The JSON body for creating a transaction.
///
/// Every field is optional here so that a missing field can be reported by
/// name, see [CreateTransactionRequest::validate].
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CreateTransactionRequest {
    /// The value of the transaction.
    pub amount: Option<f64>,
    /// The label used to group the transaction.
    pub category: Option<String>,
    /// When the transaction occurred.
    pub date: Option<String>,
    /// The income/expense label.
    #[serde(rename = "type")]
    pub transaction_type: Option<String>,
    /// Text detailing the transaction.
    pub description: Option<String>,
}

impl CreateTransactionRequest {
    /// Check that the required fields are present.
    ///
    /// Fields are checked in the order amount, category, date, type and the
    /// first missing one is reported.
    fn validate(self) -> Result<NewTransaction, Error> {
        let amount = self.amount.ok_or(Error::MissingField("amount"))?;
        let category = self.category.ok_or(Error::MissingField("category"))?;
        let date = self.date.ok_or(Error::MissingField("date"))?;
        let transaction_type = self.transaction_type.ok_or(Error::MissingField("type"))?;

        Ok(NewTransaction {
            amount,
            category,
            date,
            transaction_type,
            description: self.description.unwrap_or_default(),
        })
    }
}

/// The body of a successful create response.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct CreateTransactionResponse {
    /// Always "success".
    pub status: String,
    /// The ID assigned to the new transaction.
    pub id: TransactionId,
}

/// A route handler for creating a new transaction, responds with the new ID.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    body: Result<Json<CreateTransactionRequest>, JsonRejection>,
) -> Response {
    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::debug!("rejected create transaction body: {rejection}");
            return Error::InvalidJson(rejection.body_text()).into_error_response();
        }
    };

    let transaction = match request.validate() {
        Ok(transaction) => transaction,
        Err(error) => return error.into_error_response(),
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_error_response();
        }
    };

    match create_transaction(transaction, &connection) {
        Ok(id) => {
            tracing::info!("created transaction {id}");
            (
                StatusCode::CREATED,
                Json(CreateTransactionResponse {
                    status: "success".to_owned(),
                    id,
                }),
            )
                .into_response()
        }
        Err(error) => {
            tracing::error!("could not create transaction: {error}");
            error.into_error_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{Router, http::StatusCode, routing::post};
    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde_json::json;

    use crate::{
        ErrorBody,
        db::initialize,
        endpoints,
        transaction::{
            EXPENSE_TYPE, Transaction, count_transactions,
            create_endpoint::{CreateTransactionResponse, CreateTransactionState},
            create_transaction_endpoint, get_transactions,
        },
    };

    fn get_test_state() -> CreateTransactionState {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        CreateTransactionState {
            db_connection: Arc::new(Mutex::new(conn)),
        }
    }

    fn get_test_server(state: CreateTransactionState) -> TestServer {
        let app = Router::new()
            .route(endpoints::TRANSACTIONS_API, post(create_transaction_endpoint))
            .with_state(state);

        TestServer::new(app).expect("Could not create test server.")
    }

    #[tokio::test]
    async fn can_create_transaction() {
        let state = get_test_state();
        let server = get_test_server(state.clone());

        let response = server
            .post(endpoints::TRANSACTIONS_API)
            .json(&json!({
                "amount": 100.0,
                "category": "Food",
                "date": "2023-01-01",
                "type": EXPENSE_TYPE,
            }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let body: CreateTransactionResponse = response.json();
        assert_eq!(body.status, "success");

        let connection = state.db_connection.lock().unwrap();
        let transactions = get_transactions(&connection).unwrap();
        assert_eq!(
            transactions,
            vec![Transaction {
                id: body.id,
                amount: 100.0,
                category: "Food".to_owned(),
                date: "2023-01-01".to_owned(),
                transaction_type: EXPENSE_TYPE.to_owned(),
                description: "".to_owned(),
            }]
        );
    }

    #[tokio::test]
    async fn accepts_integer_amount_and_description() {
        let state = get_test_state();
        let server = get_test_server(state.clone());

        server
            .post(endpoints::TRANSACTIONS_API)
            .json(&json!({
                "amount": 42,
                "category": "Salary",
                "date": "2024-02-29",
                "type": "доход",
                "description": "February pay",
            }))
            .await
            .assert_status(StatusCode::CREATED);

        let connection = state.db_connection.lock().unwrap();
        let transaction = get_transactions(&connection).unwrap().remove(0);
        assert_eq!(transaction.amount, 42.0);
        assert_eq!(transaction.description, "February pay");
    }

    #[tokio::test]
    async fn missing_field_is_rejected_without_insert() {
        let full = json!({
            "amount": 1.5,
            "category": "Food",
            "date": "2023-01-01",
            "type": EXPENSE_TYPE,
        });

        for field in ["amount", "category", "date", "type"] {
            let state = get_test_state();
            let server = get_test_server(state.clone());
            let mut body = full.clone();
            body.as_object_mut().unwrap().remove(field);

            let response = server.post(endpoints::TRANSACTIONS_API).json(&body).await;

            response.assert_status_bad_request();
            response.assert_json(&ErrorBody {
                error: format!("Missing required field: '{field}'"),
            });
            let connection = state.db_connection.lock().unwrap();
            assert_eq!(count_transactions(&connection).unwrap(), 0);
        }
    }

    #[tokio::test]
    async fn first_missing_field_is_reported() {
        let server = get_test_server(get_test_state());

        let response = server
            .post(endpoints::TRANSACTIONS_API)
            .json(&json!({ "date": "2023-01-01" }))
            .await;

        response.assert_status_bad_request();
        response.assert_json(&ErrorBody {
            error: "Missing required field: 'amount'".to_owned(),
        });
    }

    #[tokio::test]
    async fn non_numeric_amount_is_rejected() {
        let state = get_test_state();
        let server = get_test_server(state.clone());

        let response = server
            .post(endpoints::TRANSACTIONS_API)
            .json(&json!({
                "amount": "a lot",
                "category": "Food",
                "date": "2023-01-01",
                "type": EXPENSE_TYPE,
            }))
            .await;

        response.assert_status_bad_request();
        let body: ErrorBody = response.json();
        assert!(!body.error.is_empty());
        let connection = state.db_connection.lock().unwrap();
        assert_eq!(count_transactions(&connection).unwrap(), 0);
    }

    #[tokio::test]
    async fn storage_failure_responds_with_internal_server_error() {
        let state = get_test_state();
        state
            .db_connection
            .lock()
            .unwrap()
            .execute("DROP TABLE transactions", ())
            .unwrap();
        let server = get_test_server(state);

        let response = server
            .post(endpoints::TRANSACTIONS_API)
            .json(&json!({
                "amount": 1.0,
                "category": "Food",
                "date": "2023-01-01",
                "type": EXPENSE_TYPE,
            }))
            .await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: ErrorBody = response.json();
        assert!(
            body.error.contains("transactions"),
            "want error mentioning the missing table, got {:?}",
            body.error
        );
    }
}
