//! A thin HTTP client for the transactions API.
//!
//! The client does not inspect response status codes and does not retry.
//! Transport and decoding failures are returned to the caller as [ApiError].

use crate::{DeleteCriteria, NewTransaction, Transaction, endpoints};

/// The errors that may occur when talking to the API service.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request could not be sent or the response body could not be decoded.
    #[error("request to the transactions API failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// The operations the presentation layer needs from the API service.
#[allow(async_fn_in_trait)]
pub trait TransactionApi {
    /// Get every stored transaction.
    async fn get_transactions(&self) -> Result<Vec<Transaction>, ApiError>;

    /// Create a transaction. The response of the service is ignored.
    async fn add_transaction(&self, transaction: &NewTransaction) -> Result<(), ApiError>;

    /// Delete every transaction matching `criteria`. The response of the
    /// service is ignored.
    async fn delete_transactions(&self, criteria: &DeleteCriteria) -> Result<(), ApiError>;
}

/// An HTTP client for the transactions API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    transactions_url: String,
}

impl ApiClient {
    /// Create a client for the service at `base_url`, e.g. "http://localhost:5000".
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            transactions_url: format!(
                "{}{}",
                base_url.trim_end_matches('/'),
                endpoints::TRANSACTIONS_API
            ),
        }
    }

    /// The full URL of the transactions endpoint.
    pub fn transactions_url(&self) -> &str {
        &self.transactions_url
    }
}

impl TransactionApi for ApiClient {
    async fn get_transactions(&self) -> Result<Vec<Transaction>, ApiError> {
        let transactions = self
            .client
            .get(&self.transactions_url)
            .send()
            .await?
            .json()
            .await?;

        Ok(transactions)
    }

    async fn add_transaction(&self, transaction: &NewTransaction) -> Result<(), ApiError> {
        self.client
            .post(&self.transactions_url)
            .json(transaction)
            .send()
            .await?;

        Ok(())
    }

    async fn delete_transactions(&self, criteria: &DeleteCriteria) -> Result<(), ApiError> {
        self.client
            .delete(&self.transactions_url)
            .json(criteria)
            .send()
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;
    use tokio::net::TcpListener;

    use crate::{
        ApiClient, AppState, DeleteCriteria, EXPENSE_TYPE, INCOME_TYPE, Transaction,
        TransactionApi, build_router,
    };

    async fn spawn_server() -> ApiClient {
        let state = AppState::new(Connection::open_in_memory().unwrap())
            .expect("Could not create app state");
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Could not bind to an ephemeral port");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, build_router(state))
                .await
                .expect("test server failed");
        });

        ApiClient::new(&format!("http://{addr}"))
    }

    #[test]
    fn builds_transactions_url_from_base_url() {
        let client = ApiClient::new("http://localhost:5000/");

        assert_eq!(
            client.transactions_url(),
            "http://localhost:5000/api/transactions"
        );
    }

    #[tokio::test]
    async fn add_list_and_delete_round_trip() {
        let client = spawn_server().await;

        client
            .add_transaction(&Transaction::build(100.0, "Food", "2023-01-01", EXPENSE_TYPE))
            .await
            .unwrap();
        client
            .add_transaction(
                &Transaction::build(900.0, "Salary", "2023-01-01", INCOME_TYPE)
                    .description("January"),
            )
            .await
            .unwrap();

        let transactions = client.get_transactions().await.unwrap();
        assert_eq!(transactions.len(), 2);
        assert_eq!(transactions[0].category, "Food");
        assert_eq!(transactions[0].description, "");
        assert_eq!(transactions[1].description, "January");

        client
            .delete_transactions(&DeleteCriteria {
                category: "Food".to_owned(),
                date: "2023-01-01".to_owned(),
                transaction_type: EXPENSE_TYPE.to_owned(),
            })
            .await
            .unwrap();

        let transactions = client.get_transactions().await.unwrap();
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].category, "Salary");
    }

    #[tokio::test]
    async fn delete_without_matches_is_not_an_error() {
        let client = spawn_server().await;

        let result = client
            .delete_transactions(&DeleteCriteria {
                category: "Nothing".to_owned(),
                date: "1970-01-01".to_owned(),
                transaction_type: EXPENSE_TYPE.to_owned(),
            })
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn unreachable_service_is_an_error() {
        // Bind then drop a listener to get a port nothing is listening on.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let client = ApiClient::new(&format!("http://{addr}"));

        let result = client.get_transactions().await;

        assert!(result.is_err(), "want an error, got {result:?}");
    }
}
