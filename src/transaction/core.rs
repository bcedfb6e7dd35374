//! Defines the core data models and database queries for transactions.

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};

use crate::Error;

// ============================================================================
// MODELS
// ============================================================================

/// Alias for the integer type used for transaction IDs.
pub type TransactionId = i64;

/// The type label for money that was earned.
pub const INCOME_TYPE: &str = "доход";
/// The type label for money that was spent.
pub const EXPENSE_TYPE: &str = "расход";

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// To create a new `Transaction`, use [Transaction::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction, assigned by the database.
    pub id: TransactionId,
    /// The amount of money spent or earned in this transaction.
    pub amount: f64,
    /// A free-text label used to group transactions, e.g. "Food".
    pub category: String,
    /// When the transaction happened, conventionally as "YYYY-MM-DD".
    pub date: String,
    /// Whether the transaction is income or an expense, see [INCOME_TYPE]
    /// and [EXPENSE_TYPE]. Any other label is treated as an expense.
    #[serde(rename = "type")]
    pub transaction_type: String,
    /// A text description of what the transaction was for.
    #[serde(default)]
    pub description: String,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [NewTransaction] for discoverability.
    pub fn build(amount: f64, category: &str, date: &str, transaction_type: &str) -> NewTransaction {
        NewTransaction {
            amount,
            category: category.to_owned(),
            date: date.to_owned(),
            transaction_type: transaction_type.to_owned(),
            description: String::new(),
        }
    }

    /// Whether the transaction counts towards income rather than expenses.
    pub fn is_income(&self) -> bool {
        self.transaction_type == INCOME_TYPE
    }
}

/// A transaction that has not been stored yet.
///
/// This is also the JSON body the client sends to create a transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    /// The amount of money spent or earned.
    pub amount: f64,
    /// A free-text label used to group transactions.
    pub category: String,
    /// When the transaction happened.
    pub date: String,
    /// The income/expense label.
    #[serde(rename = "type")]
    pub transaction_type: String,
    /// Defaults to an empty string.
    #[serde(default)]
    pub description: String,
}

impl NewTransaction {
    /// Set the description for the transaction.
    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_owned();
        self
    }
}

/// Selects the transactions to delete.
///
/// All three fields must match exactly. There is no way to target a single
/// transaction by ID, so every transaction sharing the triple is deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteCriteria {
    /// The category to match.
    pub category: String,
    /// The date to match.
    pub date: String,
    /// The type label to match.
    #[serde(rename = "type")]
    pub transaction_type: String,
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create a new transaction in the database and return its ID.
///
/// The insert runs in its own SQL transaction which is rolled back if the
/// insert or commit fails.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn create_transaction(
    transaction: NewTransaction,
    connection: &Connection,
) -> Result<TransactionId, Error> {
    let sql_transaction = connection.unchecked_transaction()?;

    let id = sql_transaction
        .prepare(
            "INSERT INTO transactions (amount, category, date, \"type\", description)
             VALUES (?1, ?2, ?3, ?4, ?5)
             RETURNING id",
        )?
        .query_row(
            (
                transaction.amount,
                transaction.category,
                transaction.date,
                transaction.transaction_type,
                transaction.description,
            ),
            |row| row.get(0),
        )?;

    sql_transaction.commit()?;

    Ok(id)
}

/// Retrieve every transaction in the order they were inserted.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn get_transactions(connection: &Connection) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare(
            "SELECT id, amount, category, date, \"type\", description FROM transactions ORDER BY id",
        )?
        .query_map([], map_transaction_row)?
        .map(|maybe_transaction| maybe_transaction.map_err(Error::from))
        .collect()
}

type RowsAffected = usize;

/// Delete every transaction whose category, date and type all equal `criteria`.
///
/// Returns the number of deleted transactions, which may be zero.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
/// The deletion is rolled back in that case.
pub fn delete_transactions(
    criteria: &DeleteCriteria,
    connection: &Connection,
) -> Result<RowsAffected, Error> {
    let sql_transaction = connection.unchecked_transaction()?;

    let rows_affected = sql_transaction.execute(
        "DELETE FROM transactions WHERE category = ?1 AND date = ?2 AND \"type\" = ?3",
        (
            &criteria.category,
            &criteria.date,
            &criteria.transaction_type,
        ),
    )?;

    sql_transaction.commit()?;

    Ok(rows_affected)
}

/// Get the total number of transactions in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
pub fn count_transactions(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM transactions;", [], |row| row.get(0))
        .map_err(|error| error.into())
}

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS transactions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                amount REAL NOT NULL,
                category TEXT NOT NULL,
                date TEXT NOT NULL,
                \"type\" TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT ''
                )",
        (),
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let amount = row.get(1)?;
    let category = row.get(2)?;
    let date = row.get(3)?;
    let transaction_type = row.get(4)?;
    let description = row.get(5)?;

    Ok(Transaction {
        id,
        amount,
        category,
        date,
        transaction_type,
        description,
    })
}

// ============================================================================
// TESTS
// ============================================================================
