//! Transaction management for the finance tracker.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and `NewTransaction` for creating transactions
//! - Database functions for storing, querying, and deleting transactions
//! - The JSON route handlers for the transactions API

mod core;
mod create_endpoint;
mod delete_endpoint;
mod list_endpoint;

pub use core::{
    DeleteCriteria, EXPENSE_TYPE, INCOME_TYPE, NewTransaction, Transaction, TransactionId,
    count_transactions, create_transaction_table,
};
pub use create_endpoint::create_transaction_endpoint;
pub use delete_endpoint::delete_transactions_endpoint;
pub use list_endpoint::list_transactions_endpoint;

#[cfg(test)]
pub use core::{create_transaction, delete_transactions, get_transactions};
