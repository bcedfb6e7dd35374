//! The API endpoints URIs.

/// The route to list, create and delete transactions.
pub const TRANSACTIONS_API: &str = "/api/transactions";
