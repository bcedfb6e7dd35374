//! Transaction data aggregation for charts.
//!
//! Splits transactions into income and expenses and sums the amounts per
//! category within each group.

use std::collections::HashMap;

use crate::Transaction;

/// Mapping from category name to the summed amount of its transactions.
pub type CategoryTotals = HashMap<String, f64>;

/// Per-category totals for the two transaction groups.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregate {
    /// Totals of transactions whose type is [crate::INCOME_TYPE].
    pub income: CategoryTotals,
    /// Totals of every other transaction.
    pub expense: CategoryTotals,
}

/// Sums transaction amounts by category, separately for income and expenses.
///
/// A transaction counts as income only if its type is exactly
/// [crate::INCOME_TYPE]; any other type label counts as an expense.
pub fn aggregate_by_category(transactions: &[Transaction]) -> Aggregate {
    let mut aggregate = Aggregate::default();

    for transaction in transactions {
        let totals = if transaction.is_income() {
            &mut aggregate.income
        } else {
            &mut aggregate.expense
        };

        *totals.entry(transaction.category.clone()).or_insert(0.0) += transaction.amount;
    }

    aggregate
}

/// Returns the totals as (category, amount) pairs sorted by category name.
///
/// The totals themselves are unordered, sorting keeps chart output stable.
pub fn sorted_totals(totals: &CategoryTotals) -> Vec<(&str, f64)> {
    let mut pairs: Vec<(&str, f64)> = totals
        .iter()
        .map(|(category, amount)| (category.as_str(), *amount))
        .collect();
    pairs.sort_by(|a, b| a.0.cmp(b.0));
    pairs
}

/// One slice of a pie chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Share<'a> {
    /// The category the slice stands for.
    pub category: &'a str,
    /// The fraction of the chart's total in the range `0.0..=1.0`.
    pub fraction: f64,
}

impl Share<'_> {
    /// The slice label, e.g. "Food 42.5%".
    pub fn label(&self) -> String {
        format!("{} {:.1}%", self.category, self.fraction * 100.0)
    }
}

/// Calculates each category's share of the total, sorted by category name.
///
/// Shares are taken over the magnitude of each total so that a category with
/// a negative sum still gets a slice. If every total is zero, every share is
/// zero.
pub fn shares(totals: &CategoryTotals) -> Vec<Share<'_>> {
    let pairs = sorted_totals(totals);
    let sum: f64 = pairs.iter().map(|(_, amount)| amount.abs()).sum();

    pairs
        .into_iter()
        .map(|(category, amount)| Share {
            category,
            fraction: if sum > 0.0 { amount.abs() / sum } else { 0.0 },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use crate::{
        EXPENSE_TYPE, INCOME_TYPE, Transaction,
        statistics::aggregation::{Aggregate, aggregate_by_category, shares, sorted_totals},
    };

    fn transaction(kind: &str, category: &str, amount: f64) -> Transaction {
        Transaction {
            id: 0,
            amount,
            category: category.to_owned(),
            date: "2024-01-01".to_owned(),
            transaction_type: kind.to_owned(),
            description: String::new(),
        }
    }

    #[test]
    fn sums_by_category_within_each_group() {
        let transactions = vec![
            transaction(INCOME_TYPE, "A", 10.0),
            transaction(INCOME_TYPE, "A", 5.0),
            transaction(EXPENSE_TYPE, "B", 3.0),
        ];

        let aggregate = aggregate_by_category(&transactions);

        assert_eq!(
            aggregate,
            Aggregate {
                income: HashMap::from([("A".to_owned(), 15.0)]),
                expense: HashMap::from([("B".to_owned(), 3.0)]),
            }
        );
    }

    #[test]
    fn unknown_type_counts_as_expense() {
        let transactions = vec![
            transaction("transfer", "Savings", 50.0),
            transaction(EXPENSE_TYPE, "Savings", 25.0),
        ];

        let aggregate = aggregate_by_category(&transactions);

        assert!(aggregate.income.is_empty());
        assert_eq!(aggregate.expense, HashMap::from([("Savings".to_owned(), 75.0)]));
    }

    #[test]
    fn same_category_is_kept_apart_across_groups() {
        let transactions = vec![
            transaction(INCOME_TYPE, "Gift", 20.0),
            transaction(EXPENSE_TYPE, "Gift", 30.0),
        ];

        let aggregate = aggregate_by_category(&transactions);

        assert_eq!(aggregate.income["Gift"], 20.0);
        assert_eq!(aggregate.expense["Gift"], 30.0);
    }

    #[test]
    fn no_transactions_gives_empty_aggregates() {
        let aggregate = aggregate_by_category(&[]);

        assert_eq!(aggregate, Aggregate::default());
        assert!(shares(&aggregate.income).is_empty());
        assert!(sorted_totals(&aggregate.expense).is_empty());
    }

    #[test]
    fn shares_sum_to_one_and_are_sorted() {
        let totals = HashMap::from([
            ("Rent".to_owned(), 75.0),
            ("Food".to_owned(), 25.0),
        ]);

        let shares = shares(&totals);

        assert_eq!(shares.len(), 2);
        assert_eq!(shares[0].category, "Food");
        assert_eq!(shares[0].fraction, 0.25);
        assert_eq!(shares[1].label(), "Rent 75.0%");
    }

    #[test]
    fn zero_totals_have_zero_shares() {
        let totals = HashMap::from([("Food".to_owned(), 0.0)]);

        let shares = shares(&totals);

        assert_eq!(shares[0].fraction, 0.0);
        assert_eq!(shares[0].label(), "Food 0.0%");
    }
}
