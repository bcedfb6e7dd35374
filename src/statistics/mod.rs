//! Per-category statistics over a snapshot of transactions.
//!
//! This module contains:
//! - aggregation of transaction amounts by type group and category,
//! - ECharts options for pie and bar charts,
//! - an HTML report that renders those charts in a browser.

mod aggregation;
mod charts;
mod report;

pub use aggregation::{Aggregate, CategoryTotals, aggregate_by_category, shares, sorted_totals};
pub use report::write_report;

/// Which charts the statistics view shows. Only one mode is shown at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChartMode {
    /// No chart is shown.
    #[default]
    Hidden,
    /// Two pie charts of category shares, one for income and one for expenses.
    Pie,
    /// Two bar charts of category totals, one for income and one for expenses.
    Bar,
}
