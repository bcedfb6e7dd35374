//! The state of each screen of the terminal interface.

use ratatui::widgets::{ListState, TableState};

use crate::{
    DeleteCriteria, NewTransaction, Transaction,
    statistics::{Aggregate, ChartMode, aggregate_by_category},
};

/// The actions offered by the root menu, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    /// Open the form for adding a transaction.
    AddTransaction,
    /// Open the form for deleting transactions.
    DeleteTransactions,
    /// Open the statistics view.
    Statistics,
    /// Open the transaction list.
    TransactionList,
}

impl MenuItem {
    /// Every menu item in display order.
    pub const ALL: [MenuItem; 4] = [
        MenuItem::AddTransaction,
        MenuItem::DeleteTransactions,
        MenuItem::Statistics,
        MenuItem::TransactionList,
    ];

    /// The text shown in the menu.
    pub fn label(&self) -> &'static str {
        match self {
            MenuItem::AddTransaction => "Add transaction",
            MenuItem::DeleteTransactions => "Delete transactions",
            MenuItem::Statistics => "Statistics",
            MenuItem::TransactionList => "Transaction list",
        }
    }
}

/// The root menu.
#[derive(Debug, Clone, Default)]
pub struct MenuView {
    /// Which menu item is highlighted.
    pub state: ListState,
}

impl MenuView {
    pub fn new() -> Self {
        Self {
            state: ListState::default().with_selected(Some(0)),
        }
    }

    pub fn selected_item(&self) -> MenuItem {
        let index = self.state.selected().unwrap_or(0);
        MenuItem::ALL[index.min(MenuItem::ALL.len() - 1)]
    }

    pub fn next(&mut self) {
        let index = self.state.selected().unwrap_or(0);
        self.state
            .select(Some((index + 1) % MenuItem::ALL.len()));
    }

    pub fn previous(&mut self) {
        let index = self.state.selected().unwrap_or(0);
        self.state
            .select(Some((index + MenuItem::ALL.len() - 1) % MenuItem::ALL.len()));
    }
}

/// A labelled single-line text input.
#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    /// The text shown above the input.
    pub label: &'static str,
    /// What the user typed.
    pub value: String,
}

impl FormField {
    fn new(label: &'static str) -> Self {
        Self {
            label,
            value: String::new(),
        }
    }
}

/// A form of text inputs with one focused input.
#[derive(Debug, Clone, PartialEq)]
pub struct FormView {
    /// The title of the form.
    pub title: &'static str,
    /// The inputs in display order.
    pub fields: Vec<FormField>,
    /// The index of the input that receives typed characters.
    pub focused: usize,
}

const AMOUNT_FIELD: &str = "Amount";
const CATEGORY_FIELD: &str = "Category";
const DATE_FIELD: &str = "Date (YYYY-MM-DD)";
const TYPE_FIELD: &str = "Type (доход or расход)";

impl FormView {
    /// The form for adding a transaction.
    pub fn add_transaction() -> Self {
        Self {
            title: "Add transaction",
            fields: vec![
                FormField::new(AMOUNT_FIELD),
                FormField::new(CATEGORY_FIELD),
                FormField::new(DATE_FIELD),
                FormField::new(TYPE_FIELD),
            ],
            focused: 0,
        }
    }

    /// The form for deleting transactions by category, date and type.
    pub fn delete_transactions() -> Self {
        Self {
            title: "Delete transactions",
            fields: vec![
                FormField::new(CATEGORY_FIELD),
                FormField::new(DATE_FIELD),
                FormField::new(TYPE_FIELD),
            ],
            focused: 0,
        }
    }

    pub fn focus_next(&mut self) {
        self.focused = (self.focused + 1) % self.fields.len();
    }

    pub fn focus_previous(&mut self) {
        self.focused = (self.focused + self.fields.len() - 1) % self.fields.len();
    }

    pub fn push_char(&mut self, c: char) {
        if let Some(field) = self.fields.get_mut(self.focused) {
            field.value.push(c);
        }
    }

    pub fn pop_char(&mut self) {
        if let Some(field) = self.fields.get_mut(self.focused) {
            field.value.pop();
        }
    }

    fn value(&self, label: &str) -> &str {
        self.fields
            .iter()
            .find(|field| field.label == label)
            .map(|field| field.value.as_str())
            .unwrap_or_default()
    }

    /// Build a transaction from the add form.
    ///
    /// # Errors
    /// Returns an error message if the amount is not a number.
    pub fn to_new_transaction(&self) -> Result<NewTransaction, String> {
        let amount = self.value(AMOUNT_FIELD);
        let amount: f64 = amount
            .trim()
            .parse()
            .map_err(|_| format!("Input error: \"{amount}\" is not a number"))?;

        Ok(Transaction::build(
            amount,
            self.value(CATEGORY_FIELD),
            self.value(DATE_FIELD),
            self.value(TYPE_FIELD),
        ))
    }

    /// Build the deletion criteria from the raw text of the delete form.
    pub fn to_delete_criteria(&self) -> DeleteCriteria {
        DeleteCriteria {
            category: self.value(CATEGORY_FIELD).to_owned(),
            date: self.value(DATE_FIELD).to_owned(),
            transaction_type: self.value(TYPE_FIELD).to_owned(),
        }
    }
}

/// A snapshot of every transaction shown as a table.
#[derive(Debug, Clone, Default)]
pub struct ListView {
    pub transactions: Vec<Transaction>,
    pub state: TableState,
}

impl ListView {
    pub fn new(transactions: Vec<Transaction>) -> Self {
        let selected = if transactions.is_empty() { None } else { Some(0) };

        Self {
            transactions,
            state: TableState::default().with_selected(selected),
        }
    }

    pub fn next(&mut self) {
        if let Some(index) = self.state.selected() {
            self.state
                .select(Some((index + 1).min(self.transactions.len() - 1)));
        }
    }

    pub fn previous(&mut self) {
        if let Some(index) = self.state.selected() {
            self.state.select(Some(index.saturating_sub(1)));
        }
    }
}

/// Category charts over a snapshot of transactions.
#[derive(Debug, Clone, Default)]
pub struct StatisticsView {
    /// Fetched once when the view opens.
    pub transactions: Vec<Transaction>,
    /// The chart currently shown.
    pub mode: ChartMode,
    /// The totals the current chart was built from.
    pub aggregate: Aggregate,
}

impl StatisticsView {
    pub fn new(transactions: Vec<Transaction>) -> Self {
        Self {
            transactions,
            ..Default::default()
        }
    }

    /// Replace the current chart with `mode`.
    ///
    /// The previous chart is torn down first and the totals are derived
    /// again from the snapshot.
    pub fn show(&mut self, mode: ChartMode) {
        self.hide();

        if mode != ChartMode::Hidden {
            self.aggregate = aggregate_by_category(&self.transactions);
            self.mode = mode;
        }
    }

    /// Remove the current chart.
    pub fn hide(&mut self) {
        self.mode = ChartMode::Hidden;
        self.aggregate = Aggregate::default();
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        EXPENSE_TYPE, INCOME_TYPE, Transaction,
        statistics::ChartMode,
        tui::views::{FormView, ListView, MenuItem, MenuView, StatisticsView},
    };

    fn type_into(form: &mut FormView, values: &[&str]) {
        for value in values {
            for c in value.chars() {
                form.push_char(c);
            }
            form.focus_next();
        }
    }

    #[test]
    fn menu_wraps_around() {
        let mut menu = MenuView::new();

        menu.previous();
        assert_eq!(menu.selected_item(), MenuItem::TransactionList);

        menu.next();
        assert_eq!(menu.selected_item(), MenuItem::AddTransaction);
    }

    #[test]
    fn add_form_builds_transaction() {
        let mut form = FormView::add_transaction();
        type_into(&mut form, &[" 12.5 ", "Food", "2024-01-31", EXPENSE_TYPE]);

        let transaction = form.to_new_transaction().unwrap();

        assert_eq!(
            transaction,
            Transaction::build(12.5, "Food", "2024-01-31", EXPENSE_TYPE)
        );
    }

    #[test]
    fn add_form_rejects_non_numeric_amount() {
        let mut form = FormView::add_transaction();
        type_into(&mut form, &["twelve", "Food", "2024-01-31", EXPENSE_TYPE]);

        let result = form.to_new_transaction();

        assert_eq!(
            result,
            Err("Input error: \"twelve\" is not a number".to_owned())
        );
    }

    #[test]
    fn backspace_edits_focused_field_only() {
        let mut form = FormView::delete_transactions();
        type_into(&mut form, &["Foodd", "2024-01-31"]);
        form.focus_previous();
        form.focus_previous();
        form.pop_char();

        let criteria = form.to_delete_criteria();

        assert_eq!(criteria.category, "Food");
        assert_eq!(criteria.date, "2024-01-31");
        assert_eq!(criteria.transaction_type, "");
    }

    #[test]
    fn list_selection_stays_in_bounds() {
        let mut list = ListView::new(vec![Transaction {
            id: 1,
            amount: 1.0,
            category: "Food".to_owned(),
            date: "2024-01-01".to_owned(),
            transaction_type: EXPENSE_TYPE.to_owned(),
            description: String::new(),
        }]);

        list.next();
        list.previous();
        list.previous();

        assert_eq!(list.state.selected(), Some(0));
    }

    #[test]
    fn empty_list_has_no_selection() {
        let mut list = ListView::new(Vec::new());

        list.next();

        assert_eq!(list.state.selected(), None);
    }

    #[test]
    fn switching_modes_rebuilds_aggregate() {
        let mut view = StatisticsView::new(vec![Transaction {
            id: 1,
            amount: 10.0,
            category: "Salary".to_owned(),
            date: "2024-01-01".to_owned(),
            transaction_type: INCOME_TYPE.to_owned(),
            description: String::new(),
        }]);

        view.show(ChartMode::Pie);
        assert_eq!(view.mode, ChartMode::Pie);
        assert_eq!(view.aggregate.income["Salary"], 10.0);

        view.show(ChartMode::Bar);
        assert_eq!(view.mode, ChartMode::Bar);
        assert_eq!(view.aggregate.income["Salary"], 10.0);

        view.hide();
        assert_eq!(view.mode, ChartMode::Hidden);
        assert!(view.aggregate.income.is_empty());
    }
}
