//! The terminal application state and its key event handlers.
//!
//! Every handler that talks to the API service makes exactly one call and
//! waits for it before updating the state.

use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::{
    TransactionApi,
    statistics::{ChartMode, aggregate_by_category, write_report},
    tui::views::{FormView, ListView, MenuItem, MenuView, StatisticsView},
};

/// The screen currently shown.
#[derive(Debug, Clone)]
pub enum Screen {
    /// The root menu.
    Menu(MenuView),
    /// The transaction list.
    List(ListView),
    /// The form for adding a transaction.
    Add(FormView),
    /// The form for deleting transactions.
    Delete(FormView),
    /// The category charts.
    Statistics(StatisticsView),
}

/// A message shown at the bottom of the screen.
#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    /// The last action succeeded.
    Info(String),
    /// The last action failed.
    Error(String),
}

/// The terminal application.
pub struct App<A> {
    api: A,
    report_path: PathBuf,
    /// The screen currently shown.
    pub screen: Screen,
    /// The outcome of the last action, if any.
    pub status: Option<Status>,
    /// Set once the user asks to leave the application.
    pub should_quit: bool,
}

impl<A: TransactionApi> App<A> {
    /// Create an application that starts at the root menu.
    ///
    /// `report_path` is where the statistics view writes its HTML report.
    pub fn new(api: A, report_path: PathBuf) -> Self {
        Self {
            api,
            report_path,
            screen: Screen::Menu(MenuView::new()),
            status: None,
            should_quit: false,
        }
    }

    /// Handle a single key press.
    pub async fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match &mut self.screen {
            Screen::Menu(menu) => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
                KeyCode::Down | KeyCode::Char('j') => menu.next(),
                KeyCode::Up | KeyCode::Char('k') => menu.previous(),
                KeyCode::Enter => {
                    let item = menu.selected_item();
                    self.open(item).await;
                }
                _ => {}
            },
            Screen::List(list) => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => self.back_to_menu(),
                KeyCode::Down | KeyCode::Char('j') => list.next(),
                KeyCode::Up | KeyCode::Char('k') => list.previous(),
                _ => {}
            },
            Screen::Add(form) | Screen::Delete(form) => match key.code {
                KeyCode::Esc => self.back_to_menu(),
                KeyCode::Tab | KeyCode::Down => form.focus_next(),
                KeyCode::BackTab | KeyCode::Up => form.focus_previous(),
                KeyCode::Backspace => form.pop_char(),
                KeyCode::Char(c) => form.push_char(c),
                KeyCode::Enter => self.submit_form().await,
                _ => {}
            },
            Screen::Statistics(statistics) => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => self.back_to_menu(),
                KeyCode::Char('p') => statistics.show(ChartMode::Pie),
                KeyCode::Char('b') => statistics.show(ChartMode::Bar),
                KeyCode::Char('h') => statistics.hide(),
                KeyCode::Char('e') => self.export_report(),
                _ => {}
            },
        }
    }

    /// Open the screen for a menu item.
    ///
    /// The list and statistics screens fetch a snapshot of the transactions
    /// first. If the fetch fails the menu stays open and the error is shown.
    pub async fn open(&mut self, item: MenuItem) {
        self.status = None;

        self.screen = match item {
            MenuItem::AddTransaction => Screen::Add(FormView::add_transaction()),
            MenuItem::DeleteTransactions => Screen::Delete(FormView::delete_transactions()),
            MenuItem::TransactionList => match self.api.get_transactions().await {
                Ok(transactions) => Screen::List(ListView::new(transactions)),
                Err(error) => return self.report_error(error),
            },
            MenuItem::Statistics => match self.api.get_transactions().await {
                Ok(transactions) => Screen::Statistics(StatisticsView::new(transactions)),
                Err(error) => return self.report_error(error),
            },
        };
    }

    fn back_to_menu(&mut self) {
        self.status = None;
        self.screen = Screen::Menu(MenuView::new());
    }

    async fn submit_form(&mut self) {
        match &self.screen {
            Screen::Add(form) => {
                let transaction = match form.to_new_transaction() {
                    Ok(transaction) => transaction,
                    Err(message) => {
                        self.status = Some(Status::Error(message));
                        return;
                    }
                };

                self.status = match self.api.add_transaction(&transaction).await {
                    Ok(()) => Some(Status::Info("Transaction added!".to_owned())),
                    Err(error) => Some(Status::Error(error.to_string())),
                };
            }
            Screen::Delete(form) => {
                let criteria = form.to_delete_criteria();

                self.status = match self.api.delete_transactions(&criteria).await {
                    Ok(()) => Some(Status::Info("Transactions deleted!".to_owned())),
                    Err(error) => Some(Status::Error(error.to_string())),
                };
            }
            _ => {}
        }
    }

    fn export_report(&mut self) {
        let Screen::Statistics(statistics) = &self.screen else {
            return;
        };

        let mode = match statistics.mode {
            ChartMode::Hidden => ChartMode::Pie,
            mode => mode,
        };
        let aggregate = aggregate_by_category(&statistics.transactions);

        self.status = match write_report(&self.report_path, mode, &aggregate) {
            Ok(()) => Some(Status::Info(format!(
                "Report written to {}",
                self.report_path.display()
            ))),
            Err(error) => {
                tracing::error!("could not write report: {error}");
                Some(Status::Error(format!("Could not write report: {error}")))
            }
        };
    }

    fn report_error(&mut self, error: impl std::fmt::Display) {
        tracing::error!("{error}");
        self.status = Some(Status::Error(error.to_string()));
    }
}
