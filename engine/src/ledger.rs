//! In-memory expense ledger
//!
//! Holds the income and expense entries of one session and summarizes the
//! current week per category. The ledger is owned by the caller; nothing is
//! persisted.

use crate::errors::EngineResult;
use crate::validation::parse_amount;
use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;
use uuid::Uuid;

/// Spending/earning category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Category {
    #[default]
    Food,
    Transport,
    Shopping,
    Salary,
    Rent,
    Other,
}

impl Category {
    /// All categories in display order
    pub const ALL: [Category; 6] = [
        Category::Food,
        Category::Transport,
        Category::Shopping,
        Category::Salary,
        Category::Rent,
        Category::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Shopping => "Shopping",
            Category::Salary => "Salary",
            Category::Rent => "Rent",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TransactionKind {
    Income,
    #[default]
    Expense,
}

/// One ledger entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub amount: f64,
    pub category: Category,
    pub kind: TransactionKind,
    pub date: NaiveDate,
}

/// Income and expense totals for one category
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct CategoryTotals {
    pub income: f64,
    pub expense: f64,
}

/// Per-category totals for the week containing a given day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklySummary {
    pub week_start: NaiveDate,
    /// One row per category, in [`Category::ALL`] order
    pub rows: Vec<(Category, CategoryTotals)>,
}

impl WeeklySummary {
    pub fn totals_for(&self, category: Category) -> CategoryTotals {
        self.rows
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, totals)| *totals)
            .unwrap_or_default()
    }

    pub fn total_income(&self) -> f64 {
        self.rows.iter().map(|(_, t)| t.income).sum()
    }

    pub fn total_expense(&self) -> f64 {
        self.rows.iter().map(|(_, t)| t.expense).sum()
    }
}

/// The Sunday on or before `date`
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_sunday() as i64)
}

/// Session ledger
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ledger {
    transactions: Vec<Transaction>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a transaction from the raw amount text
    ///
    /// Empty or non-numeric text is rejected and the ledger is left as is.
    pub fn add(
        &mut self,
        amount_text: &str,
        category: Category,
        kind: TransactionKind,
        date: NaiveDate,
    ) -> EngineResult<&Transaction> {
        let amount = parse_amount(amount_text)?;
        let transaction = Transaction {
            id: Uuid::new_v4(),
            amount,
            category,
            kind,
            date,
        };
        debug!(id = %transaction.id, amount, %category, ?kind, %date, "Recorded transaction");

        self.transactions.push(transaction);
        Ok(&self.transactions[self.transactions.len() - 1])
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Entries dated on or after the start of `today`'s week, in insertion order
    pub fn this_week(&self, today: NaiveDate) -> impl Iterator<Item = &Transaction> {
        let start = week_start(today);
        self.transactions.iter().filter(move |t| t.date >= start)
    }

    /// Per-category totals over [`Ledger::this_week`]
    pub fn weekly_summary(&self, today: NaiveDate) -> WeeklySummary {
        let mut rows: Vec<(Category, CategoryTotals)> = Category::ALL
            .iter()
            .map(|c| (*c, CategoryTotals::default()))
            .collect();

        for t in self.this_week(today) {
            if let Some((_, totals)) = rows.iter_mut().find(|(c, _)| *c == t.category) {
                match t.kind {
                    TransactionKind::Income => totals.income += t.amount,
                    TransactionKind::Expense => totals.expense += t.amount,
                }
            }
        }

        WeeklySummary {
            week_start: week_start(today),
            rows,
        }
    }
}
