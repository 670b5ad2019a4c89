use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use rust_decimal::Decimal;
use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

use crate::error::{ExpenseError, Result};
use crate::schema::{Expense, ExpenseChanges, NewExpense, Profile};
use crate::store::{ExpenseOrder, ExpenseQuery, RecordStore};

#[derive(Default)]
struct Tables {
    /// Insertion order.
    expenses: Vec<Expense>,
    profiles: HashMap<String, Decimal>,
}

/// Process-local store with the same filtering and ordering rules as the
/// hosted tables.
#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a profile the way signup would.
    pub fn with_profile(self, user_id: impl Into<String>, monthly_income: Decimal) -> Self {
        if let Ok(mut tables) = self.tables.lock() {
            tables.profiles.insert(user_id.into(), monthly_income);
        }
        self
    }

    pub fn expense_count(&self) -> usize {
        self.tables.lock().map(|t| t.expenses.len()).unwrap_or(0)
    }

    fn tables(&self) -> Result<MutexGuard<'_, Tables>> {
        self.tables
            .lock()
            .map_err(|_| ExpenseError::Store("in-memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn list_expenses(&self, query: &ExpenseQuery) -> Result<Vec<Expense>> {
        let tables = self.tables()?;
        let mut rows: Vec<Expense> = tables
            .expenses
            .iter()
            .filter(|e| query.matches(e))
            .cloned()
            .collect();

        match query.order {
            ExpenseOrder::CreatedAtDesc => {
                // Newest insert wins ties on identical timestamps.
                rows.reverse();
                rows.sort_by_key(|e| Reverse(e.created_at));
            }
            ExpenseOrder::PeriodDesc => rows.sort_by_key(|e| Reverse(e.period())),
            ExpenseOrder::Unordered => {}
        }

        debug!("In-memory store returned {} expenses", rows.len());
        Ok(rows)
    }

    async fn insert_expense(&self, expense: &NewExpense) -> Result<Expense> {
        let row = Expense {
            id: Uuid::new_v4().to_string(),
            user_id: expense.user_id.clone(),
            name: expense.name.clone(),
            amount: expense.amount,
            category: expense.category,
            month: expense.month,
            year: expense.year,
            created_at: Some(Utc::now()),
        };

        self.tables()?.expenses.push(row.clone());
        Ok(row)
    }

    async fn update_expense(
        &self,
        user_id: &str,
        id: &str,
        changes: &ExpenseChanges,
    ) -> Result<()> {
        let mut tables = self.tables()?;
        let row = tables
            .expenses
            .iter_mut()
            .find(|e| e.id == id && e.user_id == user_id)
            .ok_or_else(|| ExpenseError::NotFound(format!("expense {}", id)))?;

        row.name = changes.name.clone();
        row.amount = changes.amount;
        row.category = changes.category;
        Ok(())
    }

    async fn delete_expense(&self, user_id: &str, id: &str) -> Result<()> {
        let mut tables = self.tables()?;
        let before = tables.expenses.len();
        tables
            .expenses
            .retain(|e| !(e.id == id && e.user_id == user_id));

        if tables.expenses.len() == before {
            return Err(ExpenseError::NotFound(format!("expense {}", id)));
        }
        Ok(())
    }

    async fn fetch_profile(&self, user_id: &str) -> Result<Option<Profile>> {
        let tables = self.tables()?;
        Ok(tables.profiles.get(user_id).map(|income| Profile {
            id: user_id.to_string(),
            monthly_income: *income,
        }))
    }

    async fn update_income(&self, user_id: &str, income: Decimal) -> Result<()> {
        let mut tables = self.tables()?;
        let slot = tables
            .profiles
            .get_mut(user_id)
            .ok_or_else(|| ExpenseError::NotFound(format!("profile {}", user_id)))?;
        *slot = income;
        Ok(())
    }
}
