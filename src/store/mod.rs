//! # Record Store
//!
//! The tabular store holding `expenses` and `profiles` is an external
//! service. This module defines the contract the tracker consumes, a
//! process-local implementation, and (with the `remote` feature) a client
//! for the hosted REST tables.

pub mod memory;
#[cfg(feature = "remote")]
pub mod rest;

pub use memory::InMemoryStore;
#[cfg(feature = "remote")]
pub use rest::RestStore;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::error::Result;
use crate::schema::{Expense, ExpenseChanges, MonthKey, NewExpense, Profile};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExpenseOrder {
    /// Most recently created first (dashboard list).
    CreatedAtDesc,
    /// Year descending, then month descending (history).
    PeriodDesc,
    #[default]
    Unordered,
}

/// Equality filters plus ordering for an `expenses` read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseQuery {
    pub user_id: String,
    pub month: Option<u32>,
    pub year: Option<i32>,
    pub order: ExpenseOrder,
}

impl ExpenseQuery {
    pub fn for_user(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            month: None,
            year: None,
            order: ExpenseOrder::Unordered,
        }
    }

    pub fn in_period(mut self, period: MonthKey) -> Self {
        self.month = Some(period.month);
        self.year = Some(period.year);
        self
    }

    pub fn ordered(mut self, order: ExpenseOrder) -> Self {
        self.order = order;
        self
    }

    pub fn matches(&self, expense: &Expense) -> bool {
        expense.user_id == self.user_id
            && self.month.map_or(true, |m| expense.month == m)
            && self.year.map_or(true, |y| expense.year == y)
    }
}

/// Operations the hosted store exposes. Concurrent writers are
/// last-write-wins; nothing here spans more than one record.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn list_expenses(&self, query: &ExpenseQuery) -> Result<Vec<Expense>>;

    async fn insert_expense(&self, expense: &NewExpense) -> Result<Expense>;

    /// Only rows owned by `user_id` are touched; anything else is `NotFound`.
    async fn update_expense(
        &self,
        user_id: &str,
        id: &str,
        changes: &ExpenseChanges,
    ) -> Result<()>;

    async fn delete_expense(&self, user_id: &str, id: &str) -> Result<()>;

    async fn fetch_profile(&self, user_id: &str) -> Result<Option<Profile>>;

    async fn update_income(&self, user_id: &str, income: Decimal) -> Result<()>;
}

/// Lets several screens share one store handle.
#[async_trait]
impl<T: RecordStore + ?Sized> RecordStore for std::sync::Arc<T> {
    async fn list_expenses(&self, query: &ExpenseQuery) -> Result<Vec<Expense>> {
        (**self).list_expenses(query).await
    }

    async fn insert_expense(&self, expense: &NewExpense) -> Result<Expense> {
        (**self).insert_expense(expense).await
    }

    async fn update_expense(
        &self,
        user_id: &str,
        id: &str,
        changes: &ExpenseChanges,
    ) -> Result<()> {
        (**self).update_expense(user_id, id, changes).await
    }

    async fn delete_expense(&self, user_id: &str, id: &str) -> Result<()> {
        (**self).delete_expense(user_id, id).await
    }

    async fn fetch_profile(&self, user_id: &str) -> Result<Option<Profile>> {
        (**self).fetch_profile(user_id).await
    }

    async fn update_income(&self, user_id: &str, income: Decimal) -> Result<()> {
        (**self).update_income(user_id, income).await
    }
}
