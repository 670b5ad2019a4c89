//! Screen-level operations: dashboard, expense dialogs, settings, history
//! and the analysis request. Every write is followed by a fresh read on the
//! caller's side; nothing is cached here.

use log::{debug, error, info};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::aggregation::{category_breakdown, filter_by_text, group_by_month, summarize};
use crate::aggregation::{CategoryBreakdown, MonthlySummary};
use crate::analysis::{AnalysisBackend, AnalysisRequest};
use crate::date_context::DateContext;
use crate::error::{ExpenseError, Result};
use crate::notice::Operation;
use crate::schema::{Expense, MonthBucket, MonthKey, NewExpense};
use crate::store::{ExpenseOrder, ExpenseQuery, RecordStore};
use crate::validation::{validate_income, ExpenseForm};

/// The signed-in user, as handed over by the authentication layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
    pub access_token: Option<String>,
}

impl Session {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            access_token: None,
        }
    }

    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub period: MonthKey,
    /// Current month, newest first.
    pub expenses: Vec<Expense>,
    pub summary: MonthlySummary,
}

impl Dashboard {
    pub fn title(&self) -> String {
        self.period.to_string()
    }

    pub fn visible(&self, query: &str) -> Vec<Expense> {
        filter_by_text(&self.expenses, query)
    }

    pub fn breakdown(&self) -> CategoryBreakdown {
        category_breakdown(&self.expenses)
    }
}

pub struct ExpenseTracker<S> {
    store: S,
    session: Option<Session>,
    dates: DateContext,
}

impl<S: RecordStore> ExpenseTracker<S> {
    pub fn new(store: S, dates: DateContext) -> Self {
        Self {
            store,
            session: None,
            dates,
        }
    }

    pub fn with_session(mut self, session: Session) -> Self {
        self.session = Some(session);
        self
    }

    pub fn sign_in(&mut self, session: Session) {
        self.session = Some(session);
    }

    pub fn sign_out(&mut self) {
        self.session = None;
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn dates(&self) -> DateContext {
        self.dates
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn user_id(&self) -> Result<&str> {
        self.session
            .as_ref()
            .map(|s| s.user_id.as_str())
            .ok_or(ExpenseError::NotAuthenticated)
    }

    /// Income from the profile; a user without a profile row has none yet.
    pub async fn monthly_income(&self) -> Result<Decimal> {
        let user_id = self.user_id()?;
        let profile = self
            .store
            .fetch_profile(user_id)
            .await
            .inspect_err(|e| log_failure(Operation::LoadIncome, e))?;
        Ok(profile.map_or(Decimal::ZERO, |p| p.monthly_income))
    }

    async fn current_expenses(&self, order: ExpenseOrder) -> Result<Vec<Expense>> {
        let query = ExpenseQuery::for_user(self.user_id()?)
            .in_period(self.dates.period())
            .ordered(order);
        self.store.list_expenses(&query).await
    }

    pub async fn dashboard(&self) -> Result<Dashboard> {
        let income = self.monthly_income().await?;
        let expenses = self
            .current_expenses(ExpenseOrder::CreatedAtDesc)
            .await
            .inspect_err(|e| log_failure(Operation::LoadDashboard, e))?;

        debug!(
            "Dashboard for {} has {} expenses",
            self.dates.period(),
            expenses.len()
        );

        Ok(Dashboard {
            period: self.dates.period(),
            summary: summarize(income, &expenses),
            expenses,
        })
    }

    /// Validates the dialog, then books the expense into the current period.
    pub async fn add_expense(&self, form: &ExpenseForm) -> Result<Expense> {
        let changes = form.validate()?;
        let user_id = self.user_id()?;
        let period = self.dates.period();

        let new_expense = NewExpense {
            user_id: user_id.to_string(),
            name: changes.name,
            amount: changes.amount,
            category: changes.category,
            month: period.month,
            year: period.year,
        };

        let created = self
            .store
            .insert_expense(&new_expense)
            .await
            .inspect_err(|e| log_failure(Operation::AddExpense, e))?;
        info!("Added expense {} for {}", created.id, period);
        Ok(created)
    }

    /// Rewrites name, amount and category. The booking month stays put.
    pub async fn edit_expense(&self, id: &str, form: &ExpenseForm) -> Result<()> {
        let changes = form.validate()?;
        let user_id = self.user_id()?;

        self.store
            .update_expense(user_id, id, &changes)
            .await
            .inspect_err(|e| log_failure(Operation::EditExpense, e))
    }

    pub async fn delete_expense(&self, id: &str) -> Result<()> {
        let user_id = self.user_id()?;

        self.store
            .delete_expense(user_id, id)
            .await
            .inspect_err(|e| log_failure(Operation::DeleteExpense, e))
    }

    pub async fn set_monthly_income(&self, raw: &str) -> Result<Decimal> {
        let income = validate_income(raw)?;
        let user_id = self.user_id()?;

        self.store
            .update_income(user_id, income)
            .await
            .inspect_err(|e| log_failure(Operation::UpdateIncome, e))?;
        Ok(income)
    }

    /// Every month the user has booked anything in, newest first.
    pub async fn history(&self) -> Result<Vec<MonthBucket>> {
        let query = ExpenseQuery::for_user(self.user_id()?).ordered(ExpenseOrder::PeriodDesc);
        let rows = self
            .store
            .list_expenses(&query)
            .await
            .inspect_err(|e| log_failure(Operation::LoadHistory, e))?;
        Ok(group_by_month(&rows))
    }

    pub async fn analysis_request(&self) -> Result<AnalysisRequest> {
        let income = self.monthly_income().await?;
        let expenses = self
            .current_expenses(ExpenseOrder::Unordered)
            .await
            .inspect_err(|e| log_failure(Operation::Analyze, e))?;
        Ok(AnalysisRequest::new(expenses, income))
    }

    /// Loads the current month, applies the client-side gate and makes a
    /// single backend call.
    pub async fn request_analysis<A>(&self, backend: &A) -> Result<String>
    where
        A: AnalysisBackend + ?Sized,
    {
        let request = self.analysis_request().await?;
        request.ensure_ready()?;

        backend
            .analyze(&request)
            .await
            .inspect_err(|e| log_failure(Operation::Analyze, e))
    }
}

fn log_failure(op: Operation, err: &ExpenseError) {
    error!("{}: {}", op.failure_message(), err);
}
