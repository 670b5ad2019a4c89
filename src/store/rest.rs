use async_trait::async_trait;
use log::{debug, error};
use reqwest::{Client, RequestBuilder, Response};
use rust_decimal::Decimal;
use serde_json::json;

use crate::config::StoreConfig;
use crate::error::{ExpenseError, Result};
use crate::schema::{Expense, ExpenseChanges, NewExpense, Profile};
use crate::store::{ExpenseOrder, ExpenseQuery, RecordStore};
use crate::tracker::Session;

/// Client for the hosted `expenses` / `profiles` REST tables.
#[derive(Clone)]
pub struct RestStore {
    client: Client,
    config: StoreConfig,
    access_token: Option<String>,
}

impl RestStore {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            client: Client::new(),
            config,
            access_token: None,
        }
    }

    /// A store that acts as the signed-in user, falling back to the public
    /// key when the session carries no token.
    pub fn for_session(config: StoreConfig, session: &Session) -> Self {
        let store = Self::new(config);
        match &session.access_token {
            Some(token) => store.with_access_token(token.clone()),
            None => store,
        }
    }

    /// Requests run as the signed-in user so row-level policies apply.
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let bearer = self
            .access_token
            .as_deref()
            .unwrap_or(&self.config.anon_key);
        request
            .header("apikey", &self.config.anon_key)
            .bearer_auth(bearer)
    }

    /// Deletes and updates report affected rows so a miss surfaces as `NotFound`.
    async fn affected_rows(response: Response, id: &str) -> Result<()> {
        let rows: Vec<serde_json::Value> = response.json().await?;
        if rows.is_empty() {
            return Err(ExpenseError::NotFound(format!("expense {}", id)));
        }
        Ok(())
    }

    async fn check(response: Response, action: &str) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        error!("Record store {} failed (status {}): {}", action, status, body);
        Err(ExpenseError::Store(format!(
            "{} failed (status {})",
            action,
            status.as_u16()
        )))
    }
}

pub(crate) fn expense_filters(query: &ExpenseQuery) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("select", "*".to_string()),
        ("user_id", format!("eq.{}", query.user_id)),
    ];
    if let Some(month) = query.month {
        params.push(("month", format!("eq.{}", month)));
    }
    if let Some(year) = query.year {
        params.push(("year", format!("eq.{}", year)));
    }
    match query.order {
        ExpenseOrder::CreatedAtDesc => params.push(("order", "created_at.desc".to_string())),
        ExpenseOrder::PeriodDesc => params.push(("order", "year.desc,month.desc".to_string())),
        ExpenseOrder::Unordered => {}
    }
    params
}

/// Matches a single row, and only while it belongs to `user_id`.
pub(crate) fn owned_row(user_id: &str, id: &str) -> [(&'static str, String); 2] {
    [
        ("id", format!("eq.{}", id)),
        ("user_id", format!("eq.{}", user_id)),
    ]
}

#[async_trait]
impl RecordStore for RestStore {
    async fn list_expenses(&self, query: &ExpenseQuery) -> Result<Vec<Expense>> {
        let params = expense_filters(query);
        debug!("Fetching expenses with filters {:?}", params);

        let request = self
            .client
            .get(self.config.rest_url("expenses"))
            .query(&params);
        let response = Self::check(self.authorize(request).send().await?, "select expenses").await?;
        Ok(response.json().await?)
    }

    async fn insert_expense(&self, expense: &NewExpense) -> Result<Expense> {
        let request = self
            .client
            .post(self.config.rest_url("expenses"))
            .header("Prefer", "return=representation")
            .json(expense);
        let response = Self::check(self.authorize(request).send().await?, "insert expense").await?;

        let mut rows: Vec<Expense> = response.json().await?;
        if rows.is_empty() {
            return Err(ExpenseError::Store(
                "insert expense returned no rows".to_string(),
            ));
        }
        Ok(rows.swap_remove(0))
    }

    async fn update_expense(
        &self,
        user_id: &str,
        id: &str,
        changes: &ExpenseChanges,
    ) -> Result<()> {
        let request = self
            .client
            .patch(self.config.rest_url("expenses"))
            .query(&owned_row(user_id, id))
            .header("Prefer", "return=representation")
            .json(changes);
        let response = Self::check(self.authorize(request).send().await?, "update expense").await?;
        Self::affected_rows(response, id).await
    }

    async fn delete_expense(&self, user_id: &str, id: &str) -> Result<()> {
        let request = self
            .client
            .delete(self.config.rest_url("expenses"))
            .query(&owned_row(user_id, id))
            .header("Prefer", "return=representation");
        let response = Self::check(self.authorize(request).send().await?, "delete expense").await?;
        Self::affected_rows(response, id).await
    }

    async fn fetch_profile(&self, user_id: &str) -> Result<Option<Profile>> {
        let request = self
            .client
            .get(self.config.rest_url("profiles"))
            .query(&[
                ("select", "id,monthly_income".to_string()),
                ("id", format!("eq.{}", user_id)),
            ]);
        let response = Self::check(self.authorize(request).send().await?, "select profile").await?;

        let rows: Vec<Profile> = response.json().await?;
        Ok(rows.into_iter().next())
    }

    async fn update_income(&self, user_id: &str, income: Decimal) -> Result<()> {
        let request = self
            .client
            .patch(self.config.rest_url("profiles"))
            .query(&[("id", format!("eq.{}", user_id))])
            .json(&json!({ "monthly_income": income }));
        Self::check(self.authorize(request).send().await?, "update profile").await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::MonthKey;

    #[test]
    fn test_dashboard_filters() {
        let query = ExpenseQuery::for_user("u-1")
            .in_period(MonthKey::new(2024, 3))
            .ordered(ExpenseOrder::CreatedAtDesc);

        let params = expense_filters(&query);
        assert!(params.contains(&("user_id", "eq.u-1".to_string())));
        assert!(params.contains(&("month", "eq.3".to_string())));
        assert!(params.contains(&("year", "eq.2024".to_string())));
        assert!(params.contains(&("order", "created_at.desc".to_string())));
    }

    #[test]
    fn test_mutations_filter_on_owner() {
        let params = owned_row("u-1", "e-7");
        assert!(params.contains(&("id", "eq.e-7".to_string())));
        assert!(params.contains(&("user_id", "eq.u-1".to_string())));
    }

    fn config() -> StoreConfig {
        StoreConfig {
            url: "https://abc.supabase.co".to_string(),
            anon_key: "anon".to_string(),
        }
    }

    fn signed_request(store: &RestStore) -> reqwest::Request {
        store
            .authorize(store.client.get(store.config.rest_url("expenses")))
            .build()
            .unwrap()
    }

    #[test]
    fn test_session_token_is_sent() {
        let session = Session::new("u-1").with_access_token("jwt-abc");
        let request = signed_request(&RestStore::for_session(config(), &session));

        assert_eq!(request.headers()["authorization"], "Bearer jwt-abc");
        assert_eq!(request.headers()["apikey"], "anon");
    }

    #[test]
    fn test_tokenless_session_uses_public_key() {
        let request = signed_request(&RestStore::for_session(config(), &Session::new("u-1")));
        assert_eq!(request.headers()["authorization"], "Bearer anon");
    }

    #[test]
    fn test_history_filters() {
        let query = ExpenseQuery::for_user("u-1").ordered(ExpenseOrder::PeriodDesc);
        let params = expense_filters(&query);

        assert!(!params.iter().any(|(k, _)| *k == "month"));
        assert!(params.contains(&("order", "year.desc,month.desc".to_string())));
    }
}
