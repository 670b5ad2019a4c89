//! # Spending Analysis
//!
//! Packages one month of expenses with the user's income and hands it to
//! an [`AnalysisBackend`], which returns the model's narrative verbatim.

pub mod prompts;
#[cfg(feature = "remote")]
pub mod remote;

pub use prompts::build_prompt;
#[cfg(feature = "remote")]
pub use remote::RemoteAnalysis;

use async_trait::async_trait;
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{ExpenseError, Result};
use crate::schema::Expense;

/// Returned when the model answers with nothing usable.
pub const FALLBACK_ANALYSIS: &str = "Unable to generate analysis";

/// Wire body of the analysis function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    #[schemars(description = "Expenses booked in the month being analysed")]
    pub expenses: Vec<Expense>,

    #[schemars(description = "The user's monthly income in Rupiah")]
    pub monthly_income: Decimal,
}

impl AnalysisRequest {
    pub fn new(expenses: Vec<Expense>, monthly_income: Decimal) -> Self {
        Self {
            expenses,
            monthly_income,
        }
    }

    /// Client-side gate: nothing is sent for an empty month or before the
    /// income has been set.
    pub fn ensure_ready(&self) -> Result<()> {
        if self.expenses.is_empty() {
            return Err(ExpenseError::NothingToAnalyze);
        }
        if self.monthly_income.is_zero() {
            return Err(ExpenseError::IncomeNotSet);
        }
        Ok(())
    }

    pub fn prompt(&self) -> String {
        build_prompt(&self.expenses, self.monthly_income)
    }

    pub fn generate_json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(AnalysisRequest)
    }

    pub fn schema_as_json() -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&Self::generate_json_schema())
    }
}

/// Response body of the analysis function: either the narrative or an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnalysisReply {
    Analysis { analysis: String },
    Error { error: String },
}

impl AnalysisReply {
    pub fn analysis(text: impl Into<String>) -> Self {
        Self::Analysis {
            analysis: text.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            error: message.into(),
        }
    }
}

/// Anything that can turn an [`AnalysisRequest`] into prose: the in-process
/// Gemini service or the deployed function.
#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<String>;
}
