use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExpenseError {
    #[error("{0}")]
    Validation(String),

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Record store error: {0}")]
    Store(String),

    #[error("{0} not configured")]
    NotConfigured(String),

    #[error("Upstream service error (status {status}): {body}")]
    Upstream { status: u16, body: String },

    #[error("No expenses to analyze for this month")]
    NothingToAnalyze,

    #[error("Please set your monthly income in Settings first")]
    IncomeNotSet,

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[cfg(feature = "remote")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl ExpenseError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Errors the user caused and can fix from the form they are on.
    pub fn is_user_correctable(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::NothingToAnalyze | Self::IncomeNotSet
        )
    }
}

pub type Result<T> = std::result::Result<T, ExpenseError>;
