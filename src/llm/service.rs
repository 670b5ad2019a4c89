use async_trait::async_trait;
use log::{debug, error};

use crate::analysis::{AnalysisBackend, AnalysisReply, AnalysisRequest};
use crate::config::AnalysisConfig;
use crate::error::{ExpenseError, Result};
use crate::llm::client::GeminiClient;

pub const UPSTREAM_FAILURE: &str = "Failed to get AI analysis";

/// HTTP status plus body the analysis function answers with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisOutcome {
    pub status: u16,
    pub reply: AnalysisReply,
}

/// Server side of the analysis flow: builds the prompt and forwards it to
/// Gemini with the server-held key.
#[derive(Clone)]
pub struct AnalysisService {
    client: Option<GeminiClient>,
    model: String,
}

impl AnalysisService {
    pub fn new(config: &AnalysisConfig) -> Self {
        let client = config
            .api_key
            .clone()
            .map(|key| GeminiClient::new(key).with_base_url(config.base_url.clone()));

        Self {
            client,
            model: config.model.clone(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    pub async fn run(&self, request: &AnalysisRequest) -> Result<String> {
        let Some(client) = &self.client else {
            error!("GEMINI_API_KEY is not set");
            return Err(ExpenseError::NotConfigured("AI service".to_string()));
        };

        debug!(
            "Building analysis prompt for {} expenses with model {}",
            request.expenses.len(),
            self.model
        );
        client.generate_text(&self.model, &request.prompt()).await
    }

    /// Maps [`run`](Self::run) onto the function's HTTP contract.
    pub async fn handle(&self, request: &AnalysisRequest) -> AnalysisOutcome {
        match self.run(request).await {
            Ok(analysis) => AnalysisOutcome {
                status: 200,
                reply: AnalysisReply::analysis(analysis),
            },
            Err(err) => outcome_for_error(&err),
        }
    }
}

pub fn outcome_for_error(err: &ExpenseError) -> AnalysisOutcome {
    let (status, message) = match err {
        ExpenseError::NotConfigured(_) => (503, err.to_string()),
        ExpenseError::Upstream { status, .. } => (*status, UPSTREAM_FAILURE.to_string()),
        ExpenseError::Validation(_) | ExpenseError::SerializationError(_) => {
            (400, err.to_string())
        }
        _ => {
            error!("Error in analysis function: {}", err);
            (500, err.to_string())
        }
    };

    AnalysisOutcome {
        status,
        reply: AnalysisReply::error(message),
    }
}

#[async_trait]
impl AnalysisBackend for AnalysisService {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<String> {
        self.run(request).await
    }
}
