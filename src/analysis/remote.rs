use async_trait::async_trait;
use log::{error, info};
use reqwest::{Client, RequestBuilder};

use crate::analysis::{AnalysisBackend, AnalysisReply, AnalysisRequest};
use crate::config::StoreConfig;
use crate::error::{ExpenseError, Result};
use crate::tracker::Session;

pub const ANALYSIS_FUNCTION: &str = "ai-analyze";

/// Invokes the deployed analysis function over HTTP.
#[derive(Clone)]
pub struct RemoteAnalysis {
    client: Client,
    url: String,
    anon_key: String,
    access_token: Option<String>,
}

impl RemoteAnalysis {
    pub fn new(config: &StoreConfig) -> Self {
        Self {
            client: Client::new(),
            url: config.function_url(ANALYSIS_FUNCTION),
            anon_key: config.anon_key.clone(),
            access_token: None,
        }
    }

    pub fn for_session(config: &StoreConfig, session: &Session) -> Self {
        let remote = Self::new(config);
        match &session.access_token {
            Some(token) => remote.with_access_token(token.clone()),
            None => remote,
        }
    }

    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let bearer = self.access_token.as_deref().unwrap_or(&self.anon_key);
        request
            .header("apikey", &self.anon_key)
            .bearer_auth(bearer)
    }
}

#[async_trait]
impl AnalysisBackend for RemoteAnalysis {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<String> {
        info!(
            "Invoking {} with {} expenses",
            ANALYSIS_FUNCTION,
            request.expenses.len()
        );

        let response = self
            .authorize(self.client.post(&self.url))
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        match serde_json::from_str::<AnalysisReply>(&body) {
            Ok(AnalysisReply::Analysis { analysis }) if status.is_success() => Ok(analysis),
            Ok(AnalysisReply::Error { error: message }) => {
                error!("{} failed (status {}): {}", ANALYSIS_FUNCTION, status, message);
                Err(ExpenseError::Upstream {
                    status: status.as_u16(),
                    body: message,
                })
            }
            _ => {
                error!("{} failed (status {}): {}", ANALYSIS_FUNCTION, status, body);
                Err(ExpenseError::Upstream {
                    status: status.as_u16(),
                    body,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> StoreConfig {
        StoreConfig {
            url: "https://abc.supabase.co".to_string(),
            anon_key: "anon".to_string(),
        }
    }

    #[test]
    fn test_invokes_function_as_session_user() {
        let session = Session::new("u-1").with_access_token("jwt-abc");
        let remote = RemoteAnalysis::for_session(&config(), &session);
        let request = remote
            .authorize(remote.client.post(&remote.url))
            .build()
            .unwrap();

        assert_eq!(
            request.url().as_str(),
            "https://abc.supabase.co/functions/v1/ai-analyze"
        );
        assert_eq!(request.headers()["authorization"], "Bearer jwt-abc");
        assert_eq!(request.headers()["apikey"], "anon");
    }

    #[test]
    fn test_tokenless_session_uses_public_key() {
        let remote = RemoteAnalysis::for_session(&config(), &Session::new("u-1"));
        let request = remote
            .authorize(remote.client.post(&remote.url))
            .build()
            .unwrap();
        assert_eq!(request.headers()["authorization"], "Bearer anon");
    }
}
