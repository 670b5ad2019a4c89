use log::{error, info, warn};
use reqwest::Client;

use crate::analysis::FALLBACK_ANALYSIS;
use crate::config::GEMINI_BASE_URL;
use crate::error::{ExpenseError, Result};
use crate::llm::types::*;

#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: GEMINI_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// One best-effort `generateContent` call. The first text part of the
    /// first candidate is returned untouched; no retry on failure.
    pub async fn generate_text(&self, model: &str, prompt: &str) -> Result<String> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, model, self.api_key
        );

        let payload = GenerateContentRequest {
            contents: vec![Content::text(prompt)],
        };

        info!("Sending request to Gemini API...");
        let res = self.client.post(&url).json(&payload).send().await?;
        let status = res.status();

        if !status.is_success() {
            let err_text = res.text().await?;
            error!("Gemini API error: {} {}", status, err_text);
            return Err(ExpenseError::Upstream {
                status: status.as_u16(),
                body: err_text,
            });
        }

        let body = res.text().await?;
        info!("Gemini API response received");

        let answer = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .as_ref()
            .and_then(answer_text)
            .map(str::to_string);

        Ok(answer.unwrap_or_else(|| {
            warn!("Gemini API response carried no answer text: {}", body);
            FALLBACK_ANALYSIS.to_string()
        }))
    }
}
