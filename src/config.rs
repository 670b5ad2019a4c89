use crate::error::{ExpenseError, Result};

pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash-exp";

/// Settings for the server-side analysis function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisConfig {
    /// Credential for the generative API. Absent means the service is unconfigured.
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

impl AnalysisConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            api_key: non_empty(lookup("GEMINI_API_KEY")),
            model: non_empty(lookup("GEMINI_MODEL"))
                .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            base_url: non_empty(lookup("GEMINI_BASE_URL"))
                .unwrap_or_else(|| GEMINI_BASE_URL.to_string()),
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: GEMINI_BASE_URL.to_string(),
        }
    }
}

/// Location and public key of the hosted record store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub url: String,
    pub anon_key: String,
}

impl StoreConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = non_empty(lookup("SUPABASE_URL"))
            .ok_or_else(|| ExpenseError::NotConfigured("SUPABASE_URL".to_string()))?;
        let anon_key = non_empty(lookup("SUPABASE_ANON_KEY"))
            .ok_or_else(|| ExpenseError::NotConfigured("SUPABASE_ANON_KEY".to_string()))?;

        Ok(Self {
            url: url.trim_end_matches('/').to_string(),
            anon_key,
        })
    }

    pub fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.url, table)
    }

    pub fn function_url(&self, name: &str) -> String {
        format!("{}/functions/v1/{}", self.url, name)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_defaults() {
        let config = AnalysisConfig::from_lookup(|_| None);
        assert_eq!(config, AnalysisConfig::default());
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_blank_key_counts_as_missing() {
        let config = AnalysisConfig::from_lookup(|key| match key {
            "GEMINI_API_KEY" => Some("  ".to_string()),
            "GEMINI_MODEL" => Some("gemini-1.5-pro".to_string()),
            _ => None,
        });
        assert!(config.api_key.is_none());
        assert_eq!(config.model, "gemini-1.5-pro");
    }

    #[test]
    fn test_store_config() {
        let config = StoreConfig::from_lookup(|key| match key {
            "SUPABASE_URL" => Some("https://abc.supabase.co/".to_string()),
            "SUPABASE_ANON_KEY" => Some("anon".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(config.rest_url("expenses"), "https://abc.supabase.co/rest/v1/expenses");
        assert_eq!(
            config.function_url("ai-analyze"),
            "https://abc.supabase.co/functions/v1/ai-analyze"
        );

        let missing = StoreConfig::from_lookup(|_| None).unwrap_err();
        assert_eq!(missing.to_string(), "SUPABASE_URL not configured");
    }
}
