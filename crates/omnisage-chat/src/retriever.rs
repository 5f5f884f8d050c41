//! Context retrieval from web search.
//!
//! Reduces the top organic results of a search to one text blob that the
//! response generator can embed in the prompt.

use async_trait::async_trait;
use omnisage_core::config::{SearchConfig, SERPAPI_KEY_VAR};
use omnisage_core::error::OmniSageError;
use reqwest::Client;
use serde::Deserialize;

use crate::error::ChatError;

/// Number of organic results requested per search.
pub const RESULT_COUNT: u32 = 3;

/// Source of web context for a prompt.
#[async_trait]
pub trait ContextRetriever: Send + Sync {
    /// Search for `query` and condense the results to a text blob.
    ///
    /// Any error means "no context"; callers never treat it as fatal.
    async fn retrieve(&self, query: &str) -> Result<String, ChatError>;
}

// =============================================================================
// SerpAPI
// =============================================================================

/// One organic search result. Only the snippet is used.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrganicResult {
    #[serde(default)]
    pub snippet: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    organic_results: Vec<OrganicResult>,
    #[serde(default)]
    error: Option<String>,
}

/// Join result snippets with single spaces, in the order returned.
///
/// A result without a snippet contributes an empty string.
pub fn fold_snippets(results: &[OrganicResult]) -> String {
    results
        .iter()
        .map(|r| r.snippet.as_deref().unwrap_or(""))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Google search through SerpAPI.
#[derive(Clone)]
pub struct SerpApiRetriever {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl SerpApiRetriever {
    /// Create a retriever. A missing `api_key` is reported on every call, not here.
    pub fn new(config: &SearchConfig, api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: config.base_url.clone(),
        }
    }
}

#[async_trait]
impl ContextRetriever for SerpApiRetriever {
    async fn retrieve(&self, query: &str) -> Result<String, ChatError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(OmniSageError::MissingCredential(SERPAPI_KEY_VAR))?;

        let num = RESULT_COUNT.to_string();
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("engine", "google"),
                ("q", query),
                ("api_key", api_key),
                ("num", num.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to read error body".to_string());
            return Err(ChatError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: SearchResponse = response
            .json()
            .await
            .map_err(|e| ChatError::MalformedResponse(e.to_string()))?;

        if let Some(message) = parsed.error {
            return Err(ChatError::Api {
                status: status.as_u16(),
                body: message,
            });
        }

        tracing::debug!(results = parsed.organic_results.len(), "Web search completed");
        Ok(fold_snippets(&parsed.organic_results))
    }
}

// =============================================================================
// Tests
// =============================================================================
