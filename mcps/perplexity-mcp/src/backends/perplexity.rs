//! Perplexity backend
//!
//! Implements the SearchBackend trait on top of Perplexity's chat completions
//! API. See: https://docs.perplexity.ai/api-reference/chat-completions

use async_trait::async_trait;
use reqwest::{header, Client};
use serde::Deserialize;

use super::SearchBackend;
use crate::config::Config;
use crate::payload::build_payload;
use crate::types::{SearchAnswer, SearchError};

/// Perplexity backend
pub struct PerplexityBackend {
    client: Client,
    api_key: Option<String>,
    model: String,
    api_url: String,
}

impl PerplexityBackend {
    pub fn new(config: &Config) -> Result<Self, SearchError> {
        let client = Client::builder()
            .user_agent(concat!("perplexity-mcp/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            api_key: config.api_key.clone().filter(|k| !k.is_empty()),
            model: config.model.clone(),
            api_url: config.api_url.clone(),
        })
    }
}

// Perplexity API response types
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
    #[serde(default)]
    citations: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

/// Pull the answer and citations out of a raw response body
fn parse_response(body: &str) -> Result<SearchAnswer, SearchError> {
    let response: ChatCompletionResponse = serde_json::from_str(body)?;

    let content = response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .ok_or(SearchError::EmptyResponse)?;

    Ok(SearchAnswer {
        content,
        citations: response.citations,
    })
}

#[async_trait]
impl SearchBackend for PerplexityBackend {
    fn name(&self) -> &str {
        "perplexity"
    }

    fn is_available(&self) -> bool {
        self.api_key.is_some()
    }

    async fn search(&self, query: &str, recency: &str) -> Result<SearchAnswer, SearchError> {
        let api_key = self.api_key.as_deref().ok_or(SearchError::MissingApiKey)?;

        let payload = build_payload(&self.model, query, recency);
        tracing::debug!(model = %payload.model, recency, "Sending Perplexity request");

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(api_key)
            .header(header::CONTENT_TYPE, "application/json")
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::Status { status, body });
        }

        let body = response.text().await?;
        let answer = parse_response(&body)?;

        tracing::debug!(
            citations = answer.citations.as_ref().map_or(0, Vec::len),
            "Perplexity response received"
        );

        Ok(answer)
    }
}
