//! Request, response, and error types for Perplexity searches

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::format::format_response_with_citations;

/// A single chat message in the request payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Body of a `POST /chat/completions` request
///
/// Only `model`, the user message, and `search_recency_filter` vary between
/// calls. See [`crate::payload::build_payload`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f64,
    pub top_p: f64,
    pub return_images: bool,
    pub return_related_questions: bool,
    pub search_recency_filter: String,
    pub top_k: u32,
    pub stream: bool,
    pub presence_penalty: f64,
    pub frequency_penalty: f64,
    pub return_citations: bool,
    pub search_context_size: String,
}

/// Recency windows documented by the Perplexity API
///
/// The tool forwards whatever string it is given; this enum only names the
/// values the API is known to accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Recency {
    Day,
    Week,
    #[default]
    Month,
    Year,
}

impl Recency {
    pub const ALL: [Recency; 4] = [Recency::Day, Recency::Week, Recency::Month, Recency::Year];

    pub fn as_str(&self) -> &'static str {
        match self {
            Recency::Day => "day",
            Recency::Week => "week",
            Recency::Month => "month",
            Recency::Year => "year",
        }
    }

    /// Match a raw filter value against the known windows
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == value)
    }
}

impl fmt::Display for Recency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Answer text and the citations returned alongside it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchAnswer {
    pub content: String,
    /// `None` when the response had no `citations` field
    pub citations: Option<Vec<String>>,
}

impl SearchAnswer {
    /// Render as plain text, appending a numbered citation list when present
    pub fn render(&self) -> String {
        match &self.citations {
            Some(citations) => format_response_with_citations(&self.content, citations),
            None => self.content.clone(),
        }
    }
}

/// Failures of a single search call
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("PERPLEXITY_API_KEY is not configured")]
    MissingApiKey,

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Perplexity API error {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("response contained no choices")]
    EmptyResponse,
}
