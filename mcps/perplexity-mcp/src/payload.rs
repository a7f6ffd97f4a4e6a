//! Request payload construction

use crate::types::{ChatMessage, SearchRequest};

pub const SYSTEM_PROMPT: &str = "Be precise and concise.";

/// Build the chat completions payload for one search
///
/// Neither `query` nor `recency` is validated: an empty query or an
/// unrecognized recency window goes to the API verbatim.
pub fn build_payload(model: &str, query: &str, recency: &str) -> SearchRequest {
    SearchRequest {
        model: model.to_string(),
        messages: vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(query)],
        max_tokens: 512,
        temperature: 0.2,
        top_p: 0.9,
        return_images: false,
        return_related_questions: false,
        search_recency_filter: recency.to_string(),
        top_k: 0,
        stream: false,
        presence_penalty: 0.0,
        frequency_penalty: 1.0,
        return_citations: true,
        search_context_size: "low".to_string(),
    }
}
