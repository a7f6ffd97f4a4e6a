//! Citation formatting for search answers

/// Append a numbered citation list to `content`
///
/// With no citations the content is returned untouched. Otherwise:
///
/// ```text
/// <content>
///
/// Citations:
/// [1] https://first
/// [2] https://second
/// ```
pub fn format_response_with_citations(content: &str, citations: &[String]) -> String {
    if citations.is_empty() {
        return content.to_string();
    }

    let list = citations
        .iter()
        .enumerate()
        .map(|(i, url)| format!("[{}] {}", i + 1, url))
        .collect::<Vec<_>>()
        .join("\n");

    format!("{}\n\nCitations:\n{}", content, list)
}
