//! Known Perplexity models
//!
//! Informational only: the configured model is forwarded to the API as-is,
//! whether or not it appears here.

/// A model id with a short description of its context window and focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelInfo {
    pub id: &'static str,
    pub description: &'static str,
}

const MODELS: [ModelInfo; 6] = [
    ModelInfo {
        id: "sonar-deep-research",
        description: "128k context - Enhanced research capabilities",
    },
    ModelInfo {
        id: "sonar-reasoning-pro",
        description: "128k context - Advanced reasoning with professional focus",
    },
    ModelInfo {
        id: "sonar-reasoning",
        description: "128k context - Enhanced reasoning capabilities",
    },
    ModelInfo {
        id: "sonar-pro",
        description: "200k context - Professional grade model",
    },
    ModelInfo {
        id: "sonar",
        description: "128k context - Default model",
    },
    ModelInfo {
        id: "r1-1776",
        description: "128k context - Alternative architecture",
    },
];

/// All known models, in display order
pub fn available_models() -> &'static [ModelInfo] {
    &MODELS
}

pub fn find_model(id: &str) -> Option<&'static ModelInfo> {
    MODELS.iter().find(|m| m.id == id)
}

/// One line per known model, with `→` marking the selected one
pub fn model_info_lines(selected: &str) -> Vec<String> {
    available_models()
        .iter()
        .map(|model| {
            let marker = if model.id == selected { "→" } else { " " };
            format!(" {} {}: {}", marker, model.id, model.description)
        })
        .collect()
}

/// Log the selected model followed by every known model, marking the selection
pub fn log_model_info(selected: &str) {
    tracing::info!("Using Perplexity AI model: {}", selected);

    if find_model(selected).is_none() {
        tracing::warn!(
            "Model '{}' is not in the list of known models; it will be sent as-is",
            selected
        );
    }

    tracing::info!("Available Perplexity models (set with PERPLEXITY_MODEL environment variable):");
    for line in model_info_lines(selected) {
        tracing::info!("{}", line);
    }
}
