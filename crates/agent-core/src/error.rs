//! Error Types

use thiserror::Error;

/// Result type alias for agent operations
pub type Result<T> = std::result::Result<T, AgentError>;

/// Agent error types
#[derive(Error, Debug)]
pub enum AgentError {
    /// LLM provider returned an error
    #[error("Provider error: {0}")]
    Provider(String),

    /// Provider unreachable or not responding
    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// Provider answered but the body was empty or malformed
    #[error("Empty completion from provider: {0}")]
    EmptyCompletion(String),

    /// Configuration error (missing API key, bad base URL, ...)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Rate limited or out of quota
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// Authentication failed
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Other/unknown error
    #[error("{0}")]
    Other(String),
}

impl AgentError {
    /// Convert to a user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            Self::Provider(msg) => format!("The AI service encountered an error: {msg}"),
            Self::ProviderUnavailable(_) => {
                "The AI service is currently unavailable. Please try again.".into()
            }
            Self::EmptyCompletion(_) => "The AI service returned an empty answer.".into(),
            Self::RateLimited(_) => "The AI service is rate limiting us. Please wait a moment.".into(),
            Self::Auth(_) => "The AI service rejected our credentials.".into(),
            Self::Config(msg) => format!("The AI service is misconfigured: {msg}"),
            _ => "An unexpected error occurred.".into(),
        }
    }
}
