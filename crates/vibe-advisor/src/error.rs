//! Error Types for the Vibe Advisor

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AdvisorError>;

#[derive(Error, Debug)]
pub enum AdvisorError {
    /// A required position field was absent (or zero for non-PnL fields)
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// A position field was present but out of range
    #[error("Invalid value for {field}: {reason}")]
    InvalidField {
        field: &'static str,
        reason: &'static str,
    },

    /// The text-generation collaborator failed
    #[error("Generation failed: {0}")]
    Generation(String),

    #[error("Exchange error: {0}")]
    Exchange(String),

    #[error("Price unavailable for {0}")]
    PriceUnavailable(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AdvisorError {
    /// Client-caused errors (bad or incomplete request)
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::MissingField(_) | Self::InvalidField { .. })
    }
}

impl From<agent_core::AgentError> for AdvisorError {
    fn from(err: agent_core::AgentError) -> Self {
        Self::Generation(err.user_message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agent_core::AgentError;

    #[test]
    fn test_generation_error_keeps_credentials_out() {
        let err = AdvisorError::from(AgentError::Auth("invalid key gsk_123".into()));

        assert!(matches!(err, AdvisorError::Generation(_)));
        assert!(!err.to_string().contains("gsk_123"));
        assert!(!err.is_validation());
    }

    #[test]
    fn test_validation_errors() {
        assert!(AdvisorError::MissingField("entryPrice").is_validation());
        assert!(
            AdvisorError::InvalidField {
                field: "liquidationPrice",
                reason: "out of range",
            }
            .is_validation()
        );
        assert!(!AdvisorError::PriceUnavailable("DOGEUSDT".into()).is_validation());
    }
}
