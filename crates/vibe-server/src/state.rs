//! Application State

use std::sync::Arc;

use vibe_advisor::PositionAdvisor;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Advisory service (LLM provider + price feed + config)
    pub advisor: Arc<PositionAdvisor>,
}

impl AppState {
    pub fn new(advisor: PositionAdvisor) -> Self {
        Self {
            advisor: Arc::new(advisor),
        }
    }
}
