//! Prompt Agent
//!
//! A single-turn agent: optional system preamble + one user prompt in, the
//! provider's raw text out. No tool loop, no conversation memory.

use std::sync::Arc;

use crate::error::{AgentError, Result};
use crate::message::Message;
use crate::provider::{GenerationOptions, LlmProvider};

/// Agent configuration
#[derive(Clone, Debug, Default)]
pub struct AgentConfig {
    /// System preamble sent ahead of every prompt
    pub preamble: Option<String>,

    /// Generation options (model, temperature, ...)
    pub generation: GenerationOptions,
}

/// The main Agent struct
#[derive(Clone)]
pub struct Agent {
    provider: Arc<dyn LlmProvider>,
    config: AgentConfig,
}

impl Agent {
    pub fn new(provider: Arc<dyn LlmProvider>, config: AgentConfig) -> Self {
        Self { provider, config }
    }

    /// Start building an agent around a provider
    pub fn builder(provider: Arc<dyn LlmProvider>) -> AgentBuilder {
        AgentBuilder {
            provider,
            config: AgentConfig::default(),
        }
    }

    pub fn provider(&self) -> &Arc<dyn LlmProvider> {
        &self.provider
    }

    /// Build the message list for a prompt
    fn build_messages(&self, prompt: &str) -> Vec<Message> {
        let mut messages = Vec::with_capacity(2);
        if let Some(preamble) = self.config.preamble.as_deref().filter(|p| !p.trim().is_empty()) {
            messages.push(Message::system(preamble));
        }
        messages.push(Message::user(prompt));
        messages
    }

    /// Send a prompt and return the generated text
    pub async fn prompt(&self, prompt: &str) -> Result<String> {
        let messages = self.build_messages(prompt);

        tracing::debug!(
            provider = self.provider.name(),
            model = %self.config.generation.model,
            prompt_tokens = messages.iter().map(Message::estimate_tokens).sum::<u32>(),
            "Sending prompt"
        );

        let completion = self
            .provider
            .complete(&messages, &self.config.generation)
            .await?;

        if completion.content.trim().is_empty() {
            return Err(AgentError::EmptyCompletion(completion.model));
        }

        Ok(completion.content)
    }
}

/// Fluent builder for [`Agent`]
pub struct AgentBuilder {
    provider: Arc<dyn LlmProvider>,
    config: AgentConfig,
}

impl AgentBuilder {
    #[must_use]
    pub fn preamble(mut self, preamble: impl Into<String>) -> Self {
        self.config.preamble = Some(preamble.into());
        self
    }

    #[must_use]
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.generation.model = model.into();
        self
    }

    pub fn build(self) -> Agent {
        Agent::new(self.provider, self.config)
    }
}
