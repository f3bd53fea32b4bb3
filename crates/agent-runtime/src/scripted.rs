//! Scripted Provider
//!
//! Offline provider that replays canned replies (or a canned failure).
//! Used by tests and for running the server without an API key.

use std::collections::VecDeque;
use std::sync::Mutex;

use agent_core::{
    error::{AgentError, Result},
    message::{Message, Role},
    provider::{Completion, FinishReason, GenerationOptions, LlmProvider},
};
use async_trait::async_trait;

enum Script {
    /// Cycle through replies; the last one repeats once the queue drains
    Replies(VecDeque<String>),
    Fail(String),
}

/// Provider returning scripted completions
pub struct ScriptedProvider {
    script: Mutex<Script>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    /// Always reply with the same text
    pub fn reply(text: impl Into<String>) -> Self {
        let text: String = text.into();
        Self::replies([text])
    }

    /// Reply with each text in turn, repeating the last
    pub fn replies<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_script(Script::Replies(texts.into_iter().map(Into::into).collect()))
    }

    /// Fail every completion with a provider error carrying `message`
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_script(Script::Fail(message.into()))
    }

    const fn with_script(script: Script) -> Self {
        Self {
            script: Mutex::new(script),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// User prompts received so far, oldest first
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .map(|p| p.clone())
            .unwrap_or_default()
    }

    fn next_reply(&self) -> Result<String> {
        let mut script = self
            .script
            .lock()
            .map_err(|_| AgentError::Other("scripted provider poisoned".into()))?;

        match &mut *script {
            Script::Fail(message) => Err(AgentError::Provider(message.clone())),
            Script::Replies(queue) if queue.len() > 1 => {
                Ok(queue.pop_front().unwrap_or_default())
            }
            Script::Replies(queue) => Ok(queue.front().cloned().unwrap_or_default()),
        }
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(true)
    }

    async fn complete(
        &self,
        messages: &[Message],
        options: &GenerationOptions,
    ) -> Result<Completion> {
        if let Some(user) = messages.iter().rev().find(|m| m.role == Role::User) {
            if let Ok(mut prompts) = self.prompts.lock() {
                prompts.push(user.content.clone());
            }
        }

        Ok(Completion {
            content: self.next_reply()?,
            model: options.model.clone(),
            usage: None,
            finish_reason: Some(FinishReason::Stop),
        })
    }
}
