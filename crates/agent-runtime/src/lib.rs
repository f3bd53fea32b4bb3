//! # agent-runtime
//!
//! Runtime providers for the vibe trader.
//!
//! ## Providers
//!
//! - **OpenAI-compatible** (default): Groq, OpenAI, or any endpoint serving
//!   `/chat/completions`
//! - **Scripted**: canned replies for tests and offline demos
//!
//! ## Usage
//!
//! ```rust,ignore
//! use agent_runtime::OpenAiCompatProvider;
//!
//! let provider = Arc::new(OpenAiCompatProvider::from_env()?);
//! let agent = Agent::builder(provider)
//!     .preamble("You are a degen vibe trader.")
//!     .build();
//! ```

#[cfg(feature = "openai")]
pub mod openai;
pub mod scripted;

#[cfg(feature = "openai")]
pub use openai::{OpenAiCompatProvider, OpenAiConfig};
pub use scripted::ScriptedProvider;

// Re-export core types for convenience
pub use agent_core::{Agent, AgentError, LlmProvider, Message, Result, Role};
