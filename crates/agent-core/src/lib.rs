//! # agent-core
//!
//! Provider-agnostic LLM abstraction for the vibe trader.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │                    Agent                      │
//! │  ┌──────────────┐       ┌──────────────────┐  │
//! │  │  Preamble +  │──────▶│   LlmProvider    │  │
//! │  │    Prompt    │       │   (Strategy)     │  │
//! │  └──────────────┘       └──────────────────┘  │
//! └───────────────────────────────────────────────┘
//! ```
//!
//! The `LlmProvider` trait enables swapping between Groq, OpenAI, or any
//! other OpenAI-compatible backend without changing agent logic.

pub mod agent;
pub mod error;
pub mod message;
pub mod provider;

pub use agent::{Agent, AgentBuilder, AgentConfig};
pub use error::{AgentError, Result};
pub use message::{Message, Role};
pub use provider::{Completion, GenerationOptions, LlmProvider};
