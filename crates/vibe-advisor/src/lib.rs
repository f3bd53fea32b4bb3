//! # vibe-advisor
//!
//! DOGE leverage "vibes": risk classification for client-described positions,
//! random prompt selection, and best-effort leverage parsing of whatever the
//! language model says back.
//!
//! ## Request flow
//!
//! ```text
//! GET /position                       POST /analyze
//!      │                                    │
//!      ▼                                    ▼
//!  price lookup ── fails? → None      validate → classify
//!      │                                    │
//!      ▼                                    ▼
//!  pick suggestion template           pick analysis template
//!      │                                    │
//!      └──────────────▶ Agent::prompt ◀─────┘
//!                            │
//!            leverage policy │ raw advice text
//!                            ▼
//!              VibeSuggestion / AdviceReport
//! ```
//!
//! ## Risk bands
//!
//! ```text
//! distance to liquidation   0% ──── 10% ──── 25% ────▶
//!                              HIGH     MEDIUM    LOW
//! ```

pub mod advisor;
pub mod error;
pub mod exchange;
pub mod leverage;
pub mod model;
pub mod prompt;
pub mod risk;

pub use advisor::{AdvisorConfig, PositionAdvisor};
pub use error::{AdvisorError, Result};
pub use leverage::LeveragePolicy;
pub use model::{
    AdviceReport, AnalyzeRequest, PositionAnalysis, PositionQuery, PositionType, RiskLevel,
    VibeSuggestion,
};
pub use prompt::PromptMode;
