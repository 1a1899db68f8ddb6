//! Setup Scorer Library
//!
//! Scores trading setup candidates from pre-resolved market structure flags,
//! maps the score to a quality tier, and gates tiers against a minimum policy.

pub mod batch;
pub mod config;
pub mod error;
pub mod evaluation;
pub mod flags;
pub mod gate;
pub mod scoring;
pub mod tier;


// Re-export main types for convenience
pub use batch::{run_batch, BatchSummary, Candidate};
pub use config::ScorerConfig;
pub use error::{Result, ScorerError};
pub use evaluation::Evaluation;
pub use flags::{keys, FlagBundle};
pub use gate::should_send_tier;
pub use scoring::{score, score_breakdown, Category, Contribution, ScoreBreakdown, MAX_SCORE};
pub use tier::{tier_from_score, Tier, UnknownTier};
