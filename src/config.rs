//! Scorer configuration
//!
//! Command-line flags, each falling back to an environment variable
//! (optionally loaded from `.env`), then to a default.

use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use tracing::Level;

use crate::tier::Tier;

/// Environment variable names
pub mod env {
    pub const MIN_TIER: &str = "SCORER_MIN_TIER";
    pub const ADMITTED_ONLY: &str = "SCORER_ADMITTED_ONLY";
    pub const LOG_LEVEL: &str = "LOG_LEVEL";
}

/// Score setup candidates read as JSON Lines and print one evaluation per line.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "setup-scorer", version)]
pub struct ScorerConfig {
    /// Minimum tier a setup must reach to be admitted (NONE, B, A, A+).
    /// Unrecognized labels are gated as A.
    #[arg(long, value_name = "TIER", env = "SCORER_MIN_TIER", default_value = "A")]
    pub min_tier: String,

    /// Only print admitted setups.
    #[arg(
        long,
        env = "SCORER_ADMITTED_ONLY",
        action = ArgAction::SetTrue,
        value_parser = BoolishValueParser::new()
    )]
    pub admitted_only: bool,

    /// Tracing max level (trace, debug, info, warn, error).
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: Level,

    /// JSON Lines input file; stdin when omitted.
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            min_tier: Tier::DEFAULT_MIN.as_str().to_string(),
            admitted_only: false,
            log_level: Level::INFO,
            input: None,
        }
    }
}

impl ScorerConfig {
    /// Whether the configured policy label is one of the known tiers
    pub fn min_tier_recognized(&self) -> bool {
        self.min_tier.parse::<Tier>().is_ok()
    }
}
