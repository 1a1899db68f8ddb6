//! Evaluation - one pass of score, tier and gate for a setup candidate

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::flags::FlagBundle;
use crate::gate::should_send_tier;
use crate::scoring::{score_breakdown, ScoreBreakdown, MAX_SCORE};
use crate::tier::Tier;

/// Outcome of scoring a setup against a minimum-tier policy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evaluation {
    /// Asset symbol, when the caller supplied one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    /// Total score
    pub score: u32,
    /// Tier derived from the score
    pub tier: Tier,
    /// Policy tier as the caller supplied it
    pub min_tier: String,
    /// Whether the tier clears the policy
    pub admitted: bool,
    /// Score as a fraction of the maximum (0.0 - 1.0)
    pub confidence: Decimal,
    /// Per-category points
    pub breakdown: ScoreBreakdown,
    pub evaluated_at: DateTime<Utc>,
}

impl Evaluation {
    /// Run the full pipeline for one bundle
    pub fn evaluate(flags: &FlagBundle, min_tier: &str) -> Self {
        let breakdown = score_breakdown(flags);
        let score = breakdown.total();
        let tier = Tier::from_score(i64::from(score));
        let admitted = should_send_tier(tier.as_str(), min_tier);

        debug!(
            score,
            tier = %tier,
            min_tier,
            admitted,
            contributions = %breakdown.describe(),
            "Setup evaluated"
        );

        Self {
            symbol: None,
            score,
            tier,
            min_tier: min_tier.to_string(),
            admitted,
            confidence: normalized_confidence(score),
            breakdown,
            evaluated_at: Utc::now(),
        }
    }

    /// Attach the asset symbol
    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    /// Check if the setup should go downstream
    pub fn is_actionable(&self) -> bool {
        self.admitted
    }
}

/// Score over MAX_SCORE, clamped to 1 and rounded to 4 dp
fn normalized_confidence(score: u32) -> Decimal {
    (Decimal::from(score) / Decimal::from(MAX_SCORE))
        .min(Decimal::ONE)
        .round_dp(4)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::keys;
    use std::str::FromStr;

    #[test]
    fn test_empty_bundle_is_rejected() {
        let eval = Evaluation::evaluate(&FlagBundle::new(), "B");
        assert_eq!(eval.score, 0);
        assert_eq!(eval.tier, Tier::None);
        assert!(!eval.admitted);
        assert!(!eval.is_actionable());
        assert_eq!(eval.confidence, Decimal::ZERO);
        assert!(eval.symbol.is_none());
    }

    #[test]
    fn test_max_bundle_confidence_is_one() {
        let flags: FlagBundle = keys::ALL.iter().map(|k| (*k, true)).collect();
        let eval = Evaluation::evaluate(&flags, "A+").with_symbol("SOL");

        assert_eq!(eval.score, MAX_SCORE);
        assert_eq!(eval.tier, Tier::APlus);
        assert!(eval.admitted);
        assert_eq!(eval.confidence, Decimal::ONE);
        assert_eq!(eval.symbol.as_deref(), Some("SOL"));
    }

    #[test]
    fn test_confidence_rounding() {
        // 125 / 170 = 0.73529...
        assert_eq!(
            normalized_confidence(125),
            Decimal::from_str("0.7353").unwrap()
        );
        assert_eq!(normalized_confidence(85), Decimal::from_str("0.5").unwrap());
    }

    #[test]
    fn test_unknown_min_tier_is_kept_verbatim() {
        let flags: FlagBundle = keys::ALL.iter().map(|k| (*k, true)).collect();
        let eval = Evaluation::evaluate(&flags, "gold");
        assert_eq!(eval.min_tier, "gold");
        assert!(eval.admitted); // A+ clears the fallback A policy
    }

    #[test]
    fn test_serialized_shape() {
        let flags = FlagBundle::new().with_flag(keys::STRUCT_15M_BULLISH, true);
        let eval = Evaluation::evaluate(&flags, "A");
        let json = serde_json::to_value(&eval).unwrap();

        assert_eq!(json["score"], 15);
        assert_eq!(json["tier"], "NONE");
        assert_eq!(json["admitted"], false);
        assert_eq!(json["breakdown"][0]["category"], "structure");
        assert_eq!(json["breakdown"][0]["points"], 15);
        assert!(json.get("symbol").is_none());
    }
}
