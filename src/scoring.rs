//! Setup scoring
//!
//! Adds up weighted contributions from the flag bundle:
//! - Higher timeframe: 1H bias and 15m structure
//! - Trigger: impulse reversal, pre-compression support
//! - Discount zone: core plus depth
//! - Order blocks and fresh imbalance as confluence
//! - Liquidity sweep and target cluster
//! - Context filters
//! - Synergy bonuses for a complete chain
//!
//! No weight is negative, so setting an extra flag never lowers the score.

use serde::{Deserialize, Serialize};

use crate::flags::{keys, FlagBundle};

/// Score with every flag set
pub const MAX_SCORE: u32 = 170;

/// Scoring category a contribution is attributed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Bias,
    Structure,
    TriggerCore,
    TriggerSupport,
    DiscountCore,
    DiscountDepth,
    BlockCore,
    MitigationBlock,
    BreakerBlock,
    Imbalance,
    BlockImbalanceSynergy,
    LiquidityCore,
    LiquiditySupport,
    Momentum,
    NotFakePump,
    NotChoppy,
    NoBearishDivergence,
    NoExhaustion,
    FullChainSynergy,
    DeepDiscountBlockSynergy,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Bias => "bias",
            Category::Structure => "structure",
            Category::TriggerCore => "trigger_core",
            Category::TriggerSupport => "trigger_support",
            Category::DiscountCore => "discount_core",
            Category::DiscountDepth => "discount_depth",
            Category::BlockCore => "block_core",
            Category::MitigationBlock => "mitigation_block",
            Category::BreakerBlock => "breaker_block",
            Category::Imbalance => "imbalance",
            Category::BlockImbalanceSynergy => "block_imbalance_synergy",
            Category::LiquidityCore => "liquidity_core",
            Category::LiquiditySupport => "liquidity_support",
            Category::Momentum => "momentum",
            Category::NotFakePump => "not_fake_pump",
            Category::NotChoppy => "not_choppy",
            Category::NoBearishDivergence => "no_bearish_divergence",
            Category::NoExhaustion => "no_exhaustion",
            Category::FullChainSynergy => "full_chain_synergy",
            Category::DeepDiscountBlockSynergy => "deep_discount_block_synergy",
        }
    }
}

/// Points awarded by one category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contribution {
    pub category: Category,
    pub points: u32,
}

/// Contributions that fired for a bundle, in evaluation order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreBreakdown {
    contributions: Vec<Contribution>,
}

impl ScoreBreakdown {
    pub fn total(&self) -> u32 {
        self.contributions.iter().map(|c| c.points).sum()
    }

    pub fn contributions(&self) -> &[Contribution] {
        &self.contributions
    }

    /// Points from one category (0 if it did not fire)
    pub fn points_for(&self, category: Category) -> u32 {
        self.contributions
            .iter()
            .find(|c| c.category == category)
            .map(|c| c.points)
            .unwrap_or(0)
    }

    /// Human-readable summary, e.g. "bias+20 structure+15"
    pub fn describe(&self) -> String {
        self.contributions
            .iter()
            .map(|c| format!("{}+{}", c.category.as_str(), c.points))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn add(&mut self, category: Category, points: Option<u32>) {
        if let Some(points) = points {
            self.contributions.push(Contribution { category, points });
        }
    }
}

/// Score a setup candidate
pub fn score(flags: &FlagBundle) -> u32 {
    score_breakdown(flags).total()
}

/// Score a setup candidate, keeping per-category contributions
pub fn score_breakdown(flags: &FlagBundle) -> ScoreBreakdown {
    let mut breakdown = ScoreBreakdown::default();

    let on = |key: &str| flags.is_set(key);
    let award = |cond: bool, points: u32| cond.then_some(points);

    // Derived conditions shared by several categories
    let bias_ok = flags.any_set(&[keys::BIAS_1H_STRONG_BULLISH, keys::BIAS_1H_NOT_BEARISH]);
    let trigger_core = flags.any_set(&[keys::IPC_TRIGGER_CORE, keys::HAS_CHOCH_IMPULSE]);
    let deep_discount = flags.any_set(&[keys::IPC_DEEP_DISCOUNT, keys::IN_DISCOUNT_62_79]);
    let block_core = on(keys::IPC_BLOCK_CORE);
    let fvg_fresh = on(keys::HAS_FVG_FRESH);
    let liquidity_core = flags.any_set(&[keys::IPC_LIQUIDITY_CORE, keys::HAS_BIG_SWEEP]);

    // Higher timeframe
    let bias = if on(keys::BIAS_1H_STRONG_BULLISH) {
        Some(20)
    } else if on(keys::BIAS_1H_NOT_BEARISH) {
        Some(10)
    } else {
        None
    };
    breakdown.add(Category::Bias, bias);
    breakdown.add(Category::Structure, award(on(keys::STRUCT_15M_BULLISH), 15));

    // Trigger
    breakdown.add(Category::TriggerCore, award(trigger_core, 22));
    breakdown.add(
        Category::TriggerSupport,
        award(
            flags.any_set(&[keys::IPC_TRIGGER_SUPPORT, keys::HAS_PRE_PUMP_CONTEXT]),
            5,
        ),
    );

    // Discount zone
    breakdown.add(Category::DiscountCore, award(on(keys::IPC_DISCOUNT_CORE), 15));
    let depth = if deep_discount {
        Some(8)
    } else if on(keys::IN_DISCOUNT_50_62) {
        Some(4)
    } else {
        None
    };
    breakdown.add(Category::DiscountDepth, depth);

    // Order blocks and imbalance
    breakdown.add(Category::BlockCore, award(block_core, 18));
    breakdown.add(Category::MitigationBlock, award(on(keys::HAS_MITIGATION_BLOCK), 4));
    breakdown.add(Category::BreakerBlock, award(on(keys::HAS_BREAKER_BLOCK), 4));
    breakdown.add(Category::Imbalance, award(fvg_fresh, 6));
    breakdown.add(
        Category::BlockImbalanceSynergy,
        award((block_core || on(keys::IPC_BLOCK_ANY)) && fvg_fresh, 3),
    );

    // Liquidity
    breakdown.add(Category::LiquidityCore, award(liquidity_core, 15));
    breakdown.add(
        Category::LiquiditySupport,
        award(
            flags.any_set(&[keys::IPC_LIQUIDITY_SUPPORT, keys::LIQUIDITY_TARGET_CLEAR]),
            5,
        ),
    );

    // Context filters
    breakdown.add(Category::Momentum, award(on(keys::MOMENTUM_OK), 5));
    breakdown.add(Category::NotFakePump, award(on(keys::NOT_FAKE_PUMP), 3));
    breakdown.add(Category::NotChoppy, award(on(keys::NOT_CHOPPY), 3));
    breakdown.add(
        Category::NoBearishDivergence,
        award(on(keys::NO_BEARISH_DIVERGENCE), 2),
    );
    breakdown.add(Category::NoExhaustion, award(on(keys::NO_EXHAUSTION_SIGN), 2));

    // Synergy
    let full_chain = on(keys::IPC_VALID_SETUP)
        && bias_ok
        && on(keys::STRUCT_15M_BULLISH)
        && on(keys::IPC_DISCOUNT_CORE)
        && block_core
        && trigger_core
        && liquidity_core;
    breakdown.add(Category::FullChainSynergy, award(full_chain, 8));
    breakdown.add(
        Category::DeepDiscountBlockSynergy,
        award(deep_discount && block_core && fvg_fresh, 7),
    );

    breakdown
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundle(set: &[&str]) -> FlagBundle {
        set.iter().map(|k| (*k, true)).collect()
    }

    #[test]
    fn test_empty_bundle_scores_zero() {
        let breakdown = score_breakdown(&FlagBundle::new());
        assert_eq!(breakdown.total(), 0);
        assert!(breakdown.contributions().is_empty());
        assert_eq!(breakdown.describe(), "");
    }

    #[test]
    fn test_bias_is_ranked() {
        assert_eq!(score(&bundle(&[keys::BIAS_1H_STRONG_BULLISH])), 20);
        assert_eq!(score(&bundle(&[keys::BIAS_1H_NOT_BEARISH])), 10);
        // Strong bullish wins; not-bearish is not added on top
        assert_eq!(
            score(&bundle(&[keys::BIAS_1H_STRONG_BULLISH, keys::BIAS_1H_NOT_BEARISH])),
            20
        );
    }

    #[test]
    fn test_discount_depth_is_ranked() {
        assert_eq!(score(&bundle(&[keys::IN_DISCOUNT_50_62])), 4);
        assert_eq!(score(&bundle(&[keys::IN_DISCOUNT_62_79])), 8);
        assert_eq!(
            score(&bundle(&[keys::IPC_DEEP_DISCOUNT, keys::IN_DISCOUNT_50_62])),
            8
        );
        assert_eq!(
            score(&bundle(&[keys::IPC_DEEP_DISCOUNT, keys::IN_DISCOUNT_62_79])),
            8
        );
    }

    #[test]
    fn test_alternate_keys_count_once() {
        assert_eq!(
            score(&bundle(&[keys::IPC_TRIGGER_CORE, keys::HAS_CHOCH_IMPULSE])),
            22
        );
        assert_eq!(
            score(&bundle(&[keys::IPC_TRIGGER_SUPPORT, keys::HAS_PRE_PUMP_CONTEXT])),
            5
        );
        assert_eq!(
            score(&bundle(&[keys::IPC_LIQUIDITY_CORE, keys::HAS_BIG_SWEEP])),
            15
        );
        assert_eq!(
            score(&bundle(&[keys::IPC_LIQUIDITY_SUPPORT, keys::LIQUIDITY_TARGET_CLEAR])),
            5
        );
    }

    #[test]
    fn test_block_imbalance_synergy_accepts_any_block() {
        let flags = bundle(&[keys::IPC_BLOCK_ANY, keys::HAS_FVG_FRESH]);
        let breakdown = score_breakdown(&flags);
        assert_eq!(breakdown.points_for(Category::Imbalance), 6);
        assert_eq!(breakdown.points_for(Category::BlockImbalanceSynergy), 3);
        assert_eq!(breakdown.points_for(Category::BlockCore), 0);
        assert_eq!(breakdown.total(), 9);

        // Any-block alone carries no weight
        assert_eq!(score(&bundle(&[keys::IPC_BLOCK_ANY])), 0);
    }

    #[test]
    fn test_deep_discount_synergy_needs_block_core() {
        let any_block = bundle(&[keys::IPC_DEEP_DISCOUNT, keys::IPC_BLOCK_ANY, keys::HAS_FVG_FRESH]);
        assert_eq!(
            score_breakdown(&any_block).points_for(Category::DeepDiscountBlockSynergy),
            0
        );

        let core_block = bundle(&[keys::IN_DISCOUNT_62_79, keys::IPC_BLOCK_CORE, keys::HAS_FVG_FRESH]);
        let breakdown = score_breakdown(&core_block);
        assert_eq!(breakdown.points_for(Category::DeepDiscountBlockSynergy), 7);
        // 8 depth + 18 block + 6 fvg + 3 block/fvg + 7 synergy
        assert_eq!(breakdown.total(), 42);
    }

    #[test]
    fn test_full_chain_requires_every_link() {
        let chain = [
            keys::IPC_VALID_SETUP,
            keys::BIAS_1H_NOT_BEARISH,
            keys::STRUCT_15M_BULLISH,
            keys::IPC_DISCOUNT_CORE,
            keys::IPC_BLOCK_CORE,
            keys::HAS_CHOCH_IMPULSE,
            keys::HAS_BIG_SWEEP,
        ];
        let complete = score_breakdown(&bundle(&chain));
        assert_eq!(complete.points_for(Category::FullChainSynergy), 8);
        // 10 + 15 + 15 + 18 + 22 + 15 + 8
        assert_eq!(complete.total(), 103);

        for missing in chain {
            let partial: Vec<&str> = chain.iter().copied().filter(|k| *k != missing).collect();
            let breakdown = score_breakdown(&bundle(&partial));
            assert_eq!(
                breakdown.points_for(Category::FullChainSynergy),
                0,
                "chain bonus fired without {}",
                missing
            );
        }
    }

    #[test]
    fn test_every_flag_set_reaches_max() {
        let breakdown = score_breakdown(&bundle(keys::ALL));
        assert_eq!(breakdown.total(), MAX_SCORE);
        assert_eq!(breakdown.contributions().len(), 20);
    }

    #[test]
    fn test_describe_lists_contributions_in_order() {
        let flags = bundle(&[keys::MOMENTUM_OK, keys::STRUCT_15M_BULLISH]);
        assert_eq!(score_breakdown(&flags).describe(), "structure+15 momentum+5");
    }

    #[test]
    fn test_non_boolean_values_use_truthiness() {
        let mut flags = FlagBundle::new();
        flags.set(keys::STRUCT_15M_BULLISH, 1);
        flags.set(keys::MOMENTUM_OK, "");
        flags.set(keys::NOT_CHOPPY, serde_json::Value::Null);
        assert_eq!(score(&flags), 15);
    }
}
