//! Tier gate - decides whether a tiered setup is surfaced downstream

use crate::tier::Tier;

/// Ordinal for an actual tier label; unknown labels rank as NONE
fn tier_ordinal(label: &str) -> u8 {
    label.parse::<Tier>().map(|t| t.ordinal()).unwrap_or(0)
}

/// Ordinal for a policy label; unknown labels fall back to the stricter A
fn min_tier_ordinal(label: &str) -> u8 {
    label
        .parse::<Tier>()
        .unwrap_or(Tier::DEFAULT_MIN)
        .ordinal()
}

/// Compare a tier label against the minimum-tier policy label
pub fn should_send_tier(tier: &str, min_tier: &str) -> bool {
    tier_ordinal(tier) >= min_tier_ordinal(min_tier)
}

impl Tier {
    /// Typed gate: true when this tier is at least `min`
    pub fn meets(self, min: Tier) -> bool {
        self.ordinal() >= min.ordinal()
    }
}
