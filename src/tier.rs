//! Quality tiers for scored setups

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Setup quality tier, ordered NONE < B < A < A+
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    /// Below the lowest breakpoint - not worth surfacing
    #[serde(rename = "NONE")]
    None,
    /// Acceptable setup
    B,
    /// Strong setup
    A,
    /// Exceptional setup
    #[serde(rename = "A+")]
    APlus,
}

impl Tier {
    /// Policy tier used when the caller's minimum is not recognized
    pub const DEFAULT_MIN: Tier = Tier::A;

    /// Inclusive lower score bounds, highest first
    const BREAKPOINTS: [(i64, Tier); 3] = [(130, Tier::APlus), (110, Tier::A), (90, Tier::B)];

    /// Map a score to its tier
    pub fn from_score(score: i64) -> Self {
        Self::BREAKPOINTS
            .iter()
            .find(|(floor, _)| score >= *floor)
            .map(|(_, tier)| *tier)
            .unwrap_or(Tier::None)
    }

    /// Position in the NONE < B < A < A+ ordering
    pub fn ordinal(&self) -> u8 {
        match self {
            Tier::None => 0,
            Tier::B => 1,
            Tier::A => 2,
            Tier::APlus => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::None => "NONE",
            Tier::B => "B",
            Tier::A => "A",
            Tier::APlus => "A+",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Label that is not one of NONE, B, A, A+
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized tier label: {0:?}")]
pub struct UnknownTier(pub String);

impl FromStr for Tier {
    type Err = UnknownTier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NONE" => Ok(Tier::None),
            "B" => Ok(Tier::B),
            "A" => Ok(Tier::A),
            "A+" => Ok(Tier::APlus),
            other => Err(UnknownTier(other.to_string())),
        }
    }
}

/// Map a score to its tier
pub fn tier_from_score(score: i64) -> Tier {
    Tier::from_score(score)
}
