//! Flag bundle - pre-resolved market structure signals for one setup
//!
//! The upstream analyzer hands over a JSON object of named signals.
//! Only truthiness matters; a missing key reads as false.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Result, ScorerError};

/// Signal names shared with the upstream analyzer
pub mod keys {
    // Higher timeframe
    pub const BIAS_1H_STRONG_BULLISH: &str = "bias_1h_strong_bullish";
    pub const BIAS_1H_NOT_BEARISH: &str = "bias_1h_not_bearish";
    pub const STRUCT_15M_BULLISH: &str = "struct_15m_bullish";

    // Trigger
    pub const IPC_TRIGGER_CORE: &str = "ipc_trigger_core";
    pub const HAS_CHOCH_IMPULSE: &str = "has_choch_impulse";
    pub const IPC_TRIGGER_SUPPORT: &str = "ipc_trigger_support";
    pub const HAS_PRE_PUMP_CONTEXT: &str = "has_pre_pump_context";

    // Discount zone
    pub const IPC_DISCOUNT_CORE: &str = "ipc_discount_core";
    pub const IPC_DEEP_DISCOUNT: &str = "ipc_deep_discount";
    pub const IN_DISCOUNT_62_79: &str = "in_discount_62_79";
    pub const IN_DISCOUNT_50_62: &str = "in_discount_50_62";

    // Order blocks / imbalance
    pub const IPC_BLOCK_CORE: &str = "ipc_block_core";
    pub const IPC_BLOCK_ANY: &str = "ipc_block_any";
    pub const HAS_MITIGATION_BLOCK: &str = "has_mitigation_block";
    pub const HAS_BREAKER_BLOCK: &str = "has_breaker_block";
    pub const HAS_FVG_FRESH: &str = "has_fvg_fresh";

    // Liquidity
    pub const IPC_LIQUIDITY_CORE: &str = "ipc_liquidity_core";
    pub const HAS_BIG_SWEEP: &str = "has_big_sweep";
    pub const IPC_LIQUIDITY_SUPPORT: &str = "ipc_liquidity_support";
    pub const LIQUIDITY_TARGET_CLEAR: &str = "liquidity_target_clear";

    // Context filters
    pub const MOMENTUM_OK: &str = "momentum_ok";
    pub const NOT_FAKE_PUMP: &str = "not_fake_pump";
    pub const NOT_CHOPPY: &str = "not_choppy";
    pub const NO_BEARISH_DIVERGENCE: &str = "no_bearish_divergence";
    pub const NO_EXHAUSTION_SIGN: &str = "no_exhaustion_sign";

    // Overall
    pub const IPC_VALID_SETUP: &str = "ipc_valid_setup";

    /// Every key the scorer reads
    pub const ALL: &[&str] = &[
        BIAS_1H_STRONG_BULLISH,
        BIAS_1H_NOT_BEARISH,
        STRUCT_15M_BULLISH,
        IPC_TRIGGER_CORE,
        HAS_CHOCH_IMPULSE,
        IPC_TRIGGER_SUPPORT,
        HAS_PRE_PUMP_CONTEXT,
        IPC_DISCOUNT_CORE,
        IPC_DEEP_DISCOUNT,
        IN_DISCOUNT_62_79,
        IN_DISCOUNT_50_62,
        IPC_BLOCK_CORE,
        IPC_BLOCK_ANY,
        HAS_MITIGATION_BLOCK,
        HAS_BREAKER_BLOCK,
        HAS_FVG_FRESH,
        IPC_LIQUIDITY_CORE,
        HAS_BIG_SWEEP,
        IPC_LIQUIDITY_SUPPORT,
        LIQUIDITY_TARGET_CLEAR,
        MOMENTUM_OK,
        NOT_FAKE_PUMP,
        NOT_CHOPPY,
        NO_BEARISH_DIVERGENCE,
        NO_EXHAUSTION_SIGN,
        IPC_VALID_SETUP,
    ];
}

/// Named signals for one setup candidate
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlagBundle {
    flags: Map<String, Value>,
}

impl FlagBundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a bundle from a JSON object string
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(raw)?;
        Self::from_value(value)
    }

    /// Wrap a JSON value; anything other than an object is rejected
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(flags) => Ok(Self { flags }),
            other => Err(ScorerError::NotAnObject(json_kind(&other))),
        }
    }

    pub fn with_flag(mut self, key: &str, value: bool) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.flags.insert(key.to_string(), value.into());
    }

    /// Raw value as the analyzer sent it
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.flags.get(key)
    }

    /// True when the key is present and its value is truthy
    pub fn is_set(&self, key: &str) -> bool {
        self.get(key).map(is_truthy).unwrap_or(false)
    }

    /// True when at least one of the keys is set
    pub fn any_set(&self, keys: &[&str]) -> bool {
        keys.iter().any(|key| self.is_set(key))
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Keys whose values are truthy, sorted
    pub fn set_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self
            .flags
            .iter()
            .filter(|(_, v)| is_truthy(v))
            .map(|(k, _)| k.as_str())
            .collect();
        keys.sort_unstable();
        keys
    }
}

impl<K: Into<String>> FromIterator<(K, bool)> for FlagBundle {
    fn from_iter<I: IntoIterator<Item = (K, bool)>>(iter: I) -> Self {
        let flags = iter
            .into_iter()
            .map(|(k, v)| (k.into(), Value::Bool(v)))
            .collect();
        Self { flags }
    }
}

/// Truthiness of a JSON value.
///
/// null, false, 0, "", [] and {} are falsy; everything else is truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// JSON type name used in error messages
pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
