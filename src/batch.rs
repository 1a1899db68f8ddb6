//! Batch evaluation over JSON Lines input
//!
//! Each non-blank line is either a bare flag object or
//! `{"symbol": "...", "flags": {...}}`. One `Evaluation` is written per
//! accepted line. Malformed lines (bad UTF-8, bad JSON, wrong shape) are
//! logged and skipped; only read errors end the run.

use serde::Serialize;
use serde_json::Value;
use std::io::{BufRead, Write};
use tracing::warn;

use crate::error::{Result, ScorerError};
use crate::evaluation::Evaluation;
use crate::flags::{json_kind, FlagBundle};

/// One setup candidate read from input
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub symbol: Option<String>,
    pub flags: FlagBundle,
}

impl Candidate {
    /// Parse one input line
    pub fn parse(line: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(line)?;

        match value {
            Value::Object(mut obj) if obj.get("flags").map_or(false, Value::is_object) => {
                let symbol = match obj.remove("symbol") {
                    None | Some(Value::Null) => None,
                    Some(Value::String(s)) => Some(s),
                    Some(other) => return Err(ScorerError::InvalidSymbol(json_kind(&other))),
                };
                let flags = FlagBundle::from_value(obj.remove("flags").unwrap_or(Value::Null))?;
                Ok(Self { symbol, flags })
            }
            bare => Ok(Self {
                symbol: None,
                flags: FlagBundle::from_value(bare)?,
            }),
        }
    }

    pub fn evaluate(&self, min_tier: &str) -> Evaluation {
        let eval = Evaluation::evaluate(&self.flags, min_tier);
        match &self.symbol {
            Some(symbol) => eval.with_symbol(symbol.clone()),
            None => eval,
        }
    }
}

/// Counters for one batch run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub evaluated: usize,
    pub admitted: usize,
    pub skipped: usize,
}

/// Evaluate every line of `reader`, writing JSON evaluations to `writer`
pub fn run_batch<R, W>(
    reader: R,
    mut writer: W,
    min_tier: &str,
    admitted_only: bool,
) -> Result<BatchSummary>
where
    R: BufRead,
    W: Write,
{
    let mut summary = BatchSummary::default();

    for (idx, raw) in reader.split(b'\n').enumerate() {
        let raw = raw?;
        let line = match std::str::from_utf8(&raw) {
            Ok(s) => s.trim(),
            Err(e) => {
                warn!("Skipping line {}: invalid UTF-8: {}", idx + 1, e);
                summary.skipped += 1;
                continue;
            }
        };
        if line.is_empty() {
            continue;
        }

        let candidate = match Candidate::parse(line) {
            Ok(c) => c,
            Err(e) => {
                warn!("Skipping line {}: {}", idx + 1, e);
                summary.skipped += 1;
                continue;
            }
        };

        let eval = candidate.evaluate(min_tier);
        summary.evaluated += 1;
        if eval.admitted {
            summary.admitted += 1;
        } else if admitted_only {
            continue;
        }

        serde_json::to_writer(&mut writer, &eval).map_err(ScorerError::Output)?;
        writer.write_all(b"\n")?;
    }

    writer.flush()?;
    Ok(summary)
}
