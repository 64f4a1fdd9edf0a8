//! Output contract of the hypothesis-generating consumer.
//!
//! This subsystem does not produce hypotheses — an external LLM agent does,
//! after calling `market_snapshot`. These types pin down the JSON shape that
//! agent must emit so the rest of the system can decode and display it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Directional call for one symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Expect the price to rise.
    Long,
    /// Expect the price to fall.
    Short,
    /// No position; monitor for a setup.
    Watch,
}

/// One directional trading hypothesis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hypothesis {
    /// Uppercase ticker the hypothesis is about.
    pub symbol: String,
    /// Directional call.
    pub direction: Direction,
    /// Agent-reported confidence in `[0, 1]`.
    pub confidence: f64,
    /// One-paragraph justification.
    pub rationale: String,
    /// Known ways the hypothesis could be wrong.
    #[serde(default)]
    pub risk_factors: Vec<String>,
}

impl Hypothesis {
    /// Check the structural invariants the agent is asked to uphold.
    pub fn validate(&self) -> Result<(), String> {
        if self.symbol.trim().is_empty() {
            return Err("symbol is empty".into());
        }
        if !(0.0..=1.0).contains(&self.confidence) {
            return Err(format!("confidence {} outside [0, 1]", self.confidence));
        }
        Ok(())
    }
}

/// A batch of hypotheses plus generation metadata, sorted by confidence
/// descending as the agent is instructed to emit them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HypothesisBatch {
    /// The hypotheses, best first.
    pub hypotheses: Vec<Hypothesis>,
    /// Generation metadata.
    pub meta: BatchMeta,
}

/// Metadata describing how a batch was produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchMeta {
    /// The snapshot window the agent was given.
    pub window: usize,
    /// When the batch was generated.
    pub generated_at: DateTime<Utc>,
}
