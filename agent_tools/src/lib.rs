//! The fixed set of named, typed tools exposed to agent consumers.
//!
//! An LLM orchestrator (not part of this workspace) dispatches to exactly
//! two functions with stable signatures: [`market_snapshot::MarketSnapshotTool`]
//! and [`web_search::SearchClient`]. The orchestrator's own output contract —
//! directional hypotheses built from a snapshot — is consumed here only as
//! the serde types in [`hypothesis`].

pub mod hypothesis;
pub mod market_snapshot;
pub mod web_search;

use thiserror::Error;

/// Errors surfaced across the tool boundary.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The caller's arguments were rejected before any work was attempted.
    #[error("Invalid tool arguments: {0}")]
    Validation(String),

    /// The bar store could not be read.
    #[error("Store error: {0}")]
    Store(#[from] anyhow::Error),

    /// The search collaborator failed or returned garbage.
    #[error("Search error: {0}")]
    Search(#[from] reqwest::Error),
}
