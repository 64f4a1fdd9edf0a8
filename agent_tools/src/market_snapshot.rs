//! The `market_snapshot(symbols, window)` tool.
//!
//! Opens a fresh read connection per call, so snapshot requests never hold a
//! handle across calls and never block the ingest writer. The returned map
//! preserves the caller's symbol order and contains one entry per requested
//! symbol, `unavailable` included — the shape is stable no matter how much
//! history the store holds.

use indexmap::IndexMap;

use bar_sync::db::connection::connect_sqlite;
use bar_sync::snapshot::{SymbolSnapshot, build_snapshots};

use crate::ToolError;

/// Handle for snapshot requests against one bar store.
#[derive(Debug, Clone)]
pub struct MarketSnapshotTool {
    db_path: String,
}

impl MarketSnapshotTool {
    /// Point the tool at the bar store file.
    pub fn new(db_path: impl Into<String>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    /// Summarize up to `window` recent bars for each symbol.
    ///
    /// Rejects an empty symbol list, blank entries, and a zero window at
    /// the boundary;
    /// missing history is reported per symbol as
    /// [`SymbolSnapshot::Unavailable`], never as an error.
    pub fn call(
        &self,
        symbols: &[String],
        window: usize,
    ) -> Result<IndexMap<String, SymbolSnapshot>, ToolError> {
        if symbols.is_empty() {
            return Err(ToolError::Validation("symbol list is empty".into()));
        }
        if symbols.iter().any(|s| s.trim().is_empty()) {
            return Err(ToolError::Validation(
                "symbol list contains a blank entry".into(),
            ));
        }
        if window == 0 {
            return Err(ToolError::Validation("window must be at least 1".into()));
        }

        let mut conn = connect_sqlite(&self.db_path)?;
        Ok(build_snapshots(&mut conn, symbols, window)?)
    }
}
