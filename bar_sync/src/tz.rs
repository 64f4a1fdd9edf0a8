//! Timestamp parsing, formatting, and alignment helpers.
//!
//! All database writes are fixed-width RFC 3339 UTC strings so that text
//! comparison matches chronological comparison. Bar timestamps are aligned
//! to the start of their minute before they are used as part of a key.

use anyhow::Context;
use chrono::{DateTime, DurationRound, TimeDelta, Utc};

/// RFC 3339 with offset -> UTC.
pub fn parse_ts_to_utc(s: &str) -> anyhow::Result<DateTime<Utc>> {
    let dt = DateTime::parse_from_rfc3339(s).with_context(|| format!("bad rfc3339: {s}"))?;
    Ok(dt.with_timezone(&Utc))
}

/// Format a UTC datetime as a fixed-width RFC 3339 string with second
/// precision and a `Z` suffix (e.g., `2025-03-03T14:30:00Z`).
pub fn to_rfc3339_utc(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}

/// Align an instant down to the start of its minute.
pub fn truncate_to_minute(dt: DateTime<Utc>) -> DateTime<Utc> {
    // Truncation toward a one-minute boundary cannot fail for any
    // representable DateTime<Utc>.
    dt.duration_trunc(TimeDelta::minutes(1)).unwrap_or(dt)
}
