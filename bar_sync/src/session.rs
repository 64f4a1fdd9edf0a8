//! Trading-session calendar and fetch-window resolution.
//!
//! Regular Trading Hours (RTH) are 09:30–16:00 America/New_York, Monday
//! through Friday. The free IEX feed is dense only inside RTH, so the
//! ingestor always requests either a live tail of the current session or the
//! full span of the most recently completed one. Holidays are not modeled:
//! on a holiday the resolver picks the previous weekday and the fetch simply
//! returns no rows.
//!
//! [`resolve_window`] is a pure function of `now` and the calendar so it can
//! be tested with synthetic timestamps.

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, TimeDelta, TimeZone, Utc, Weekday};
use chrono_tz::America::New_York;

use crate::tz::truncate_to_minute;

/// A `[start, end)` UTC range of bars to request. Both bounds are
/// minute-aligned and `start < end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionWindow {
    /// Inclusive start of the range.
    pub start: DateTime<Utc>,
    /// Exclusive end of the range.
    pub end: DateTime<Utc>,
}

fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

fn prev_weekday(mut date: NaiveDate) -> NaiveDate {
    loop {
        date = date.pred_opt().expect("date before epoch edge");
        if !is_weekend(date) {
            return date;
        }
    }
}

/// RTH bounds for one exchange-local calendar day, as UTC instants.
fn session_bounds(date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    (ny_instant(date, 9, 30), ny_instant(date, 16, 0))
}

fn ny_instant(date: NaiveDate, hour: u32, min: u32) -> DateTime<Utc> {
    let wall = NaiveTime::from_hms_opt(hour, min, 0).expect("valid wall time");
    let mut naive = date.and_time(wall);
    // New York DST transitions happen at 02:00 local, so 09:30/16:00 always
    // resolve to a single instant. The fallback arms keep this total if the
    // transition rules ever change.
    for _ in 0..120 {
        match New_York.from_local_datetime(&naive) {
            chrono::offset::LocalResult::Single(dt) => return dt.with_timezone(&Utc),
            chrono::offset::LocalResult::Ambiguous(earliest, _) => {
                return earliest.with_timezone(&Utc);
            }
            chrono::offset::LocalResult::None => naive += TimeDelta::minutes(1),
        }
    }
    // Unreachable for any real tzdata; pin to the UTC reading of the wall time.
    Utc.from_utc_datetime(&naive)
}

/// Resolve the time range of bars to fetch at instant `now`.
///
/// Strictly inside RTH the window is the live tail `[now - lookback, now)`,
/// clipped so it never starts before today's open. Outside RTH — pre-market,
/// after close, or a weekend — it is the full `[open, close)` span of the
/// most recently completed session, so the ingestor backfills the last
/// meaningful session instead of polling an empty live window.
///
/// At the exact close instant the session that just ended counts as
/// completed and its full span is returned. At the exact open instant the
/// live tail would be empty, so the prior session's span is returned; the
/// live branch takes over one minute later.
pub fn resolve_window(now: DateTime<Utc>, lookback: TimeDelta) -> SessionWindow {
    let now = truncate_to_minute(now);
    let lookback = lookback.max(TimeDelta::minutes(1));

    let mut date = now.with_timezone(&New_York).date_naive();
    while is_weekend(date) {
        date = prev_weekday(date);
    }

    let (open, close) = session_bounds(date);
    if open < now && now < close {
        SessionWindow {
            start: (now - lookback).max(open),
            end: now,
        }
    } else if now >= close {
        SessionWindow {
            start: open,
            end: close,
        }
    } else {
        let (prev_open, prev_close) = session_bounds(prev_weekday(date));
        SessionWindow {
            start: prev_open,
            end: prev_close,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2025-03-03 is a Monday; EST applies (UTC-5): open 14:30Z, close 21:00Z.
    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    #[test]
    fn live_window_is_lookback_tail() {
        let now = utc(2025, 3, 3, 18, 0);
        let w = resolve_window(now, TimeDelta::minutes(15));
        assert_eq!(w.start, utc(2025, 3, 3, 17, 45));
        assert_eq!(w.end, now);
    }

    #[test]
    fn live_window_clips_to_open() {
        // 5 minutes into the session with a 15-minute lookback.
        let now = utc(2025, 3, 3, 14, 35);
        let w = resolve_window(now, TimeDelta::minutes(15));
        assert_eq!(w.start, utc(2025, 3, 3, 14, 30));
        assert_eq!(w.end, now);
    }

    #[test]
    fn saturday_noon_returns_full_friday_session() {
        // 2025-03-01 is a Saturday; Friday 2025-02-28 in EST.
        let now = utc(2025, 3, 1, 17, 0);
        let w = resolve_window(now, TimeDelta::minutes(15));
        assert_eq!(w.start, utc(2025, 2, 28, 14, 30));
        assert_eq!(w.end, utc(2025, 2, 28, 21, 0));
    }

    #[test]
    fn sunday_also_falls_back_to_friday() {
        let now = utc(2025, 3, 2, 12, 0);
        let w = resolve_window(now, TimeDelta::minutes(15));
        assert_eq!(w.start, utc(2025, 2, 28, 14, 30));
        assert_eq!(w.end, utc(2025, 2, 28, 21, 0));
    }

    #[test]
    fn after_hours_returns_todays_full_session() {
        let now = utc(2025, 3, 3, 22, 30);
        let w = resolve_window(now, TimeDelta::minutes(15));
        assert_eq!(w.start, utc(2025, 3, 3, 14, 30));
        assert_eq!(w.end, utc(2025, 3, 3, 21, 0));
    }

    #[test]
    fn exact_close_counts_as_completed_session() {
        let now = utc(2025, 3, 3, 21, 0);
        let w = resolve_window(now, TimeDelta::minutes(15));
        assert_eq!(w.start, utc(2025, 3, 3, 14, 30));
        assert_eq!(w.end, utc(2025, 3, 3, 21, 0));
    }

    #[test]
    fn premarket_returns_previous_session() {
        // Monday 13:00Z is 08:00 New York, before the open.
        let now = utc(2025, 3, 3, 13, 0);
        let w = resolve_window(now, TimeDelta::minutes(15));
        assert_eq!(w.start, utc(2025, 2, 28, 14, 30));
        assert_eq!(w.end, utc(2025, 2, 28, 21, 0));
    }

    #[test]
    fn exact_open_returns_previous_session() {
        // The live tail would be empty at the open instant.
        let now = utc(2025, 3, 3, 14, 30);
        let w = resolve_window(now, TimeDelta::minutes(15));
        assert_eq!(w.start, utc(2025, 2, 28, 14, 30));
        assert_eq!(w.end, utc(2025, 2, 28, 21, 0));
    }

    #[test]
    fn edt_session_uses_minus_four_offset() {
        // 2025-06-10 is a Tuesday in EDT: open 13:30Z, close 20:00Z.
        let now = utc(2025, 6, 10, 22, 0);
        let w = resolve_window(now, TimeDelta::minutes(15));
        assert_eq!(w.start, utc(2025, 6, 10, 13, 30));
        assert_eq!(w.end, utc(2025, 6, 10, 20, 0));
    }

    #[test]
    fn window_is_always_nonempty_and_minute_aligned() {
        let seconds_now = Utc.with_ymd_and_hms(2025, 3, 3, 18, 0, 37).unwrap();
        let w = resolve_window(seconds_now, TimeDelta::minutes(15));
        assert!(w.start < w.end);
        assert_eq!(w.end.timestamp() % 60, 0);
        assert_eq!(w.start.timestamp() % 60, 0);
    }
}
