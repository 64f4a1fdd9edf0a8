//! Diesel table definitions for the bar store.

diesel::table! {
    /// Per-symbol per-minute OHLCV bars. One row per `(symbol, ts_utc)`;
    /// later writes for the same key overwrite the earlier ones.
    market_bars (symbol, ts_utc) {
        /// Uppercase ticker.
        symbol -> Text,
        /// RFC 3339 UTC minute-start timestamp (fixed width, so text order
        /// is chronological order).
        ts_utc -> Text,
        /// Opening price.
        open -> Double,
        /// Highest price in the minute.
        high -> Double,
        /// Lowest price in the minute.
        low -> Double,
        /// Closing price.
        close -> Double,
        /// Shares traded in the minute.
        volume -> BigInt,
    }
}
