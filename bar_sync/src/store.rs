//! Idempotent upsert and range-read access to the `market_bars` table.
//!
//! Writes are keyed by `(symbol, ts_utc)`: a later write for the same key
//! overwrites all non-key columns, which models vendor bar revisions. One
//! batch is committed inside a single `BEGIN IMMEDIATE` transaction, so
//! readers on other connections either see the whole batch or none of it.

use anyhow::Context;
use diesel::prelude::*;

use market_feed::models::bar::{Bar, BarSeries};

use crate::schema::market_bars;
use crate::tz;

#[derive(Insertable, AsChangeset, Debug)]
#[diesel(table_name = market_bars)]
struct BarRow<'a> {
    symbol: &'a str,
    ts_utc: &'a str,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: i64,
}

#[derive(Queryable, Debug)]
struct StoredBar {
    ts_utc: String,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: i64,
}

/// Upsert every bar of the given series into the store as one batch.
///
/// Symbols are uppercased and timestamps aligned to their minute before they
/// become part of the key. Re-upserting identical rows is a no-op; rows with
/// a new value for an existing key replace it. Returns the number of rows
/// written. On any failure the whole batch is rolled back.
pub fn upsert_bars(conn: &mut SqliteConnection, series: &[BarSeries]) -> anyhow::Result<usize> {
    use crate::schema::market_bars::dsl::*;

    conn.immediate_transaction::<_, anyhow::Error, _>(|conn| {
        let mut written = 0usize;
        for s in series {
            let sym = s.symbol.trim().to_uppercase();
            for bar in &s.bars {
                let ts = tz::to_rfc3339_utc(tz::truncate_to_minute(bar.timestamp));
                let row = BarRow {
                    symbol: &sym,
                    ts_utc: &ts,
                    open: bar.open,
                    high: bar.high,
                    low: bar.low,
                    close: bar.close,
                    volume: bar.volume,
                };

                diesel::insert_into(market_bars)
                    .values(&row)
                    .on_conflict((symbol, ts_utc))
                    .do_update()
                    .set(&row)
                    .execute(conn)
                    .with_context(|| format!("upsert bar {sym} @ {ts}"))?;
                written += 1;
            }
        }
        Ok(written)
    })
}

/// Read up to `count` most recent bars for `sym`, oldest first.
///
/// Returns fewer than `count` rows when less history exists; an unknown
/// symbol simply yields an empty vector.
pub fn read_recent(
    conn: &mut SqliteConnection,
    sym: &str,
    count: usize,
) -> anyhow::Result<Vec<Bar>> {
    use crate::schema::market_bars::dsl::*;

    let sym = sym.trim().to_uppercase();
    let mut rows: Vec<StoredBar> = market_bars
        .filter(symbol.eq(&sym))
        .order(ts_utc.desc())
        .limit(count as i64)
        .select((ts_utc, open, high, low, close, volume))
        .load(conn)
        .with_context(|| format!("read recent bars for {sym}"))?;

    // Newest-first from the query; chronological for consumers.
    rows.reverse();
    rows.into_iter()
        .map(|r| {
            Ok(Bar {
                timestamp: tz::parse_ts_to_utc(&r.ts_utc)?,
                open: r.open,
                high: r.high,
                low: r.low,
                close: r.close,
                volume: r.volume,
            })
        })
        .collect()
}

/// Count of stored rows for one symbol.
pub fn count_bars(conn: &mut SqliteConnection, sym: &str) -> anyhow::Result<i64> {
    use crate::schema::market_bars::dsl::*;

    let n = market_bars
        .filter(symbol.eq(sym.trim().to_uppercase()))
        .count()
        .get_result(conn)?;
    Ok(n)
}
