mod common;

use common::{bar_at, minute, series, setup_db};

use bar_sync::store::{count_bars, read_recent, upsert_bars};
use market_feed::models::bar::Bar;

#[test]
fn empty_store_round_trip_in_chronological_order() {
    let (_db, mut conn) = setup_db();

    let batch = vec![series(
        "AAPL",
        vec![
            bar_at(minute(15, 0), 100.0),
            bar_at(minute(15, 1), 101.0),
            bar_at(minute(15, 2), 102.0),
        ],
    )];
    let written = upsert_bars(&mut conn, &batch).unwrap();
    assert_eq!(written, 3);

    let bars = read_recent(&mut conn, "AAPL", 5).unwrap();
    assert_eq!(bars.len(), 3);
    assert_eq!(bars[0].timestamp, minute(15, 0));
    assert_eq!(bars[1].timestamp, minute(15, 1));
    assert_eq!(bars[2].timestamp, minute(15, 2));
}

#[test]
fn revised_bar_overwrites_without_new_row() {
    let (_db, mut conn) = setup_db();

    let batch = vec![series(
        "AAPL",
        vec![
            bar_at(minute(15, 0), 100.0),
            bar_at(minute(15, 1), 101.0),
            bar_at(minute(15, 2), 102.0),
        ],
    )];
    upsert_bars(&mut conn, &batch).unwrap();

    // Vendor amends the 15:01 bar.
    let revision = vec![series("AAPL", vec![bar_at(minute(15, 1), 105.5)])];
    upsert_bars(&mut conn, &revision).unwrap();

    let bars = read_recent(&mut conn, "AAPL", 5).unwrap();
    assert_eq!(bars.len(), 3);
    assert_eq!(bars[1].timestamp, minute(15, 1));
    assert_eq!(bars[1].close, 105.5);
}

#[test]
fn upsert_is_idempotent() {
    let (_db, mut conn) = setup_db();

    let batch = vec![series(
        "MSFT",
        vec![bar_at(minute(15, 0), 400.0), bar_at(minute(15, 1), 401.0)],
    )];
    upsert_bars(&mut conn, &batch).unwrap();
    let once = read_recent(&mut conn, "MSFT", 10).unwrap();

    upsert_bars(&mut conn, &batch).unwrap();
    let twice = read_recent(&mut conn, "MSFT", 10).unwrap();

    assert_eq!(once, twice);
    assert_eq!(count_bars(&mut conn, "MSFT").unwrap(), 2);
}

#[test]
fn read_recent_returns_newest_count_rows() {
    let (_db, mut conn) = setup_db();

    let bars: Vec<Bar> = (0..10).map(|m| bar_at(minute(15, m), 100.0 + m as f64)).collect();
    upsert_bars(&mut conn, &[series("TSLA", bars)]).unwrap();

    let got = read_recent(&mut conn, "TSLA", 4).unwrap();
    assert_eq!(got.len(), 4);
    // The four newest, ascending.
    assert_eq!(got[0].timestamp, minute(15, 6));
    assert_eq!(got[3].timestamp, minute(15, 9));
    assert!(got.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
}

#[test]
fn symbols_are_normalized_to_uppercase_keys() {
    let (_db, mut conn) = setup_db();

    upsert_bars(&mut conn, &[series(" aapl ", vec![bar_at(minute(15, 0), 100.0)])]).unwrap();
    upsert_bars(&mut conn, &[series("AAPL", vec![bar_at(minute(15, 0), 101.0)])]).unwrap();

    // Both writes hit the same key.
    assert_eq!(count_bars(&mut conn, "aapl").unwrap(), 1);
    let bars = read_recent(&mut conn, "AAPL", 5).unwrap();
    assert_eq!(bars[0].close, 101.0);
}

#[test]
fn sub_minute_timestamps_collapse_to_one_key() {
    let (_db, mut conn) = setup_db();

    let mut early = bar_at(minute(15, 0), 100.0);
    early.timestamp += chrono::TimeDelta::seconds(10);
    let mut late = bar_at(minute(15, 0), 101.0);
    late.timestamp += chrono::TimeDelta::seconds(40);

    upsert_bars(&mut conn, &[series("AAPL", vec![early, late])]).unwrap();

    let bars = read_recent(&mut conn, "AAPL", 5).unwrap();
    assert_eq!(bars.len(), 1);
    assert_eq!(bars[0].timestamp, minute(15, 0));
    assert_eq!(bars[0].close, 101.0);
}

#[test]
fn unknown_symbol_reads_empty() {
    let (_db, mut conn) = setup_db();
    assert!(read_recent(&mut conn, "NVDA", 5).unwrap().is_empty());
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(8))]

        // Re-upserting any batch leaves the store exactly as after the
        // first upsert.
        #[test]
        fn double_upsert_equals_single_upsert(
            minutes in proptest::collection::vec(0u32..60, 1..20),
            closes in proptest::collection::vec(1.0f64..1000.0, 20),
        ) {
            let (_db, mut conn) = setup_db();

            let bars: Vec<Bar> = minutes
                .iter()
                .zip(closes.iter())
                .map(|(&m, &c)| bar_at(minute(15, m), c))
                .collect();
            let batch = vec![series("AAPL", bars)];

            upsert_bars(&mut conn, &batch).unwrap();
            let once = read_recent(&mut conn, "AAPL", 100).unwrap();

            upsert_bars(&mut conn, &batch).unwrap();
            let twice = read_recent(&mut conn, "AAPL", 100).unwrap();

            prop_assert_eq!(once, twice);
        }
    }
}
