mod common;

use common::{bar_at, minute, series, setup_db};

use bar_sync::snapshot::{SymbolSnapshot, build_snapshots};
use bar_sync::store::upsert_bars;

#[test]
fn sparse_history_yields_partial_window() {
    let (_db, mut conn) = setup_db();

    // Only 4 bars stored, 10 requested.
    let bars = (0..4).map(|m| bar_at(minute(15, m), 250.0 + m as f64)).collect();
    upsert_bars(&mut conn, &[series("TSLA", bars)]).unwrap();

    let snaps = build_snapshots(&mut conn, &["TSLA".to_string()], 10).unwrap();
    match &snaps["TSLA"] {
        SymbolSnapshot::Ready(s) => {
            assert_eq!(s.bar_count, 4);
            assert_eq!(s.last_close, 253.0);
            assert_eq!(s.as_of, minute(15, 3));
        }
        SymbolSnapshot::Unavailable => panic!("expected a partial snapshot"),
    }
}

#[test]
fn empty_symbol_is_unavailable_not_error() {
    let (_db, mut conn) = setup_db();

    let snaps = build_snapshots(&mut conn, &["NVDA".to_string()], 10).unwrap();
    assert_eq!(snaps["NVDA"], SymbolSnapshot::Unavailable);
}

#[test]
fn result_preserves_requested_symbol_order() {
    let (_db, mut conn) = setup_db();

    upsert_bars(&mut conn, &[series("MSFT", vec![bar_at(minute(15, 0), 400.0)])]).unwrap();

    let request = vec!["zzz".to_string(), "MSFT".to_string(), "aaa".to_string()];
    let snaps = build_snapshots(&mut conn, &request, 5).unwrap();

    let keys: Vec<&str> = snaps.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["ZZZ", "MSFT", "AAA"]);
    assert_eq!(snaps["ZZZ"], SymbolSnapshot::Unavailable);
    assert!(matches!(snaps["MSFT"], SymbolSnapshot::Ready(_)));
}

#[test]
fn window_limits_bars_used() {
    let (_db, mut conn) = setup_db();

    let bars = (0..30).map(|m| bar_at(minute(15, m), 100.0 + m as f64)).collect();
    upsert_bars(&mut conn, &[series("AAPL", bars)]).unwrap();

    let snaps = build_snapshots(&mut conn, &["AAPL".to_string()], 10).unwrap();
    match &snaps["AAPL"] {
        SymbolSnapshot::Ready(s) => {
            assert_eq!(s.bar_count, 10);
            // Window covers minutes 20..=29 only.
            assert_eq!(s.last_close, 129.0);
            assert_eq!(s.as_of, minute(15, 29));
            assert_eq!(s.change_abs, 129.0 - (120.0 - 0.25));
        }
        SymbolSnapshot::Unavailable => panic!("expected snapshot"),
    }
}
