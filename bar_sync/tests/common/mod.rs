#![allow(dead_code)]

use std::path::PathBuf;

use chrono::{DateTime, TimeZone, Utc};
use diesel::SqliteConnection;
use tempfile::TempDir;

use bar_sync::db::{connection, migrate};
use market_feed::models::bar::{Bar, BarSeries};

pub struct TestDb {
    _dir: TempDir, // keep alive for the life of the test
    pub path: String,
}

pub fn setup_db() -> (TestDb, SqliteConnection) {
    let dir = TempDir::new().expect("tempdir");
    let mut p = PathBuf::from(dir.path());
    p.push("test.db");
    let path = p.to_string_lossy().to_string();

    migrate::run(&path).expect("migrations");
    let conn = connection::connect_sqlite(&path).expect("connect");
    (TestDb { _dir: dir, path }, conn)
}

/// A minute-start instant on 2025-03-03 (a Monday, EST).
pub fn minute(hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 3, hour, min, 0).unwrap()
}

pub fn bar_at(ts: DateTime<Utc>, close: f64) -> Bar {
    Bar {
        timestamp: ts,
        open: close - 0.25,
        high: close + 0.5,
        low: close - 0.5,
        close,
        volume: 1_000,
    }
}

pub fn series(symbol: &str, bars: Vec<Bar>) -> BarSeries {
    BarSeries {
        symbol: symbol.to_string(),
        bars,
    }
}
