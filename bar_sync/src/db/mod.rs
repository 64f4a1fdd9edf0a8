//! Database utilities: connection helpers and embedded schema migrations.
//!
//! The store is a single local SQLite file. [`connection::connect_sqlite`]
//! opens it with WAL journaling and a busy timeout so the one ingest writer
//! and any number of snapshot readers can use separate connections
//! concurrently; [`migrate::run`] brings the schema up to date.

pub mod connection;
pub mod migrate;
