//! Vendor-agnostic data models for bar requests and results.

pub mod bar;
pub mod request;
