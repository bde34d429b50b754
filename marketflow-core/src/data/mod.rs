//! Provider payload ingestion.

pub mod chart;

pub use chart::{parse_chart_json, parse_chart_payload, PayloadError};
