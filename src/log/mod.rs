//! Measurement log parsing: block scanning, table extraction and the
//! single-pass analyzer that ties them together.

pub mod block;
pub mod extract;
pub mod parse;
pub mod row;

pub use parse::{LogAnalyzer, parse_log_file};
pub use row::{HostPerfRecord, MeasLog, ProcessCpuRecord, ThroughputRecord};
