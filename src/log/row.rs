use serde::Serialize;

/// Report time substituted when a block's begin delimiter carries no timestamp.
pub const SENTINEL_REPORT_TIME: &str = "1970-01-01 12:00";

/// One SPA row from an SA_SPAMEAS block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThroughputRecord {
    pub report_time: String,
    pub spa_name: String,
    /// successes / interval seconds, truncated.
    pub tps: u64,
}

/// One process row from an MS_PROCESS_MEAS block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessCpuRecord {
    pub report_time: String,
    pub host_id: String,
    pub process_name: String,
    pub cpu_usage: f64,
}

/// One host row from an MS_PERF_MEAS block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HostPerfRecord {
    pub report_time: String,
    pub host_id: String,
    /// 100 - idle percent.
    pub overall_cpu_usage: i64,
}

/// Everything extracted from one measurement log, in input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MeasLog {
    pub throughput: Vec<ThroughputRecord>,
    pub process_cpu: Vec<ProcessCpuRecord>,
    pub host_perf: Vec<HostPerfRecord>,
}
