//! Overall CPU usage for a chosen list of hosts.

use crate::log::HostPerfRecord;
use crate::model::distinct_report_times;
use serde::Serialize;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HostCpuRow {
    pub report_time: String,
    /// Parallel to the requested host ids; `None` when the host did not report.
    pub overall_cpu_usage: Vec<Option<i64>>,
}

/// One row per report time in the perf records, in order of first appearance.
/// If a host reports more than once at the same time the last value wins.
pub fn build_host_cpu_rows(host_perf: &[HostPerfRecord], host_ids: &[String]) -> Vec<HostCpuRow> {
    if host_ids.is_empty() {
        warn!("no host ids given for the host CPU report");
        return Vec::new();
    }

    distinct_report_times(host_perf.iter().map(|h| h.report_time.as_str()))
        .into_iter()
        .map(|report_time| {
            let mut usage = vec![None; host_ids.len()];
            for rec in host_perf.iter().filter(|h| h.report_time == report_time) {
                for (slot, host_id) in usage.iter_mut().zip(host_ids) {
                    if *host_id == rec.host_id {
                        *slot = Some(rec.overall_cpu_usage);
                    }
                }
            }
            HostCpuRow {
                report_time: report_time.to_string(),
                overall_cpu_usage: usage,
            }
        })
        .collect()
}
