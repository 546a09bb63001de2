//! Aggregation model: turn extracted records into the three reports.

pub mod host;
pub mod kpi;
pub mod process;
pub mod summary;

pub use host::{HostCpuRow, build_host_cpu_rows};
pub use kpi::{KpiOptions, KpiRow, build_kpi_rows};
pub use process::{ProcessCpuRow, build_process_cpu_rows};
pub use summary::{SummaryStats, summarize};

use crate::Result;
use crate::log::MeasLog;
use crate::topology::HostRoleRegistry;
use serde::Serialize;

/// Which hosts, process and SPA family to report on.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub host_ids: Vec<String>,
    pub process_name: String,
    pub kpi: KpiOptions,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            host_ids: ["0-0-1", "0-0-9", "0-0-2", "0-0-10", "0-0-5"]
                .map(String::from)
                .to_vec(),
            process_name: "MHRPROC".to_string(),
            kpi: KpiOptions::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HostCpuReport {
    pub host_ids: Vec<String>,
    pub rows: Vec<HostCpuRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiReport {
    pub tracked_prefix: String,
    pub rows: Vec<KpiRow>,
    pub summary: SummaryStats,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessCpuReport {
    pub process_name: String,
    pub rows: Vec<ProcessCpuRow>,
    pub summary: SummaryStats,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportData {
    pub hosts: HostCpuReport,
    pub kpi: KpiReport,
    pub process: ProcessCpuReport,
}

/// Build all three reports from one parsed log.
pub fn build_report_data(
    log: &MeasLog,
    registry: &HostRoleRegistry,
    opts: &ReportOptions,
) -> Result<ReportData> {
    let kpi_rows = build_kpi_rows(&log.throughput, &log.process_cpu, registry, &opts.kpi);
    let kpi_summary = summarize(&kpi_rows)?;

    let process_rows = build_process_cpu_rows(&log.process_cpu, registry, &opts.process_name);
    let process_summary = summarize(&process_rows)?;

    Ok(ReportData {
        hosts: HostCpuReport {
            host_ids: opts.host_ids.clone(),
            rows: build_host_cpu_rows(&log.host_perf, &opts.host_ids),
        },
        kpi: KpiReport {
            tracked_prefix: opts.kpi.tracked_prefix.clone(),
            rows: kpi_rows,
            summary: kpi_summary,
        },
        process: ProcessCpuReport {
            process_name: opts.process_name.clone(),
            rows: process_rows,
            summary: process_summary,
        },
    })
}

/// Report times in order of first appearance, without repeats.
pub(crate) fn distinct_report_times<'a>(times: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut out: Vec<&str> = Vec::new();
    for t in times {
        if !out.contains(&t) {
            out.push(t);
        }
    }
    out
}
