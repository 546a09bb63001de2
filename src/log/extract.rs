//! Row extractors for the three measurement tables.
//!
//! Tables are fixed-width dumps; only data rows match the row pattern, so
//! titles, column headers and footers fall through without complaint.

use crate::Result;
use crate::log::block::BlockSpan;
use crate::log::row::{HostPerfRecord, ProcessCpuRecord, ThroughputRecord};
use anyhow::Context;
use regex::Regex;
use tracing::debug;

/// The measurement tables we know how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    Throughput,
    ProcessCpu,
    HostPerf,
}

impl TableKind {
    pub const ALL: [TableKind; 3] = [TableKind::Throughput, TableKind::ProcessCpu, TableKind::HostPerf];

    /// Literal text identifying the table inside a block.
    pub fn marker(self) -> &'static str {
        match self {
            TableKind::Throughput => "Measurements for SA_SPAMEAS table",
            TableKind::ProcessCpu => "Measurements for MS_PROCESS_MEAS table",
            TableKind::HostPerf => "Control Computer Performance Measurements for MS_PERF_MEAS table",
        }
    }

    pub fn table_name(self) -> &'static str {
        match self {
            TableKind::Throughput => "SA_SPAMEAS",
            TableKind::ProcessCpu => "MS_PROCESS_MEAS",
            TableKind::HostPerf => "MS_PERF_MEAS",
        }
    }

    /// Which table, if any, `line` introduces.
    pub fn detect(line: &str) -> Option<TableKind> {
        Self::ALL.into_iter().find(|kind| line.contains(kind.marker()))
    }
}

pub struct TableExtractors {
    throughput_re: Regex,
    process_cpu_re: Regex,
    host_perf_re: Regex,
}

impl TableExtractors {
    pub fn new() -> Result<Self> {
        // ASCII digits only: `\d` is Unicode-aware.
        //
        // interval  spa_name  successes  (ignored)
        // 60        EPAYSPA   300        0
        let throughput_re = Regex::new(r"([0-9]+)\s+(\S+)\s+([0-9]+)\s+[0-9]+")?;
        // (ignored)  host_id  process_name  cpu_usage
        // 299        0-0-9    DIAMCL28I_2   18.89
        let process_cpu_re = Regex::new(r"[0-9]+\s+([0-9]+-[0-9]+-[0-9]+)\s+(\S+)\s+([0-9]+\.[0-9]+)")?;
        // (ignored)  host_id  v1  v2  v3  idle
        // 299        0-0-2    1   0   0   98
        let host_perf_re = Regex::new(r"[0-9]+\s+([0-9]+-[0-9]+-[0-9]+)\s+[0-9]+\s+[0-9]+\s+[0-9]+\s+([0-9]+)")?;
        Ok(Self {
            throughput_re,
            process_cpu_re,
            host_perf_re,
        })
    }

    pub fn extract_throughput(&self, lines: &[&str], span: &BlockSpan) -> Result<Vec<ThroughputRecord>> {
        let mut out = Vec::new();
        for i in span.body() {
            let Some(caps) = self.throughput_re.captures(lines[i]) else {
                continue;
            };
            let interval: u64 = caps[1]
                .parse()
                .with_context(|| format!("bad interval at line {}: {:?}", i + 1, lines[i]))?;
            let successes: u64 = caps[3]
                .parse()
                .with_context(|| format!("bad success count at line {}: {:?}", i + 1, lines[i]))?;
            if interval == 0 {
                debug!(line = i + 1, "skipping SPA row with zero interval");
                continue;
            }
            out.push(ThroughputRecord {
                report_time: span.report_time.clone(),
                spa_name: caps[2].to_string(),
                tps: successes / interval,
            });
        }
        Ok(out)
    }

    pub fn extract_process_cpu(&self, lines: &[&str], span: &BlockSpan) -> Result<Vec<ProcessCpuRecord>> {
        let mut out = Vec::new();
        for i in span.body() {
            let Some(caps) = self.process_cpu_re.captures(lines[i]) else {
                continue;
            };
            let cpu_usage: f64 = caps[3]
                .parse()
                .with_context(|| format!("bad cpu usage at line {}: {:?}", i + 1, lines[i]))?;
            out.push(ProcessCpuRecord {
                report_time: span.report_time.clone(),
                host_id: caps[1].to_string(),
                process_name: caps[2].to_string(),
                cpu_usage,
            });
        }
        Ok(out)
    }

    pub fn extract_host_perf(&self, lines: &[&str], span: &BlockSpan) -> Result<Vec<HostPerfRecord>> {
        let mut out = Vec::new();
        for i in span.body() {
            let Some(caps) = self.host_perf_re.captures(lines[i]) else {
                continue;
            };
            let idle: i64 = caps[2]
                .parse()
                .with_context(|| format!("bad idle percent at line {}: {:?}", i + 1, lines[i]))?;
            out.push(HostPerfRecord {
                report_time: span.report_time.clone(),
                host_id: caps[1].to_string(),
                overall_cpu_usage: 100 - idle,
            });
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn span_over(lines: &[&str]) -> BlockSpan {
        BlockSpan {
            start: 0,
            end: lines.len() - 1,
            report_time: "2016-03-08 10:15".to_string(),
        }
    }

    #[test]
    fn detects_each_marker() {
        assert_eq!(
            TableKind::detect("  Measurements for SA_SPAMEAS table"),
            Some(TableKind::Throughput)
        );
        assert_eq!(
            TableKind::detect("Measurements for MS_PROCESS_MEAS table (cont)"),
            Some(TableKind::ProcessCpu)
        );
        assert_eq!(
            TableKind::detect("  Control Computer Performance Measurements for MS_PERF_MEAS table"),
            Some(TableKind::HostPerf)
        );
        assert_eq!(TableKind::detect("Measurements for SOMETHING_ELSE table"), None);
    }

    #[test]
    fn throughput_rows_divide_and_truncate() {
        let lines = [
            "+++ 2016-03-08 10:15",
            "INTERVAL  SPA_NAME  SUCCESS  FAIL",
            "60 EPAYSPA 300 0",
            "60   DIAMCL  125   3",
            "+--",
        ];
        let got = TableExtractors::new()
            .unwrap()
            .extract_throughput(&lines, &span_over(&lines))
            .unwrap();
        assert_eq!(
            got,
            vec![
                ThroughputRecord {
                    report_time: "2016-03-08 10:15".to_string(),
                    spa_name: "EPAYSPA".to_string(),
                    tps: 5,
                },
                ThroughputRecord {
                    report_time: "2016-03-08 10:15".to_string(),
                    spa_name: "DIAMCL".to_string(),
                    tps: 2,
                },
            ]
        );
    }

    #[test]
    fn throughput_row_with_zero_interval_is_skipped() {
        let lines = ["+++", "0 EPAYSPA 300 0", "+--"];
        let got = TableExtractors::new()
            .unwrap()
            .extract_throughput(&lines, &span_over(&lines))
            .unwrap();
        assert!(got.is_empty());
    }

    #[test]
    fn process_rows_round_trip() {
        let rec = ProcessCpuRecord {
            report_time: "2016-03-08 10:15".to_string(),
            host_id: "0-0-9".to_string(),
            process_name: "DIAMCL28I_2".to_string(),
            cpu_usage: 18.89,
        };
        let row = format!("299  {}   {}      {:.2}", rec.host_id, rec.process_name, rec.cpu_usage);
        let lines = ["+++", "POLL HOST PROCESS CPU", row.as_str(), "", "+--"];
        let got = TableExtractors::new()
            .unwrap()
            .extract_process_cpu(&lines, &span_over(&lines))
            .unwrap();
        assert_eq!(got, vec![rec]);
    }

    #[test]
    fn host_perf_rows_invert_idle() {
        let rec = HostPerfRecord {
            report_time: "2016-03-08 10:15".to_string(),
            host_id: "0-0-2".to_string(),
            overall_cpu_usage: 2,
        };
        let row = format!(
            "          299  {}              1             0              0          {}",
            rec.host_id,
            100 - rec.overall_cpu_usage
        );
        let lines = ["+++", row.as_str(), "+--"];
        let got = TableExtractors::new()
            .unwrap()
            .extract_host_perf(&lines, &span_over(&lines))
            .unwrap();
        assert_eq!(got, vec![rec]);
    }

    #[test]
    fn delimiter_lines_are_not_scanned() {
        // The begin line itself would satisfy the throughput pattern.
        let lines = ["+++ 10 X 20 30", "+--"];
        let got = TableExtractors::new()
            .unwrap()
            .extract_throughput(&lines, &span_over(&lines))
            .unwrap();
        assert!(got.is_empty());
    }
}
