use crate::Result;
use crate::log::block::BlockScanner;
use crate::log::extract::{TableExtractors, TableKind};
use crate::log::row::MeasLog;
use anyhow::Context;
use std::fs;
use tracing::info;

/// Single pass over a measurement log, dispatching each recognised block to
/// its table extractor.
pub struct LogAnalyzer {
    scanner: BlockScanner,
    extractors: TableExtractors,
}

impl LogAnalyzer {
    pub fn new() -> Result<Self> {
        Ok(Self {
            scanner: BlockScanner::new()?,
            extractors: TableExtractors::new()?,
        })
    }

    /// Walk `lines` once. Blocks never overlap, so after a block is read the
    /// scan resumes on the line after its end delimiter.
    pub fn analyze(&self, lines: &[&str]) -> Result<MeasLog> {
        let mut out = MeasLog::default();

        let mut num = 0;
        while num < lines.len() {
            let Some(kind) = TableKind::detect(lines[num]) else {
                num += 1;
                continue;
            };

            let span = self.scanner.locate_block(lines, num)?;
            match kind {
                TableKind::Throughput => out
                    .throughput
                    .extend(self.extractors.extract_throughput(lines, &span)?),
                TableKind::ProcessCpu => out
                    .process_cpu
                    .extend(self.extractors.extract_process_cpu(lines, &span)?),
                TableKind::HostPerf => out
                    .host_perf
                    .extend(self.extractors.extract_host_perf(lines, &span)?),
            }
            info!(
                "Finished processing [{}] {} table",
                span.report_time,
                kind.table_name()
            );

            num = span.end + 1;
        }

        Ok(out)
    }
}

/// Read a measurement log dump and extract all known tables from it.
pub fn parse_log_file(path: &str) -> Result<MeasLog> {
    // Banner text may carry stray non-UTF-8 bytes; the tables are ASCII.
    let bytes = fs::read(path).with_context(|| format!("read measurement log {}", path))?;
    let text = String::from_utf8_lossy(&bytes);
    let lines: Vec<&str> = text.lines().collect();
    LogAnalyzer::new()?
        .analyze(&lines)
        .with_context(|| format!("parse measurement log {}", path))
}
