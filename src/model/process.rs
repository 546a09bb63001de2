//! CPU usage of one named process, averaged per host role.

use crate::log::ProcessCpuRecord;
use crate::model::distinct_report_times;
use crate::topology::{HostRoleRegistry, Role};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessCpuRow {
    pub report_time: String,
    pub process_name: String,
    pub pilot_cnt: usize,
    pub pilot_cpu: f64,
    pub db_cnt: usize,
    pub db_cpu: f64,
    pub io_cnt: usize,
    pub io_cpu: f64,
    pub app_cnt: usize,
    pub app_cpu: f64,
}

fn average(sum: f64, count: usize) -> f64 {
    if count == 0 { 0.0 } else { sum / count as f64 }
}

/// One row per report time seen in any process record, in order of first
/// appearance. Hosts fall into pilot, io, database (either db role) or
/// application, checked in that order.
pub fn build_process_cpu_rows(
    process_cpu: &[ProcessCpuRecord],
    registry: &HostRoleRegistry,
    process_name: &str,
) -> Vec<ProcessCpuRow> {
    let db_hosts = registry.hosts_in_any(&Role::DATABASE);

    distinct_report_times(process_cpu.iter().map(|p| p.report_time.as_str()))
        .into_iter()
        .map(|report_time| {
            let (mut pilot_cnt, mut pilot_sum) = (0, 0.0);
            let (mut db_cnt, mut db_sum) = (0, 0.0);
            let (mut io_cnt, mut io_sum) = (0, 0.0);
            let (mut app_cnt, mut app_sum) = (0, 0.0);

            for p in process_cpu
                .iter()
                .filter(|p| p.process_name == process_name && p.report_time == report_time)
            {
                let host = p.host_id.as_str();
                if registry.has_role(host, Role::Pilot) {
                    pilot_cnt += 1;
                    pilot_sum += p.cpu_usage;
                } else if registry.has_role(host, Role::Io) {
                    io_cnt += 1;
                    io_sum += p.cpu_usage;
                } else if db_hosts.contains(host) {
                    db_cnt += 1;
                    db_sum += p.cpu_usage;
                } else {
                    app_cnt += 1;
                    app_sum += p.cpu_usage;
                }
            }

            ProcessCpuRow {
                report_time: report_time.to_string(),
                process_name: process_name.to_string(),
                pilot_cnt,
                pilot_cpu: average(pilot_sum, pilot_cnt),
                db_cnt,
                db_cpu: average(db_sum, db_cnt),
                io_cnt,
                io_cpu: average(io_sum, io_cnt),
                app_cnt,
                app_cpu: average(app_sum, app_cnt),
            }
        })
        .collect()
}
