//! KPI rows for the tracked SPA family: throughput plus per-bucket client CPU
//! and call cost.

use crate::log::{ProcessCpuRecord, ThroughputRecord};
use crate::topology::{HostRoleRegistry, Role};
use serde::Serialize;

/// Knobs for KPI aggregation.
#[derive(Debug, Clone)]
pub struct KpiOptions {
    /// SPA names starting with this are tracked.
    pub tracked_prefix: String,
    /// Hosts of this role run the call routing clients.
    pub call_routing_role: Role,
    /// Hosts of this role run the notification clients.
    pub notification_role: Role,
    /// Per-client weight in the call cost formula.
    pub cost_scale: f64,
}

impl Default for KpiOptions {
    fn default() -> Self {
        Self {
            tracked_prefix: "EPAY".to_string(),
            call_routing_role: Role::DbPrimary,
            notification_role: Role::Io,
            cost_scale: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiRow {
    pub report_time: String,
    pub spa_name: String,
    pub tps: u64,

    pub std_client_num: usize,
    pub std_client_cpu_usage: f64,
    pub std_client_call_cost: Option<f64>,

    pub cr_spc_client_num: usize,
    pub cr_spc_client_cpu_usage: f64,
    pub cr_spc_client_call_cost: Option<f64>,

    pub nt_spc_client_num: usize,
    pub nt_spc_client_cpu_usage: f64,
    pub nt_spc_client_call_cost: Option<f64>,
}

#[derive(Debug, Default, Clone, Copy)]
struct Bucket {
    count: usize,
    cpu_sum: f64,
}

impl Bucket {
    fn add(&mut self, cpu_usage: f64) {
        self.count += 1;
        self.cpu_sum += cpu_usage;
    }

    fn average(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.cpu_sum / self.count as f64
        }
    }

    /// `avg * scale * count / tps`. An empty bucket costs 0; a non-empty one
    /// with zero throughput has no defined cost.
    fn call_cost(&self, tps: u64, scale: f64) -> Option<f64> {
        if self.count == 0 {
            Some(0.0)
        } else if tps == 0 {
            None
        } else {
            Some(self.average() * scale * self.count as f64 / tps as f64)
        }
    }
}

/// One row per tracked throughput record, in input order.
///
/// Each row's clients are the processes named `<spa_name>_*` reported at the
/// same time, split by host into call routing, notification and standard
/// (everything else).
pub fn build_kpi_rows(
    throughput: &[ThroughputRecord],
    process_cpu: &[ProcessCpuRecord],
    registry: &HostRoleRegistry,
    opts: &KpiOptions,
) -> Vec<KpiRow> {
    throughput
        .iter()
        .filter(|t| t.spa_name.starts_with(&opts.tracked_prefix))
        .map(|t| {
            let client_prefix = format!("{}_", t.spa_name);

            let mut std = Bucket::default();
            let mut cr = Bucket::default();
            let mut nt = Bucket::default();
            for p in process_cpu
                .iter()
                .filter(|p| p.report_time == t.report_time && p.process_name.starts_with(&client_prefix))
            {
                if registry.has_role(&p.host_id, opts.call_routing_role) {
                    cr.add(p.cpu_usage);
                } else if registry.has_role(&p.host_id, opts.notification_role) {
                    nt.add(p.cpu_usage);
                } else {
                    std.add(p.cpu_usage);
                }
            }

            KpiRow {
                report_time: t.report_time.clone(),
                spa_name: t.spa_name.clone(),
                tps: t.tps,
                std_client_num: std.count,
                std_client_cpu_usage: std.average(),
                std_client_call_cost: std.call_cost(t.tps, opts.cost_scale),
                cr_spc_client_num: cr.count,
                cr_spc_client_cpu_usage: cr.average(),
                cr_spc_client_call_cost: cr.call_cost(t.tps, opts.cost_scale),
                nt_spc_client_num: nt.count,
                nt_spc_client_cpu_usage: nt.average(),
                nt_spc_client_call_cost: nt.call_cost(t.tps, opts.cost_scale),
            }
        })
        .collect()
}
