use crate::model::{HostCpuReport, KpiReport, ProcessCpuReport, ReportData, SummaryStats};
use comfy_table::presets::ASCII_FULL;
use comfy_table::{CellAlignment, Table};

const NOT_AVAILABLE: &str = "N/A";
const SUMMARY_LABEL: &str = "SUMMARY(AVERAGE)";

fn new_table(header: Vec<String>) -> Table {
    let mut table = Table::new();
    table.load_preset(ASCII_FULL).set_header(header);
    table
}

/// Right-align every column, like the legacy report.
fn finish(mut table: Table) -> String {
    for column in table.column_iter_mut() {
        column.set_cell_alignment(CellAlignment::Right);
    }
    table.to_string()
}

fn fmt2(x: f64) -> String {
    format!("{:.2}", x)
}

fn fmt_opt2(x: Option<f64>) -> String {
    x.map(fmt2).unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn avg2(summary: &SummaryStats, field: &str) -> String {
    fmt_opt2(summary.average(field))
}

fn separator(widths: &[usize]) -> Vec<String> {
    widths.iter().map(|&w| "-".repeat(w)).collect()
}

pub fn render_host_table(report: &HostCpuReport) -> String {
    let mut header = vec!["No".to_string(), "Report Time".to_string()];
    header.extend(report.host_ids.iter().cloned());
    let mut table = new_table(header);

    for (i, row) in report.rows.iter().enumerate() {
        let mut cells = vec![(i + 1).to_string(), row.report_time.clone()];
        cells.extend(row.overall_cpu_usage.iter().map(|u| match u {
            Some(v) => v.to_string(),
            None => NOT_AVAILABLE.to_string(),
        }));
        table.add_row(cells);
    }

    finish(table)
}

pub fn render_kpi_table(report: &KpiReport) -> String {
    let header = [
        "No", "Report Time", "TPS", "STD #", "STD %", "STD Cost", "CRT #", "CRT %", "CRT Cost",
        "NTF #", "NTF %", "NTF Cost",
    ];
    let mut table = new_table(header.map(String::from).to_vec());

    for (i, row) in report.rows.iter().enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            row.report_time.clone(),
            row.tps.to_string(),
            row.std_client_num.to_string(),
            fmt2(row.std_client_cpu_usage),
            fmt_opt2(row.std_client_call_cost),
            row.cr_spc_client_num.to_string(),
            fmt2(row.cr_spc_client_cpu_usage),
            fmt_opt2(row.cr_spc_client_call_cost),
            row.nt_spc_client_num.to_string(),
            fmt2(row.nt_spc_client_cpu_usage),
            fmt_opt2(row.nt_spc_client_call_cost),
        ]);
    }

    let s = &report.summary;
    table.add_row(separator(&[2, 16, 5, 5, 6, 8, 5, 6, 8, 5, 6, 8]));
    table.add_row(vec![
        ">".to_string(),
        SUMMARY_LABEL.to_string(),
        // Whole transactions, as in the rows.
        s.average("tps")
            .map(|t| (t as u64).to_string())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        "-".to_string(),
        avg2(s, "std_client_cpu_usage"),
        avg2(s, "std_client_call_cost"),
        "-".to_string(),
        avg2(s, "cr_spc_client_cpu_usage"),
        avg2(s, "cr_spc_client_call_cost"),
        "-".to_string(),
        avg2(s, "nt_spc_client_cpu_usage"),
        avg2(s, "nt_spc_client_call_cost"),
    ]);

    finish(table)
}

pub fn render_process_table(report: &ProcessCpuReport) -> String {
    let header = [
        "No", "Report Time", "Process", "PI #", "PI %", "DB #", "DB %", "IO #", "IO %", "AP #", "AP %",
    ];
    let mut table = new_table(header.map(String::from).to_vec());

    for (i, row) in report.rows.iter().enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            row.report_time.clone(),
            row.process_name.clone(),
            row.pilot_cnt.to_string(),
            fmt2(row.pilot_cpu),
            row.db_cnt.to_string(),
            fmt2(row.db_cpu),
            row.io_cnt.to_string(),
            fmt2(row.io_cpu),
            row.app_cnt.to_string(),
            fmt2(row.app_cpu),
        ]);
    }

    let s = &report.summary;
    table.add_row(separator(&[2, 16, 7, 4, 6, 4, 6, 4, 6, 4, 6]));
    table.add_row(vec![
        ">".to_string(),
        SUMMARY_LABEL.to_string(),
        report.process_name.clone(),
        "-".to_string(),
        avg2(s, "pilot_cpu"),
        "-".to_string(),
        avg2(s, "db_cpu"),
        "-".to_string(),
        avg2(s, "io_cpu"),
        "-".to_string(),
        avg2(s, "app_cpu"),
    ]);

    finish(table)
}

/// All three reports, titled, in the legacy order.
pub fn render_text_report(data: &ReportData) -> String {
    let mut out = String::new();

    out.push_str("Hosts Overall CPU Usage Report:\n");
    out.push_str(&render_host_table(&data.hosts));
    out.push_str("\n\n");

    out.push_str(&format!("{} SPA KPI report:\n", data.kpi.tracked_prefix));
    out.push_str(&render_kpi_table(&data.kpi));
    out.push_str("\n\n");

    out.push_str("Process CPU Usage Report:\n");
    out.push_str(&render_process_table(&data.process));
    out.push('\n');

    out
}
