use crate::model::ReportData;

/// Render the report data as pretty-printed JSON.
///
/// Unavailable values (a host that did not report, a call cost with zero
/// throughput) come out as `null`.
pub fn render_json_report(data: &ReportData) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(data)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ReportOptions, build_report_data};
    use crate::topology::HostRoleRegistry;
    use serde_json::Value;

    #[test]
    fn empty_report_serializes() {
        let data = build_report_data(
            &Default::default(),
            &HostRoleRegistry::default(),
            &ReportOptions::default(),
        )
        .unwrap();
        let v: Value = serde_json::from_str(&render_json_report(&data).unwrap()).unwrap();
        assert_eq!(v["kpi"]["tracked_prefix"], "EPAY");
        assert_eq!(v["process"]["process_name"], "MHRPROC");
        assert_eq!(v["hosts"]["host_ids"].as_array().map(Vec::len), Some(5));
        assert!(v["kpi"]["rows"].as_array().is_some_and(Vec::is_empty));
    }
}
