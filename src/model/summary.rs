//! Per-field count and sum over a list of report rows, for the trailing
//! average line of each report.

use crate::Result;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct FieldStat {
    pub count: usize,
    pub sum: f64,
}

impl FieldStat {
    /// `sum / count`, or `None` when nothing was counted.
    pub fn average(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.sum / self.count as f64)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SummaryStats {
    fields: BTreeMap<String, FieldStat>,
}

impl SummaryStats {
    pub fn add(&mut self, field: &str, value: f64) {
        let stat = self.fields.entry(field.to_string()).or_default();
        stat.count += 1;
        stat.sum += value;
    }

    pub fn get(&self, field: &str) -> Option<&FieldStat> {
        self.fields.get(field)
    }

    /// Average of `field`; `None` if no row carried it.
    pub fn average(&self, field: &str) -> Option<f64> {
        self.fields.get(field).and_then(FieldStat::average)
    }
}

/// Accumulate every numeric field of every row.
///
/// Rows are looked at through their serialized form: numbers count, while
/// strings, nulls (absent values) and nested values are passed over.
pub fn summarize<T: Serialize>(rows: &[T]) -> Result<SummaryStats> {
    let mut stats = SummaryStats::default();
    for row in rows {
        let Value::Object(map) = serde_json::to_value(row)? else {
            continue;
        };
        for (field, value) in &map {
            if let Some(x) = value.as_f64() {
                stats.add(field, x);
            }
        }
    }
    Ok(stats)
}
