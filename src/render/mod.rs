//! Report output: legacy-style text tables or JSON.

pub mod json;
pub mod table;

pub use json::render_json_report;
pub use table::render_text_report;

use crate::model::ReportData;
use clap::ValueEnum;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Text tables
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
}

pub fn render_report(data: &ReportData, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Table => Ok(render_text_report(data)),
        OutputFormat::Json => render_json_report(data),
    }
}
