use serde::{Deserialize, Serialize};

use crate::report::{ResultRow, SummaryData};
use crate::settings::GridSettings;

/// Archived analysis: enough to re-open the grid and re-join results without
/// the original session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub name: String,
    pub description: Option<String>,
    pub created_at_unix: u64,
    pub rows: u32,
    pub cols: u32,
    pub image_filename: Option<String>,
    pub grid_params: GridSettings,
    pub results: Vec<ResultRow>,
}

pub fn render_summary_json(data: &SummaryData) -> serde_json::Result<String> {
    let mut value = serde_json::to_value(data)?;
    // Aggregator contract key.
    if let Some(obj) = value.as_object_mut() {
        obj.insert(
            "tool".to_string(),
            serde_json::Value::String(data.tool_name.clone()),
        );
    }
    serde_json::to_string_pretty(&value)
}

pub fn render_analysis_record(record: &AnalysisRecord) -> serde_json::Result<String> {
    serde_json::to_string_pretty(record)
}

pub fn parse_analysis_record(text: &str) -> serde_json::Result<AnalysisRecord> {
    serde_json::from_str(text)
}
