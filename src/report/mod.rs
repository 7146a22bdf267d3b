use serde::Serialize;

use crate::model::params::AnalysisParams;
use crate::model::record::AnalyticsResult;
use crate::pipeline::stage1_normalize::DroppedCell;

pub mod json;
pub mod text;

#[derive(Debug, Clone, Serialize)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SourceMeta {
    pub path: String,
    pub content_hash: String,
    pub n_rounds: usize,
    pub n_players: usize,
    pub n_records: usize,
    pub dropped: Vec<DroppedCell>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SkippedPlayer {
    pub player: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryData {
    pub tool: ToolMeta,
    pub source: SourceMeta,
    pub params: AnalysisParams,
    pub players: Vec<AnalyticsResult>,
    pub skipped: Vec<SkippedPlayer>,
}

pub fn format_f64_2(v: f64) -> String {
    format!("{:.2}", v)
}

/// Handicap card text: rounded average with its distance from par, e.g. `86 (+14)`.
pub fn handicap_display(result: &AnalyticsResult) -> String {
    format!(
        "{} ({:+.0})",
        result.average_score.round_ties_even() as i64,
        result.handicap_over_par
    )
}

pub fn trend_word(result: &AnalyticsResult) -> &'static str {
    if result.is_improving() {
        "improving"
    } else if result.slope > 0.0 {
        "worsening"
    } else {
        "flat"
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
