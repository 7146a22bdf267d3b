use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use thiserror::Error;
use tracing::info;

use crate::input::cache::LoadedSource;
use crate::model::params::AnalysisParams;
use crate::pipeline::stage2_analyze::PlayerOutcome;
use crate::report::json::render_summary_json;
use crate::report::text::render_report_text;
use crate::report::{SkippedPlayer, SourceMeta, SummaryData, ToolMeta};

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct Stage3Input<'a> {
    pub source: &'a LoadedSource,
    pub outcomes: &'a [PlayerOutcome],
    pub params: AnalysisParams,
    pub tool_name: String,
    pub tool_version: String,
}

pub fn write_reports(input: &Stage3Input<'_>, out_dir: &Path) -> Result<(), ReportError> {
    fs::create_dir_all(out_dir)?;

    let summary = build_summary(input);

    let summary_path = out_dir.join("summary.json");
    write_text(&summary_path, &render_summary_json(&summary)?)?;

    let report_path = out_dir.join("report.txt");
    write_text(&report_path, &render_report_text(&summary))?;

    let series_path = out_dir.join("series.tsv");
    write_series_tsv(input.outcomes, &series_path)?;

    info!(
        "wrote reports to {}: players={}, skipped={}",
        out_dir.display(),
        summary.players.len(),
        summary.skipped.len()
    );
    Ok(())
}

pub fn build_summary(input: &Stage3Input<'_>) -> SummaryData {
    let mut players = Vec::new();
    let mut skipped = Vec::new();
    for outcome in input.outcomes {
        match outcome {
            PlayerOutcome::Analyzed { result, .. } => players.push(result.clone()),
            PlayerOutcome::Skipped(err) => skipped.push(SkippedPlayer {
                player: err.player().to_string(),
                reason: err.to_string(),
            }),
        }
    }

    let source = input.source;
    SummaryData {
        tool: ToolMeta {
            name: input.tool_name.clone(),
            version: input.tool_version.clone(),
        },
        source: SourceMeta {
            path: source.path.display().to_string(),
            content_hash: format!("{:016x}", source.content_hash),
            n_rounds: source.table.n_rows(),
            n_players: source.table.player_columns().len(),
            n_records: source.normalized.records.len(),
            dropped: source.normalized.dropped.clone(),
        },
        params: input.params,
        players,
        skipped,
    }
}

/// Chart rows: one line per round with the fitted trend value alongside.
pub fn render_series_tsv(outcomes: &[PlayerOutcome]) -> String {
    let mut out = String::from("player\tsequence_index\tround_number\tround_label\tscore\ttrend\n");
    for outcome in outcomes {
        let PlayerOutcome::Analyzed { series, .. } = outcome else {
            continue;
        };
        for point in &series.points {
            out.push_str(&format!(
                "{}\t{}\t{}\t{}\t{}\t{:.6}\n",
                sanitize_field(&series.player),
                point.sequence_index,
                point.round_number,
                sanitize_field(&point.round_label),
                point.score,
                point.trend
            ));
        }
    }
    out
}

fn write_series_tsv(outcomes: &[PlayerOutcome], path: &Path) -> std::io::Result<()> {
    write_text(path, &render_series_tsv(outcomes))
}

fn sanitize_field(value: &str) -> String {
    value.replace(['\t', '\n', '\r'], " ")
}

fn write_text(path: &Path, contents: &str) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    w.write_all(contents.as_bytes())?;
    w.flush()?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_report.rs"]
mod tests;
