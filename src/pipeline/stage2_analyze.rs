use thiserror::Error;
use tracing::debug;

use crate::model::params::AnalysisParams;
use crate::model::record::{AnalyticsResult, PlayerSeries, ScoreRecord, SeriesPoint};
use crate::stats::{linear_regression, max_f64, mean, mean_of_lowest, min_f64};

pub const MIN_ROUNDS: usize = 2;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum AnalyzeError {
    #[error("insufficient data for {player}: {found} round(s), need at least 2")]
    InsufficientData { player: String, found: usize },
    #[error("unknown player: {0}")]
    UnknownPlayer(String),
}

impl AnalyzeError {
    pub fn player(&self) -> &str {
        match self {
            AnalyzeError::InsufficientData { player, .. } => player,
            AnalyzeError::UnknownPlayer(player) => player,
        }
    }
}

#[derive(Debug, Clone)]
pub enum PlayerOutcome {
    Analyzed {
        result: AnalyticsResult,
        series: PlayerSeries,
    },
    Skipped(AnalyzeError),
}

/// Distinct players in order of first appearance in the canonical records.
pub fn players(records: &[ScoreRecord]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for record in records {
        if !out.iter().any(|p| p == &record.player) {
            out.push(record.player.clone());
        }
    }
    out
}

fn player_scores(records: &[ScoreRecord], player: &str) -> Vec<f64> {
    records
        .iter()
        .filter(|r| r.player == player)
        .map(|r| r.score)
        .collect()
}

pub fn analyze(
    records: &[ScoreRecord],
    player: &str,
    params: &AnalysisParams,
) -> Result<AnalyticsResult, AnalyzeError> {
    let scores = player_scores(records, player);
    let n = scores.len();
    if n < MIN_ROUNDS {
        return Err(AnalyzeError::InsufficientData {
            player: player.to_string(),
            found: n,
        });
    }

    let xs: Vec<f64> = (1..=n).map(|i| i as f64).collect();
    // Sequence indices are 1..=n with n >= 2, so x always varies.
    let fit = linear_regression(&xs, &scores).ok_or_else(|| AnalyzeError::InsufficientData {
        player: player.to_string(),
        found: n,
    })?;

    let average_score = mean(&scores);
    let best_n_count = params.best_n.clamp(1, n);
    let result = AnalyticsResult {
        player: player.to_string(),
        round_count: n,
        average_score,
        min_score: min_f64(&scores),
        max_score: max_f64(&scores),
        slope: fit.slope,
        intercept: fit.intercept,
        r_value: fit.r_value,
        r_squared: fit.r_squared,
        expected_total_change: fit.slope * n as f64,
        best_n_count,
        handicap_best_n_average: mean_of_lowest(&scores, best_n_count),
        standard_par: params.standard_par,
        handicap_over_par: average_score - params.standard_par,
    };
    debug!(
        "analyzed {}: rounds={}, slope={:.4}, r2={:.4}",
        player, n, result.slope, result.r_squared
    );
    Ok(result)
}

pub fn player_series(
    records: &[ScoreRecord],
    player: &str,
    result: &AnalyticsResult,
) -> PlayerSeries {
    let points = records
        .iter()
        .filter(|r| r.player == player)
        .enumerate()
        .map(|(idx, r)| {
            let sequence_index = idx + 1;
            SeriesPoint {
                sequence_index,
                round_number: r.round_number,
                round_label: r.round_label.clone(),
                score: r.score,
                trend: result.trend_at(sequence_index),
            }
        })
        .collect();
    PlayerSeries {
        player: player.to_string(),
        points,
    }
}

/// Resolves the players to analyze against the sheet's roster; an empty
/// selection means everyone on the roster, each name once.
pub fn select_players(
    roster: &[String],
    selected: &[String],
) -> Result<Vec<String>, AnalyzeError> {
    if selected.is_empty() {
        let mut out: Vec<String> = Vec::with_capacity(roster.len());
        for player in roster {
            if !out.contains(player) {
                out.push(player.clone());
            }
        }
        return Ok(out);
    }
    for player in selected {
        if !roster.contains(player) {
            return Err(AnalyzeError::UnknownPlayer(player.clone()));
        }
    }
    Ok(selected.to_vec())
}

/// Analyzes each player, recording short histories as skipped so one player
/// never aborts the batch.
pub fn analyze_roster(
    records: &[ScoreRecord],
    roster: &[String],
    params: &AnalysisParams,
) -> Vec<PlayerOutcome> {
    roster
        .iter()
        .map(|player| run_one(records, player, params))
        .collect()
}

fn run_one(records: &[ScoreRecord], player: &str, params: &AnalysisParams) -> PlayerOutcome {
    match analyze(records, player, params) {
        Ok(result) => {
            let series = player_series(records, player, &result);
            PlayerOutcome::Analyzed { result, series }
        }
        Err(err) => PlayerOutcome::Skipped(err),
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_analyze.rs"]
mod tests;
