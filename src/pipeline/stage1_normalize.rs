use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::model::record::ScoreRecord;
use crate::model::table::{Cell, RawTable};

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("malformed input: {0}")]
    MalformedInput(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DropReason {
    RoundLabel,
    Score,
}

/// A (row, player) cell that did not make it into the canonical records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DroppedCell {
    pub row: usize,
    pub player: String,
    pub round_label: String,
    pub reason: DropReason,
}

#[derive(Debug, Clone, Default)]
pub struct NormalizeOutput {
    pub records: Vec<ScoreRecord>,
    pub dropped: Vec<DroppedCell>,
}

pub fn normalize(table: &RawTable) -> Result<Vec<ScoreRecord>, NormalizeError> {
    normalize_with_report(table).map(|out| out.records)
}

/// Reshapes the wide table into records sorted by round number. Cells with an
/// unusable round label or score are dropped and reported, never fatal.
pub fn normalize_with_report(table: &RawTable) -> Result<NormalizeOutput, NormalizeError> {
    if table.columns.len() < 2 {
        return Err(NormalizeError::MalformedInput(format!(
            "expected a round column and at least one player column, found {} column(s)",
            table.columns.len()
        )));
    }
    if table.rows.is_empty() {
        return Err(NormalizeError::MalformedInput(
            "table has no rounds".to_string(),
        ));
    }

    let players = table.player_columns();
    let mut records = Vec::with_capacity(table.rows.len() * players.len());
    let mut dropped = Vec::new();

    for (row_idx, row) in table.rows.iter().enumerate() {
        let round_label = row.first().map(Cell::to_label).unwrap_or_default();
        let round_number = parse_round_number(&round_label);

        for (offset, player) in players.iter().enumerate() {
            let score = row.get(offset + 1).and_then(parse_score);
            let reason = match (round_number, score) {
                (Some(round_number), Some(score)) => {
                    records.push(ScoreRecord {
                        player: player.clone(),
                        round_label: round_label.clone(),
                        round_number,
                        score,
                    });
                    continue;
                }
                (None, _) => DropReason::RoundLabel,
                (Some(_), None) => DropReason::Score,
            };
            debug!(
                "dropping cell: row={}, player={}, round_label={:?}, reason={:?}",
                row_idx + 1,
                player,
                round_label,
                reason
            );
            dropped.push(DroppedCell {
                row: row_idx + 1,
                player: player.clone(),
                round_label: round_label.clone(),
                reason,
            });
        }
    }

    // Vec::sort_by_key is stable, so ties keep sheet order.
    records.sort_by_key(|r| r.round_number);

    info!(
        "normalized {} cells: records={}, dropped={}",
        table.rows.len() * players.len(),
        records.len(),
        dropped.len()
    );

    Ok(NormalizeOutput { records, dropped })
}

/// Keeps only the ASCII digits of the label, so `"12회"` is round 12.
pub fn parse_round_number(label: &str) -> Option<u64> {
    let digits: String = label.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse::<u64>().ok()
}

pub fn parse_score(cell: &Cell) -> Option<f64> {
    let value = match cell {
        Cell::Empty => return None,
        Cell::Number(v) => *v,
        Cell::Text(s) => s.trim().parse::<f64>().ok()?,
    };
    if value.is_finite() { Some(value) } else { None }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_normalize.rs"]
mod tests;
