use serde::Serialize;

/// Canonical long-form unit: one valid (round, player) score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreRecord {
    pub player: String,
    pub round_label: String,
    pub round_number: u64,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub sequence_index: usize,
    pub round_number: u64,
    pub round_label: String,
    pub score: f64,
    pub trend: f64,
}

/// A player's rounds in canonical order, ready for charting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerSeries {
    pub player: String,
    pub points: Vec<SeriesPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsResult {
    pub player: String,
    pub round_count: usize,
    pub average_score: f64,
    pub min_score: f64,
    pub max_score: f64,
    pub slope: f64,
    pub intercept: f64,
    pub r_value: f64,
    pub r_squared: f64,
    pub expected_total_change: f64,
    pub best_n_count: usize,
    pub handicap_best_n_average: f64,
    pub standard_par: f64,
    pub handicap_over_par: f64,
}

impl AnalyticsResult {
    /// Trend-line value at a 1-based sequence index.
    pub fn trend_at(&self, sequence_index: usize) -> f64 {
        self.slope * sequence_index as f64 + self.intercept
    }

    /// Lower scores are better, so a falling trend is an improvement.
    pub fn is_improving(&self) -> bool {
        self.slope < 0.0
    }
}
