use serde::Serialize;

pub const STANDARD_PAR: f64 = 72.0;
pub const BEST_N_ROUNDS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnalysisParams {
    pub standard_par: f64,
    pub best_n: usize,
}

impl AnalysisParams {
    /// Par 72 over 18 holes, handicap from the best 5 rounds.
    pub fn standard() -> Self {
        Self {
            standard_par: STANDARD_PAR,
            best_n: BEST_N_ROUNDS,
        }
    }
}

impl Default for AnalysisParams {
    fn default() -> Self {
        Self::standard()
    }
}
