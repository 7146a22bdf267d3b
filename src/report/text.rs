use crate::model::record::AnalyticsResult;
use crate::report::{SummaryData, format_f64_2, handicap_display, trend_word};

pub fn render_report_text(data: &SummaryData) -> String {
    let mut out = String::new();

    out.push_str("Golf Score Trend Report\n");
    out.push_str("=======================\n\n");
    out.push_str(&format!("Source: {}\n", data.source.path));
    out.push_str(&format!(
        "Rounds: {}  Players: {}  Records: {}  Dropped cells: {}\n",
        data.source.n_rounds,
        data.source.n_players,
        data.source.n_records,
        data.source.dropped.len()
    ));
    out.push_str(&format!(
        "Par: {:.0}  Handicap rounds: best {}\n\n",
        data.params.standard_par, data.params.best_n
    ));

    for (idx, result) in data.players.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", idx + 1, result.player));
        push_cards(&mut out, result);
        out.push('\n');
    }

    if !data.skipped.is_empty() {
        out.push_str("Skipped\n");
        for skipped in &data.skipped {
            out.push_str(&format!("- {}: {}\n", skipped.player, skipped.reason));
        }
    }

    out
}

fn push_cards(out: &mut String, result: &AnalyticsResult) {
    out.push_str(&format!(
        "Trend slope: {} strokes/round ({})\n",
        format_f64_2(result.slope),
        trend_word(result)
    ));
    out.push_str(&format!(
        "Expected total change: {:+.1} strokes\n",
        result.expected_total_change
    ));
    out.push_str(&format!("R²: {}\n", format_f64_2(result.r_squared)));
    out.push_str(&format!("Average score: {:.1}\n", result.average_score));
    out.push_str(&format!(
        "Best / worst: {:.0} / {:.0}\n",
        result.min_score, result.max_score
    ));
    out.push_str(&format!(
        "Estimated handicap: {} vs par {:.0}\n",
        handicap_display(result),
        result.standard_par
    ));
    out.push_str(&format!(
        "Best-{} average: {:.1} over {} rounds\n",
        result.best_n_count, result.handicap_best_n_average, result.round_count
    ));
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/text.rs"]
mod tests;
