use super::*;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn rec(player: &str, round: u64, score: f64) -> ScoreRecord {
    ScoreRecord {
        player: player.to_string(),
        round_label: format!("{round}회"),
        round_number: round,
        score,
    }
}

fn scenario() -> Vec<ScoreRecord> {
    vec![
        rec("PlayerA", 1, 90.0),
        rec("PlayerB", 1, 85.0),
        rec("PlayerA", 2, 88.0),
        rec("PlayerB", 2, 80.0),
        rec("PlayerA", 3, 92.0),
        rec("PlayerB", 3, 78.0),
    ]
}

#[test]
fn test_scenario_player_b() {
    let records = scenario();
    let r = analyze(&records, "PlayerB", &AnalysisParams::standard()).unwrap();
    assert_eq!(r.round_count, 3);
    assert!(approx(r.average_score, 81.0));
    assert_eq!(r.min_score, 78.0);
    assert_eq!(r.max_score, 85.0);
    assert!(approx(r.slope, -3.5));
    assert!(approx(r.intercept, 88.0));
    assert!(approx(r.expected_total_change, -10.5));
    assert_eq!(r.best_n_count, 3);
    assert!(approx(r.handicap_best_n_average, 81.0));
    assert!(approx(r.handicap_over_par, 9.0));
    assert!(approx(r.r_squared, r.r_value * r.r_value));
    assert!(r.is_improving());

    let series = player_series(&records, "PlayerB", &r);
    let idx: Vec<usize> = series.points.iter().map(|p| p.sequence_index).collect();
    let scores: Vec<f64> = series.points.iter().map(|p| p.score).collect();
    assert_eq!(idx, vec![1, 2, 3]);
    assert_eq!(scores, vec![85.0, 80.0, 78.0]);
    assert!(approx(series.points[0].trend, 84.5));
    assert!(approx(series.points[2].trend, 77.5));
}

#[test]
fn test_constant_scores() {
    let records = vec![rec("A", 1, 90.0), rec("A", 2, 90.0), rec("A", 3, 90.0)];
    let r = analyze(&records, "A", &AnalysisParams::standard()).unwrap();
    assert_eq!(r.slope, 0.0);
    assert_eq!(r.r_squared, 0.0);
    assert_eq!(r.average_score, r.min_score);
    assert_eq!(r.min_score, r.max_score);
    assert_eq!(r.expected_total_change, 0.0);
}

#[test]
fn test_best_n_uses_lowest_five() {
    let scores = [95.0, 82.0, 90.0, 80.0, 100.0, 85.0, 88.0];
    let records: Vec<ScoreRecord> = scores
        .iter()
        .enumerate()
        .map(|(i, &s)| rec("A", i as u64 + 1, s))
        .collect();
    let r = analyze(&records, "A", &AnalysisParams::standard()).unwrap();
    assert_eq!(r.best_n_count, 5);
    assert!(approx(r.handicap_best_n_average, (80.0 + 82.0 + 85.0 + 88.0 + 90.0) / 5.0));
    assert!(r.handicap_best_n_average < r.average_score);
}

#[test]
fn test_best_n_never_exceeds_average() {
    let sets: [&[f64]; 4] = [
        &[72.0, 99.0],
        &[100.0, 90.0, 80.0, 70.0, 60.0, 50.0],
        &[88.0, 88.0, 87.0, 120.0, 91.0, 76.0, 101.0, 93.0],
        &[80.5, 80.25],
    ];
    for set in sets {
        let records: Vec<ScoreRecord> = set
            .iter()
            .enumerate()
            .map(|(i, &s)| rec("A", i as u64 + 1, s))
            .collect();
        let r = analyze(&records, "A", &AnalysisParams::standard()).unwrap();
        assert!(r.handicap_best_n_average <= r.average_score + 1e-9);
        if set.len() <= 5 {
            assert!(approx(r.handicap_best_n_average, r.average_score));
        }
    }
}

#[test]
fn test_custom_params() {
    let records = scenario();
    let params = AnalysisParams {
        standard_par: 70.0,
        best_n: 1,
    };
    let r = analyze(&records, "PlayerA", &params).unwrap();
    assert_eq!(r.best_n_count, 1);
    assert_eq!(r.handicap_best_n_average, 88.0);
    assert!(approx(r.handicap_over_par, 20.0));
    assert_eq!(r.standard_par, 70.0);
}

#[test]
fn test_insufficient_data() {
    let records = vec![rec("A", 1, 90.0), rec("B", 1, 80.0), rec("B", 2, 81.0)];
    assert_eq!(
        analyze(&records, "A", &AnalysisParams::standard()),
        Err(AnalyzeError::InsufficientData {
            player: "A".to_string(),
            found: 1
        })
    );
    assert_eq!(
        analyze(&records, "Nobody", &AnalysisParams::standard()),
        Err(AnalyzeError::InsufficientData {
            player: "Nobody".to_string(),
            found: 0
        })
    );
}

#[test]
fn test_duplicate_rounds_get_consecutive_indices() {
    let records = vec![rec("A", 1, 90.0), rec("A", 2, 85.0), rec("A", 2, 87.0)];
    let r = analyze(&records, "A", &AnalysisParams::standard()).unwrap();
    let series = player_series(&records, "A", &r);
    let idx: Vec<usize> = series.points.iter().map(|p| p.sequence_index).collect();
    let rounds: Vec<u64> = series.points.iter().map(|p| p.round_number).collect();
    assert_eq!(idx, vec![1, 2, 3]);
    assert_eq!(rounds, vec![1, 2, 2]);
}

#[test]
fn test_gapped_rounds_use_sequence_index() {
    let records = vec![rec("A", 1, 90.0), rec("A", 10, 88.0), rec("A", 50, 86.0)];
    let r = analyze(&records, "A", &AnalysisParams::standard()).unwrap();
    assert!(approx(r.slope, -2.0));
}

#[test]
fn test_players_first_appearance_order() {
    let records = scenario();
    assert_eq!(players(&records), vec!["PlayerA".to_string(), "PlayerB".to_string()]);
    assert!(players(&[]).is_empty());
}

#[test]
fn test_select_players() {
    let roster = vec!["A".to_string(), "B".to_string()];
    assert_eq!(select_players(&roster, &[]).unwrap(), roster);
    assert_eq!(
        select_players(&roster, &["B".to_string()]).unwrap(),
        vec!["B".to_string()]
    );
    assert_eq!(
        select_players(&roster, &["C".to_string()]),
        Err(AnalyzeError::UnknownPlayer("C".to_string()))
    );
}

#[test]
fn test_analyze_roster_skips_short_histories() {
    let records = vec![rec("A", 1, 90.0), rec("B", 1, 80.0), rec("B", 2, 81.0)];
    let roster = vec!["A".to_string(), "B".to_string()];
    let outcomes = analyze_roster(&records, &roster, &AnalysisParams::standard());
    assert_eq!(outcomes.len(), 2);
    match &outcomes[0] {
        PlayerOutcome::Skipped(err) => assert_eq!(err.player(), "A"),
        other => panic!("expected skip, got {other:?}"),
    }
    match &outcomes[1] {
        PlayerOutcome::Analyzed { result, series } => {
            assert_eq!(result.player, "B");
            assert_eq!(series.points.len(), 2);
        }
        other => panic!("expected analysis, got {other:?}"),
    }
}
