use super::*;
use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("golf_trend_main_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

/// Kim has three rounds, Lee only one.
fn write_scores(dir: &std::path::Path) -> PathBuf {
    let path = dir.join("scores.csv");
    fs::write(&path, "Round,Kim,Lee\n1회,90,85\n2회,88,DNF\n3회,86,\n").unwrap();
    path
}

fn config(input: PathBuf, players: &[&str], out_dir: Option<PathBuf>) -> RunConfig {
    RunConfig {
        input,
        players: players.iter().map(|p| p.to_string()).collect(),
        out_dir,
        params: AnalysisParams::standard(),
    }
}

fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
    Cli::try_parse_from(std::iter::once("golf-trend").chain(args.iter().copied()))
}

#[test]
fn test_parse_run_defaults() {
    let cli = parse(&["run", "--input", "golf_scores.xlsx"]).unwrap();
    let Command::Run(args) = cli.command else {
        panic!("expected run");
    };
    let config = RunConfig::from(args);
    assert_eq!(config.input, PathBuf::from("golf_scores.xlsx"));
    assert!(config.players.is_empty());
    assert_eq!(config.out_dir, None);
    assert_eq!(config.params, AnalysisParams::standard());
}

#[test]
fn test_parse_run_repeated_players_and_overrides() {
    let cli = parse(&[
        "run", "--input", "s.csv", "--player", "Kim", "--player", "Lee", "--out", "out",
        "--par", "70", "--best-n", "8",
    ])
    .unwrap();
    let Command::Run(args) = cli.command else {
        panic!("expected run");
    };
    let config = RunConfig::from(args);
    assert_eq!(config.players, vec!["Kim".to_string(), "Lee".to_string()]);
    assert_eq!(config.out_dir, Some(PathBuf::from("out")));
    assert_eq!(config.params.standard_par, 70.0);
    assert_eq!(config.params.best_n, 8);
}

#[test]
fn test_parse_rejects_zero_best_n() {
    assert!(parse(&["run", "--input", "s.csv", "--best-n", "0"]).is_err());
}

#[test]
fn test_parse_requires_input() {
    assert!(parse(&["run"]).is_err());
    assert!(parse(&["players"]).is_err());
}

#[test]
fn test_parse_players_command() {
    let cli = parse(&["-v", "players", "--input", "s.tsv"]).unwrap();
    assert!(cli.verbose);
    assert!(matches!(cli.command, Command::Players(_)));
}

#[test]
fn test_parse_rejects_non_finite_par() {
    assert!(parse(&["run", "--input", "s.csv", "--par", "NaN"]).is_err());
    assert!(parse(&["run", "--input", "s.csv", "--par", "inf"]).is_err());
    assert!(parse(&["run", "--input", "s.csv", "--par", "-inf"]).is_err());
    assert!(parse(&["run", "--input", "s.csv", "--par", "71.5"]).is_ok());
}

#[test]
fn test_run_selected_short_history_fails() {
    let dir = make_temp_dir();
    let input = write_scores(&dir);
    let mut cache = SourceCache::new();
    let err = run_analysis(&mut cache, &config(input, &["Lee"], Some(dir.join("out"))))
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::Analyze(AnalyzeError::InsufficientData { ref player, found: 1 }) if player == "Lee"
    ));
    assert!(!dir.join("out").join("summary.json").exists());
}

#[test]
fn test_run_selected_unknown_player_fails() {
    let dir = make_temp_dir();
    let input = write_scores(&dir);
    let mut cache = SourceCache::new();
    let err = run_analysis(&mut cache, &config(input, &["Park"], None)).unwrap_err();
    assert!(matches!(
        err,
        AppError::Analyze(AnalyzeError::UnknownPlayer(_))
    ));
}

#[test]
fn test_run_all_players_skips_short_history() {
    let dir = make_temp_dir();
    let input = write_scores(&dir);
    let out_dir = dir.join("out");
    let mut cache = SourceCache::new();
    run_analysis(&mut cache, &config(input, &[], Some(out_dir.clone()))).unwrap();

    let json = fs::read_to_string(out_dir.join("summary.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let players = value["players"].as_array().unwrap();
    assert_eq!(players.len(), 1);
    assert_eq!(players[0]["player"], "Kim");
    assert_eq!(value["skipped"][0]["player"], "Lee");
    assert!(out_dir.join("series.tsv").exists());
}
