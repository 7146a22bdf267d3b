use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use thiserror::Error;
use tracing::warn;

use golf_trend::input::cache::{CacheError, SourceCache};
use golf_trend::logging;
use golf_trend::model::params::{AnalysisParams, BEST_N_ROUNDS, STANDARD_PAR};
use golf_trend::pipeline::stage2_analyze::{
    AnalyzeError, PlayerOutcome, analyze_roster, players, select_players,
};
use golf_trend::pipeline::stage3_report::{
    ReportError, Stage3Input, build_summary, write_reports,
};
use golf_trend::report::text::render_report_text;

#[derive(Debug, Parser)]
#[command(
    name = "golf-trend",
    version,
    about = "Per-player golf score trends and best-N handicap estimates from a score sheet."
)]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Analyze players and write or print the report.
    Run(RunArgs),
    /// List the players that have at least one valid round.
    Players(PlayersArgs),
}

#[derive(Debug, Clone, Args)]
struct RunArgs {
    /// Score sheet (.xlsx/.xls/.ods, .csv, .tsv, optionally .gz).
    #[arg(long)]
    input: PathBuf,

    /// Player to analyze; repeat for several. Defaults to every player.
    #[arg(long = "player")]
    players: Vec<String>,

    /// Directory for summary.json, report.txt and series.tsv. Prints the report when omitted.
    #[arg(long)]
    out: Option<PathBuf>,

    #[arg(long, default_value_t = STANDARD_PAR, value_parser = parse_par)]
    par: f64,

    /// Number of lowest rounds averaged into the handicap estimate.
    #[arg(long = "best-n", default_value_t = BEST_N_ROUNDS, value_parser = parse_best_n)]
    best_n: usize,
}

#[derive(Debug, Clone, Args)]
struct PlayersArgs {
    #[arg(long)]
    input: PathBuf,
}

#[derive(Debug, Clone, PartialEq)]
struct RunConfig {
    input: PathBuf,
    players: Vec<String>,
    out_dir: Option<PathBuf>,
    params: AnalysisParams,
}

impl From<RunArgs> for RunConfig {
    fn from(args: RunArgs) -> Self {
        Self {
            input: args.input,
            players: args.players,
            out_dir: args.out,
            params: AnalysisParams {
                standard_par: args.par,
                best_n: args.best_n,
            },
        }
    }
}

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Load(#[from] CacheError),
    #[error(transparent)]
    Analyze(#[from] AnalyzeError),
    #[error(transparent)]
    Report(#[from] ReportError),
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    if let Err(err) = run(cli.command) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run(command: Command) -> Result<(), AppError> {
    let mut cache = SourceCache::new();
    match command {
        Command::Run(args) => run_analysis(&mut cache, &RunConfig::from(args)),
        Command::Players(args) => {
            let loaded = cache.load(&args.input)?;
            for player in players(&loaded.normalized.records) {
                println!("{player}");
            }
            Ok(())
        }
    }
}

fn run_analysis(cache: &mut SourceCache, config: &RunConfig) -> Result<(), AppError> {
    let loaded = cache.load(&config.input)?;
    let roster = loaded.table.player_columns().to_vec();
    let selected = select_players(&roster, &config.players)?;
    let outcomes = analyze_roster(&loaded.normalized.records, &selected, &config.params);

    for outcome in &outcomes {
        if let PlayerOutcome::Skipped(err) = outcome {
            if !config.players.is_empty() {
                return Err(err.clone().into());
            }
            warn!("skipping {}: {}", err.player(), err);
        }
    }

    let input = Stage3Input {
        source: &loaded,
        outcomes: &outcomes,
        params: config.params,
        tool_name: env!("CARGO_PKG_NAME").to_string(),
        tool_version: env!("CARGO_PKG_VERSION").to_string(),
    };
    match &config.out_dir {
        Some(out_dir) => write_reports(&input, out_dir)?,
        None => print!("{}", render_report_text(&build_summary(&input))),
    }
    Ok(())
}

fn parse_par(raw: &str) -> Result<f64, String> {
    let par: f64 = raw
        .parse()
        .map_err(|_| format!("invalid --par value: {raw}"))?;
    if !par.is_finite() {
        return Err("--par must be a finite number".to_string());
    }
    Ok(par)
}

fn parse_best_n(raw: &str) -> Result<usize, String> {
    let n: usize = raw
        .parse()
        .map_err(|_| format!("invalid --best-n value: {raw}"))?;
    if n == 0 {
        return Err("--best-n must be at least 1".to_string());
    }
    Ok(n)
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
