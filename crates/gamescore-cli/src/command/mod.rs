use std::{io, path::PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use gamescore_table::{LoaderConfig, ScoreTable};
use tracing_subscriber::EnvFilter;

use crate::util;

use self::{
    game::{RankingArg, ResultArg},
    players::PlayersArg,
    plot::PlotArg,
    scores::{ScoreArg, ScoresArg},
    stats::StatsArg,
    zscores::ZScoresArg,
};

mod game;
mod players;
mod plot;
mod scores;
mod stats;
mod zscores;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Log filter used when `RUST_LOG` is not set (e.g. `info`, `gamescore_table=debug`)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// What to compute
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// List the players of a score sheet
    Players(#[clap(flatten)] PlayersArg),
    /// Show every score of a player with summary and trend
    Scores(#[clap(flatten)] ScoresArg),
    /// Show a single score
    Score(#[clap(flatten)] ScoreArg),
    /// Rank the players of one game
    Ranking(#[clap(flatten)] RankingArg),
    /// Show the observed scores of one game
    Result(#[clap(flatten)] ResultArg),
    /// Per-game mean and population standard deviation
    Stats(#[clap(flatten)] StatsArg),
    /// Z-score normalized performance of a player
    #[command(name = "zscores")]
    ZScores(#[clap(flatten)] ZScoresArg),
    /// Chart a player's scores and z-scores in the terminal
    Plot(#[clap(flatten)] PlotArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    init_logging(&args.log_level)?;
    match args.mode {
        Mode::Players(arg) => players::run(&arg)?,
        Mode::Scores(arg) => scores::run_scores(&arg)?,
        Mode::Score(arg) => scores::run_score(&arg)?,
        Mode::Ranking(arg) => game::run_ranking(&arg)?,
        Mode::Result(arg) => game::run_result(&arg)?,
        Mode::Stats(arg) => stats::run(&arg)?,
        Mode::ZScores(arg) => zscores::run(&arg)?,
        Mode::Plot(arg) => plot::run(&arg)?,
    }
    Ok(())
}

fn init_logging(default_filter: &str) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_filter)
            .with_context(|| format!("Invalid log filter: {default_filter}"))?,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
    Ok(())
}

/// Score sheet location and layout, shared by every subcommand
#[derive(Debug, Clone, clap::Args)]
pub(crate) struct TableArg {
    /// Path to the score sheet (delimited text)
    scores_file: PathBuf,

    /// JSON file with loader settings (`skip_rows`, `first_player_column`, `delimiter`)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Lines to skip before the player name row [default: 1]
    #[arg(long)]
    skip_rows: Option<usize>,

    /// Column of the first player name, 0-based [default: 3]
    #[arg(long)]
    first_player_column: Option<usize>,

    /// Field delimiter [default: ,]
    #[arg(long)]
    delimiter: Option<char>,
}

impl TableArg {
    /// Loader settings: defaults, then the config file, then individual flags
    pub(crate) fn loader_config(&self) -> anyhow::Result<LoaderConfig> {
        let mut config = match &self.config {
            Some(path) => util::read_json_file::<LoaderConfig, _>("loader config", path)?,
            None => LoaderConfig::default(),
        };
        if let Some(skip_rows) = self.skip_rows {
            config.skip_rows = skip_rows;
        }
        if let Some(column) = self.first_player_column {
            config.first_player_column = column;
        }
        if let Some(delimiter) = self.delimiter {
            config.delimiter = delimiter;
        }
        Ok(config)
    }

    pub(crate) fn load(&self) -> anyhow::Result<ScoreTable> {
        util::read_scores_file(&self.scores_file, self.loader_config()?)
    }

    pub(crate) fn scores_file(&self) -> &PathBuf {
        &self.scores_file
    }
}

/// Machine-readable output selection
#[derive(Debug, Clone, Default, clap::Args)]
pub(crate) struct OutputArg {
    /// Print a JSON report instead of a text table
    #[arg(long)]
    json: bool,

    /// Write the JSON report to this file (implies --json)
    #[arg(long)]
    output: Option<PathBuf>,
}

impl OutputArg {
    /// Returns the report destination when JSON output was requested
    ///
    /// The outer `Option` says whether to emit JSON, the inner one whether to
    /// write it to a file rather than stdout.
    pub(crate) fn json_target(&self) -> Option<Option<PathBuf>> {
        (self.json || self.output.is_some()).then(|| self.output.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_defaults() {
        let args = CommandArgs::try_parse_from([
            "gamescore",
            "players",
            "sheet.csv",
            "--skip-rows",
            "0",
            "--delimiter",
            ";",
        ])
        .unwrap();
        let Mode::Players(arg) = args.mode else {
            panic!("expected players subcommand");
        };
        let config = arg.table.loader_config().unwrap();
        assert_eq!(config.skip_rows, 0);
        assert_eq!(config.first_player_column, 3);
        assert_eq!(config.delimiter, ';');
    }

    #[test]
    fn test_negative_game_index_parses() {
        let args =
            CommandArgs::try_parse_from(["gamescore", "ranking", "sheet.csv", "-1"]).unwrap();
        let Mode::Ranking(arg) = args.mode else {
            panic!("expected ranking subcommand");
        };
        assert_eq!(arg.game, -1);
    }

    #[test]
    fn test_output_implies_json() {
        let args = CommandArgs::try_parse_from([
            "gamescore",
            "stats",
            "sheet.csv",
            "--output",
            "stats.json",
        ])
        .unwrap();
        let Mode::Stats(arg) = args.mode else {
            panic!("expected stats subcommand");
        };
        assert_eq!(
            arg.output.json_target(),
            Some(Some(PathBuf::from("stats.json")))
        );
    }

    #[test]
    fn test_ranking_report_to_file() {
        use std::ffi::OsStr;

        let temp_dir = tempfile::TempDir::new().unwrap();
        let sheet = temp_dir.path().join("sheet.csv");
        let report = temp_dir.path().join("ranking.json");
        std::fs::write(&sheet, "exported,,,,,\ndate,event,notes,A,B,C\nd,e,,3,,9\n").unwrap();

        let args = CommandArgs::try_parse_from([
            OsStr::new("gamescore"),
            OsStr::new("ranking"),
            sheet.as_os_str(),
            OsStr::new("0"),
            OsStr::new("--output"),
            report.as_os_str(),
        ])
        .unwrap();
        let Mode::Ranking(arg) = args.mode else {
            panic!("expected ranking subcommand");
        };
        game::run_ranking(&arg).unwrap();

        let json = util::read_json_file::<serde_json::Value, _>("report", &report).unwrap();
        assert!(json["generated_at"].is_string());
        assert_eq!(json["source"], sheet.display().to_string());
        assert_eq!(json["data"]["game"], 0);
        let ranking = json["data"]["ranking"].as_array().unwrap();
        assert_eq!(ranking.len(), 2);
        assert_eq!(ranking[0]["player"], "C");
        assert_eq!(ranking[0]["rank"], 1);
        assert_eq!(ranking[1]["player"], "A");
    }

    #[test]
    fn test_cli_is_consistent() {
        use clap::CommandFactory as _;
        CommandArgs::command().debug_assert();
    }
}
