use gamescore_table::analysis::ScoreAnalysis;
use serde::Serialize;

use crate::{
    command::{OutputArg, TableArg},
    util::{Report, fmt_opt},
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ScoresArg {
    #[clap(flatten)]
    pub(crate) table: TableArg,

    /// Player (column name)
    pub(crate) player: String,

    #[clap(flatten)]
    pub(crate) output: OutputArg,
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ScoreArg {
    #[clap(flatten)]
    pub(crate) table: TableArg,

    /// Player (column name)
    pub(crate) player: String,

    /// Game index, 0-based
    #[arg(allow_negative_numbers = true)]
    pub(crate) game: i64,

    #[clap(flatten)]
    pub(crate) output: OutputArg,
}

pub(crate) fn run_scores(arg: &ScoresArg) -> anyhow::Result<()> {
    let table = arg.table.load()?;
    let analysis = ScoreAnalysis::new(&table, &arg.player)?;

    if let Some(output_path) = arg.output.json_target() {
        return Report::new(arg.table.scores_file(), analysis).save(output_path);
    }

    println!(
        "{}: {} of {} games scored",
        analysis.player,
        analysis.scores.len(),
        table.num_games()
    );
    println!();
    println!("  {:>6} {:>12} {:>12}", "Game", "Score", "Trend");
    println!("  {}", "-".repeat(32));
    let trend = analysis.trend_line();
    for (position, (game, score)) in analysis.scores.iter().enumerate() {
        let fitted = trend.get(position).map(|(_, y)| *y);
        println!("  {game:>6} {score:>12.3} {:>12}", fmt_opt(fitted));
    }

    if let Some(summary) = &analysis.summary {
        println!();
        println!(
            "  mean {:.3}  median {:.3}  std dev {:.3}  min {:.3}  max {:.3}",
            summary.mean, summary.median, summary.std_dev, summary.min, summary.max
        );
    }
    if let Some(trend) = analysis.trend {
        println!("  trend {:+.3} per game played", trend.slope);
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct SingleScore<'a> {
    player: &'a str,
    game: usize,
    score: Option<f64>,
}

pub(crate) fn run_score(arg: &ScoreArg) -> anyhow::Result<()> {
    let table = arg.table.load()?;
    let game = table.game_index(arg.game)?;
    let score = table.score_at(&arg.player, game)?;

    if let Some(output_path) = arg.output.json_target() {
        let data = SingleScore {
            player: &arg.player,
            game,
            score,
        };
        return Report::new(arg.table.scores_file(), data).save(output_path);
    }

    println!("{} game {game}: {}", arg.player, fmt_opt(score));
    Ok(())
}
