use serde::Serialize;

use crate::{
    command::{OutputArg, TableArg},
    util::Report,
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct RankingArg {
    #[clap(flatten)]
    pub(crate) table: TableArg,

    /// Game index, 0-based
    #[arg(allow_negative_numbers = true)]
    pub(crate) game: i64,

    #[clap(flatten)]
    pub(crate) output: OutputArg,
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ResultArg {
    #[clap(flatten)]
    pub(crate) table: TableArg,

    /// Game index, 0-based
    #[arg(allow_negative_numbers = true)]
    pub(crate) game: i64,

    #[clap(flatten)]
    pub(crate) output: OutputArg,
}

#[derive(Debug, Serialize)]
struct RankingEntry<'a> {
    rank: usize,
    player: &'a str,
    score: f64,
}

#[derive(Debug, Serialize)]
struct GameRanking<'a> {
    game: usize,
    ranking: Vec<RankingEntry<'a>>,
}

pub(crate) fn run_ranking(arg: &RankingArg) -> anyhow::Result<()> {
    let table = arg.table.load()?;
    let game = table.game_index(arg.game)?;
    let ranking = table
        .game_ranking(game)?
        .into_iter()
        .enumerate()
        .map(|(i, (player, score))| RankingEntry {
            rank: i + 1,
            player,
            score,
        })
        .collect::<Vec<_>>();

    if let Some(output_path) = arg.output.json_target() {
        let data = GameRanking { game, ranking };
        return Report::new(arg.table.scores_file(), data).save(output_path);
    }

    println!("Game {game}");
    println!();
    println!("  {:>4} {:<20} {:>12}", "Rank", "Player", "Score");
    println!("  {}", "-".repeat(38));
    for entry in &ranking {
        println!(
            "  {:>4} {:<20} {:>12.3}",
            entry.rank, entry.player, entry.score
        );
    }
    if ranking.is_empty() {
        println!("  (no scores recorded)");
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct GameResult {
    game: usize,
    scores: Vec<f64>,
}

pub(crate) fn run_result(arg: &ResultArg) -> anyhow::Result<()> {
    let table = arg.table.load()?;
    let game = table.game_index(arg.game)?;
    let scores = table.game_result(game)?;

    if let Some(output_path) = arg.output.json_target() {
        let data = GameResult { game, scores };
        return Report::new(arg.table.scores_file(), data).save(output_path);
    }

    let values = scores
        .iter()
        .map(|score| format!("{score:.3}"))
        .collect::<Vec<_>>();
    println!("Game {game}: [{}]", values.join(", "));
    Ok(())
}
