use crate::{
    command::{OutputArg, TableArg},
    util::{Report, fmt_opt},
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct StatsArg {
    #[clap(flatten)]
    pub(crate) table: TableArg,

    /// First game (inclusive) [default: 0]
    #[arg(long)]
    pub(crate) start: Option<usize>,

    /// End game (exclusive) [default: number of games]
    #[arg(long)]
    pub(crate) end: Option<usize>,

    #[clap(flatten)]
    pub(crate) output: OutputArg,
}

pub(crate) fn run(arg: &StatsArg) -> anyhow::Result<()> {
    let table = arg.table.load()?;
    let start = arg.start.unwrap_or(0);
    let end = arg.end.unwrap_or(table.num_games());
    let stats = table.population_stats(start, end)?;

    if let Some(output_path) = arg.output.json_target() {
        return Report::new(arg.table.scores_file(), stats).save(output_path);
    }

    println!("  {:>6} {:>8} {:>12} {:>12}", "Game", "Players", "Mean", "Std Dev");
    println!("  {}", "-".repeat(41));
    for (game, mean, std_dev) in stats.iter() {
        let players = table.game_result(game)?.len();
        println!(
            "  {game:>6} {players:>8} {:>12} {:>12}",
            fmt_opt(mean),
            fmt_opt(std_dev)
        );
    }
    Ok(())
}
