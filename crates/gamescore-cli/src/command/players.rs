use gamescore_table::table::is_reserved;
use serde::Serialize;

use crate::{
    command::{OutputArg, TableArg},
    util::Report,
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayersArg {
    #[clap(flatten)]
    pub(crate) table: TableArg,
    #[clap(flatten)]
    pub(crate) output: OutputArg,
}

#[derive(Debug, Serialize)]
struct PlayerList<'a> {
    num_games: usize,
    has_precomputed_stats: bool,
    players: Vec<&'a str>,
}

pub(crate) fn run(arg: &PlayersArg) -> anyhow::Result<()> {
    let table = arg.table.load()?;
    let list = PlayerList {
        num_games: table.num_games(),
        has_precomputed_stats: table.has_precomputed_stats(),
        players: table.players().collect(),
    };

    if let Some(output_path) = arg.output.json_target() {
        return Report::new(arg.table.scores_file(), list).save(output_path);
    }

    println!("{} games, {} columns", list.num_games, list.players.len());
    for player in &list.players {
        if is_reserved(player) {
            println!("  {player} (summary column)");
        } else {
            println!("  {player}");
        }
    }
    Ok(())
}
