use gamescore_table::{
    ZScoreReference,
    analysis::{Z_THRESHOLD, ZScoreAnalysis},
};

use crate::{
    command::{OutputArg, TableArg},
    util::Report,
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ZScoresArg {
    #[clap(flatten)]
    pub(crate) table: TableArg,

    /// Player (column name)
    pub(crate) player: String,

    /// Where per-game mean and standard deviation come from (`precomputed` or `computed`)
    #[arg(long, default_value_t = ZScoreReference::Precomputed)]
    pub(crate) reference: ZScoreReference,

    #[clap(flatten)]
    pub(crate) output: OutputArg,
}

pub(crate) fn run(arg: &ZScoresArg) -> anyhow::Result<()> {
    let table = arg.table.load()?;
    if arg.reference == ZScoreReference::Precomputed && !table.has_precomputed_stats() {
        tracing::warn!(
            "score sheet has no Avg/stddev columns; use --reference computed to derive them"
        );
    }
    let analysis = ZScoreAnalysis::new(&table, &arg.player, arg.reference)?;

    if let Some(output_path) = arg.output.json_target() {
        return Report::new(arg.table.scores_file(), analysis).save(output_path);
    }

    println!(
        "{}: {} z-scores ({} reference)",
        analysis.player,
        analysis.z_scores.len(),
        analysis.reference
    );
    println!();
    println!("  {:>6} {:>10}", "Game", "Z");
    println!("  {}", "-".repeat(17));
    for (game, z) in &analysis.z_scores {
        let marker = if z.abs() > Z_THRESHOLD { " *" } else { "" };
        println!("  {game:>6} {z:>10.3}{marker}");
    }

    if let Some(summary) = &analysis.summary {
        println!();
        println!(
            "  mean {:.3}  median {:.3}  std dev {:.3}",
            summary.mean, summary.median, summary.std_dev
        );
    }
    if let Some(trend) = analysis.trend {
        println!("  trend {:+.4} per game", trend.slope);
    }
    let outliers = analysis.outliers().count();
    if outliers > 0 {
        println!("  {outliers} game(s) beyond ±{Z_THRESHOLD} marked with *");
    }
    Ok(())
}
