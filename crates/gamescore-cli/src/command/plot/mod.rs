use gamescore_table::{
    ZScoreReference,
    analysis::{ScoreAnalysis, ZScoreAnalysis},
};

use crate::{command::TableArg, tui::Tui};

use self::app::{PlotApp, PlotView};

mod app;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlotArg {
    #[clap(flatten)]
    pub(crate) table: TableArg,

    /// Player (column name)
    pub(crate) player: String,

    /// Where per-game mean and standard deviation come from (`precomputed` or `computed`)
    #[arg(long, default_value_t = ZScoreReference::Precomputed)]
    pub(crate) reference: ZScoreReference,

    /// View shown first (`scores`, `zscores` or `distribution`)
    #[arg(long, default_value_t = PlotView::Scores)]
    pub(crate) view: PlotView,
}

pub(crate) fn run(arg: &PlotArg) -> anyhow::Result<()> {
    let table = arg.table.load()?;
    let scores = ScoreAnalysis::new(&table, &arg.player)?;
    let z_scores = ZScoreAnalysis::new(&table, &arg.player, arg.reference)?;
    if z_scores.z_scores.is_empty() {
        tracing::warn!(player = %arg.player, reference = %arg.reference, "no z-scores to plot");
    }

    let mut app = PlotApp::new(scores, z_scores, arg.view);
    Tui::new().run(&mut app)
}
