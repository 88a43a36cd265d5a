//! Per-player analyses packaged for reporters.
//!
//! These bundle a player's series with the derived values a chart or a
//! report needs (trend line, summary statistics, distribution), so that
//! rendering code never recomputes statistics itself.

use gamescore_stats::{descriptive::DescriptiveStats, histogram::Histogram, regression::LinearTrend};
use serde::Serialize;

use crate::{
    error::ScoreTableError,
    table::{ScoreTable, ZScoreReference},
};

/// Absolute z-score beyond which a game counts as an outlier.
pub const Z_THRESHOLD: f64 = 2.0;

/// Number of bins in a z-score distribution.
pub const DISTRIBUTION_BINS: usize = 15;

/// A player's raw scores with a line of best fit.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreAnalysis {
    pub player: String,
    /// Observed `(game, score)` pairs in game order.
    pub scores: Vec<(usize, f64)>,
    /// Summary of the observed scores, `None` when the player never scored.
    pub summary: Option<DescriptiveStats>,
    /// Least-squares fit of score against position in [`scores`](Self::scores).
    ///
    /// The x axis is the position (0, 1, 2, ...) rather than the game index,
    /// so gaps left by missed games do not stretch the line.
    pub trend: Option<LinearTrend>,
}

impl ScoreAnalysis {
    /// # Examples
    ///
    /// ```
    /// use gamescore_table::{ScoreTable, analysis::ScoreAnalysis};
    ///
    /// let table = ScoreTable::new(
    ///     vec!["A".into()],
    ///     vec![vec![Some(1.0)], vec![None], vec![Some(3.0)]],
    /// )?;
    /// let analysis = ScoreAnalysis::new(&table, "A")?;
    /// assert_eq!(analysis.scores, vec![(0, 1.0), (2, 3.0)]);
    /// assert_eq!(analysis.trend.unwrap().slope, 2.0);
    /// # Ok::<(), gamescore_table::ScoreTableError>(())
    /// ```
    #[expect(clippy::cast_precision_loss)]
    pub fn new(table: &ScoreTable, player: &str) -> Result<Self, ScoreTableError> {
        let scores = table.scores_for(player)?;
        let summary = DescriptiveStats::new(scores.iter().map(|(_, score)| *score));
        let trend = LinearTrend::fit(
            scores
                .iter()
                .enumerate()
                .map(|(position, (_, score))| (position as f64, *score)),
        );
        Ok(Self {
            player: player.to_owned(),
            scores,
            summary,
            trend,
        })
    }

    /// Trend value at each point of the series, for drawing the fitted line.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn trend_line(&self) -> Vec<(f64, f64)> {
        let Some(trend) = self.trend else {
            return vec![];
        };
        (0..self.scores.len())
            .map(|position| {
                let x = position as f64;
                (x, trend.predict(x))
            })
            .collect()
    }
}

/// A player's z-scores with trend, outliers and distribution.
#[derive(Debug, Clone, Serialize)]
pub struct ZScoreAnalysis {
    pub player: String,
    pub reference: ZScoreReference,
    /// `(game, z)` pairs for every game with a usable reference.
    pub z_scores: Vec<(usize, f64)>,
    pub summary: Option<DescriptiveStats>,
    /// Least-squares fit of z against game index.
    pub trend: Option<LinearTrend>,
    /// Equal-width histogram of the z values.
    pub distribution: Histogram,
}

impl ZScoreAnalysis {
    /// # Examples
    ///
    /// ```
    /// use gamescore_table::{ScoreTable, ZScoreReference, analysis::ZScoreAnalysis};
    ///
    /// let table = ScoreTable::new(
    ///     vec!["A".into(), "B".into()],
    ///     vec![vec![Some(1.0), Some(3.0)], vec![Some(9.0), Some(5.0)]],
    /// )?;
    /// let analysis = ZScoreAnalysis::new(&table, "A", ZScoreReference::Computed)?;
    /// assert_eq!(analysis.z_scores, vec![(0, -1.0), (1, 1.0)]);
    /// assert_eq!(analysis.distribution.total(), 2);
    /// # Ok::<(), gamescore_table::ScoreTableError>(())
    /// ```
    #[expect(clippy::cast_precision_loss)]
    pub fn new(
        table: &ScoreTable,
        player: &str,
        reference: ZScoreReference,
    ) -> Result<Self, ScoreTableError> {
        let z_scores = table.z_scores_with(player, reference)?;
        let values = || z_scores.iter().map(|(_, z)| *z);
        let summary = DescriptiveStats::new(values());
        let trend = LinearTrend::fit(z_scores.iter().map(|(game, z)| (*game as f64, *z)));
        let distribution = Histogram::equal_width(values(), DISTRIBUTION_BINS);
        Ok(Self {
            player: player.to_owned(),
            reference,
            z_scores,
            summary,
            trend,
            distribution,
        })
    }

    /// Games where the player was more than [`Z_THRESHOLD`] deviations from the mean.
    pub fn outliers(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.z_scores
            .iter()
            .copied()
            .filter(|(_, z)| z.abs() > Z_THRESHOLD)
    }

    /// Trend value at each game of the series, for drawing the fitted line.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn trend_line(&self) -> Vec<(f64, f64)> {
        let Some(trend) = self.trend else {
            return vec![];
        };
        self.z_scores
            .iter()
            .map(|(game, _)| {
                let x = *game as f64;
                (x, trend.predict(x))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> ScoreTable {
        ScoreTable::new(
            ["A", "B", "Avg", "stddev"].map(String::from).to_vec(),
            vec![
                vec![Some(10.0), Some(20.0), Some(15.0), Some(5.0)],
                vec![None, Some(4.0), Some(4.0), Some(0.0)],
                vec![Some(30.0), Some(10.0), Some(20.0), Some(4.0)],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_score_analysis_summary() {
        let analysis = ScoreAnalysis::new(&table(), "A").unwrap();
        assert_eq!(analysis.scores, vec![(0, 10.0), (2, 30.0)]);
        let summary = analysis.summary.as_ref().unwrap();
        assert_eq!(summary.count, 2);
        assert_eq!(summary.mean, 20.0);
        assert_eq!(summary.std_dev, 10.0);
        // position-based x axis: slope per played game, not per game index
        assert_eq!(analysis.trend.unwrap().slope, 20.0);
        assert_eq!(analysis.trend_line(), vec![(0.0, 10.0), (1.0, 30.0)]);
    }

    #[test]
    fn test_score_analysis_without_scores() {
        let table = ScoreTable::new(vec!["A".to_owned()], vec![vec![None]]).unwrap();
        let analysis = ScoreAnalysis::new(&table, "A").unwrap();
        assert!(analysis.summary.is_none());
        assert!(analysis.trend.is_none());
        assert!(analysis.trend_line().is_empty());
    }

    #[test]
    fn test_score_analysis_unknown_player() {
        assert!(ScoreAnalysis::new(&table(), "Q").is_err());
    }

    #[test]
    fn test_z_score_analysis() {
        let analysis = ZScoreAnalysis::new(&table(), "A", ZScoreReference::Precomputed).unwrap();
        // game 1: no score for A (and zero stddev)
        assert_eq!(analysis.z_scores, vec![(0, -1.0), (2, 2.5)]);
        assert_eq!(analysis.outliers().collect::<Vec<_>>(), vec![(2, 2.5)]);
        assert_eq!(analysis.distribution.bins.len(), DISTRIBUTION_BINS);
        assert_eq!(analysis.distribution.total(), 2);
        assert_eq!(analysis.trend_line().len(), 2);
        let trend = analysis.trend.unwrap();
        assert!((trend.slope - 1.75).abs() < 1e-12);
    }

    #[test]
    fn test_z_score_analysis_serializes() {
        let analysis = ZScoreAnalysis::new(&table(), "B", ZScoreReference::Computed).unwrap();
        let json = serde_json::to_value(&analysis).unwrap();
        assert_eq!(json["reference"], "computed");
        assert_eq!(json["player"], "B");
    }
}
