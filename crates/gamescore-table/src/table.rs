//! In-memory score table and its queries.
//!
//! A [`ScoreTable`] is an immutable grid of games (rows) by players (columns).
//! Each cell is an `Option<f64>`: `None` marks a missing score, which is never
//! confused with a score of zero.
//!
//! # Reserved columns
//!
//! Two column names are reserved for precomputed per-game statistics:
//! [`AVG_PLAYER`] (`"Avg"`) and [`STDDEV_PLAYER`] (`"stddev"`). They can be
//! queried like any player with [`ScoreTable::scores_for`] and
//! [`ScoreTable::score_at`], but they never take part in rankings or in the
//! population a game's statistics are computed over.
//!
//! # Examples
//!
//! ```
//! use gamescore_table::ScoreTable;
//!
//! let table = ScoreTable::new(
//!     vec!["A".into(), "B".into(), "Avg".into(), "stddev".into()],
//!     vec![vec![Some(10.0), Some(20.0), Some(15.0), Some(5.0)]],
//! )?;
//!
//! assert_eq!(table.game_ranking(0)?, vec![("B", 20.0), ("A", 10.0)]);
//! assert_eq!(table.z_scores("B")?, vec![(0, 1.0)]);
//!
//! let stats = table.population_stats(0, 1)?;
//! assert_eq!(stats.mean, vec![Some(15.0)]);
//! assert_eq!(stats.std_dev, vec![Some(5.0)]);
//! # Ok::<(), gamescore_table::ScoreTableError>(())
//! ```

use std::{collections::HashMap, iter};

use gamescore_stats::descriptive::Moments;
use serde::Serialize;
use tracing::debug;

use crate::error::ScoreTableError;

/// Column holding the precomputed per-game average.
pub const AVG_PLAYER: &str = "Avg";
/// Column holding the precomputed per-game population standard deviation.
pub const STDDEV_PLAYER: &str = "stddev";

/// Returns whether `name` is one of the reserved statistic columns.
#[must_use]
pub fn is_reserved(name: &str) -> bool {
    name == AVG_PLAYER || name == STDDEV_PLAYER
}

/// Where z-score normalization takes each game's average and standard deviation from.
#[derive(
    Default,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    derive_more::Display,
    derive_more::FromStr,
)]
#[serde(rename_all = "lowercase")]
pub enum ZScoreReference {
    /// The `Avg` and `stddev` columns stored in the source data.
    #[default]
    #[display("precomputed")]
    Precomputed,
    /// Statistics computed from the table with [`ScoreTable::population_stats`].
    #[display("computed")]
    Computed,
}

/// Per-game mean and population standard deviation over a range of games.
///
/// `mean[i]` and `std_dev[i]` describe game `start + i`. Both are `None` for a
/// game without any observed score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopulationStats {
    /// Index of the first game described.
    pub start: usize,
    /// Arithmetic mean of each game's observed scores.
    pub mean: Vec<Option<f64>>,
    /// Population standard deviation (divisor = count) of each game's observed scores.
    pub std_dev: Vec<Option<f64>>,
}

impl PopulationStats {
    /// Iterates over `(game, mean, std_dev)` triples in game order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, Option<f64>, Option<f64>)> + '_ {
        iter::zip(&self.mean, &self.std_dev)
            .enumerate()
            .map(|(offset, (mean, std_dev))| (self.start + offset, *mean, *std_dev))
    }
}

/// Immutable table of per-game scores, keyed by player name.
#[derive(Debug, Clone)]
pub struct ScoreTable {
    players: Vec<String>,
    columns: HashMap<String, usize>,
    /// Row-major cells, `num_games * players.len()` long.
    scores: Vec<Option<f64>>,
    num_games: usize,
    avg_column: Option<usize>,
    stddev_column: Option<usize>,
}

impl ScoreTable {
    /// Builds a table from player names and one row of cells per game.
    ///
    /// Every row must hold exactly one cell per player.
    ///
    /// # Errors
    ///
    /// * [`ScoreTableError::DuplicatePlayer`] - if a name appears twice
    /// * [`ScoreTableError::RowWidthMismatch`] - if a row has the wrong number of cells
    pub fn new(
        players: Vec<String>,
        rows: Vec<Vec<Option<f64>>>,
    ) -> Result<Self, ScoreTableError> {
        let mut columns = HashMap::with_capacity(players.len());
        for (column, name) in players.iter().enumerate() {
            if columns.insert(name.clone(), column).is_some() {
                return Err(ScoreTableError::DuplicatePlayer { name: name.clone() });
            }
        }

        let num_games = rows.len();
        let mut scores = Vec::with_capacity(num_games * players.len());
        for (row, cells) in rows.into_iter().enumerate() {
            if cells.len() != players.len() {
                return Err(ScoreTableError::RowWidthMismatch {
                    row,
                    expected: players.len(),
                    actual: cells.len(),
                });
            }
            scores.extend(cells);
        }

        let avg_column = columns.get(AVG_PLAYER).copied();
        let stddev_column = columns.get(STDDEV_PLAYER).copied();
        debug!(
            players = players.len(),
            games = num_games,
            precomputed_stats = avg_column.is_some() && stddev_column.is_some(),
            "score table built"
        );

        Ok(Self {
            players,
            columns,
            scores,
            num_games,
            avg_column,
            stddev_column,
        })
    }

    /// Number of games (rows).
    #[must_use]
    pub fn num_games(&self) -> usize {
        self.num_games
    }

    /// All column names in header order, reserved columns included.
    pub fn players(&self) -> impl Iterator<Item = &str> + '_ {
        self.players.iter().map(String::as_str)
    }

    /// Column names in header order, without the reserved statistic columns.
    pub fn competitors(&self) -> impl Iterator<Item = &str> + '_ {
        self.players().filter(|name| !is_reserved(name))
    }

    /// Returns whether both the `Avg` and `stddev` columns are present.
    #[must_use]
    pub fn has_precomputed_stats(&self) -> bool {
        self.avg_column.is_some() && self.stddev_column.is_some()
    }

    /// Validates a signed game index coming from user input.
    ///
    /// # Examples
    ///
    /// ```
    /// # use gamescore_table::{ScoreTable, ScoreTableError};
    /// let table = ScoreTable::new(vec!["A".into()], vec![vec![Some(1.0)]])?;
    /// assert_eq!(table.game_index(0)?, 0);
    /// assert_eq!(
    ///     table.game_index(-1),
    ///     Err(ScoreTableError::IndexOutOfRange { index: -1, rows: 1 })
    /// );
    /// # Ok::<(), ScoreTableError>(())
    /// ```
    pub fn game_index(&self, index: i64) -> Result<usize, ScoreTableError> {
        usize::try_from(index)
            .ok()
            .filter(|game| *game < self.num_games)
            .ok_or(ScoreTableError::IndexOutOfRange {
                index,
                rows: self.num_games,
            })
    }

    /// All observed scores of `player`, as `(game, score)` pairs in game order.
    pub fn scores_for(&self, player: &str) -> Result<Vec<(usize, f64)>, ScoreTableError> {
        let column = self.column(player)?;
        Ok((0..self.num_games)
            .filter_map(|game| self.cell(game, column).map(|score| (game, score)))
            .collect())
    }

    /// The score of `player` in `game`, or `None` if it is missing.
    pub fn score_at(&self, player: &str, game: usize) -> Result<Option<f64>, ScoreTableError> {
        let column = self.column(player)?;
        self.check_game(game)?;
        Ok(self.cell(game, column))
    }

    /// Players with a score in `game`, best first.
    ///
    /// Reserved columns and missing scores are left out. Equal scores keep
    /// header order.
    pub fn game_ranking(&self, game: usize) -> Result<Vec<(&str, f64)>, ScoreTableError> {
        self.check_game(game)?;
        let mut ranking = self
            .row(game)
            .iter()
            .enumerate()
            .filter(|(column, _)| !self.is_reserved_column(*column))
            .filter_map(|(column, score)| score.map(|score| (self.players[column].as_str(), score)))
            .collect::<Vec<_>>();
        // stable, so ties stay in header order
        ranking.sort_by(|(_, a), (_, b)| b.total_cmp(a));
        Ok(ranking)
    }

    /// Observed scores in `game`, without reserved columns, in header order.
    pub fn game_result(&self, game: usize) -> Result<Vec<f64>, ScoreTableError> {
        self.check_game(game)?;
        Ok(self.observed(game).collect())
    }

    /// Mean and population standard deviation of every game in `start..end`.
    ///
    /// Each game's population is exactly [`game_result`](Self::game_result).
    ///
    /// # Errors
    ///
    /// * [`ScoreTableError::InvalidRange`] - if `start > end`
    /// * [`ScoreTableError::IndexOutOfRange`] - if `end` exceeds the number of games
    pub fn population_stats(
        &self,
        start: usize,
        end: usize,
    ) -> Result<PopulationStats, ScoreTableError> {
        if start > end {
            return Err(ScoreTableError::InvalidRange { start, end });
        }
        if end > self.num_games {
            return Err(ScoreTableError::out_of_range(end, self.num_games));
        }

        let (mean, std_dev) = (start..end)
            .map(|game| {
                let moments = Moments::from_values(self.observed(game));
                (
                    moments.map(|m| m.mean),
                    moments.as_ref().map(Moments::std_dev),
                )
            })
            .unzip();

        Ok(PopulationStats {
            start,
            mean,
            std_dev,
        })
    }

    /// Z-scores of `player` against the precomputed `Avg`/`stddev` columns.
    ///
    /// Same as [`z_scores_with`](Self::z_scores_with) with
    /// [`ZScoreReference::Precomputed`].
    pub fn z_scores(&self, player: &str) -> Result<Vec<(usize, f64)>, ScoreTableError> {
        self.z_scores_with(player, ZScoreReference::Precomputed)
    }

    /// Z-scores `(score - avg) / stddev` of `player`, as `(game, z)` pairs.
    ///
    /// A game contributes only when the player has a score there, the
    /// reference average and standard deviation are both known, and the
    /// standard deviation is positive. Other games are skipped. With
    /// [`ZScoreReference::Precomputed`] and no `Avg`/`stddev` columns the
    /// result is empty.
    pub fn z_scores_with(
        &self,
        player: &str,
        reference: ZScoreReference,
    ) -> Result<Vec<(usize, f64)>, ScoreTableError> {
        let column = self.column(player)?;

        let references = match reference {
            ZScoreReference::Precomputed => {
                let (Some(avg), Some(stddev)) = (self.avg_column, self.stddev_column) else {
                    debug!(player, "no precomputed Avg/stddev columns");
                    return Ok(vec![]);
                };
                (0..self.num_games)
                    .map(|game| (self.cell(game, avg), self.cell(game, stddev)))
                    .collect::<Vec<_>>()
            }
            ZScoreReference::Computed => {
                let stats = self.population_stats(0, self.num_games)?;
                iter::zip(stats.mean, stats.std_dev).collect()
            }
        };

        Ok(references
            .into_iter()
            .enumerate()
            .filter_map(|(game, (avg, stddev))| {
                let score = self.cell(game, column)?;
                let (avg, stddev) = (avg?, stddev?);
                (stddev > 0.0).then(|| (game, (score - avg) / stddev))
            })
            .collect())
    }

    fn column(&self, player: &str) -> Result<usize, ScoreTableError> {
        self.columns
            .get(player)
            .copied()
            .ok_or_else(|| ScoreTableError::UnknownPlayer {
                name: player.to_owned(),
            })
    }

    fn check_game(&self, game: usize) -> Result<(), ScoreTableError> {
        if game < self.num_games {
            Ok(())
        } else {
            Err(ScoreTableError::out_of_range(game, self.num_games))
        }
    }

    fn is_reserved_column(&self, column: usize) -> bool {
        self.avg_column == Some(column) || self.stddev_column == Some(column)
    }

    fn row(&self, game: usize) -> &[Option<f64>] {
        let width = self.players.len();
        &self.scores[game * width..(game + 1) * width]
    }

    fn cell(&self, game: usize, column: usize) -> Option<f64> {
        self.row(game)[column]
    }

    fn observed(&self, game: usize) -> impl Iterator<Item = f64> + '_ {
        self.row(game)
            .iter()
            .enumerate()
            .filter(|(column, _)| !self.is_reserved_column(*column))
            .filter_map(|(_, score)| *score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(names: &[&str]) -> Vec<String> {
        names.iter().map(|&name| name.to_owned()).collect()
    }

    /// Three players over four games with precomputed statistics.
    ///
    /// Game 2 has a zero stddev, game 3 has no average.
    fn sample_table() -> ScoreTable {
        ScoreTable::new(
            names(&["A", "B", "C", "Avg", "stddev"]),
            vec![
                vec![Some(10.0), Some(20.0), None, Some(15.0), Some(5.0)],
                vec![Some(3.0), Some(0.0), Some(3.0), Some(2.0), Some(1.5)],
                vec![Some(7.0), Some(7.0), Some(7.0), Some(7.0), Some(0.0)],
                vec![Some(1.0), None, Some(2.0), None, Some(1.0)],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_duplicate_player_rejected() {
        let err = ScoreTable::new(names(&["A", "B", "A"]), vec![]).unwrap_err();
        assert_eq!(
            err,
            ScoreTableError::DuplicatePlayer {
                name: "A".to_owned()
            }
        );
    }

    #[test]
    fn test_row_width_mismatch() {
        let err = ScoreTable::new(names(&["A", "B"]), vec![vec![Some(1.0), None], vec![None]])
            .unwrap_err();
        assert_eq!(
            err,
            ScoreTableError::RowWidthMismatch {
                row: 1,
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn test_scores_for_skips_missing() {
        let table = sample_table();
        assert_eq!(
            table.scores_for("B").unwrap(),
            vec![(0, 20.0), (1, 0.0), (2, 7.0)]
        );
        assert_eq!(
            table.scores_for("Avg").unwrap(),
            vec![(0, 15.0), (1, 2.0), (2, 7.0)]
        );
        assert!(matches!(
            table.scores_for("Z"),
            Err(ScoreTableError::UnknownPlayer { .. })
        ));
    }

    #[test]
    fn test_score_at_distinguishes_zero_from_missing() {
        let table = sample_table();
        assert_eq!(table.score_at("B", 1).unwrap(), Some(0.0));
        assert_eq!(table.score_at("B", 3).unwrap(), None);
    }

    #[test]
    fn test_score_at_errors() {
        let table = sample_table();
        assert_eq!(
            table.score_at("A", 4),
            Err(ScoreTableError::IndexOutOfRange { index: 4, rows: 4 })
        );
        assert_eq!(
            table.score_at("nobody", 0),
            Err(ScoreTableError::UnknownPlayer {
                name: "nobody".to_owned()
            })
        );
    }

    #[test]
    fn test_game_index() {
        let table = sample_table();
        assert_eq!(table.game_index(3), Ok(3));
        assert!(table.game_index(4).is_err());
        assert!(table.game_index(-1).is_err());
        assert!(table.game_index(i64::MIN).is_err());
    }

    #[test]
    fn test_game_ranking() {
        let table = sample_table();
        assert_eq!(table.game_ranking(0).unwrap(), vec![("B", 20.0), ("A", 10.0)]);
        // ties keep header order, zero is a real score
        assert_eq!(
            table.game_ranking(1).unwrap(),
            vec![("A", 3.0), ("C", 3.0), ("B", 0.0)]
        );
        assert!(table.game_ranking(4).is_err());
    }

    #[test]
    fn test_game_result_excludes_reserved() {
        let table = sample_table();
        assert_eq!(table.game_result(0).unwrap(), vec![10.0, 20.0]);
        assert_eq!(table.game_result(3).unwrap(), vec![1.0, 2.0]);
        assert!(table.game_result(17).is_err());
    }

    #[test]
    fn test_population_stats() {
        let table = sample_table();
        let stats = table.population_stats(0, 3).unwrap();
        assert_eq!(stats.start, 0);
        assert_eq!(stats.mean, vec![Some(15.0), Some(2.0), Some(7.0)]);
        assert_eq!(stats.std_dev[0], Some(5.0));
        assert!((stats.std_dev[1].unwrap() - 2.0_f64.sqrt()).abs() < 1e-12);
        assert_eq!(stats.std_dev[2], Some(0.0));

        let tail = table.population_stats(2, 4).unwrap();
        assert_eq!(
            tail.iter().map(|(game, _, _)| game).collect::<Vec<_>>(),
            vec![2, 3]
        );
    }

    #[test]
    fn test_population_stats_empty_game() {
        let table = ScoreTable::new(names(&["A"]), vec![vec![None]]).unwrap();
        let stats = table.population_stats(0, 1).unwrap();
        assert_eq!(stats.mean, vec![None]);
        assert_eq!(stats.std_dev, vec![None]);
    }

    #[test]
    fn test_population_stats_range_errors() {
        let table = sample_table();
        assert!(table.population_stats(2, 2).unwrap().mean.is_empty());
        assert_eq!(
            table.population_stats(3, 1),
            Err(ScoreTableError::InvalidRange { start: 3, end: 1 })
        );
        assert_eq!(
            table.population_stats(0, 5),
            Err(ScoreTableError::IndexOutOfRange { index: 5, rows: 4 })
        );
    }

    #[test]
    fn test_z_scores_precomputed() {
        let table = sample_table();
        // game 2: stddev is zero, game 3: no average
        assert_eq!(table.z_scores("A").unwrap(), vec![(0, -1.0), (1, 2.0 / 3.0)]);
        assert_eq!(table.z_scores("B").unwrap(), vec![(0, 1.0), (1, -4.0 / 3.0)]);
        assert_eq!(table.z_scores("C").unwrap(), vec![(1, 2.0 / 3.0)]);
    }

    #[test]
    fn test_z_scores_computed() {
        let table = sample_table();
        let z = table
            .z_scores_with("A", ZScoreReference::Computed)
            .unwrap();
        // game 2 has zero spread and is skipped
        assert_eq!(z.iter().map(|(game, _)| *game).collect::<Vec<_>>(), vec![0, 1, 3]);
        assert_eq!(z[0].1, -1.0);
        assert!((z[1].1 - 1.0 / 2.0_f64.sqrt()).abs() < 1e-12);
        assert_eq!(z[2].1, -1.0);
    }

    #[test]
    fn test_z_scores_without_reserved_columns() {
        let table = ScoreTable::new(
            names(&["A", "B"]),
            vec![vec![Some(1.0), Some(3.0)]],
        )
        .unwrap();
        assert!(!table.has_precomputed_stats());
        assert!(table.z_scores("A").unwrap().is_empty());
        assert_eq!(
            table.z_scores_with("A", ZScoreReference::Computed).unwrap(),
            vec![(0, -1.0)]
        );
        assert!(table.z_scores("X").is_err());
    }

    #[test]
    fn test_competitors() {
        let table = sample_table();
        assert_eq!(table.competitors().collect::<Vec<_>>(), vec!["A", "B", "C"]);
        assert_eq!(table.players().count(), 5);
    }

    #[test]
    fn test_reference_from_str() {
        assert_eq!(
            "computed".parse::<ZScoreReference>().unwrap(),
            ZScoreReference::Computed
        );
        assert_eq!(ZScoreReference::default().to_string(), "precomputed");
    }
}
