//! Per-player statistics over a table of game results
//!
//! This crate loads a score sheet (one column per player, one row per game)
//! and answers questions about it: a player's scores, a game's ranking, the
//! population statistics of each game and z-score normalized performance.
//!
//! # Overview
//!
//! 1. **Load** ([`loader::TableLoader`]): parse delimited text into a table,
//!    reading non-numeric cells as missing scores
//! 2. **Query** ([`table::ScoreTable`]): look up scores, rank games, compute
//!    per-game mean and population standard deviation, normalize to z-scores
//! 3. **Analyze** ([`analysis`]): bundle a player's series with trend line,
//!    summary and distribution for reporting
//!
//! All queries are read-only; a table never changes after it is built.
//!
//! # Examples
//!
//! ```
//! use gamescore_table::{LoaderConfig, TableLoader, ZScoreReference};
//!
//! let sheet = "\
//! exported,,,,,,
//! date,event,notes,Alice,Bob,Avg,stddev
//! 03/01,Quiz,,12,18,15,3
//! 10/01,Quiz,,9,,9,0
//! 17/01,Darts,,40,20,30,10
//! ";
//! let table = TableLoader::new(LoaderConfig::default()).load_str(sheet)?;
//!
//! assert_eq!(table.game_ranking(2)?, vec![("Alice", 40.0), ("Bob", 20.0)]);
//!
//! // game 1 has zero spread and drops out of the z-scores
//! assert_eq!(table.z_scores("Alice")?, vec![(0, -1.0), (2, 1.0)]);
//! assert_eq!(
//!     table.z_scores_with("Bob", ZScoreReference::Computed)?,
//!     vec![(0, 1.0), (2, -1.0)]
//! );
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use self::{
    error::{LoadError, ScoreTableError},
    loader::{LoaderConfig, TableLoader},
    table::{AVG_PLAYER, PopulationStats, STDDEV_PLAYER, ScoreTable, ZScoreReference},
};

pub mod analysis;
mod error;
pub mod loader;
pub mod table;
