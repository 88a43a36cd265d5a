//! Delimited-text loader for score tables.
//!
//! # Layout
//!
//! ```text
//! date,event,notes,,,,          <- skipped (`skip_rows` = 1)
//! ,,,Alice,Bob,Avg,stddev       <- player name row
//! 2024-01-03,Quiz,,12,18,15,3   <- game 0
//! 2024-01-10,Quiz,,9,x,9,0      <- game 1 ("x" becomes missing)
//! ```
//!
//! Player names start at `first_player_column`. Columns before it hold
//! free-form metadata and are ignored, as are columns whose name cell is
//! empty. Cells that do not parse as a number (or parse as `NaN`) are
//! missing scores; short rows are padded with missing scores.

use std::{fs::File, io, path::Path};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{error::LoadError, table::ScoreTable};

/// Where the player names and scores sit in the source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Lines to skip before the player name row.
    pub skip_rows: usize,
    /// Column of the first player name (0-based).
    pub first_player_column: usize,
    /// Field delimiter; must be a single-byte character.
    pub delimiter: char,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            skip_rows: 1,
            first_player_column: 3,
            delimiter: ',',
        }
    }
}

/// Parses delimited text into a [`ScoreTable`].
///
/// # Examples
///
/// ```
/// use gamescore_table::{LoaderConfig, TableLoader};
///
/// let text = "\
/// title,,,,
/// ,,,Alice,Bob
/// g1,,,3,n/a
/// g2,,,4,5
/// ";
/// let table = TableLoader::new(LoaderConfig::default()).load_str(text)?;
/// assert_eq!(table.num_games(), 2);
/// assert_eq!(table.score_at("Bob", 0)?, None);
/// assert_eq!(table.scores_for("Alice")?, vec![(0, 3.0), (1, 4.0)]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct TableLoader {
    config: LoaderConfig,
}

impl TableLoader {
    #[must_use]
    pub fn new(config: LoaderConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Loads a table from a file.
    pub fn load_path<P>(&self, path: P) -> Result<ScoreTable, LoadError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading score table");
        let file = File::open(path)?;
        self.load_reader(io::BufReader::new(file))
    }

    /// Loads a table from in-memory text.
    pub fn load_str(&self, text: &str) -> Result<ScoreTable, LoadError> {
        self.load_reader(text.as_bytes())
    }

    /// Loads a table from any reader.
    pub fn load_reader<R>(&self, reader: R) -> Result<ScoreTable, LoadError>
    where
        R: io::Read,
    {
        let LoaderConfig {
            skip_rows,
            first_player_column,
            delimiter,
        } = self.config;
        let delimiter = u8::try_from(delimiter)
            .ok()
            .filter(u8::is_ascii)
            .ok_or(LoadError::InvalidDelimiter { delimiter })?;

        let mut records = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(delimiter)
            .from_reader(reader)
            .into_records();
        // preamble lines are free-form; undecodable ones are tolerated
        for line in 0..skip_rows {
            match records.next() {
                Some(Ok(_)) => {}
                Some(Err(err)) => trace!(line, %err, "skipped unreadable preamble line"),
                None => break,
            }
        }

        let header = records
            .next()
            .transpose()?
            .ok_or(LoadError::MissingHeader { skip_rows })?;
        let (columns, players): (Vec<usize>, Vec<String>) = header
            .iter()
            .enumerate()
            .skip(first_player_column)
            .map(|(column, name)| (column, name.trim()))
            .filter(|(_, name)| !name.is_empty())
            .map(|(column, name)| (column, name.to_owned()))
            .unzip();

        let mut rows = vec![];
        for record in records {
            let record = record?;
            let game = rows.len();
            let cells = columns
                .iter()
                .map(|&column| {
                    let cell = record.get(column).unwrap_or_default();
                    let score = parse_score(cell);
                    if score.is_none() && !cell.trim().is_empty() {
                        trace!(game, column, cell, "non-numeric cell read as missing");
                    }
                    score
                })
                .collect::<Vec<_>>();
            rows.push(cells);
        }

        debug!(players = players.len(), games = rows.len(), "parsed score rows");
        Ok(ScoreTable::new(players, rows)?)
    }
}

/// Reads one cell as a score; anything that is not a number is missing.
///
/// # Examples
///
/// ```
/// # use gamescore_table::loader::parse_score;
/// assert_eq!(parse_score(" 12.5 "), Some(12.5));
/// assert_eq!(parse_score("0"), Some(0.0));
/// assert_eq!(parse_score(""), None);
/// assert_eq!(parse_score("DNF"), None);
/// assert_eq!(parse_score("NaN"), None);
/// ```
#[must_use]
pub fn parse_score(cell: &str) -> Option<f64> {
    cell.trim()
        .parse::<f64>()
        .ok()
        .filter(|score| !score.is_nan())
}
