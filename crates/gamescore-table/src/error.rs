use std::io;

/// Errors raised by [`ScoreTable`](crate::ScoreTable) construction and queries.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ScoreTableError {
    #[display("player '{name}' is not in the score table")]
    UnknownPlayer { name: String },
    #[display("game index {index} is out of range (table has {rows} games)")]
    IndexOutOfRange { index: i64, rows: usize },
    #[display("game range {start}..{end} is reversed")]
    InvalidRange { start: usize, end: usize },
    #[display("player '{name}' appears more than once in the header")]
    DuplicatePlayer { name: String },
    #[display("game {row} has {actual} cells, expected one per player ({expected})")]
    RowWidthMismatch {
        row: usize,
        expected: usize,
        actual: usize,
    },
}

impl ScoreTableError {
    pub(crate) fn out_of_range(index: usize, rows: usize) -> Self {
        Self::IndexOutOfRange {
            index: i64::try_from(index).unwrap_or(i64::MAX),
            rows,
        }
    }
}

/// Errors raised while loading a score table from delimited text.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum LoadError {
    #[display("failed to read score table")]
    Io(io::Error),
    #[display("malformed delimited text")]
    Csv(csv::Error),
    #[display("delimiter {delimiter:?} is not a single-byte character")]
    #[from(ignore)]
    InvalidDelimiter { delimiter: char },
    #[display("no player name row after skipping {skip_rows} lines")]
    #[from(ignore)]
    MissingHeader { skip_rows: usize },
    #[display("invalid score table")]
    Table(ScoreTableError),
}
