use std::{
    fs::File,
    io::{self, BufWriter, StdoutLock, Write},
    path::{Path, PathBuf},
};

use anyhow::Context;
use chrono::{DateTime, Utc};
use gamescore_table::{LoaderConfig, ScoreTable, TableLoader};
use serde::Serialize;

/// Where a JSON report goes: stdout, or a buffered file
#[derive(Debug)]
pub enum Output {
    Stdout(StdoutLock<'static>),
    File {
        writer: BufWriter<File>,
        path: PathBuf,
    },
}

impl Output {
    /// Opens `path` for writing, or locks stdout when there is no path
    pub fn create(path: Option<PathBuf>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::Stdout(io::stdout().lock()));
        };
        let file = File::create(&path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Self::File {
            writer: BufWriter::new(file),
            path,
        })
    }

    fn target(&self) -> String {
        match self {
            Self::Stdout(_) => "stdout".to_owned(),
            Self::File { path, .. } => path.display().to_string(),
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(writer) => writer,
            Self::File { writer, .. } => writer,
        }
    }

    /// Writes `value` as pretty-printed JSON and a trailing newline, then flushes
    ///
    /// Written files are announced on stderr so stdout stays machine-readable.
    pub fn write_json<T>(mut self, value: &T) -> anyhow::Result<()>
    where
        T: Serialize,
    {
        let target = self.target();
        let writer = self.writer();
        serde_json::to_writer_pretty(&mut *writer, value)
            .with_context(|| format!("Failed to write JSON to {target}"))?;
        writeln!(writer)
            .and_then(|()| writer.flush())
            .with_context(|| format!("Failed to finish writing {target}"))?;
        if let Self::File { path, .. } = &self {
            eprintln!("Report saved to {}", path.display());
        }
        Ok(())
    }
}

/// JSON envelope around every machine-readable result
#[derive(Debug, Serialize)]
pub struct Report<T> {
    /// When the report was produced
    pub generated_at: DateTime<Utc>,
    /// Score sheet the report was computed from
    pub source: String,
    pub data: T,
}

impl<T> Report<T>
where
    T: Serialize,
{
    pub fn new(source: &Path, data: T) -> Self {
        Self {
            generated_at: Utc::now(),
            source: source.display().to_string(),
            data,
        }
    }

    /// Writes the report to `output_path`, or to stdout if it is `None`
    pub fn save(self, output_path: Option<PathBuf>) -> anyhow::Result<()> {
        Output::create(output_path)?.write_json(&self)
    }
}

pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {} file: {}", file_kind, path.display()))?;

    let reader = io::BufReader::new(file);
    let value = serde_json::from_reader(reader).with_context(|| {
        format!(
            "Failed to parse {} JSON file: {}",
            file_kind,
            path.display()
        )
    })?;

    Ok(value)
}

/// Read a score sheet from a delimited text file
///
/// # Errors
///
/// Returns error if the file cannot be read or does not form a valid table
pub fn read_scores_file<P>(path: P, config: LoaderConfig) -> anyhow::Result<ScoreTable>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let loader = TableLoader::new(config);
    tracing::debug!(path = %path.display(), config = ?loader.config(), "loading score sheet");
    let table = loader
        .load_path(path)
        .with_context(|| format!("Failed to load score sheet: {}", path.display()))?;
    tracing::info!(
        path = %path.display(),
        games = table.num_games(),
        players = table.competitors().count(),
        "score sheet loaded"
    );
    Ok(table)
}

/// Formats an optional value for a text table, `-` when absent
pub fn fmt_opt(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.3}"))
}
