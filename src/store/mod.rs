use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use crate::models::{MatchRecord, ResultKind, TossDecision};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to read match table {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("{path} is missing required columns: {}", .columns.join(", "))]
    MissingColumns { path: String, columns: Vec<String> },
}

pub const REQUIRED_COLUMNS: &[&str] = &[
    "season",
    "team1",
    "team2",
    "toss_winner",
    "toss_decision",
    "winner",
    "result",
    "player_of_match",
    "match_type",
];

/// Columns we read; anything else in the file is ignored.
#[derive(Debug, Deserialize)]
struct RawMatchRow {
    season: String,
    team1: Option<String>,
    team2: Option<String>,
    toss_winner: Option<String>,
    toss_decision: Option<String>,
    winner: Option<String>,
    result: Option<String>,
    player_of_match: Option<String>,
    match_type: Option<String>,
}

/// Empty cells and pandas-style `NA` both mean "no value".
fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("na"))
}

/// Parse an enum cell. A value that does not parse becomes `None` and the
/// reason is recorded; the rest of the row is kept.
fn parse_cell<T>(raw: Option<String>, problems: &mut Vec<String>) -> Option<T>
where
    T: FromStr<Err = String>,
{
    match raw?.parse::<T>() {
        Ok(value) => Some(value),
        Err(reason) => {
            problems.push(reason);
            None
        }
    }
}

impl RawMatchRow {
    fn into_record(self) -> (MatchRecord, Vec<String>) {
        let mut problems = Vec::new();
        let toss_decision = parse_cell::<TossDecision>(clean(self.toss_decision), &mut problems);
        let result = match clean(self.result) {
            Some(raw) => parse_cell::<ResultKind>(Some(raw), &mut problems),
            None => Some(ResultKind::NoResult),
        };

        let record = MatchRecord {
            season: self.season.trim().to_string(),
            team1: clean(self.team1),
            team2: clean(self.team2),
            toss_winner: clean(self.toss_winner),
            toss_decision,
            winner: clean(self.winner),
            result,
            player_of_match: clean(self.player_of_match),
            match_type: clean(self.match_type).unwrap_or_default(),
        };
        (record, problems)
    }
}

/// The match table, loaded once and never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<MatchRecord>,
    invalid_cells: usize,
}

impl RecordStore {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| StoreError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let store = Self::from_reader(file, path)?;

        tracing::info!(
            "Loaded {} match records from {} ({} unreadable cells)",
            store.records.len(),
            path.display(),
            store.invalid_cells
        );
        Ok(store)
    }

    /// Parse a headed CSV table. Structural errors fail the whole load; an
    /// unrecognised toss decision or result only blanks that cell. `origin` only
    /// labels errors.
    pub fn from_reader<R: Read>(rdr: R, origin: &Path) -> Result<Self, StoreError> {
        let csv_error = |source| StoreError::Csv {
            path: origin.display().to_string(),
            source,
        };

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .from_reader(rdr);

        let headers = reader.headers().map_err(csv_error)?;
        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|column| !headers.iter().any(|h| h == **column))
            .map(|column| column.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(StoreError::MissingColumns {
                path: origin.display().to_string(),
                columns: missing,
            });
        }

        let mut records = Vec::new();
        let mut invalid_cells = 0;
        for (index, row) in reader.deserialize::<RawMatchRow>().enumerate() {
            let (record, problems) = row.map_err(csv_error)?.into_record();
            for reason in &problems {
                // +2: one for the header, one for 1-based line numbers
                tracing::warn!("Ignoring cell at line {}: {}", index + 2, reason);
            }
            invalid_cells += problems.len();
            records.push(record);
        }

        Ok(Self {
            records,
            invalid_cells,
        })
    }

    pub fn records(&self) -> &[MatchRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Enum cells that did not parse and were left empty.
    pub fn invalid_cells(&self) -> usize {
        self.invalid_cells
    }
}
