//! Universe loading from CSV files.
//!
//! The universe file is a two-column CSV with a `symbol,sector` header,
//! one constituent per row.

use serde::Deserialize;
use std::io::Read;
use std::path::Path;

/// Error type for universe CSV loading.
#[derive(Debug, thiserror::Error)]
pub(crate) enum UniverseCsvError {
    /// I/O error reading the file.
    #[error("Failed to read universe file: {0}")]
    Io(#[from] std::io::Error),
    /// CSV parse error.
    #[error("Failed to parse universe file: {0}")]
    Csv(#[from] csv::Error),
    /// The file parsed but contained no rows.
    #[error("Universe file contains no entries")]
    Empty,
}

/// One row of the universe CSV.
#[derive(Debug, Deserialize)]
struct UniverseRecord {
    symbol: String,
    sector: String,
}

/// Load `(symbol, sector)` entries from a universe CSV file.
///
/// Rows are returned as-is; blank and duplicate entries are left for
/// universe construction to drop and count.
pub(crate) fn load_universe_csv(path: &Path) -> Result<Vec<(String, String)>, UniverseCsvError> {
    let file = std::fs::File::open(path)?;
    read_universe_entries(file)
}

fn read_universe_entries<R: Read>(reader: R) -> Result<Vec<(String, String)>, UniverseCsvError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut entries = Vec::new();
    for record in csv_reader.deserialize() {
        let record: UniverseRecord = record?;
        entries.push((record.symbol, record.sector));
    }

    if entries.is_empty() {
        return Err(UniverseCsvError::Empty);
    }

    Ok(entries)
}
