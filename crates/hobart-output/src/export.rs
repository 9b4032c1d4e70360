//! CSV and JSON export of breadth reports.

use hobart_breadth::BreadthReport;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during export operations.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV serialization error.
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Export format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Comma-separated values format (detail table).
    Csv,

    /// Compact JSON format (full report).
    Json,

    /// Pretty-printed JSON format (full report).
    PrettyJson,
}

impl ExportFormat {
    /// Get the file extension for this format.
    pub const fn extension(&self) -> &str {
        match self {
            Self::Csv => "csv",
            Self::Json | Self::PrettyJson => "json",
        }
    }

    /// Infer a format from a path's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Exports breadth reports to files or writers.
///
/// Undefined moving averages, signals, and fractions export as empty CSV
/// cells and JSON nulls.
#[derive(Debug, Clone, Copy, Default)]
pub struct Exporter;

fn cell_f64(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn cell_bool(value: Option<bool>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

impl Exporter {
    /// Export a report to a file in the given format.
    pub fn export(
        &self,
        report: &BreadthReport,
        path: &Path,
        format: ExportFormat,
    ) -> Result<(), ExportError> {
        match format {
            ExportFormat::Csv => {
                let file = File::create(path)?;
                self.write_detail_csv(report, file)
            }
            ExportFormat::Json => {
                let mut file = File::create(path)?;
                file.write_all(serde_json::to_string(report)?.as_bytes())?;
                Ok(())
            }
            ExportFormat::PrettyJson => {
                let mut file = File::create(path)?;
                file.write_all(serde_json::to_string_pretty(report)?.as_bytes())?;
                Ok(())
            }
        }
    }

    /// Write the detail table as CSV: one row per valid symbol, with
    /// `ma_<w>` and `above_<w>` columns per window.
    pub fn write_detail_csv<W: Write>(
        &self,
        report: &BreadthReport,
        writer: W,
    ) -> Result<(), ExportError> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        let mut header = vec![
            "symbol".to_string(),
            "sector".to_string(),
            "latest_price".to_string(),
        ];
        for &window in &report.windows {
            header.push(format!("ma_{window}"));
        }
        for &window in &report.windows {
            header.push(format!("above_{window}"));
        }
        csv_writer.write_record(&header)?;

        for row in &report.detail {
            let mut record = vec![
                row.symbol.clone(),
                row.sector.clone(),
                row.latest_price.to_string(),
            ];
            for signal in &row.signals {
                record.push(cell_f64(signal.ma));
            }
            for signal in &row.signals {
                record.push(cell_bool(signal.above));
            }
            csv_writer.write_record(&record)?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Write the sector summary as CSV: one row per sector, with an
    /// `above_<w>_fraction` column per window.
    pub fn write_sectors_csv<W: Write>(
        &self,
        report: &BreadthReport,
        writer: W,
    ) -> Result<(), ExportError> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        let mut header = vec!["sector".to_string(), "symbols".to_string()];
        for &window in &report.windows {
            header.push(format!("above_{window}_fraction"));
        }
        csv_writer.write_record(&header)?;

        for row in &report.sectors {
            let mut record = vec![row.sector.clone(), row.symbols.to_string()];
            for fraction in &row.fractions {
                record.push(cell_f64(*fraction));
            }
            csv_writer.write_record(&record)?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}
