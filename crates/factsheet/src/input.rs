//! Identifier loading from spreadsheets.
//!
//! The input is a workbook (first worksheet) or a CSV file whose header row
//! contains a column named exactly `CIK`. Each non-empty cell of that column is
//! normalized to a 10-digit [`Cik`]; duplicates are dropped.

use calamine::{Data, Reader, open_workbook_auto};
use factsheet_data::Cik;
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

/// Name of the required identifier column (case-sensitive).
pub const CIK_COLUMN: &str = "CIK";

/// Errors that can occur while loading identifiers.
#[derive(Debug, Error)]
pub enum InputError {
    /// The required identifier column is absent
    #[error("Input must contain a column named '{column}' (found: {})", .found.join(", "))]
    MissingColumn {
        /// Column that was required
        column: &'static str,
        /// Header names that were present
        found: Vec<String>,
    },

    /// File extension not recognized
    #[error("Unsupported input format: {0}")]
    UnsupportedFormat(String),

    /// Workbook could not be opened or read
    #[error("Workbook error: {0}")]
    Workbook(#[from] calamine::Error),

    /// Workbook has no worksheets
    #[error("Workbook contains no worksheets")]
    EmptyWorkbook,

    /// CSV input could not be read
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// A single spreadsheet cell, reduced to what identifier parsing needs.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Blank or error cell
    Empty,
    /// Integer cell
    Int(i64),
    /// Floating point cell
    Float(f64),
    /// Any other cell, as text
    Text(String),
}

impl From<&Data> for Cell {
    fn from(data: &Data) -> Self {
        match data {
            Data::Empty | Data::Error(_) => Self::Empty,
            Data::Int(i) => Self::Int(*i),
            Data::Float(f) => Self::Float(*f),
            Data::String(s) => Self::from_text(s),
            other => Self::Text(other.to_string()),
        }
    }
}

impl Cell {
    fn from_text(s: &str) -> Self {
        if s.trim().is_empty() {
            Self::Empty
        } else {
            Self::Text(s.to_string())
        }
    }

    /// Normalize the cell into a CIK. `None` for empty cells.
    pub fn to_cik(&self) -> Option<factsheet_data::Result<Cik>> {
        match self {
            Self::Empty => None,
            Self::Int(i) => Some(
                u64::try_from(*i)
                    .map_err(|_| factsheet_data::DataError::InvalidCik(i.to_string()))
                    .and_then(Cik::from_number),
            ),
            Self::Float(f) => Some(Cik::from_float(*f)),
            Self::Text(s) => Some(Cik::parse(s)),
        }
    }
}

/// The first worksheet of an input file: a header row plus data rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sheet {
    /// Header row
    pub headers: Vec<String>,
    /// Data rows; may be shorter than the header row
    pub rows: Vec<Vec<Cell>>,
}

impl Sheet {
    /// Position of a column by exact header name.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }
}

/// Read the first worksheet of a workbook, or a CSV file, by extension.
pub fn read_sheet(path: &Path) -> Result<Sheet, InputError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => read_workbook(path),
        "csv" => read_csv(path),
        _ => Err(InputError::UnsupportedFormat(path.display().to_string())),
    }
}

fn read_workbook(path: &Path) -> Result<Sheet, InputError> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(InputError::EmptyWorkbook)??;

    let mut rows = range.rows();
    let headers = rows
        .next()
        .map(|header| {
            header
                .iter()
                .map(|cell| match cell {
                    Data::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect()
        })
        .unwrap_or_default();

    Ok(Sheet {
        headers,
        rows: rows.map(|row| row.iter().map(Cell::from).collect()).collect(),
    })
}

fn read_csv(path: &Path) -> Result<Sheet, InputError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;
    let headers = reader.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        rows.push(record?.iter().map(Cell::from_text).collect());
    }

    Ok(Sheet { headers, rows })
}

/// Extract the distinct normalized CIKs of a sheet, in first-seen order.
///
/// Empty cells are dropped. Cells that cannot form a 10-digit CIK are skipped
/// with a warning.
pub fn collect_ciks(sheet: &Sheet) -> Result<Vec<Cik>, InputError> {
    let column = sheet
        .column(CIK_COLUMN)
        .ok_or_else(|| InputError::MissingColumn {
            column: CIK_COLUMN,
            found: sheet.headers.clone(),
        })?;

    let mut seen = HashSet::new();
    let mut ciks = Vec::new();
    let mut skipped = 0usize;

    for (index, row) in sheet.rows.iter().enumerate() {
        let Some(parsed) = row.get(column).and_then(Cell::to_cik) else {
            continue;
        };
        match parsed {
            Ok(cik) => {
                if seen.insert(cik.clone()) {
                    ciks.push(cik);
                }
            }
            Err(e) => {
                skipped += 1;
                // +2: one for the header row, one for 1-based numbering
                warn!(row = index + 2, error = %e, "skipping identifier");
            }
        }
    }

    info!(
        rows = sheet.rows.len(),
        unique = ciks.len(),
        skipped,
        "loaded identifiers"
    );
    Ok(ciks)
}

/// Read a file and return its distinct normalized CIKs.
///
/// # Errors
///
/// Returns [`InputError::MissingColumn`] if there is no `CIK` column, or a
/// file-level error if the input cannot be read.
pub fn load_ciks(path: &Path) -> Result<Vec<Cik>, InputError> {
    collect_ciks(&read_sheet(path)?)
}
