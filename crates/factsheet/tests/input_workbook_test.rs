//! Identifier loading from `.xlsx` workbooks.
//!
//! `fixtures/ciks.xlsx` has two worksheets. The first ("Companies") holds a
//! `Name,CIK` table with numeric and text CIK cells, a row with a blank CIK
//! and a duplicate of the first company. The second ("Archive") holds a CIK
//! that must never be read.

use factsheet::{CIK_COLUMN, InputError, load_ciks};
use factsheet::input::{Cell, read_sheet};
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn test_workbook_first_sheet_normalized_and_deduplicated() {
    let ciks = load_ciks(&fixture("ciks.xlsx")).unwrap();
    let ciks: Vec<&str> = ciks.iter().map(|c| c.as_str()).collect();

    assert_eq!(
        ciks,
        vec!["0000320193", "0000789019", "0001018724", "0001318605"]
    );
}

#[test]
fn test_workbook_ignores_later_sheets() {
    let ciks = load_ciks(&fixture("ciks.xlsx")).unwrap();
    assert!(ciks.iter().all(|c| c.as_str() != "0001234567"));
}

#[test]
fn test_workbook_headers_and_cells() {
    let sheet = read_sheet(&fixture("ciks.xlsx")).unwrap();

    assert_eq!(sheet.headers, vec!["Name", "CIK"]);
    assert_eq!(sheet.column(CIK_COLUMN), Some(1));
    assert_eq!(sheet.rows.len(), 6);

    // Numeric cells come back as numbers, text cells as text
    assert!(matches!(sheet.rows[0][1], Cell::Int(320193) | Cell::Float(_)));
    assert_eq!(sheet.rows[2][1], Cell::Text("1018724.0".to_string()));
    assert_eq!(sheet.rows[4][1], Cell::Empty);
}

#[test]
fn test_workbook_without_cik_column() {
    let result = load_ciks(&fixture("no_cik_column.xlsx"));

    match result {
        Err(InputError::MissingColumn { column, found }) => {
            assert_eq!(column, "CIK");
            assert_eq!(found, vec!["Ticker", "cik"]);
        }
        other => panic!("expected MissingColumn, got {other:?}"),
    }
}

#[test]
fn test_missing_workbook_file() {
    let result = load_ciks(&fixture("does_not_exist.xlsx"));
    assert!(matches!(result, Err(InputError::Workbook(_))));
}
