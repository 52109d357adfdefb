//! Table descriptors: which sheet a table lives in and its canonical headers.

use crate::db::cell::Cell;
use crate::db::workbook::Workbook;
use crate::errors::AppResult;

/// Describes one table of the workbook.
pub trait TableSchema {
    /// Sheet name.
    const NAME: &'static str;

    /// Canonical header row, in column order. The first column is the key.
    const HEADERS: &'static [&'static str];

    /// Build the sheet when it is missing from the workbook.
    fn create_sheet(workbook: &dyn Workbook) -> AppResult<()> {
        workbook.create_sheet(Self::NAME)?;
        write_headers::<Self>(workbook)
    }
}

/// Write the canonical header row into row 1 and freeze it.
pub(crate) fn write_headers<S: TableSchema + ?Sized>(workbook: &dyn Workbook) -> AppResult<()> {
    let headers: Vec<Cell> = S::HEADERS.iter().map(|h| Cell::text(*h)).collect();
    workbook.write_row(S::NAME, 1, &headers)?;
    workbook.set_frozen_rows(S::NAME, 1)
}
