//! The spreadsheet abstraction every table is stored in.
//!
//! Rows and columns are 1-based, row 1 being the header row of a table.

use crate::db::cell::Cell;
use crate::errors::AppResult;

/// A workbook made of named sheets holding a grid of cells.
///
/// Methods take `&self`: implementations use interior mutability so that a
/// single workbook handle can be shared by several tables.
pub trait Workbook {
    /// Human readable location (file path, `:memory:`).
    fn location(&self) -> String;

    fn sheet_names(&self) -> AppResult<Vec<String>>;

    fn has_sheet(&self, name: &str) -> AppResult<bool>;

    /// Create an empty sheet. Creating an existing sheet is a no-op.
    fn create_sheet(&self, name: &str) -> AppResult<()>;

    /// Index of the last row holding at least one value (0 when empty).
    fn last_row(&self, sheet: &str) -> AppResult<usize>;

    /// Index of the last column holding at least one value (0 when empty).
    fn last_column(&self, sheet: &str) -> AppResult<usize>;

    /// Read `count` rows starting at `first_row`, each padded to `width` cells.
    fn read_rows(
        &self,
        sheet: &str,
        first_row: usize,
        count: usize,
        width: usize,
    ) -> AppResult<Vec<Vec<Cell>>>;

    /// Append a row right after `last_row`.
    fn append_row(&self, sheet: &str, cells: &[Cell]) -> AppResult<()>;

    fn set_cell(&self, sheet: &str, row: usize, col: usize, cell: Cell) -> AppResult<()>;

    fn set_frozen_rows(&self, sheet: &str, rows: usize) -> AppResult<()>;

    /// Write `cells` into `row`, starting at column 1.
    fn write_row(&self, sheet: &str, row: usize, cells: &[Cell]) -> AppResult<()> {
        for (idx, cell) in cells.iter().enumerate() {
            self.set_cell(sheet, row, idx + 1, cell.clone())?;
        }
        Ok(())
    }
}
