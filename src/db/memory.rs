//! In-memory workbook, used by tests and dry runs.

use crate::db::cell::Cell;
use crate::db::workbook::Workbook;
use crate::errors::{AppError, AppResult};
use std::cell::RefCell;

#[derive(Debug, Default)]
struct Sheet {
    name: String,
    rows: Vec<Vec<Cell>>,
    frozen_rows: usize,
}

impl Sheet {
    fn last_row(&self) -> usize {
        self.rows
            .iter()
            .rposition(|r| r.iter().any(|c| !c.is_empty()))
            .map_or(0, |idx| idx + 1)
    }

    fn last_column(&self) -> usize {
        self.rows
            .iter()
            .filter_map(|r| r.iter().rposition(|c| !c.is_empty()))
            .max()
            .map_or(0, |idx| idx + 1)
    }
}

#[derive(Debug, Default)]
pub struct MemoryWorkbook {
    sheets: RefCell<Vec<Sheet>>,
}

impl MemoryWorkbook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of frozen rows of a sheet (0 when the sheet is missing).
    pub fn frozen_rows(&self, sheet: &str) -> usize {
        self.sheets
            .borrow()
            .iter()
            .find(|s| s.name == sheet)
            .map_or(0, |s| s.frozen_rows)
    }

    fn with_sheet<T>(&self, name: &str, f: impl FnOnce(&mut Sheet) -> T) -> AppResult<T> {
        let mut sheets = self.sheets.borrow_mut();
        let sheet = sheets
            .iter_mut()
            .find(|s| s.name == name)
            .ok_or_else(|| AppError::SheetMissing(name.to_string()))?;
        Ok(f(sheet))
    }
}

impl Workbook for MemoryWorkbook {
    fn location(&self) -> String {
        ":memory:".to_string()
    }

    fn sheet_names(&self) -> AppResult<Vec<String>> {
        Ok(self.sheets.borrow().iter().map(|s| s.name.clone()).collect())
    }

    fn has_sheet(&self, name: &str) -> AppResult<bool> {
        Ok(self.sheets.borrow().iter().any(|s| s.name == name))
    }

    fn create_sheet(&self, name: &str) -> AppResult<()> {
        if !self.has_sheet(name)? {
            self.sheets.borrow_mut().push(Sheet {
                name: name.to_string(),
                ..Sheet::default()
            });
        }
        Ok(())
    }

    fn last_row(&self, sheet: &str) -> AppResult<usize> {
        self.with_sheet(sheet, |s| s.last_row())
    }

    fn last_column(&self, sheet: &str) -> AppResult<usize> {
        self.with_sheet(sheet, |s| s.last_column())
    }

    fn read_rows(
        &self,
        sheet: &str,
        first_row: usize,
        count: usize,
        width: usize,
    ) -> AppResult<Vec<Vec<Cell>>> {
        self.with_sheet(sheet, |s| {
            (first_row..first_row + count)
                .map(|r| {
                    let source = s.rows.get(r.wrapping_sub(1));
                    (0..width)
                        .map(|c| {
                            source
                                .and_then(|row| row.get(c))
                                .cloned()
                                .unwrap_or_default()
                        })
                        .collect()
                })
                .collect()
        })
    }

    fn append_row(&self, sheet: &str, cells: &[Cell]) -> AppResult<()> {
        let row = self.last_row(sheet)? + 1;
        self.write_row(sheet, row, cells)
    }

    fn set_cell(&self, sheet: &str, row: usize, col: usize, cell: Cell) -> AppResult<()> {
        if row == 0 || col == 0 {
            return Err(AppError::Other(format!(
                "invalid cell position {row}:{col} in sheet {sheet}"
            )));
        }
        self.with_sheet(sheet, |s| {
            if s.rows.len() < row {
                s.rows.resize_with(row, Vec::new);
            }
            let target = &mut s.rows[row - 1];
            if target.len() < col {
                target.resize(col, Cell::Empty);
            }
            target[col - 1] = cell;
        })
    }

    fn set_frozen_rows(&self, sheet: &str, rows: usize) -> AppResult<()> {
        self.with_sheet(sheet, |s| s.frozen_rows = rows)
    }
}
