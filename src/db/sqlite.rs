//! Workbook persisted in a single SQLite file.

use crate::db::cell::Cell;
use crate::db::initialize::init_workbook;
use crate::db::pool::DbPool;
use crate::db::workbook::Workbook;
use crate::errors::{AppError, AppResult};
use rusqlite::{OptionalExtension, params};

pub struct SqliteWorkbook {
    pool: DbPool,
    location: String,
}

impl SqliteWorkbook {
    /// Open (or create) the workbook file at `path`.
    pub fn open(path: &str) -> AppResult<Self> {
        let pool = DbPool::new(path)?;
        init_workbook(&pool.conn)?;
        tracing::debug!(path, "workbook opened");
        Ok(Self {
            pool,
            location: path.to_string(),
        })
    }

    pub fn in_memory() -> AppResult<Self> {
        let pool = DbPool::in_memory()?;
        init_workbook(&pool.conn)?;
        Ok(Self {
            pool,
            location: ":memory:".to_string(),
        })
    }

    fn ensure_sheet(&self, name: &str) -> AppResult<()> {
        if self.has_sheet(name)? {
            Ok(())
        } else {
            Err(AppError::SheetMissing(name.to_string()))
        }
    }

    fn max_of(&self, column: &str, sheet: &str) -> AppResult<usize> {
        self.ensure_sheet(sheet)?;
        let sql = format!("SELECT IFNULL(MAX({column}), 0) FROM cells WHERE sheet = ?1");
        let max: i64 = self
            .pool
            .conn
            .query_row(&sql, [sheet], |row| row.get(0))?;
        Ok(max.max(0) as usize)
    }
}

impl Workbook for SqliteWorkbook {
    fn location(&self) -> String {
        self.location.clone()
    }

    fn sheet_names(&self) -> AppResult<Vec<String>> {
        let mut stmt = self
            .pool
            .conn
            .prepare("SELECT name FROM sheets ORDER BY position ASC")?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(names)
    }

    fn has_sheet(&self, name: &str) -> AppResult<bool> {
        let found: Option<String> = self
            .pool
            .conn
            .query_row("SELECT name FROM sheets WHERE name = ?1", [name], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(found.is_some())
    }

    fn create_sheet(&self, name: &str) -> AppResult<()> {
        self.pool.conn.execute(
            "INSERT OR IGNORE INTO sheets (name, position)
             VALUES (?1, (SELECT IFNULL(MAX(position), 0) + 1 FROM sheets))",
            [name],
        )?;
        Ok(())
    }

    fn last_row(&self, sheet: &str) -> AppResult<usize> {
        self.max_of("row", sheet)
    }

    fn last_column(&self, sheet: &str) -> AppResult<usize> {
        self.max_of("col", sheet)
    }

    fn read_rows(
        &self,
        sheet: &str,
        first_row: usize,
        count: usize,
        width: usize,
    ) -> AppResult<Vec<Vec<Cell>>> {
        self.ensure_sheet(sheet)?;
        let mut grid = vec![vec![Cell::Empty; width]; count];
        if count == 0 || width == 0 {
            return Ok(grid);
        }

        let last = first_row + count - 1;
        let mut stmt = self.pool.conn.prepare_cached(
            "SELECT row, col, kind, value FROM cells
             WHERE sheet = ?1 AND row BETWEEN ?2 AND ?3 AND col <= ?4",
        )?;
        let cells = stmt.query_map(
            params![sheet, first_row as i64, last as i64, width as i64],
            |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, i64>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                ))
            },
        )?;

        for c in cells {
            let (r, col, kind, value) = c?;
            let r = r as usize - first_row;
            let col = col as usize - 1;
            grid[r][col] = Cell::from_db(&kind, value);
        }
        Ok(grid)
    }

    fn append_row(&self, sheet: &str, cells: &[Cell]) -> AppResult<()> {
        let row = self.last_row(sheet)? + 1;
        self.write_row(sheet, row, cells)
    }

    fn set_cell(&self, sheet: &str, row: usize, col: usize, cell: Cell) -> AppResult<()> {
        self.ensure_sheet(sheet)?;
        match cell.to_db() {
            Some((kind, value)) => {
                self.pool.conn.execute(
                    "INSERT INTO cells (sheet, row, col, kind, value)
                     VALUES (?1, ?2, ?3, ?4, ?5)
                     ON CONFLICT(sheet, row, col) DO UPDATE SET kind = ?4, value = ?5",
                    params![sheet, row as i64, col as i64, kind, value],
                )?;
            }
            None => {
                self.pool.conn.execute(
                    "DELETE FROM cells WHERE sheet = ?1 AND row = ?2 AND col = ?3",
                    params![sheet, row as i64, col as i64],
                )?;
            }
        }
        Ok(())
    }

    fn set_frozen_rows(&self, sheet: &str, rows: usize) -> AppResult<()> {
        self.ensure_sheet(sheet)?;
        self.pool.conn.execute(
            "UPDATE sheets SET frozen_rows = ?2 WHERE name = ?1",
            params![sheet, rows as i64],
        )?;
        Ok(())
    }
}
