use crate::errors::AppResult;
use rusqlite::Connection;

/// Initialize the workbook file.
/// Creates the sheet catalogue and the cell grid; safe to run on every open.
pub fn init_workbook(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS sheets (
            name         TEXT PRIMARY KEY,
            position     INTEGER NOT NULL,
            frozen_rows  INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS cells (
            sheet  TEXT NOT NULL,
            row    INTEGER NOT NULL,
            col    INTEGER NOT NULL,
            kind   TEXT NOT NULL CHECK (kind IN ('text','number','bool','date')),
            value  TEXT NOT NULL,
            PRIMARY KEY (sheet, row, col)
        );

        CREATE INDEX IF NOT EXISTS idx_cells_sheet_row ON cells(sheet, row);
        "#,
    )?;
    Ok(())
}
