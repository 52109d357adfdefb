//! Generic table over a workbook sheet.
//!
//! A `Table` maps a named sheet to rows of cells, keeps a short-lived
//! snapshot of the whole sheet and locates rows by the value of their first
//! column. Header drift is tolerated: a sheet whose header row differs from
//! the canonical one is read as-is and never rewritten.

use crate::db::cell::Cell;
use crate::db::workbook::Workbook;
use crate::errors::{AppError, AppResult};
use crate::store::record::{Record, row_to_object};
use crate::store::schema::{TableSchema, write_headers};
use std::collections::HashMap;
use std::marker::PhantomData;
use std::rc::Rc;
use std::time::{Duration, Instant};

pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(5);

/// Outcome of the header verification done when a table is opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderCheck {
    /// The sheet did not exist and was created with the canonical headers.
    Created,
    /// The sheet existed without any column; the headers were written.
    Initialized,
    /// The header row starts with the canonical headers.
    Matched,
    /// The header row differs; data is read with the headers found.
    Drifted { found: Vec<String> },
}

/// Full-sheet read: header row plus data rows.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

/// A row located by key.
#[derive(Debug, Clone)]
pub struct RowRef {
    /// 1-based sheet row (row 1 is the header row).
    pub row: usize,
    pub values: Vec<Cell>,
}

pub struct Table<S: TableSchema> {
    workbook: Rc<dyn Workbook>,
    ttl: Duration,
    header_check: HeaderCheck,
    header_row: Option<Vec<String>>,
    header_index: HashMap<String, usize>,
    snapshot: Option<Rc<Snapshot>>,
    loaded_at: Option<Instant>,
    _schema: PhantomData<S>,
}

impl<S: TableSchema> Table<S> {
    /// Open the table, creating its sheet when missing.
    pub fn open(workbook: Rc<dyn Workbook>, ttl: Duration) -> AppResult<Self> {
        let header_check = verify_structure::<S>(workbook.as_ref())?;
        Ok(Self {
            workbook,
            ttl,
            header_check,
            header_row: None,
            header_index: HashMap::new(),
            snapshot: None,
            loaded_at: None,
            _schema: PhantomData,
        })
    }

    pub fn header_check(&self) -> &HeaderCheck {
        &self.header_check
    }

    fn load_headers(&mut self) -> AppResult<()> {
        if self.header_row.is_some() {
            return Ok(());
        }
        let width = self.workbook.last_column(S::NAME)?;
        let headers: Vec<String> = self
            .workbook
            .read_rows(S::NAME, 1, 1, width)?
            .into_iter()
            .next()
            .unwrap_or_default()
            .iter()
            .map(Cell::to_display)
            .collect();

        // A repeated header resolves to its last column, as records do.
        self.header_index.clear();
        for (idx, name) in headers.iter().enumerate() {
            if !name.is_empty() {
                self.header_index.insert(name.clone(), idx);
            }
        }
        self.header_row = Some(headers);
        Ok(())
    }

    /// Name → 0-based column position, loaded once.
    pub fn header_index(&mut self) -> AppResult<&HashMap<String, usize>> {
        self.load_headers()?;
        Ok(&self.header_index)
    }

    /// 0-based position of a column.
    pub fn col(&mut self, name: &str) -> AppResult<usize> {
        self.header_index()?
            .get(name)
            .copied()
            .ok_or_else(|| AppError::Schema {
                sheet: S::NAME.to_string(),
                column: name.to_string(),
            })
    }

    /// Whole-sheet snapshot, served from cache while younger than the TTL.
    pub fn read_all(&mut self, force_refresh: bool) -> AppResult<Rc<Snapshot>> {
        if !force_refresh
            && let (Some(snapshot), Some(loaded_at)) = (&self.snapshot, self.loaded_at)
            && loaded_at.elapsed() < self.ttl
        {
            return Ok(Rc::clone(snapshot));
        }

        self.load_headers()?;
        let num_rows = self.workbook.last_row(S::NAME)?;
        let num_cols = self.workbook.last_column(S::NAME)?;

        let snapshot = if num_rows <= 1 {
            Snapshot {
                headers: self.header_row.clone().unwrap_or_default(),
                rows: Vec::new(),
            }
        } else {
            let mut values = self.workbook.read_rows(S::NAME, 1, num_rows, num_cols)?;
            let headers = values.remove(0).iter().map(Cell::to_display).collect();
            Snapshot {
                headers,
                rows: values,
            }
        };

        tracing::trace!(table = S::NAME, rows = snapshot.rows.len(), "snapshot loaded");
        let snapshot = Rc::new(snapshot);
        self.snapshot = Some(Rc::clone(&snapshot));
        self.loaded_at = Some(Instant::now());
        Ok(snapshot)
    }

    /// Drop the cached snapshot and header index.
    pub fn invalidate(&mut self) {
        self.snapshot = None;
        self.loaded_at = None;
        self.header_row = None;
        self.header_index.clear();
    }

    /// Linear scan of the cached rows comparing the first column as text.
    pub fn find_by_key(&mut self, id: &str) -> AppResult<Option<RowRef>> {
        let data = self.read_all(false)?;
        let found = data.rows.iter().enumerate().find_map(|(idx, row)| {
            let key = row.first().map(Cell::to_display).unwrap_or_default();
            (key == id).then(|| RowRef {
                row: idx + 2,
                values: row.clone(),
            })
        });
        Ok(found)
    }

    /// Positional row built from named fields, following the header order.
    fn object_to_row(&mut self, fields: &[(&str, Cell)]) -> AppResult<Vec<Cell>> {
        self.load_headers()?;
        let headers = self.header_row.as_deref().unwrap_or_default();
        Ok(headers
            .iter()
            .map(|name| {
                fields
                    .iter()
                    .find(|(n, _)| *n == name.as_str())
                    .map(|(_, v)| v.clone())
                    .unwrap_or_default()
            })
            .collect())
    }

    /// Append a record and return the row as re-read by its key.
    pub fn insert(&mut self, fields: &[(&str, Cell)]) -> AppResult<Option<RowRef>> {
        let row = self.object_to_row(fields)?;
        let key = row.first().map(Cell::to_display).unwrap_or_default();
        self.workbook.append_row(S::NAME, &row)?;
        self.invalidate();
        tracing::debug!(table = S::NAME, key = %key, "row inserted");
        self.find_by_key(&key)
    }

    /// Write the fields whose name is a known header; unknown names are ignored.
    pub fn update_fields(&mut self, row: usize, fields: &[(&str, Cell)]) -> AppResult<()> {
        self.load_headers()?;
        for (name, value) in fields {
            match self.header_index.get(*name) {
                Some(&col) => self.workbook.set_cell(S::NAME, row, col + 1, value.clone())?,
                None => tracing::debug!(table = S::NAME, field = *name, "unknown field ignored"),
            }
        }
        self.invalidate();
        Ok(())
    }

    /// Every data row as a named record.
    pub fn all_records(&mut self) -> AppResult<Vec<Record>> {
        let data = self.read_all(false)?;
        Ok(data
            .rows
            .iter()
            .map(|row| row_to_object(row, &data.headers))
            .collect())
    }

    /// Record for a row located by `find_by_key`.
    pub fn to_record(&mut self, found: &RowRef) -> AppResult<Record> {
        let data = self.read_all(false)?;
        Ok(row_to_object(&found.values, &data.headers))
    }
}

/// Make sure the sheet exists and report how its header row compares.
/// Existing data is never modified or removed here.
fn verify_structure<S: TableSchema>(workbook: &dyn Workbook) -> AppResult<HeaderCheck> {
    if !workbook.has_sheet(S::NAME)? {
        S::create_sheet(workbook)?;
        tracing::info!(table = S::NAME, "sheet created");
        return Ok(HeaderCheck::Created);
    }

    let last_col = workbook.last_column(S::NAME)?;
    if last_col == 0 {
        write_headers::<S>(workbook)?;
        tracing::info!(table = S::NAME, "headers added to empty sheet");
        return Ok(HeaderCheck::Initialized);
    }

    let found: Vec<String> = workbook
        .read_rows(S::NAME, 1, 1, last_col)?
        .into_iter()
        .next()
        .unwrap_or_default()
        .iter()
        .map(Cell::to_display)
        .collect();

    let matches = S::HEADERS
        .iter()
        .enumerate()
        .all(|(idx, h)| found.get(idx).map(String::as_str) == Some(*h));

    if matches {
        Ok(HeaderCheck::Matched)
    } else {
        tracing::warn!(
            table = S::NAME,
            "headers differ from the expected layout; data will be read as-is"
        );
        Ok(HeaderCheck::Drifted { found })
    }
}
