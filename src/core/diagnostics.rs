//! Read-only health report of the workbook.

use crate::db::cell::Cell;
use crate::db::workbook::Workbook;
use crate::errors::AppResult;
use crate::models::{PreventiveTaskSchema, WorkOrderSchema, preventive_task, work_order};
use crate::store::TableSchema;
use serde::Serialize;

const WORK_ORDER_KEYS: [&str; 3] = [
    work_order::col::ID,
    work_order::col::STATUS,
    work_order::col::PRIORITY,
];

const PREVENTIVE_KEYS: [&str; 3] = [
    preventive_task::col::ID,
    preventive_task::col::PRIORITY,
    preventive_task::col::FREQUENCY,
];

#[derive(Debug, Clone, Default, Serialize)]
pub struct SheetReport {
    pub exists: bool,
    pub headers: Vec<String>,
    /// Last used row, header row included.
    pub rows: usize,
    /// The key columns are all present.
    pub ok: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Diagnostics {
    pub location: String,
    pub sheets: Vec<String>,
    pub work_orders: SheetReport,
    pub preventive_tasks: SheetReport,
    pub errors: Vec<String>,
}

impl Diagnostics {
    pub fn is_healthy(&self) -> bool {
        self.errors.is_empty() && self.work_orders.ok && self.preventive_tasks.ok
    }
}

/// Inspect `workbook` without touching it. Errors are collected in the
/// report instead of being returned.
pub fn diagnose(workbook: &dyn Workbook) -> Diagnostics {
    let mut report = Diagnostics {
        location: workbook.location(),
        ..Default::default()
    };

    match workbook.sheet_names() {
        Ok(names) => report.sheets = names,
        Err(e) => report.errors.push(e.to_string()),
    }

    match inspect(workbook, WorkOrderSchema::NAME, &WORK_ORDER_KEYS) {
        Ok(sheet) => report.work_orders = sheet,
        Err(e) => report.errors.push(e.to_string()),
    }
    match inspect(workbook, PreventiveTaskSchema::NAME, &PREVENTIVE_KEYS) {
        Ok(sheet) => report.preventive_tasks = sheet,
        Err(e) => report.errors.push(e.to_string()),
    }

    if !report.errors.is_empty() {
        tracing::warn!(errors = report.errors.len(), "diagnostics collected errors");
    }
    report
}

fn inspect(workbook: &dyn Workbook, sheet: &str, keys: &[&str]) -> AppResult<SheetReport> {
    let mut report = SheetReport::default();
    if !workbook.has_sheet(sheet)? {
        return Ok(report);
    }
    report.exists = true;
    report.rows = workbook.last_row(sheet)?;
    if report.rows == 0 {
        return Ok(report);
    }

    let width = workbook.last_column(sheet)?;
    report.headers = workbook
        .read_rows(sheet, 1, 1, width)?
        .into_iter()
        .next()
        .unwrap_or_default()
        .iter()
        .map(Cell::to_display)
        .collect();
    report.ok = keys.iter().all(|k| report.headers.iter().any(|h| h == k));
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryWorkbook;

    #[test]
    fn empty_workbook_reports_missing_sheets() {
        let wb = MemoryWorkbook::new();
        let report = diagnose(&wb);
        assert!(!report.work_orders.exists);
        assert!(!report.preventive_tasks.ok);
        assert!(report.errors.is_empty());
        assert!(!report.is_healthy());
    }

    #[test]
    fn created_tables_are_healthy() {
        let wb = MemoryWorkbook::new();
        WorkOrderSchema::create_sheet(&wb).unwrap();
        PreventiveTaskSchema::create_sheet(&wb).unwrap();

        let report = diagnose(&wb);
        assert_eq!(report.sheets.len(), 2);
        assert_eq!(report.work_orders.rows, 1);
        assert_eq!(report.work_orders.headers.len(), WorkOrderSchema::HEADERS.len());
        assert!(report.is_healthy());
    }

    #[test]
    fn missing_key_column_is_not_ok() {
        let wb = MemoryWorkbook::new();
        wb.create_sheet(WorkOrderSchema::NAME).unwrap();
        wb.append_row(WorkOrderSchema::NAME, &[Cell::from("id"), Cell::from("status")])
            .unwrap();

        let report = diagnose(&wb);
        assert!(report.work_orders.exists);
        assert!(!report.work_orders.ok);
    }
}
