//! Preventive task repository over the `preventive_tasks` sheet.

use crate::core::ids::{PREVENTIVE_PREFIX, unique_id};
use crate::db::cell::Cell;
use crate::db::workbook::Workbook;
use crate::errors::{AppError, AppResult};
use crate::models::preventive_task::{col, is_truthy};
use crate::models::{
    Frequency, NewPreventiveTask, OperationResult, PreventiveTask, PreventiveTaskSchema,
};
use crate::store::{Table, row_to_object};
use crate::utils::date::{format_date, format_datetime, now};
use chrono::NaiveDate;
use std::rc::Rc;
use std::time::Duration;

/// Next due date of a task recurring with `frequency`.
///
/// The base is `from` (or `today` when absent) but never earlier than
/// `today`, so a schedule never lands in the past.
pub fn next_due_date(frequency: Frequency, from: Option<NaiveDate>, today: NaiveDate) -> NaiveDate {
    let base = from.map_or(today, |d| d.max(today));
    frequency.advance(base)
}

pub struct PreventiveTaskRepository {
    table: Table<PreventiveTaskSchema>,
}

impl PreventiveTaskRepository {
    pub fn open(workbook: Rc<dyn Workbook>, ttl: Duration) -> AppResult<Self> {
        Ok(Self {
            table: Table::open(workbook, ttl)?,
        })
    }

    pub fn table(&mut self) -> &mut Table<PreventiveTaskSchema> {
        &mut self.table
    }

    /// Schedule a new active task.
    pub fn create(&mut self, input: &NewPreventiveTask) -> OperationResult {
        OperationResult::from_result("create preventive task", self.try_create(input))
    }

    fn try_create(&mut self, input: &NewPreventiveTask) -> AppResult<OperationResult> {
        let now = now();
        let id = unique_id(&mut self.table, PREVENTIVE_PREFIX, now.date())?;
        let due = next_due_date(input.frequency, input.start_date, now.date());
        let template = serde_json::to_string(&input.checklist_template)?;

        let fields: Vec<(&str, Cell)> = vec![
            (col::ID, Cell::text(&id)),
            (col::SECTOR, Cell::text(&input.sector)),
            (col::LOCATION, Cell::text(&input.location)),
            (col::DESCRIPTION, Cell::text(&input.description)),
            (
                col::PRIORITY,
                Cell::text(input.priority.unwrap_or_default().as_str()),
            ),
            (col::FREQUENCY, Cell::text(input.frequency.as_str())),
            (col::NEXT_DUE_DATE, Cell::text(format_date(due))),
            (col::CHECKLIST_TEMPLATE, Cell::text(template)),
            (col::ACTIVE, Cell::Bool(true)),
            (col::CREATED_AT, Cell::text(format_datetime(now))),
            (col::NOTES, Cell::text(&input.notes)),
        ];

        self.table.insert(&fields)?;
        tracing::info!(id = %id, due = %due, "preventive task scheduled");
        Ok(OperationResult::ok(
            Some(id),
            format!("Preventive task scheduled, first due on {}", format_date(due)),
        ))
    }

    fn try_get_active(&mut self) -> AppResult<Vec<PreventiveTask>> {
        let active_col = self.table.col(col::ACTIVE)?;
        let data = self.table.read_all(false)?;
        Ok(data
            .rows
            .iter()
            .filter(|row| {
                row.get(active_col)
                    .is_some_and(|c| is_truthy(&c.to_display()))
            })
            .map(|row| PreventiveTask::from_record(&row_to_object(row, &data.headers)))
            .collect())
    }

    /// Tasks with `active == true`.
    pub fn get_active(&mut self) -> Vec<PreventiveTask> {
        self.try_get_active().unwrap_or_else(|e| {
            tracing::error!(error = %e, "get_active failed");
            Vec::new()
        })
    }

    pub fn get_all(&mut self) -> Vec<PreventiveTask> {
        match self.table.all_records() {
            Ok(records) => records.iter().map(PreventiveTask::from_record).collect(),
            Err(e) => {
                tracing::error!(error = %e, "reading preventive tasks failed");
                Vec::new()
            }
        }
    }

    fn try_get_by_id(&mut self, id: &str) -> AppResult<Option<PreventiveTask>> {
        match self.table.find_by_key(id)? {
            Some(found) => {
                let record = self.table.to_record(&found)?;
                Ok(Some(PreventiveTask::from_record(&record)))
            }
            None => Ok(None),
        }
    }

    pub fn get_by_id(&mut self, id: &str) -> Option<PreventiveTask> {
        self.try_get_by_id(id).unwrap_or_else(|e| {
            tracing::error!(error = %e, id, "get_by_id failed");
            None
        })
    }

    /// Soft-deactivate a task; rows are never deleted.
    pub fn deactivate(&mut self, id: &str) -> OperationResult {
        let result = self.set_active(id, false).map(|_| {
            OperationResult::ok(Some(id.to_string()), "Preventive task deactivated.")
        });
        OperationResult::from_result("deactivate preventive task", result)
    }

    fn set_active(&mut self, id: &str, active: bool) -> AppResult<()> {
        let found = self
            .table
            .find_by_key(id)?
            .ok_or_else(|| AppError::not_found("Preventive task", id))?;
        self.table
            .update_fields(found.row, &[(col::ACTIVE, Cell::Bool(active))])
    }

    /// Stamp an execution on `executed_on` and move the schedule to `next_due`.
    pub fn record_execution(
        &mut self,
        id: &str,
        executed_on: NaiveDate,
        next_due: NaiveDate,
    ) -> AppResult<()> {
        let found = self
            .table
            .find_by_key(id)?
            .ok_or_else(|| AppError::not_found("Preventive task", id))?;
        self.table.update_fields(
            found.row,
            &[
                (col::LAST_EXECUTION_DATE, Cell::text(format_date(executed_on))),
                (col::NEXT_DUE_DATE, Cell::text(format_date(next_due))),
            ],
        )?;
        tracing::debug!(id, next_due = %next_due, "execution recorded");
        Ok(())
    }
}
