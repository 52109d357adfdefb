//! Work order repository over the `work_orders` sheet.

use crate::core::ids::{WORK_ORDER_PREFIX, unique_id};
use crate::db::cell::Cell;
use crate::db::workbook::Workbook;
use crate::errors::{AppError, AppResult};
use crate::models::work_order::col;
use crate::models::{
    NewWorkOrder, OperationResult, Status, WorkOrder, WorkOrderChanges, WorkOrderSchema,
};
use crate::store::{Record, Table, row_to_object};
use crate::utils::date::{format_datetime, now, sort_key};
use std::rc::Rc;
use std::time::Duration;

pub struct WorkOrderRepository {
    table: Table<WorkOrderSchema>,
}

impl WorkOrderRepository {
    pub fn open(workbook: Rc<dyn Workbook>, ttl: Duration) -> AppResult<Self> {
        Ok(Self {
            table: Table::open(workbook, ttl)?,
        })
    }

    pub fn table(&mut self) -> &mut Table<WorkOrderSchema> {
        &mut self.table
    }

    /// Create an `Open` work order.
    pub fn create(&mut self, input: &NewWorkOrder) -> OperationResult {
        OperationResult::from_result("create work order", self.try_create(input))
    }

    fn try_create(&mut self, input: &NewWorkOrder) -> AppResult<OperationResult> {
        let now = now();
        let stamp = format_datetime(now);
        let id = unique_id(&mut self.table, WORK_ORDER_PREFIX, now.date())?;
        let checklist = serde_json::to_string(&input.checklist)?;

        let fields: Vec<(&str, Cell)> = vec![
            (col::ID, Cell::text(&id)),
            (col::OPENED_AT, Cell::text(&stamp)),
            (col::SECTOR, Cell::text(&input.sector)),
            (col::LOCATION, Cell::text(&input.location)),
            (col::PROBLEM_DESCRIPTION, Cell::text(&input.description)),
            (
                col::PRIORITY,
                Cell::text(input.priority.unwrap_or_default().as_str()),
            ),
            (col::REQUESTER, Cell::text(&input.requester)),
            (
                col::AVARIA_PHOTO_URL,
                Cell::text(input.photo_url.clone().unwrap_or_default()),
            ),
            (col::STATUS, Cell::text(Status::Open.as_str())),
            (col::CHECKLIST, Cell::text(checklist)),
            (col::NOTES, Cell::text(&input.notes)),
            (col::UPDATED_AT, Cell::text(&stamp)),
        ];

        self.table.insert(&fields)?;
        tracing::info!(id = %id, "work order created");
        Ok(OperationResult::ok(
            Some(id.clone()),
            format!("Work order {id} created successfully!"),
        ))
    }

    /// Apply `changes` to an existing work order; `updated_at` is always stamped.
    pub fn update(&mut self, id: &str, changes: &WorkOrderChanges) -> OperationResult {
        OperationResult::from_result("update work order", self.try_update(id, changes))
    }

    fn try_update(&mut self, id: &str, changes: &WorkOrderChanges) -> AppResult<OperationResult> {
        let found = self
            .table
            .find_by_key(id)?
            .ok_or_else(|| AppError::not_found("Work order", id))?;

        let stamp = format_datetime(now());
        let mut fields: Vec<(&str, Cell)> = Vec::new();

        if let Some(status) = changes.status {
            fields.push((col::STATUS, Cell::text(status.as_str())));
            match status {
                Status::Done => {
                    fields.push((col::CLOSED_AT, Cell::text(&stamp)));
                    if let Some(v) = &changes.repair_description {
                        fields.push((col::REPAIR_DESCRIPTION, Cell::text(v)));
                    }
                    if let Some(v) = &changes.materials_used {
                        fields.push((col::MATERIALS_USED, Cell::text(v)));
                    }
                    if let Some(v) = changes.time_spent_hours {
                        fields.push((col::TIME_SPENT_HOURS, Cell::Number(v)));
                    }
                    if let Some(v) = changes.estimated_cost {
                        fields.push((col::ESTIMATED_COST, Cell::Number(v)));
                    }
                    if let Some(v) = &changes.repair_photo_url {
                        fields.push((col::REPAIR_PHOTO_URL, Cell::text(v)));
                    }
                }
                Status::Cancelled => fields.push((col::CLOSED_AT, Cell::text(&stamp))),
                Status::Open | Status::InProgress => {}
            }
        }
        if let Some(technician) = &changes.technician {
            fields.push((col::TECHNICIAN, Cell::text(technician)));
        }
        if let Some(checklist) = &changes.checklist {
            fields.push((col::CHECKLIST, Cell::text(serde_json::to_string(checklist)?)));
        }
        if let Some(notes) = &changes.notes {
            fields.push((col::NOTES, Cell::text(notes)));
        }
        fields.push((col::UPDATED_AT, Cell::text(&stamp)));

        self.table.update_fields(found.row, &fields)?;
        tracing::info!(id, "work order updated");
        Ok(OperationResult::ok(
            Some(id.to_string()),
            format!("Work order {id} updated."),
        ))
    }

    /// Records whose raw status cell satisfies `keep`.
    fn filter_by_status(&mut self, keep: impl Fn(Status) -> bool) -> AppResult<Vec<WorkOrder>> {
        let status_col = self.table.col(col::STATUS)?;
        let data = self.table.read_all(false)?;
        Ok(data
            .rows
            .iter()
            .filter(|row| {
                let raw = row.get(status_col).map(Cell::to_display).unwrap_or_default();
                Status::from_db_str(&raw).is_some_and(&keep)
            })
            .map(|row| WorkOrder::from_record(&row_to_object(row, &data.headers)))
            .collect())
    }

    /// Open and in-progress orders, most urgent first, newest first within
    /// the same priority.
    pub fn get_pending(&mut self) -> Vec<WorkOrder> {
        match self.filter_by_status(|s| s.is_pending()) {
            Ok(mut orders) => {
                orders.sort_by(|a, b| {
                    a.priority
                        .weight()
                        .cmp(&b.priority.weight())
                        .then_with(|| sort_key(&b.opened_at).cmp(&sort_key(&a.opened_at)))
                });
                orders
            }
            Err(e) => {
                tracing::error!(error = %e, "get_pending failed");
                Vec::new()
            }
        }
    }

    /// Done and cancelled orders, most recently closed first.
    pub fn get_history(&mut self) -> Vec<WorkOrder> {
        match self.filter_by_status(|s| s.is_closed()) {
            Ok(mut orders) => {
                orders.sort_by_key(|o| std::cmp::Reverse(sort_key(closing_stamp(o))));
                orders
            }
            Err(e) => {
                tracing::error!(error = %e, "get_history failed");
                Vec::new()
            }
        }
    }

    pub fn get_all(&mut self) -> Vec<WorkOrder> {
        self.get_all_records()
            .iter()
            .map(WorkOrder::from_record)
            .collect()
    }

    /// Every row as a flat record, in sheet order.
    pub fn get_all_records(&mut self) -> Vec<Record> {
        self.table.all_records().unwrap_or_else(|e| {
            tracing::error!(error = %e, "reading work orders failed");
            Vec::new()
        })
    }

    pub fn get_by_id(&mut self, id: &str) -> Option<WorkOrder> {
        let lookup = self.table.find_by_key(id).and_then(|found| match found {
            Some(found) => self.table.to_record(&found).map(Some),
            None => Ok(None),
        });
        match lookup {
            Ok(record) => record.as_ref().map(WorkOrder::from_record),
            Err(e) => {
                tracing::error!(error = %e, id, "get_by_id failed");
                None
            }
        }
    }
}

fn closing_stamp(order: &WorkOrder) -> &str {
    if order.closed_at.is_empty() {
        &order.opened_at
    } else {
        &order.closed_at
    }
}
