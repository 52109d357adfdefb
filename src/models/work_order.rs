use super::checklist::{ChecklistItem, parse_checklist};
use super::priority::Priority;
use super::status::Status;
use crate::store::{Record, TableSchema};
use serde::Serialize;

/// Column names of the `work_orders` sheet.
pub mod col {
    pub const ID: &str = "id";
    pub const OPENED_AT: &str = "opened_at";
    pub const SECTOR: &str = "sector";
    pub const LOCATION: &str = "location";
    pub const PROBLEM_DESCRIPTION: &str = "problem_description";
    pub const PRIORITY: &str = "priority";
    pub const REQUESTER: &str = "requester";
    pub const AVARIA_PHOTO_URL: &str = "avaria_photo_url";
    pub const STATUS: &str = "status";
    pub const CLOSED_AT: &str = "closed_at";
    pub const TECHNICIAN: &str = "technician";
    pub const REPAIR_DESCRIPTION: &str = "repair_description";
    pub const REPAIR_PHOTO_URL: &str = "repair_photo_url";
    pub const MATERIALS_USED: &str = "materials_used";
    pub const TIME_SPENT_HOURS: &str = "time_spent_hours";
    pub const ESTIMATED_COST: &str = "estimated_cost";
    pub const CHECKLIST: &str = "checklist";
    pub const NOTES: &str = "notes";
    pub const UPDATED_AT: &str = "updated_at";
}

pub struct WorkOrderSchema;

impl TableSchema for WorkOrderSchema {
    const NAME: &'static str = "work_orders";
    const HEADERS: &'static [&'static str] = &[
        col::ID,
        col::OPENED_AT,
        col::SECTOR,
        col::LOCATION,
        col::PROBLEM_DESCRIPTION,
        col::PRIORITY,
        col::REQUESTER,
        col::AVARIA_PHOTO_URL,
        col::STATUS,
        col::CLOSED_AT,
        col::TECHNICIAN,
        col::REPAIR_DESCRIPTION,
        col::REPAIR_PHOTO_URL,
        col::MATERIALS_USED,
        col::TIME_SPENT_HOURS,
        col::ESTIMATED_COST,
        col::CHECKLIST,
        col::NOTES,
        col::UPDATED_AT,
    ];
}

/// A maintenance ticket as read back from the sheet.
///
/// Timestamps keep the `dd/MM/yyyy HH:mm:ss` text they are stored with.
#[derive(Debug, Clone, Serialize)]
pub struct WorkOrder {
    pub id: String,
    pub opened_at: String,
    pub sector: String,
    pub location: String,
    pub problem_description: String,
    pub priority: Priority,
    pub requester: String,
    pub avaria_photo_url: String,
    pub status: Status,
    pub closed_at: String,
    pub technician: String,
    pub repair_description: String,
    pub repair_photo_url: String,
    pub materials_used: String,
    pub time_spent_hours: Option<f64>,
    pub estimated_cost: Option<f64>,
    pub checklist: Vec<ChecklistItem>,
    pub notes: String,
    pub updated_at: String,
}

impl WorkOrder {
    pub fn from_record(r: &Record) -> Self {
        Self {
            id: r.get(col::ID).to_string(),
            opened_at: r.get(col::OPENED_AT).to_string(),
            sector: r.get(col::SECTOR).to_string(),
            location: r.get(col::LOCATION).to_string(),
            problem_description: r.get(col::PROBLEM_DESCRIPTION).to_string(),
            priority: Priority::from_label(r.get(col::PRIORITY)),
            requester: r.get(col::REQUESTER).to_string(),
            avaria_photo_url: r.get(col::AVARIA_PHOTO_URL).to_string(),
            status: Status::from_label(r.get(col::STATUS)),
            closed_at: r.get(col::CLOSED_AT).to_string(),
            technician: r.get(col::TECHNICIAN).to_string(),
            repair_description: r.get(col::REPAIR_DESCRIPTION).to_string(),
            repair_photo_url: r.get(col::REPAIR_PHOTO_URL).to_string(),
            materials_used: r.get(col::MATERIALS_USED).to_string(),
            time_spent_hours: parse_amount(r.get(col::TIME_SPENT_HOURS)),
            estimated_cost: parse_amount(r.get(col::ESTIMATED_COST)),
            checklist: parse_checklist(r.get(col::CHECKLIST)),
            notes: r.get(col::NOTES).to_string(),
            updated_at: r.get(col::UPDATED_AT).to_string(),
        }
    }
}

/// Parse a numeric cell, accepting a decimal comma (`2,5`).
pub fn parse_amount(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    raw.replace(',', ".").parse::<f64>().ok()
}

/// Input of a new work order.
#[derive(Debug, Clone, Default)]
pub struct NewWorkOrder {
    pub sector: String,
    pub location: String,
    pub description: String,
    pub priority: Option<Priority>,
    pub requester: String,
    /// Url of an already stored photo of the damage.
    pub photo_url: Option<String>,
    /// Raw photo to store through the blob store before creating the order.
    pub photo: Option<Vec<u8>>,
    pub checklist: Vec<ChecklistItem>,
    pub notes: String,
}

/// Changes applied to an existing work order.
///
/// Completion fields (`repair_description`, `materials_used`,
/// `time_spent_hours`, `estimated_cost`, `repair_photo_url`) are only
/// written when the status moves to `Done`.
#[derive(Debug, Clone, Default)]
pub struct WorkOrderChanges {
    pub status: Option<Status>,
    pub technician: Option<String>,
    pub repair_description: Option<String>,
    pub materials_used: Option<String>,
    pub time_spent_hours: Option<f64>,
    pub estimated_cost: Option<f64>,
    pub repair_photo_url: Option<String>,
    pub repair_photo: Option<Vec<u8>>,
    pub checklist: Option<Vec<ChecklistItem>>,
    pub notes: Option<String>,
}
