use super::checklist::parse_template;
use super::frequency::Frequency;
use super::priority::Priority;
use crate::store::{Record, TableSchema};
use chrono::NaiveDate;
use serde::Serialize;

/// Column names of the `preventive_tasks` sheet.
pub mod col {
    pub const ID: &str = "id";
    pub const SECTOR: &str = "sector";
    pub const LOCATION: &str = "location";
    pub const DESCRIPTION: &str = "description";
    pub const PRIORITY: &str = "priority";
    pub const FREQUENCY: &str = "frequency";
    pub const NEXT_DUE_DATE: &str = "next_due_date";
    pub const LAST_EXECUTION_DATE: &str = "last_execution_date";
    pub const CHECKLIST_TEMPLATE: &str = "checklist_template";
    pub const ACTIVE: &str = "active";
    pub const CREATED_AT: &str = "created_at";
    pub const NOTES: &str = "notes";
}

pub struct PreventiveTaskSchema;

impl TableSchema for PreventiveTaskSchema {
    const NAME: &'static str = "preventive_tasks";
    const HEADERS: &'static [&'static str] = &[
        col::ID,
        col::SECTOR,
        col::LOCATION,
        col::DESCRIPTION,
        col::PRIORITY,
        col::FREQUENCY,
        col::NEXT_DUE_DATE,
        col::LAST_EXECUTION_DATE,
        col::CHECKLIST_TEMPLATE,
        col::ACTIVE,
        col::CREATED_AT,
        col::NOTES,
    ];
}

#[derive(Debug, Clone, Serialize)]
pub struct PreventiveTask {
    pub id: String,
    pub sector: String,
    pub location: String,
    pub description: String,
    pub priority: Priority,
    /// Raw frequency label as stored; see [`PreventiveTask::frequency`].
    #[serde(rename = "frequency")]
    pub frequency_label: String,
    pub next_due_date: String,
    pub last_execution_date: String,
    pub checklist_template: Vec<String>,
    pub active: bool,
    pub created_at: String,
    pub notes: String,
}

impl PreventiveTask {
    pub fn from_record(r: &Record) -> Self {
        Self {
            id: r.get(col::ID).to_string(),
            sector: r.get(col::SECTOR).to_string(),
            location: r.get(col::LOCATION).to_string(),
            description: r.get(col::DESCRIPTION).to_string(),
            priority: Priority::from_label(r.get(col::PRIORITY)),
            frequency_label: r.get(col::FREQUENCY).to_string(),
            next_due_date: r.get(col::NEXT_DUE_DATE).to_string(),
            last_execution_date: r.get(col::LAST_EXECUTION_DATE).to_string(),
            checklist_template: parse_template(r.get(col::CHECKLIST_TEMPLATE)),
            active: is_truthy(r.get(col::ACTIVE)),
            created_at: r.get(col::CREATED_AT).to_string(),
            notes: r.get(col::NOTES).to_string(),
        }
    }

    /// Typed frequency; unknown labels recur monthly.
    pub fn frequency(&self) -> Frequency {
        Frequency::from_label(&self.frequency_label)
    }

    /// Due date as a calendar date, when it parses.
    pub fn due_date(&self) -> Option<NaiveDate> {
        crate::utils::date::parse_br_date(&self.next_due_date)
    }
}

/// Values read as an active flag.
pub fn is_truthy(raw: &str) -> bool {
    matches!(
        raw.trim().to_lowercase().as_str(),
        "true" | "yes" | "1"
    )
}

/// Input of a new preventive task.
#[derive(Debug, Clone, Default)]
pub struct NewPreventiveTask {
    pub sector: String,
    pub location: String,
    pub description: String,
    pub priority: Option<Priority>,
    pub frequency: Frequency,
    /// First execution reference; dates in the past are ignored.
    pub start_date: Option<NaiveDate>,
    pub checklist_template: Vec<String>,
    pub notes: String,
}
