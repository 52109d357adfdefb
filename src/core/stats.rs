//! Aggregated figures over the work order sheet.

use crate::models::work_order::{col, parse_amount};
use crate::models::{Priority, Status};
use crate::store::Record;
use serde::Serialize;
use std::collections::BTreeMap;

pub const UNSPECIFIED_SECTOR: &str = "Unspecified";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Statistics {
    pub total: usize,
    pub open: usize,
    pub in_progress: usize,
    pub done: usize,
    pub cancelled: usize,
    pub by_sector: BTreeMap<String, usize>,
    pub by_priority: BTreeMap<String, usize>,
    /// Keyed by `MM/yyyy` of the opening date.
    pub by_month: BTreeMap<String, usize>,
    /// Mean hours spent on done orders, rounded to two decimals.
    pub average_resolution_hours: f64,
    pub total_cost: f64,
}

impl Statistics {
    pub fn compute(records: &[Record]) -> Self {
        let mut stats = Statistics {
            total: records.len(),
            by_priority: [Priority::Urgent, Priority::High, Priority::Medium, Priority::Low]
                .iter()
                .map(|p| (p.as_str().to_string(), 0))
                .collect(),
            ..Default::default()
        };
        let mut hours_sum = 0.0;
        let mut hours_count = 0usize;

        for r in records {
            let status = Status::from_db_str(r.get(col::STATUS));
            match status {
                Some(Status::Open) => stats.open += 1,
                Some(Status::InProgress) => stats.in_progress += 1,
                Some(Status::Done) => stats.done += 1,
                Some(Status::Cancelled) => stats.cancelled += 1,
                None => {}
            }

            let sector = match r.get(col::SECTOR).trim() {
                "" => UNSPECIFIED_SECTOR,
                s => s,
            };
            *stats.by_sector.entry(sector.to_string()).or_default() += 1;

            let raw_priority = r.get(col::PRIORITY);
            let priority = if raw_priority.trim().is_empty() {
                Some(Priority::Medium)
            } else {
                Priority::from_db_str(raw_priority)
            };
            if let Some(p) = priority {
                *stats.by_priority.entry(p.as_str().to_string()).or_default() += 1;
            }

            stats.total_cost += parse_amount(r.get(col::ESTIMATED_COST)).unwrap_or(0.0);

            if let Some(month) = month_key(r.get(col::OPENED_AT)) {
                *stats.by_month.entry(month).or_default() += 1;
            }

            if status == Some(Status::Done)
                && let Some(hours) = parse_amount(r.get(col::TIME_SPENT_HOURS))
            {
                hours_sum += hours;
                hours_count += 1;
            }
        }

        if hours_count > 0 {
            stats.average_resolution_hours =
                (hours_sum / hours_count as f64 * 100.0).round() / 100.0;
        }
        stats
    }
}

/// `MM/yyyy` out of a `dd/MM/yyyy[ HH:mm:ss]` stamp.
fn month_key(opened_at: &str) -> Option<String> {
    let mut parts = opened_at.trim().split('/');
    let _day = parts.next()?;
    let month = parts.next()?;
    let year: String = parts.next().unwrap_or_default().chars().take(4).collect();
    Some(format!("{month}/{year}"))
}
