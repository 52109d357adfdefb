// src/export/mod.rs

mod fs_utils;
mod json_csv;
pub mod logic;

pub use json_csv::write_csv;
pub use logic::ExportLogic;

use crate::ui::messages::success;
use chrono::NaiveDateTime;
use clap::ValueEnum;
use std::path::Path;

/// Shared completion message for every export format.
pub(crate) fn notify_export_success(label: &str, path: &Path) {
    success(format!("{label} export completed: {}", path.display()));
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    /// `work_orders_<yyyy-MM-dd_HH-mm>.<ext>`
    pub fn default_file_name(&self, at: NaiveDateTime) -> String {
        format!("work_orders_{}.{}", at.format("%Y-%m-%d_%H-%M"), self.as_str())
    }
}
