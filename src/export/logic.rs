// src/export/logic.rs

use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::{ensure_parent, ensure_writable};
use crate::export::json_csv::{export_csv, export_json};
use crate::store::Record;
use crate::utils::date::now;
use std::path::{Path, PathBuf};

/// High level export of the work order sheet.
pub struct ExportLogic;

impl ExportLogic {
    /// Write `records` to `file`, or to a timestamped file in the current
    /// directory when no file is given. Returns the path written.
    pub fn export(
        records: &[Record],
        format: ExportFormat,
        file: Option<&Path>,
        force: bool,
    ) -> AppResult<PathBuf> {
        if records.is_empty() {
            return Err(AppError::Export("No work orders to export".into()));
        }

        let path = match file {
            Some(p) => p.to_path_buf(),
            None => PathBuf::from(format.default_file_name(now())),
        };

        ensure_writable(&path, force)?;
        ensure_parent(&path)?;

        match format {
            ExportFormat::Csv => export_csv(records, &path)?,
            ExportFormat::Json => export_json(records, &path)?,
        }
        tracing::info!(path = %path.display(), rows = records.len(), format = format.as_str(), "export written");
        Ok(path)
    }
}
