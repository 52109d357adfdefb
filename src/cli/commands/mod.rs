//! One handler per subcommand, plus the output helpers they share.

pub mod config;
pub mod diagnose;
pub mod export;
pub mod init;
pub mod order;
pub mod preventive;
pub mod stats;
pub mod suggest;
pub mod sweep;

use crate::errors::{AppError, AppResult};
use crate::models::OperationResult;
use crate::ui::messages::success;
use serde::Serialize;

/// Print a structured result; a failed operation becomes an error so the
/// process exits non-zero.
pub(crate) fn finish(result: OperationResult) -> AppResult<()> {
    if result.success {
        success(&result.message);
        Ok(())
    } else {
        Err(AppError::OperationFailed(result.message))
    }
}

pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> AppResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
