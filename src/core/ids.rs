//! Record identifiers: `<PREFIX>-<yyyyMMdd>-<4 digits>`.

use crate::errors::AppResult;
use crate::store::{Table, TableSchema};
use chrono::NaiveDate;
use rand::Rng;

pub const WORK_ORDER_PREFIX: &str = "OS";
pub const PREVENTIVE_PREFIX: &str = "PREV";

/// Draws before giving up on finding a free suffix.
const MAX_ATTEMPTS: usize = 5;

pub fn generate_id(prefix: &str, date: NaiveDate) -> String {
    let suffix: u16 = rand::thread_rng().gen_range(1000..=9999);
    format!("{prefix}-{}-{suffix}", date.format("%Y%m%d"))
}

/// Generate an id not yet present in `table`.
pub fn unique_id<S: TableSchema>(
    table: &mut Table<S>,
    prefix: &str,
    date: NaiveDate,
) -> AppResult<String> {
    first_free(table, || generate_id(prefix, date))
}

/// First drawn candidate whose key is not in `table`.
///
/// Only the cached snapshot is checked. The last of `MAX_ATTEMPTS` draws is
/// returned without a check.
pub fn first_free<S: TableSchema>(
    table: &mut Table<S>,
    mut draw: impl FnMut() -> String,
) -> AppResult<String> {
    let mut candidate = draw();
    for _ in 1..MAX_ATTEMPTS {
        if table.find_by_key(&candidate)?.is_none() {
            return Ok(candidate);
        }
        tracing::warn!(table = S::NAME, id = %candidate, "generated id already taken, retrying");
        candidate = draw();
    }
    Ok(candidate)
}
