use crate::cli::commands::print_json;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::context::AppContext;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success, warning};
use crate::utils::date;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Sweep { date: day, json } = cmd {
        let today = match day {
            Some(s) => date::parse_date(s).ok_or_else(|| AppError::InvalidDate(s.clone()))?,
            None => date::today(),
        };

        let mut ctx = AppContext::open(cfg.clone())?;
        let report = ctx.sweep_on(today);
        ctx.close();

        if *json {
            return print_json(&report);
        }

        info(format!("{} active preventive task(s) checked", report.checked));
        for id in &report.generated {
            success(format!("Work order {id} generated"));
        }
        for (task, reason) in &report.failures {
            warning(format!("Task {task} skipped: {reason}"));
        }
        if report.generated.is_empty() && report.failures.is_empty() {
            info("Nothing due.");
        }
    }
    Ok(())
}
