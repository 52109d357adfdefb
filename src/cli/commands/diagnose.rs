use crate::cli::commands::print_json;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::context::AppContext;
use crate::core::diagnostics::SheetReport;
use crate::errors::AppResult;
use crate::ui::messages::{error, header, success, warning};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Diagnose { json } = cmd {
        let report = AppContext::inspect(cfg)?;

        if *json {
            return print_json(&report);
        }

        header("Workbook diagnostics");
        println!("Location : {}", report.location);
        println!("Sheets   : {}", report.sheets.join(", "));
        print_sheet("work_orders", &report.work_orders);
        print_sheet("preventive_tasks", &report.preventive_tasks);
        for e in &report.errors {
            error(e);
        }

        if report.is_healthy() {
            success("Workbook structure looks fine.");
        } else {
            warning("Workbook structure needs attention.");
        }
    }
    Ok(())
}

fn print_sheet(name: &str, sheet: &SheetReport) {
    println!();
    println!("[{name}]");
    println!("  exists  : {}", sheet.exists);
    println!("  rows    : {}", sheet.rows);
    println!("  ok      : {}", sheet.ok);
    if !sheet.headers.is_empty() {
        println!("  headers : {}", sheet.headers.join(", "));
    }
}
