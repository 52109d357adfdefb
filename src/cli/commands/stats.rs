use crate::cli::commands::print_json;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::context::AppContext;
use crate::errors::AppResult;
use crate::ui::messages::header;
use std::collections::BTreeMap;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Stats { json } = cmd {
        let mut ctx = AppContext::open(cfg.clone())?;
        let stats = ctx.statistics();
        ctx.close();

        if *json {
            return print_json(&stats);
        }

        header("Work order statistics");
        println!("Total        : {}", stats.total);
        println!("Open         : {}", stats.open);
        println!("In progress  : {}", stats.in_progress);
        println!("Done         : {}", stats.done);
        println!("Cancelled    : {}", stats.cancelled);
        println!("Avg. hours   : {:.2}", stats.average_resolution_hours);
        println!("Total cost   : {:.2}", stats.total_cost);
        print_counts("By priority", &stats.by_priority);
        print_counts("By sector", &stats.by_sector);
        print_counts("By month", &stats.by_month);
    }
    Ok(())
}

fn print_counts(title: &str, counts: &BTreeMap<String, usize>) {
    if counts.is_empty() {
        return;
    }
    println!("\n{title}:");
    for (k, v) in counts {
        println!("  {k:<20} {v}");
    }
}
