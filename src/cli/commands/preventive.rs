use crate::cli::commands::{finish, print_json};
use crate::cli::parser::{Commands, PreventiveCommand};
use crate::config::Config;
use crate::context::AppContext;
use crate::errors::{AppError, AppResult};
use crate::models::{NewPreventiveTask, PreventiveTask};
use crate::ui::messages::{count, field, header, info};
use crate::utils::date;
use crate::utils::table::{Column, Table};

/// Handle `preventive <action>`.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Preventive { action } = cmd else {
        return Ok(());
    };
    let mut ctx = AppContext::open(cfg.clone())?;

    let outcome = match action {
        PreventiveCommand::Add {
            sector,
            location,
            description,
            priority,
            frequency,
            start,
            items,
            suggest,
            notes,
        } => {
            let start_date = start
                .as_deref()
                .map(|s| date::parse_date(s).ok_or_else(|| AppError::InvalidDate(s.to_string())))
                .transpose()?;

            let checklist_template = if items.is_empty() && *suggest {
                let suggestion = ctx.suggest_checklist(sector, location, description);
                if let Some(msg) = &suggestion.message {
                    info(msg);
                }
                suggestion.checklist
            } else {
                items.clone()
            };

            let input = NewPreventiveTask {
                sector: sector.clone(),
                location: location.clone(),
                description: description.clone(),
                priority: *priority,
                frequency: *frequency,
                start_date,
                checklist_template,
                notes: notes.clone(),
            };
            finish(ctx.create_preventive_task(&input))
        }

        PreventiveCommand::List { all, json } => {
            let tasks = if *all {
                ctx.all_tasks()
            } else {
                ctx.active_tasks()
            };
            list(&tasks, *json)
        }

        PreventiveCommand::Show { id, json } => match ctx.task(id) {
            Some(task) if *json => print_json(&task),
            Some(task) => {
                print_details(&task);
                Ok(())
            }
            None => Err(AppError::not_found("Preventive task", id.as_str())),
        },

        PreventiveCommand::Deactivate { id } => finish(ctx.deactivate_task(id)),

        PreventiveCommand::Generate { id } => finish(ctx.generate_for_task(id)),
    };

    ctx.close();
    outcome
}

fn list(tasks: &[PreventiveTask], json: bool) -> AppResult<()> {
    if json {
        return print_json(tasks);
    }
    if tasks.is_empty() {
        info("No preventive tasks.");
        return Ok(());
    }

    header("Preventive tasks");
    let mut table = Table::new(vec![
        Column::new("ID", 20),
        Column::new("Frequency", 10),
        Column::new("Next due", 10),
        Column::new("Priority", 8),
        Column::new("Active", 6),
        Column::new("Sector", 14),
        Column::new("Description", 36),
    ]);
    for t in tasks {
        table.add_row(vec![
            t.id.clone(),
            t.frequency_label.clone(),
            t.next_due_date.clone(),
            t.priority.as_str().to_string(),
            if t.active { "yes" } else { "no" }.to_string(),
            t.sector.clone(),
            t.description.clone(),
        ]);
    }
    print!("{}", table.render());
    count(tasks.len(), "task");
    Ok(())
}

fn print_details(t: &PreventiveTask) {
    header(format!("Preventive task {}", t.id));
    field("Sector", &t.sector);
    field("Location", &t.location);
    field("Description", &t.description);
    field("Priority", t.priority.as_str());
    field("Frequency", &t.frequency_label);
    field("Next due", &t.next_due_date);
    field("Last execution", &t.last_execution_date);
    field("Active", if t.active { "yes" } else { "no" });
    field("Created", &t.created_at);
    field("Notes", &t.notes);
    if !t.checklist_template.is_empty() {
        println!("Checklist template:");
        for item in &t.checklist_template {
            println!("  - {item}");
        }
    }
}
