use crate::cli::commands::{finish, print_json};
use crate::cli::parser::{Commands, OrderCommand};
use crate::config::Config;
use crate::context::AppContext;
use crate::errors::{AppError, AppResult};
use crate::models::checklist::ChecklistItem;
use crate::models::{NewWorkOrder, WorkOrder, WorkOrderChanges};
use crate::ui::messages::{count, field, header, info};
use crate::utils::table::{Column, Table};
use std::fs;

/// Handle `order <action>`.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Order { action } = cmd else {
        return Ok(());
    };
    let mut ctx = AppContext::open(cfg.clone())?;

    let outcome = match action {
        OrderCommand::Add {
            sector,
            location,
            description,
            priority,
            requester,
            photo,
            photo_url,
            items,
            notes,
        } => {
            let input = NewWorkOrder {
                sector: sector.clone(),
                location: location.clone(),
                description: description.clone(),
                priority: *priority,
                requester: requester.clone(),
                photo_url: photo_url.clone(),
                photo: read_photo(photo.as_deref())?,
                checklist: items.iter().map(ChecklistItem::pending).collect(),
                notes: notes.clone(),
            };
            finish(ctx.create_work_order(input))
        }

        OrderCommand::Update {
            id,
            status,
            technician,
            repair,
            materials,
            hours,
            cost,
            photo,
            photo_url,
            notes,
        } => {
            let changes = WorkOrderChanges {
                status: *status,
                technician: technician.clone(),
                repair_description: repair.clone(),
                materials_used: materials.clone(),
                time_spent_hours: *hours,
                estimated_cost: *cost,
                repair_photo_url: photo_url.clone(),
                repair_photo: read_photo(photo.as_deref())?,
                checklist: None,
                notes: notes.clone(),
            };
            finish(ctx.update_work_order(id, changes))
        }

        OrderCommand::Pending { json } => list("Pending work orders", &ctx.pending_orders(), *json),
        OrderCommand::History { json } => list("Work order history", &ctx.order_history(), *json),
        OrderCommand::All { json } => list("All work orders", &ctx.all_orders(), *json),

        OrderCommand::Show { id, json } => match ctx.order(id) {
            Some(order) if *json => print_json(&order),
            Some(order) => {
                print_details(&order);
                Ok(())
            }
            None => Err(AppError::not_found("Work order", id.as_str())),
        },
    };

    ctx.close();
    outcome
}

fn read_photo(path: Option<&str>) -> AppResult<Option<Vec<u8>>> {
    path.map(fs::read).transpose().map_err(AppError::from)
}

fn list(title: &str, orders: &[WorkOrder], json: bool) -> AppResult<()> {
    if json {
        return print_json(orders);
    }
    if orders.is_empty() {
        info("No work orders.");
        return Ok(());
    }

    header(title);
    let mut table = Table::new(vec![
        Column::new("ID", 18),
        Column::new("Opened", 19),
        Column::new("Priority", 8),
        Column::new("Status", 11),
        Column::new("Sector", 14),
        Column::new("Location", 14),
        Column::new("Problem", 40),
    ]);
    for o in orders {
        table.add_row(vec![
            o.id.clone(),
            o.opened_at.clone(),
            o.priority.as_str().to_string(),
            o.status.as_str().to_string(),
            o.sector.clone(),
            o.location.clone(),
            o.problem_description.clone(),
        ]);
    }
    print!("{}", table.render());
    count(orders.len(), "order");
    Ok(())
}

fn print_details(o: &WorkOrder) {
    header(format!("Work order {}", o.id));
    field("Opened", &o.opened_at);
    field("Status", o.status.as_str());
    field("Priority", o.priority.as_str());
    field("Sector", &o.sector);
    field("Location", &o.location);
    field("Problem", &o.problem_description);
    field("Requester", &o.requester);
    field("Photo", &o.avaria_photo_url);
    field("Closed", &o.closed_at);
    field("Technician", &o.technician);
    field("Repair", &o.repair_description);
    field("Repair photo", &o.repair_photo_url);
    field("Materials", &o.materials_used);
    if let Some(h) = o.time_spent_hours {
        field("Hours", h);
    }
    if let Some(c) = o.estimated_cost {
        field("Cost", format!("{c:.2}"));
    }
    field("Notes", &o.notes);
    field("Updated", &o.updated_at);
    if !o.checklist.is_empty() {
        println!("Checklist:");
        for item in &o.checklist {
            let mark = if item.done { "x" } else { " " };
            println!("  [{mark}] {}", item.description);
        }
    }
}
