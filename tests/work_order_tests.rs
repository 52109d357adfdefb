use hotelmaint::AppContext;
use hotelmaint::db::{Cell, MemoryWorkbook};
use hotelmaint::errors::{AppError, AppResult};
use hotelmaint::models::work_order::col;
use hotelmaint::models::{ChecklistItem, NewWorkOrder, Priority, Status, WorkOrderChanges};
use hotelmaint::services::{BlobStore, NotificationService};
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

mod common;
use common::{memory_context, test_config};

fn order(description: &str, priority: Option<Priority>) -> NewWorkOrder {
    NewWorkOrder {
        sector: "Rooms".into(),
        location: "204".into(),
        description: description.into(),
        priority,
        requester: "Front desk".into(),
        ..Default::default()
    }
}

fn create(ctx: &mut AppContext, description: &str, priority: Option<Priority>) -> String {
    let result = ctx.create_work_order(order(description, priority));
    assert!(result.success, "{}", result.message);
    result.id.expect("id of the created order")
}

#[test]
fn create_stamps_defaults() {
    let mut ctx = memory_context("wo_create");
    let id = create(&mut ctx, "Leaking tap", None);

    let parts: Vec<&str> = id.split('-').collect();
    assert_eq!(parts.len(), 3, "{id}");
    assert_eq!(parts[0], "OS");
    assert_eq!(parts[1].len(), 8);
    let suffix: u16 = parts[2].parse().unwrap();
    assert!((1000..=9999).contains(&suffix));

    let wo = ctx.order(&id).unwrap();
    assert_eq!(wo.status, Status::Open);
    assert_eq!(wo.priority, Priority::Medium);
    assert_eq!(wo.problem_description, "Leaking tap");
    assert!(!wo.opened_at.is_empty());
    assert_eq!(wo.opened_at, wo.updated_at);
    assert!(wo.closed_at.is_empty());
}

#[test]
fn pending_and_history_partition_the_orders() {
    let mut ctx = memory_context("wo_partition");
    let ids: Vec<String> = (0..5)
        .map(|i| create(&mut ctx, &format!("order {i}"), None))
        .collect();

    let progress = WorkOrderChanges {
        status: Some(Status::InProgress),
        ..Default::default()
    };
    assert!(ctx.update_work_order(&ids[1], progress).success);
    let done = WorkOrderChanges {
        status: Some(Status::Done),
        ..Default::default()
    };
    assert!(ctx.update_work_order(&ids[2], done).success);
    let cancelled = WorkOrderChanges {
        status: Some(Status::Cancelled),
        ..Default::default()
    };
    assert!(ctx.update_work_order(&ids[3], cancelled).success);

    let pending: HashSet<String> = ctx.pending_orders().into_iter().map(|o| o.id).collect();
    let history: HashSet<String> = ctx.order_history().into_iter().map(|o| o.id).collect();

    assert_eq!(pending.len(), 3);
    assert_eq!(history.len(), 2);
    assert!(pending.is_disjoint(&history));
    assert!(pending.contains(&ids[1]));
    assert!(history.contains(&ids[2]) && history.contains(&ids[3]));
}

#[test]
fn pending_orders_sort_by_priority_then_newest() {
    let mut ctx = memory_context("wo_sort");
    let table = ctx.work_orders().table();
    let rows = [
        ("A", "Low", "01/01/2025 08:00:00"),
        ("B", "Urgent", "01/01/2025 09:00:00"),
        ("C", "Medium", "01/01/2025 10:00:00"),
        ("D", "Urgent", "02/01/2025 07:00:00"),
        ("E", "Bogus", "03/01/2025 07:00:00"),
        ("F", "High", "01/01/2025 11:00:00"),
    ];
    for (id, priority, opened) in rows {
        table
            .insert(&[
                (col::ID, Cell::text(id)),
                (col::PRIORITY, Cell::text(priority)),
                (col::OPENED_AT, Cell::text(opened)),
                (col::STATUS, Cell::text("Open")),
            ])
            .unwrap();
    }

    let order: Vec<String> = ctx.pending_orders().into_iter().map(|o| o.id).collect();
    // E has an unknown priority and ranks with the Medium ones.
    assert_eq!(order, vec!["D", "B", "F", "E", "C", "A"]);
}

#[test]
fn history_sorts_by_closing_date() {
    let mut ctx = memory_context("wo_history");
    let table = ctx.work_orders().table();
    let rows = [
        ("A", "Done", "01/01/2025 08:00:00", "05/01/2025 08:00:00"),
        ("B", "Cancelled", "02/01/2025 08:00:00", ""),
        ("C", "Done", "01/01/2025 08:00:00", "10/01/2025 08:00:00"),
        ("D", "Weird", "01/01/2025 08:00:00", "11/01/2025 08:00:00"),
    ];
    for (id, status, opened, closed) in rows {
        table
            .insert(&[
                (col::ID, Cell::text(id)),
                (col::STATUS, Cell::text(status)),
                (col::OPENED_AT, Cell::text(opened)),
                (col::CLOSED_AT, Cell::text(closed)),
            ])
            .unwrap();
    }

    let order: Vec<String> = ctx.order_history().into_iter().map(|o| o.id).collect();
    assert_eq!(order, vec!["C", "A", "B"]);
    // An unknown status is neither pending nor history.
    assert!(ctx.pending_orders().is_empty());
}

#[test]
fn completion_fields_are_written_only_when_done() {
    let mut ctx = memory_context("wo_complete");
    let id = create(&mut ctx, "Broken AC", Some(Priority::High));

    let in_progress = WorkOrderChanges {
        status: Some(Status::InProgress),
        technician: Some("Ana".into()),
        repair_description: Some("too early".into()),
        ..Default::default()
    };
    assert!(ctx.update_work_order(&id, in_progress).success);
    let wo = ctx.order(&id).unwrap();
    assert_eq!(wo.status, Status::InProgress);
    assert_eq!(wo.technician, "Ana");
    assert!(wo.repair_description.is_empty());
    assert!(wo.closed_at.is_empty());

    let done = WorkOrderChanges {
        status: Some(Status::Done),
        repair_description: Some("Replaced capacitor".into()),
        materials_used: Some("capacitor 35uF".into()),
        time_spent_hours: Some(2.5),
        estimated_cost: Some(180.0),
        checklist: Some(vec![ChecklistItem {
            description: "Test cooling".into(),
            done: true,
        }]),
        ..Default::default()
    };
    assert!(ctx.update_work_order(&id, done).success);
    let wo = ctx.order(&id).unwrap();
    assert_eq!(wo.status, Status::Done);
    assert!(!wo.closed_at.is_empty());
    assert_eq!(wo.repair_description, "Replaced capacitor");
    assert_eq!(wo.time_spent_hours, Some(2.5));
    assert_eq!(wo.estimated_cost, Some(180.0));
    assert!(wo.checklist[0].done);
}

#[test]
fn cancelling_stamps_only_closed_at() {
    let mut ctx = memory_context("wo_cancel");
    let id = create(&mut ctx, "Duplicate ticket", None);
    let cancel = WorkOrderChanges {
        status: Some(Status::Cancelled),
        repair_description: Some("ignored".into()),
        ..Default::default()
    };
    assert!(ctx.update_work_order(&id, cancel).success);

    let wo = ctx.order(&id).unwrap();
    assert_eq!(wo.status, Status::Cancelled);
    assert!(!wo.closed_at.is_empty());
    assert!(wo.repair_description.is_empty());
}

#[test]
fn updating_unknown_order_fails_softly() {
    let mut ctx = memory_context("wo_unknown");
    let result = ctx.update_work_order("OS-00000000-0000", WorkOrderChanges::default());
    assert!(!result.success);
    assert!(result.message.contains("not found"), "{}", result.message);
    assert!(ctx.order("OS-00000000-0000").is_none());
}

// ---------------------------
// Side effects
// ---------------------------

struct FailingBlobs;

impl BlobStore for FailingBlobs {
    fn save(&self, _bytes: &[u8], _name: &str) -> AppResult<String> {
        Err(AppError::Service("storage offline".into()))
    }
}

struct MemoryBlobs(Rc<RefCell<Vec<String>>>);

impl BlobStore for MemoryBlobs {
    fn save(&self, _bytes: &[u8], name: &str) -> AppResult<String> {
        self.0.borrow_mut().push(name.to_string());
        Ok(format!("mem://{name}"))
    }
}

struct FailingNotifier;

impl NotificationService for FailingNotifier {
    fn notify(&self, _to: &[String], _subject: &str, _body: &str) -> AppResult<()> {
        Err(AppError::Service("smtp down".into()))
    }
}

struct RecordingNotifier(Rc<RefCell<Vec<String>>>);

impl NotificationService for RecordingNotifier {
    fn notify(&self, _to: &[String], subject: &str, _body: &str) -> AppResult<()> {
        self.0.borrow_mut().push(subject.to_string());
        Ok(())
    }
}

fn notifying_config(name: &str) -> hotelmaint::config::Config {
    let mut cfg = test_config(name);
    cfg.email_notifications = true;
    cfg.team_emails = "ops@hotel.test".into();
    cfg
}

#[test]
fn failing_side_effects_never_block_creation() {
    let mut ctx = AppContext::builder(notifying_config("wo_failing"))
        .workbook(Rc::new(MemoryWorkbook::new()))
        .blob_store(Box::new(FailingBlobs))
        .notifier(Box::new(FailingNotifier))
        .build()
        .unwrap();

    let mut input = order("Flooded bathroom", Some(Priority::Urgent));
    input.photo = Some(vec![0xFF, 0xD8, 0xFF]);
    let result = ctx.create_work_order(input);

    assert!(result.success, "{}", result.message);
    let wo = ctx.order(result.id.as_deref().unwrap()).unwrap();
    assert!(wo.avaria_photo_url.is_empty());
}

#[test]
fn photos_and_notifications_are_delivered() {
    let stored = Rc::new(RefCell::new(Vec::new()));
    let sent = Rc::new(RefCell::new(Vec::new()));
    let mut ctx = AppContext::builder(notifying_config("wo_delivered"))
        .workbook(Rc::new(MemoryWorkbook::new()))
        .blob_store(Box::new(MemoryBlobs(Rc::clone(&stored))))
        .notifier(Box::new(RecordingNotifier(Rc::clone(&sent))))
        .build()
        .unwrap();

    let mut input = order("Broken window", Some(Priority::Urgent));
    input.photo = Some(vec![1, 2, 3]);
    let id = ctx.create_work_order(input).id.unwrap();

    let wo = ctx.order(&id).unwrap();
    assert!(wo.avaria_photo_url.starts_with("mem://temp/avaria_temp_"));
    assert_eq!(sent.borrow().as_slice(), [format!("[Hotel] New WO URGENT: {id}")]);

    let done = WorkOrderChanges {
        status: Some(Status::Done),
        repair_photo: Some(vec![4, 5, 6]),
        ..Default::default()
    };
    assert!(ctx.update_work_order(&id, done).success);
    let wo = ctx.order(&id).unwrap();
    assert!(wo.repair_photo_url.starts_with(&format!("mem://{id}/repair_{id}_")));
    assert_eq!(stored.borrow().len(), 2);
}

#[test]
fn notifications_respect_the_switch() {
    let sent = Rc::new(RefCell::new(Vec::new()));
    let mut ctx = AppContext::builder(test_config("wo_silent"))
        .workbook(Rc::new(MemoryWorkbook::new()))
        .notifier(Box::new(RecordingNotifier(Rc::clone(&sent))))
        .build()
        .unwrap();

    create(&mut ctx, "Squeaky door", Some(Priority::Low));
    assert!(sent.borrow().is_empty());
}

#[test]
fn statistics_follow_the_sheet() {
    let mut ctx = memory_context("wo_stats");
    let a = create(&mut ctx, "one", Some(Priority::Urgent));
    create(&mut ctx, "two", None);
    let done = WorkOrderChanges {
        status: Some(Status::Done),
        time_spent_hours: Some(3.0),
        estimated_cost: Some(50.0),
        ..Default::default()
    };
    ctx.update_work_order(&a, done);

    let stats = ctx.statistics();
    assert_eq!(stats.total, 2);
    assert_eq!(stats.done, 1);
    assert_eq!(stats.open, 1);
    assert_eq!(stats.by_sector["Rooms"], 2);
    assert_eq!(stats.average_resolution_hours, 3.0);
    assert_eq!(stats.total_cost, 50.0);
}
