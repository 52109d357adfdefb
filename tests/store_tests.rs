use hotelmaint::AppContext;
use hotelmaint::db::{Cell, MemoryWorkbook, SqliteWorkbook, Workbook};
use hotelmaint::errors::AppError;
use hotelmaint::models::work_order::col;
use hotelmaint::models::WorkOrderSchema;
use hotelmaint::store::{DEFAULT_CACHE_TTL, HeaderCheck, Table, TableSchema};
use std::rc::Rc;
use std::time::Duration;

mod common;
use common::{setup_test_workbook, test_config};

fn memory() -> (Rc<MemoryWorkbook>, Rc<dyn Workbook>) {
    let wb = Rc::new(MemoryWorkbook::new());
    let shared: Rc<dyn Workbook> = wb.clone();
    (wb, shared)
}

#[test]
fn missing_sheet_is_created_with_frozen_headers() {
    let (wb, shared) = memory();
    let table: Table<WorkOrderSchema> = Table::open(shared, DEFAULT_CACHE_TTL).unwrap();

    assert_eq!(table.header_check(), &HeaderCheck::Created);
    assert_eq!(wb.frozen_rows(WorkOrderSchema::NAME), 1);
    assert_eq!(
        wb.last_column(WorkOrderSchema::NAME).unwrap(),
        WorkOrderSchema::HEADERS.len()
    );
}

#[test]
fn empty_sheet_gets_headers() {
    let (wb, shared) = memory();
    wb.create_sheet(WorkOrderSchema::NAME).unwrap();

    let table: Table<WorkOrderSchema> = Table::open(shared, DEFAULT_CACHE_TTL).unwrap();
    assert_eq!(table.header_check(), &HeaderCheck::Initialized);
    assert_eq!(wb.last_row(WorkOrderSchema::NAME).unwrap(), 1);
}

#[test]
fn insert_then_find_round_trip() {
    let (_wb, shared) = memory();
    let mut table: Table<WorkOrderSchema> = Table::open(shared, DEFAULT_CACHE_TTL).unwrap();

    let inserted = table
        .insert(&[
            (col::ID, Cell::text("OS-20250101-1111")),
            (col::SECTOR, Cell::text("Laundry")),
            (col::TIME_SPENT_HOURS, Cell::Number(2.0)),
        ])
        .unwrap()
        .expect("row found after insert");
    assert_eq!(inserted.row, 2);

    let found = table.find_by_key("OS-20250101-1111").unwrap().unwrap();
    let record = table.to_record(&found).unwrap();
    assert_eq!(record.get(col::SECTOR), "Laundry");
    assert_eq!(record.get(col::TIME_SPENT_HOURS), "2");
    assert_eq!(record.get(col::NOTES), "");
    assert_eq!(record.len(), WorkOrderSchema::HEADERS.len());

    assert!(table.find_by_key("OS-missing").unwrap().is_none());
}

#[test]
fn update_fields_is_visible_within_ttl() {
    let (_wb, shared) = memory();
    let mut table: Table<WorkOrderSchema> =
        Table::open(shared, Duration::from_secs(3600)).unwrap();
    let row = table
        .insert(&[(col::ID, Cell::text("A")), (col::STATUS, Cell::text("Open"))])
        .unwrap()
        .unwrap();
    table.read_all(false).unwrap();

    table
        .update_fields(row.row, &[(col::STATUS, Cell::text("Done"))])
        .unwrap();

    let found = table.find_by_key("A").unwrap().unwrap();
    assert_eq!(table.to_record(&found).unwrap().get(col::STATUS), "Done");
}

#[test]
fn snapshot_is_served_until_forced() {
    let (wb, shared) = memory();
    let mut table: Table<WorkOrderSchema> =
        Table::open(shared, Duration::from_secs(3600)).unwrap();
    table
        .insert(&[(col::ID, Cell::text("A")), (col::NOTES, Cell::text("before"))])
        .unwrap();
    let notes_col = table.col(col::NOTES).unwrap();
    table.read_all(false).unwrap();

    // Written behind the table's back.
    wb.set_cell(WorkOrderSchema::NAME, 2, notes_col + 1, Cell::text("after"))
        .unwrap();

    let cached = table.read_all(false).unwrap();
    assert_eq!(cached.rows[0][notes_col].to_display(), "before");
    let fresh = table.read_all(true).unwrap();
    assert_eq!(fresh.rows[0][notes_col].to_display(), "after");
}

#[test]
fn zero_ttl_always_rereads() {
    let (wb, shared) = memory();
    let mut table: Table<WorkOrderSchema> = Table::open(shared, Duration::ZERO).unwrap();
    table.insert(&[(col::ID, Cell::text("A"))]).unwrap();
    table.read_all(false).unwrap();

    wb.append_row(WorkOrderSchema::NAME, &[Cell::text("B")]).unwrap();
    assert_eq!(table.read_all(false).unwrap().rows.len(), 2);
}

#[test]
fn drifted_headers_are_read_as_is() {
    let (wb, shared) = memory();
    wb.create_sheet(WorkOrderSchema::NAME).unwrap();
    wb.append_row(
        WorkOrderSchema::NAME,
        &[Cell::text("id"), Cell::text("legacy"), Cell::text("status")],
    )
    .unwrap();
    wb.append_row(
        WorkOrderSchema::NAME,
        &[Cell::text("OLD-1"), Cell::text("keep me"), Cell::text("Open")],
    )
    .unwrap();

    let mut table: Table<WorkOrderSchema> = Table::open(shared, DEFAULT_CACHE_TTL).unwrap();
    match table.header_check() {
        HeaderCheck::Drifted { found } => assert_eq!(found, &["id", "legacy", "status"]),
        other => panic!("unexpected header check {other:?}"),
    }

    // Nothing was rewritten.
    let rows = wb.read_rows(WorkOrderSchema::NAME, 1, 2, 3).unwrap();
    assert_eq!(rows[0][1].to_display(), "legacy");
    assert_eq!(rows[1][1].to_display(), "keep me");

    assert!(matches!(
        table.col(col::PRIORITY),
        Err(AppError::Schema { .. })
    ));

    let found = table.find_by_key("OLD-1").unwrap().unwrap();
    table
        .update_fields(
            found.row,
            &[
                ("no_such_field", Cell::text("x")),
                (col::STATUS, Cell::text("Done")),
            ],
        )
        .unwrap();
    let updated = table.find_by_key("OLD-1").unwrap().unwrap();
    let record = table.to_record(&updated).unwrap();
    assert_eq!(record.get("legacy"), "keep me");
    assert_eq!(record.get(col::STATUS), "Done");
    assert!(!record.contains("no_such_field"));
}

#[test]
fn sqlite_cells_keep_their_kind() {
    let wb = SqliteWorkbook::in_memory().unwrap();
    wb.create_sheet("cells").unwrap();
    let when = chrono::NaiveDate::from_ymd_opt(2025, 1, 2)
        .unwrap()
        .and_hms_opt(9, 30, 15)
        .unwrap();
    let row = vec![
        Cell::text("a"),
        Cell::Number(2.5),
        Cell::Bool(true),
        Cell::Date(when),
        Cell::Empty,
        Cell::text("end"),
    ];
    wb.append_row("cells", &row).unwrap();

    assert_eq!(wb.last_row("cells").unwrap(), 1);
    assert_eq!(wb.last_column("cells").unwrap(), 6);
    assert_eq!(wb.read_rows("cells", 1, 1, 6).unwrap()[0], row);

    wb.set_cell("cells", 1, 6, Cell::Empty).unwrap();
    assert_eq!(wb.last_column("cells").unwrap(), 4);
}

#[test]
fn sqlite_workbook_persists_between_opens() {
    let path = setup_test_workbook("store_persist");
    {
        let shared: Rc<dyn Workbook> = Rc::new(SqliteWorkbook::open(&path).unwrap());
        let mut table: Table<WorkOrderSchema> = Table::open(shared, DEFAULT_CACHE_TTL).unwrap();
        table
            .insert(&[
                (col::ID, Cell::text("OS-1")),
                (col::ESTIMATED_COST, Cell::Number(12.5)),
            ])
            .unwrap();
    }

    let shared: Rc<dyn Workbook> = Rc::new(SqliteWorkbook::open(&path).unwrap());
    let mut table: Table<WorkOrderSchema> = Table::open(shared, DEFAULT_CACHE_TTL).unwrap();
    assert_eq!(table.header_check(), &HeaderCheck::Matched);
    let found = table.find_by_key("OS-1").unwrap().unwrap();
    assert_eq!(table.to_record(&found).unwrap().get(col::ESTIMATED_COST), "12.5");
}

#[test]
fn repeated_header_reads_back_what_was_written() {
    let (wb, shared) = memory();
    wb.create_sheet(WorkOrderSchema::NAME).unwrap();
    wb.append_row(
        WorkOrderSchema::NAME,
        &[Cell::text("id"), Cell::text("status"), Cell::text("status")],
    )
    .unwrap();
    wb.append_row(
        WorkOrderSchema::NAME,
        &[Cell::text("A"), Cell::text("Open"), Cell::text("Open")],
    )
    .unwrap();

    let mut table: Table<WorkOrderSchema> = Table::open(shared, DEFAULT_CACHE_TTL).unwrap();
    assert!(matches!(table.header_check(), HeaderCheck::Drifted { .. }));

    let found = table.find_by_key("A").unwrap().unwrap();
    table
        .update_fields(found.row, &[(col::STATUS, Cell::text("Done"))])
        .unwrap();

    let updated = table.find_by_key("A").unwrap().unwrap();
    assert_eq!(table.to_record(&updated).unwrap().get(col::STATUS), "Done");
}

#[test]
fn inspect_does_not_create_sheets() {
    let cfg = test_config("inspect_missing");

    let report = AppContext::inspect(&cfg).unwrap();
    assert!(report.sheets.is_empty());
    assert!(!report.work_orders.exists);
    assert!(!report.preventive_tasks.exists);
    assert!(!report.is_healthy());

    // Still missing on a second look.
    let again = AppContext::inspect(&cfg).unwrap();
    assert!(!again.work_orders.exists);

    AppContext::open(cfg.clone()).unwrap().close();
    let report = AppContext::inspect(&cfg).unwrap();
    assert!(report.work_orders.exists);
    assert!(report.preventive_tasks.exists);
    assert!(report.is_healthy());
}
