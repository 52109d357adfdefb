use chrono::{Days, Local};
use predicates::prelude::*;
use std::fs;

mod common;
use common::{hm, init_workbook, setup_test_workbook, temp_out};

#[test]
fn init_creates_both_sheets() {
    let wb = setup_test_workbook("cli_init");
    let wb = wb.as_str();

    hm().args(["--workbook", wb, "--test", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Workbook initialized"));

    hm().args(["--workbook", wb, "--test", "diagnose", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"work_orders\""))
        .stdout(predicate::str::contains("\"ok\": true"));
}

#[test]
fn diagnose_reports_missing_sheets() {
    let wb = setup_test_workbook("cli_diag_missing");
    let wb = wb.as_str();

    hm().args(["--workbook", wb, "--test", "diagnose", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"exists\": false"))
        .stdout(predicate::str::contains("\"sheets\": []"));
}

#[test]
fn order_lifecycle() {
    let wb = setup_test_workbook("cli_order");
    let wb = wb.as_str();
    init_workbook(wb);

    let output = hm()
        .args([
            "--workbook",
            wb,
            "--test",
            "order",
            "add",
            "--sector",
            "Rooms",
            "--location",
            "305",
            "--description",
            "Shower drain clogged",
            "--priority",
            "urgent",
            "--item",
            "Remove hair",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let id = stdout
        .split_whitespace()
        .find(|w| w.starts_with("OS-"))
        .expect("order id in output")
        .to_string();

    hm().args(["--workbook", wb, "--test", "order", "pending"])
        .assert()
        .success()
        .stdout(predicate::str::contains(id.as_str()))
        .stdout(predicate::str::contains("Urgent"));

    hm().args([
        "--workbook",
        wb,
        "--test",
        "order",
        "update",
        id.as_str(),
        "--status",
        "done",
        "--technician",
        "Rui",
        "--hours",
        "1.5",
    ])
    .assert()
    .success();

    hm().args(["--workbook", wb, "--test", "order", "history", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"status\": \"Done\""))
        .stdout(predicate::str::contains("\"time_spent_hours\": 1.5"));

    hm().args(["--workbook", wb, "--test", "order", "show", id.as_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rui"))
        .stdout(predicate::str::contains("[ ] Remove hair"));
}

#[test]
fn unknown_order_exits_with_error() {
    let wb = setup_test_workbook("cli_unknown");
    let wb = wb.as_str();
    init_workbook(wb);

    hm().args([
        "--workbook",
        wb,
        "--test",
        "order",
        "update",
        "OS-00000000-0000",
        "--status",
        "done",
    ])
    .assert()
    .failure()
    .stderr(predicate::str::contains("not found"));

    hm().args(["--workbook", wb, "--test", "order", "show", "OS-00000000-0000"])
        .assert()
        .failure();
}

#[test]
fn preventive_tasks_and_sweep() {
    let wb = setup_test_workbook("cli_sweep");
    let wb = wb.as_str();
    init_workbook(wb);

    hm().args([
        "--workbook",
        wb,
        "--test",
        "preventive",
        "add",
        "--sector",
        "Garden",
        "--location",
        "Irrigation",
        "--description",
        "Check sprinklers",
        "--frequency",
        "weekly",
        "--item",
        "Open valves",
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains("first due on"));

    hm().args(["--workbook", wb, "--test", "preventive", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Check sprinklers"));

    hm().args(["--workbook", wb, "--test", "sweep", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"generated\": []"));

    let later = (Local::now().date_naive() + Days::new(30))
        .format("%Y-%m-%d")
        .to_string();
    hm().args(["--workbook", wb, "--test", "sweep", "--date", later.as_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains("generated"));

    hm().args(["--workbook", wb, "--test", "order", "all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[PREVENTIVE] Check sprinklers"));
}

#[test]
fn export_writes_a_csv_file() {
    let wb = setup_test_workbook("cli_export");
    let wb = wb.as_str();
    let out = temp_out("cli_export", "csv");
    let out = out.as_str();
    init_workbook(wb);

    hm().args(["--workbook", wb, "--test", "export", "--file", out])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No work orders to export"));

    hm().args([
        "--workbook",
        wb,
        "--test",
        "order",
        "add",
        "--sector",
        "Bar",
        "--location",
        "Counter",
        "--description",
        "Tap; leaking",
    ])
    .assert()
    .success();

    hm().args([
        "--workbook", wb, "--test", "export", "--format", "csv", "--file", out, "--force",
    ])
    .assert()
    .success();

    let bytes = fs::read(out).unwrap();
    assert!(bytes.starts_with(b"\xEF\xBB\xBF"));
    let text = String::from_utf8_lossy(&bytes);
    assert!(text.contains("\"Tap; leaking\""));
}

#[test]
fn stats_and_suggest() {
    let wb = setup_test_workbook("cli_stats");
    let wb = wb.as_str();
    init_workbook(wb);

    hm().args(["--workbook", wb, "--test", "stats", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"total\": 0"));

    hm().args([
        "--workbook",
        wb,
        "--test",
        "suggest",
        "--sector",
        "Rooms",
        "--location",
        "101",
        "--description",
        "Minibar check",
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains("- Visually inspect the equipment/area"));
}

#[test]
fn config_get_in_test_mode() {
    hm().args(["--test", "config", "--get", "cache_ttl_ms"])
        .assert()
        .success()
        .stdout(predicate::str::contains("5000"));

    hm().args(["--test", "config", "--get", "colour"])
        .assert()
        .failure();

    hm().args(["--test", "config", "--set", "team_emails", "a@hotel.test"])
        .assert()
        .success()
        .stdout(predicate::str::contains("not saved"));
}
