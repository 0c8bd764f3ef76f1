// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::Connection;
use rust_decimal::Decimal;
use savvy_saver::commands::{categories, doctor, goals, settings, transactions};
use savvy_saver::config::AppConfig;
use savvy_saver::models::Bucket;
use savvy_saver::{cli, db, store};

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn
}

fn cfg() -> AppConfig {
    AppConfig {
        user: "tester".into(),
        ..AppConfig::default()
    }
}

fn run(conn: &mut Connection, args: &[&str]) {
    let mut argv = vec!["savvy-saver"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    let cfg = cfg();
    match matches.subcommand() {
        Some(("tx", sub)) => transactions::handle(conn, &cfg, sub).unwrap(),
        Some(("settings", sub)) => settings::handle(conn, &cfg, sub).unwrap(),
        Some(("category", sub)) => categories::handle(conn, &cfg, sub).unwrap(),
        Some(("goal", sub)) => goals::handle(conn, &cfg, sub).unwrap(),
        other => panic!("unexpected command {:?}", other.map(|(n, _)| n)),
    }
}

#[test]
fn settings_set_keeps_unspecified_fields() {
    let mut conn = setup();
    run(&mut conn, &["settings", "set", "--salary", "75000", "--needs", "50"]);
    run(&mut conn, &["settings", "set", "--wants", "25"]);
    let p = store::load_settings(&conn, "tester").unwrap();
    assert_eq!(p.monthly_salary, Decimal::from(75000));
    assert_eq!(p.needs_percentage, Decimal::from(50));
    assert_eq!(p.wants_percentage, Decimal::from(25));
    assert_eq!(p.investments_percentage, Decimal::from(10));
}

#[test]
fn settings_set_rejects_over_allocation() {
    let conn = setup();
    let matches =
        cli::build_cli().get_matches_from(["savvy-saver", "settings", "set", "--needs", "80"]);
    let Some(("settings", sub)) = matches.subcommand() else {
        panic!("no settings subcommand");
    };
    assert!(settings::handle(&conn, &cfg(), sub).is_err());
}

#[test]
fn tx_add_then_list_with_limit() {
    let mut conn = setup();
    for day in ["01", "02", "03"] {
        let date = format!("2025-01-{}", day);
        run(
            &mut conn,
            &[
                "tx", "add", "--date", &date, "--type", "debit", "--amount", "10", "--account",
                "Credit Card", "--category", "Dining Out",
            ],
        );
    }
    let matches =
        cli::build_cli().get_matches_from(["savvy-saver", "tx", "list", "--limit", "2"]);
    let Some(("tx", tx_m)) = matches.subcommand() else {
        panic!("no tx subcommand");
    };
    let Some(("list", list_m)) = tx_m.subcommand() else {
        panic!("no list subcommand");
    };
    let rows = transactions::query_rows(&conn, &cfg(), list_m).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].date, "2025-01-03");
    assert_eq!(rows[0].bucket, "Wants");
    assert_eq!(rows[0].amount, "10.00");
}

#[test]
fn tx_list_filters_by_bucket_and_month() {
    let mut conn = setup();
    for (date, account) in [
        ("2025-01-05", "Main Checking"),
        ("2025-02-05", "Main Checking"),
        ("2025-02-06", "Brokerage"),
    ] {
        run(
            &mut conn,
            &[
                "tx", "add", "--date", date, "--type", "debit", "--amount", "5", "--account",
                account,
            ],
        );
    }
    let matches = cli::build_cli().get_matches_from([
        "savvy-saver", "tx", "list", "--bucket", "needs", "--month", "2025-02",
    ]);
    let Some(("tx", tx_m)) = matches.subcommand() else {
        panic!("no tx subcommand");
    };
    let Some(("list", list_m)) = tx_m.subcommand() else {
        panic!("no list subcommand");
    };
    let rows = transactions::query_rows(&conn, &cfg(), list_m).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].date, "2025-02-05");
    assert_eq!(rows[0].category, store::UNCATEGORIZED);
}

#[test]
fn tx_add_with_unknown_account_fails() {
    let mut conn = setup();
    let matches = cli::build_cli().get_matches_from([
        "savvy-saver", "tx", "add", "--date", "2025-01-01", "--type", "debit", "--amount", "1",
        "--account", "Shoebox",
    ]);
    let Some(("tx", sub)) = matches.subcommand() else {
        panic!("no tx subcommand");
    };
    let err = transactions::handle(&mut conn, &cfg(), sub).unwrap_err();
    assert!(format!("{:#}", err).contains("Shoebox"));
}

#[test]
fn category_commands_edit_the_registry() {
    let mut conn = setup();
    run(&mut conn, &["category", "add", "--bucket", "wants", "--name", "Hobbies"]);
    run(
        &mut conn,
        &["category", "rename", "--bucket", "wants", "--from", "Hobbies", "--to", "Crafts"],
    );
    run(&mut conn, &["category", "rm", "--bucket", "wants", "--name", "Travel"]);
    let wants = savvy_saver::categories::list_categories(&conn, "tester", Bucket::Wants).unwrap();
    assert!(wants.contains(&"Crafts".to_string()));
    assert!(!wants.contains(&"Hobbies".to_string()));
    assert!(!wants.contains(&"Travel".to_string()));
}

#[test]
fn goal_contribute_accepts_negative_amounts() {
    let mut conn = setup();
    run(&mut conn, &["goal", "add", "--name", "Camera", "--target", "900"]);
    let id = savvy_saver::goals::list_goals(&conn, "tester").unwrap()[0].id.to_string();
    run(&mut conn, &["goal", "contribute", "--id", &id, "--amount", "300"]);
    run(&mut conn, &["goal", "contribute", "--id", &id, "--amount", "-100"]);
    let g = &savvy_saver::goals::list_goals(&conn, "tester").unwrap()[0];
    assert_eq!(g.current_amount, Decimal::from(200));
}

#[test]
fn doctor_flags_orphaned_categories_and_bad_settings() {
    let mut conn = setup();
    run(
        &mut conn,
        &[
            "tx", "add", "--date", "2025-03-01", "--type", "debit", "--amount", "20", "--account",
            "Credit Card", "--category", "Arcade",
        ],
    );
    conn.execute(
        "INSERT INTO settings(user_id, monthly_salary, needs_percentage, wants_percentage, investments_percentage)
         VALUES ('tester', '1000', '70', '30', '20')",
        [],
    )
    .unwrap();
    let issues = doctor::diagnose(&conn, &cfg()).unwrap();
    let codes: Vec<&str> = issues.iter().map(|(c, _)| c.as_str()).collect();
    assert!(codes.contains(&"invalid_settings"));
    assert!(issues
        .iter()
        .any(|(c, d)| c == "orphaned_category" && d == "Wants / Arcade"));
}
