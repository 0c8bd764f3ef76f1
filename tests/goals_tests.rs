// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::Connection;
use rust_decimal::Decimal;
use savvy_saver::db;
use savvy_saver::errors::LedgerError;
use savvy_saver::goals;

const USER: &str = "alice";

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn
}

fn dec(s: &str) -> Decimal {
    Decimal::from_str_exact(s).unwrap()
}

#[test]
fn contributions_accumulate_and_progress_caps() {
    let conn = setup();
    let g = goals::add_goal(&conn, USER, "Laptop", dec("2000")).unwrap();
    assert!(g.progress().is_zero());

    let g = goals::contribute(&conn, USER, g.id, dec("500")).unwrap();
    assert_eq!(g.current_amount, dec("500"));
    assert_eq!(g.progress(), dec("25"));

    let g = goals::contribute(&conn, USER, g.id, dec("2500")).unwrap();
    assert_eq!(g.current_amount, dec("3000"));
    assert_eq!(g.progress(), dec("100"));

    let listed = goals::list_goals(&conn, USER).unwrap();
    assert_eq!(listed, vec![g]);
}

#[test]
fn withdrawals_never_go_below_zero() {
    let conn = setup();
    let g = goals::add_goal(&conn, USER, "Trip", dec("800")).unwrap();
    goals::contribute(&conn, USER, g.id, dec("100")).unwrap();
    let g = goals::contribute(&conn, USER, g.id, dec("-250")).unwrap();
    assert!(g.current_amount.is_zero());
}

#[test]
fn invalid_goals_are_rejected() {
    let conn = setup();
    assert!(matches!(
        goals::add_goal(&conn, USER, " ", dec("10")),
        Err(LedgerError::InvalidGoal(_))
    ));
    assert!(matches!(
        goals::add_goal(&conn, USER, "Car", Decimal::ZERO),
        Err(LedgerError::InvalidGoal(_))
    ));
}

#[test]
fn goals_are_private_to_their_user() {
    let conn = setup();
    let g = goals::add_goal(&conn, USER, "Bike", dec("600")).unwrap();
    assert!(goals::list_goals(&conn, "bob").unwrap().is_empty());
    assert!(matches!(
        goals::contribute(&conn, "bob", g.id, dec("1")),
        Err(LedgerError::GoalNotFound(id)) if id == g.id
    ));
}

#[test]
fn remove_deletes_the_goal() {
    let conn = setup();
    let g = goals::add_goal(&conn, USER, "Bike", dec("600")).unwrap();
    goals::remove_goal(&conn, USER, g.id).unwrap();
    assert!(goals::list_goals(&conn, USER).unwrap().is_empty());
    assert!(matches!(
        goals::remove_goal(&conn, USER, g.id),
        Err(LedgerError::GoalNotFound(_))
    ));
}

#[test]
fn contributions_past_the_ceiling_are_rejected() {
    let conn = setup();
    let g = goals::add_goal(&conn, USER, "House", dec("1000000000000")).unwrap();
    assert!(matches!(
        goals::contribute(&conn, USER, g.id, Decimal::MAX),
        Err(LedgerError::InvalidAmount(_))
    ));
    goals::contribute(&conn, USER, g.id, dec("1000000000000")).unwrap();
    assert!(matches!(
        goals::contribute(&conn, USER, g.id, dec("1")),
        Err(LedgerError::InvalidAmount(_))
    ));
    let g = goals::get_goal(&conn, USER, g.id).unwrap();
    assert_eq!(g.current_amount, dec("1000000000000"));
    assert_eq!(g.progress(), dec("100"));
    assert!(matches!(
        goals::add_goal(&conn, USER, "Moon", Decimal::MAX),
        Err(LedgerError::InvalidGoal(_))
    ));
}
