// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;
use savvy_saver::db;
use savvy_saver::errors::LedgerError;
use savvy_saver::ledger::{compute_bucket_allocation, compute_monthly_trend};
use savvy_saver::models::{Bucket, NewTransaction, TxnType, YearMonth};
use savvy_saver::policy::{AllocationPolicy, frozen_snapshot, resolve_allocation};
use savvy_saver::store::{self, Feed};

const USER: &str = "alice";

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn
}

fn dec(s: &str) -> Decimal {
    Decimal::from_str_exact(s).unwrap()
}

fn new_txn(d: &str, typ: TxnType, amount: &str, account: &str, category: &str) -> NewTransaction {
    NewTransaction {
        date: NaiveDate::parse_from_str(d, "%Y-%m-%d").unwrap(),
        r#type: typ,
        amount: dec(amount),
        account: account.into(),
        category: category.into(),
        note: None,
    }
}

fn policy(salary: &str, needs: &str) -> AllocationPolicy {
    AllocationPolicy {
        monthly_salary: dec(salary),
        needs_percentage: dec(needs),
        wants_percentage: dec("30"),
        investments_percentage: dec("10"),
    }
}

#[test]
fn missing_data_reads_as_empty() {
    let conn = setup();
    assert!(store::list_transactions(&conn, USER).unwrap().is_empty());
    assert_eq!(
        store::load_settings(&conn, USER).unwrap(),
        AllocationPolicy::default()
    );
}

#[test]
fn settings_round_trip_and_overwrite() {
    let conn = setup();
    store::save_settings(&conn, USER, &policy("75000", "50")).unwrap();
    store::save_settings(&conn, USER, &policy("80000", "45")).unwrap();
    assert_eq!(store::load_settings(&conn, USER).unwrap(), policy("80000", "45"));
    // Other users are untouched
    assert_eq!(
        store::load_settings(&conn, "bob").unwrap(),
        AllocationPolicy::default()
    );
}

#[test]
fn over_allocated_settings_are_rejected() {
    let conn = setup();
    store::save_settings(&conn, USER, &policy("75000", "50")).unwrap();
    let err = store::save_settings(&conn, USER, &policy("75000", "70")).unwrap_err();
    assert!(matches!(err, LedgerError::OverAllocated(_)));
    assert_eq!(store::load_settings(&conn, USER).unwrap(), policy("75000", "50"));
}

#[test]
fn append_freezes_the_current_policy() {
    let mut conn = setup();
    store::save_settings(&conn, USER, &policy("75000", "50")).unwrap();
    let t = store::append_transaction(
        &mut conn,
        USER,
        &new_txn("2024-07-22", TxnType::Debit, "750.50", "Main Checking", "Groceries"),
    )
    .unwrap();
    assert_eq!(t.bucket, Bucket::Needs);
    assert_eq!(t.snapshot.monthly_salary, dec("75000"));
    assert_eq!(t.snapshot.allocation_percentage, dec("50"));

    store::save_settings(&conn, USER, &policy("90000", "40")).unwrap();

    let txns = store::list_transactions(&conn, USER).unwrap();
    assert_eq!(txns.len(), 1);
    assert_eq!(txns[0], t);

    let july = YearMonth::new(2024, 7);
    let snap = frozen_snapshot(&txns, Bucket::Needs, july).unwrap();
    assert_eq!(snap.allocated(), dec("37500"));
    assert_eq!(compute_monthly_trend(&txns, Bucket::Needs)[0].allocated, dec("37500"));

    let live = store::load_settings(&conn, USER).unwrap();
    assert_eq!(compute_bucket_allocation(&live, Bucket::Needs), dec("36000"));
    assert_eq!(
        resolve_allocation(&txns, &live, Bucket::Needs, july, YearMonth::new(2024, 10)),
        dec("37500")
    );
}

#[test]
fn savings_snapshot_uses_the_complement() {
    let mut conn = setup();
    store::save_settings(&conn, USER, &policy("60000", "50")).unwrap();
    let t = store::append_transaction(
        &mut conn,
        USER,
        &new_txn("2024-07-01", TxnType::Credit, "5000", "Emergency Fund", "Salary"),
    )
    .unwrap();
    assert_eq!(t.bucket, Bucket::Savings);
    assert_eq!(t.snapshot.allocation_percentage, dec("10"));
}

#[test]
fn unknown_account_is_rejected() {
    let mut conn = setup();
    let err = store::append_transaction(
        &mut conn,
        USER,
        &new_txn("2024-07-01", TxnType::Debit, "10", "Piggy Bank", "Misc"),
    )
    .unwrap_err();
    assert!(matches!(err, LedgerError::UnknownAccount(ref a) if a == "Piggy Bank"));
    assert!(store::list_transactions(&conn, USER).unwrap().is_empty());
}

#[test]
fn negative_amount_is_rejected() {
    let mut conn = setup();
    let err = store::append_transaction(
        &mut conn,
        USER,
        &new_txn("2024-07-01", TxnType::Debit, "-5", "Credit Card", "Shopping"),
    )
    .unwrap_err();
    assert!(matches!(err, LedgerError::InvalidAmount(_)));
}

#[test]
fn amounts_beyond_two_decimals_or_the_ceiling_are_rejected() {
    let mut conn = setup();
    for amount in ["10.999", "1000000000000.01"] {
        let err = store::append_transaction(
            &mut conn,
            USER,
            &new_txn("2024-07-01", TxnType::Debit, amount, "Credit Card", "Shopping"),
        )
        .unwrap_err();
        assert!(matches!(err, LedgerError::InvalidAmount(_)), "{}", amount);
    }
    let big = NewTransaction {
        amount: Decimal::MAX,
        ..new_txn("2024-07-01", TxnType::Credit, "1", "Brokerage", "Stocks")
    };
    assert!(matches!(
        store::append_transaction(&mut conn, USER, &big),
        Err(LedgerError::InvalidAmount(_))
    ));
    assert!(store::list_transactions(&conn, USER).unwrap().is_empty());

    // Trailing zeros are still two-decimal values
    let t = store::append_transaction(
        &mut conn,
        USER,
        &new_txn("2024-07-01", TxnType::Debit, "10.500", "Credit Card", "Shopping"),
    )
    .unwrap();
    assert_eq!(t.amount, dec("10.5"));
}

#[test]
fn oversized_salary_is_rejected_before_it_can_overflow() {
    let conn = setup();
    let huge = AllocationPolicy {
        monthly_salary: Decimal::MAX,
        ..policy("0", "50")
    };
    let err = store::save_settings(&conn, USER, &huge).unwrap_err();
    assert!(matches!(err, LedgerError::InvalidSalary(_)));

    let ceiling = policy("1000000000000", "50");
    store::save_settings(&conn, USER, &ceiling).unwrap();
    let live = store::load_settings(&conn, USER).unwrap();
    assert_eq!(
        compute_bucket_allocation(&live, Bucket::Needs),
        dec("500000000000")
    );
}

#[test]
fn blank_category_and_note_are_normalized() {
    let mut conn = setup();
    let mut n = new_txn("2024-07-01", TxnType::Debit, "12", " Credit Card ", "  ");
    n.note = Some("   ".into());
    let t = store::append_transaction(&mut conn, USER, &n).unwrap();
    assert_eq!(t.account, "Credit Card");
    assert_eq!(t.category, store::UNCATEGORIZED);
    assert_eq!(t.note, None);
}

#[test]
fn partitions_filter_by_bucket_and_month() {
    let mut conn = setup();
    for (d, account) in [
        ("2024-06-30", "Main Checking"),
        ("2024-07-01", "Main Checking"),
        ("2024-07-02", "Credit Card"),
        ("2024-07-03", "Main Checking"),
    ] {
        store::append_transaction(&mut conn, USER, &new_txn(d, TxnType::Debit, "1", account, "X"))
            .unwrap();
    }
    let part =
        store::list_partition(&conn, USER, Bucket::Needs, YearMonth::new(2024, 7)).unwrap();
    let dates: Vec<String> = part.iter().map(|t| t.date.to_string()).collect();
    assert_eq!(dates, vec!["2024-07-01", "2024-07-03"]);
}

#[test]
fn transactions_are_scoped_per_user() {
    let mut conn = setup();
    store::append_transaction(
        &mut conn,
        USER,
        &new_txn("2024-07-01", TxnType::Debit, "1", "Credit Card", "X"),
    )
    .unwrap();
    assert!(store::list_transactions(&conn, "bob").unwrap().is_empty());
}

#[test]
fn feed_notifies_subscribers_with_full_list() {
    let mut conn = setup();
    let seen: Rc<RefCell<Vec<usize>>> = Rc::new(RefCell::new(Vec::new()));
    let mut feed = Feed::new(USER);
    let sink = Rc::clone(&seen);
    feed.subscribe(&conn, move |all| sink.borrow_mut().push(all.len()))
        .unwrap();

    feed.append(
        &mut conn,
        &new_txn("2024-07-01", TxnType::Credit, "100", "Main Checking", "Salary"),
    )
    .unwrap();
    feed.append(
        &mut conn,
        &new_txn("2024-07-02", TxnType::Debit, "40", "Credit Card", "Dining Out"),
    )
    .unwrap();

    assert_eq!(*seen.borrow(), vec![0, 1, 2]);
}

#[test]
fn feed_does_not_notify_on_rejected_write() {
    let mut conn = setup();
    let calls = Rc::new(RefCell::new(0));
    let mut feed = Feed::new(USER);
    let sink = Rc::clone(&calls);
    feed.subscribe(&conn, move |_| *sink.borrow_mut() += 1).unwrap();
    assert!(feed
        .append(&mut conn, &new_txn("2024-07-01", TxnType::Debit, "1", "Nope", "X"))
        .is_err());
    assert_eq!(*calls.borrow(), 1);
}
