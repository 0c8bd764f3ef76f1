// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Settings and transaction persistence, plus a small subscription feed.

use chrono::{Datelike, NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::accounts;
use crate::errors::{LedgerError, Result};
use crate::models::{
    Bucket, NewTransaction, PolicySnapshot, Transaction, YearMonth, check_amount,
};
use crate::policy::AllocationPolicy;

pub const UNCATEGORIZED: &str = "Uncategorized";

pub(crate) fn decimal_column(raw: &str, what: &str) -> Result<Decimal> {
    raw.parse::<Decimal>()
        .map_err(|_| LedgerError::Corrupt(format!("invalid {} '{}'", what, raw)))
}

/// Current settings for `user`, or the default policy if none were saved.
pub fn load_settings(conn: &Connection, user: &str) -> Result<AllocationPolicy> {
    let row: Option<(String, String, String, String)> = conn
        .query_row(
            "SELECT monthly_salary, needs_percentage, wants_percentage, investments_percentage
             FROM settings WHERE user_id=?1",
            params![user],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?)),
        )
        .optional()?;
    let Some((salary, needs, wants, investments)) = row else {
        debug!(user, "no saved settings, using defaults");
        return Ok(AllocationPolicy::default());
    };
    Ok(AllocationPolicy {
        monthly_salary: decimal_column(&salary, "monthly salary")?,
        needs_percentage: decimal_column(&needs, "needs percentage")?,
        wants_percentage: decimal_column(&wants, "wants percentage")?,
        investments_percentage: decimal_column(&investments, "investments percentage")?,
    })
}

/// Replaces the saved settings wholesale. Policies leaving a negative
/// savings share are rejected.
pub fn save_settings(conn: &Connection, user: &str, policy: &AllocationPolicy) -> Result<()> {
    if let Err(e) = policy.validate() {
        warn!(user, error = %e, "rejected settings");
        return Err(e);
    }
    conn.execute(
        "INSERT INTO settings(user_id, monthly_salary, needs_percentage, wants_percentage, investments_percentage)
         VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT(user_id) DO UPDATE SET
            monthly_salary=excluded.monthly_salary,
            needs_percentage=excluded.needs_percentage,
            wants_percentage=excluded.wants_percentage,
            investments_percentage=excluded.investments_percentage,
            updated_at=datetime('now')",
        params![
            user,
            policy.monthly_salary.to_string(),
            policy.needs_percentage.to_string(),
            policy.wants_percentage.to_string(),
            policy.investments_percentage.to_string(),
        ],
    )?;
    info!(user, salary = %policy.monthly_salary, "settings saved");
    Ok(())
}

/// Records a transaction. The current settings are read and the snapshot
/// written inside one IMMEDIATE transaction, so a concurrent settings save
/// cannot land between the two.
pub fn append_transaction(
    conn: &mut Connection,
    user: &str,
    new: &NewTransaction,
) -> Result<Transaction> {
    check_amount(new.amount).inspect_err(|_| {
        warn!(user, amount = %new.amount, "rejected transaction amount");
    })?;
    let account = new.account.trim().to_string();
    let bucket = accounts::bucket_for(&account).inspect_err(|e| {
        warn!(user, error = %e, "rejected transaction");
    })?;
    let category = match new.category.trim() {
        "" => UNCATEGORIZED.to_string(),
        c => c.to_string(),
    };
    let note = new
        .note
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string);
    let timestamp = Utc::now().timestamp_millis();

    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    let snapshot = load_settings(&tx, user)?.snapshot_for(bucket);
    tx.execute(
        "INSERT INTO transactions(user_id, bucket, year, month, date, timestamp, type, amount,
                                  account, category, note, monthly_salary, allocation_percentage)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
        params![
            user,
            bucket.as_str(),
            new.date.year(),
            new.date.month(),
            new.date,
            timestamp,
            new.r#type.as_str(),
            new.amount.to_string(),
            account,
            category,
            note,
            snapshot.monthly_salary.to_string(),
            snapshot.allocation_percentage.to_string(),
        ],
    )?;
    let id = tx.last_insert_rowid();
    tx.commit()?;

    info!(user, id, %bucket, amount = %new.amount, "transaction recorded");
    Ok(Transaction {
        id,
        date: new.date,
        timestamp,
        r#type: new.r#type,
        amount: new.amount,
        account,
        bucket,
        category,
        note,
        snapshot,
    })
}

const SELECT_TRANSACTIONS: &str = "SELECT id, date, timestamp, type, amount, account, bucket, category, note,
            monthly_salary, allocation_percentage
     FROM transactions";

type RawRow = (
    i64,
    NaiveDate,
    i64,
    String,
    String,
    String,
    String,
    String,
    Option<String>,
    String,
    String,
);

fn read_row(r: &rusqlite::Row<'_>) -> rusqlite::Result<RawRow> {
    Ok((
        r.get(0)?,
        r.get(1)?,
        r.get(2)?,
        r.get(3)?,
        r.get(4)?,
        r.get(5)?,
        r.get(6)?,
        r.get(7)?,
        r.get(8)?,
        r.get(9)?,
        r.get(10)?,
    ))
}

fn into_transaction(raw: RawRow) -> Result<Transaction> {
    let (id, date, timestamp, typ, amount, account, bucket, category, note, salary, pct) = raw;
    Ok(Transaction {
        id,
        date,
        timestamp,
        r#type: typ.parse()?,
        amount: decimal_column(&amount, "amount")?,
        account,
        bucket: bucket.parse()?,
        category,
        note,
        snapshot: PolicySnapshot {
            monthly_salary: decimal_column(&salary, "monthly salary")?,
            allocation_percentage: decimal_column(&pct, "allocation percentage")?,
        },
    })
}

fn collect(conn: &Connection, sql: &str, args: &[&dyn rusqlite::ToSql]) -> Result<Vec<Transaction>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(args, read_row)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(into_transaction(row?)?);
    }
    Ok(out)
}

/// Every transaction for `user`, oldest first. No data means an empty list.
pub fn list_transactions(conn: &Connection, user: &str) -> Result<Vec<Transaction>> {
    let sql = format!(
        "{} WHERE user_id=?1 ORDER BY date, timestamp, id",
        SELECT_TRANSACTIONS
    );
    let out = collect(conn, &sql, &[&user])?;
    debug!(user, count = out.len(), "loaded transactions");
    Ok(out)
}

/// Transactions in a single bucket/year/month partition.
pub fn list_partition(
    conn: &Connection,
    user: &str,
    bucket: Bucket,
    month: YearMonth,
) -> Result<Vec<Transaction>> {
    let sql = format!(
        "{} WHERE user_id=?1 AND bucket=?2 AND year=?3 AND month=?4 ORDER BY date, timestamp, id",
        SELECT_TRANSACTIONS
    );
    collect(
        conn,
        &sql,
        &[&user, &bucket.as_str(), &month.year, &month.month],
    )
}

type Listener = Box<dyn FnMut(&[Transaction])>;

/// Push-style view of a user's transactions. Subscribers receive the full
/// list on subscription and again after every append through the feed.
pub struct Feed {
    user: String,
    listeners: Vec<Listener>,
}

impl Feed {
    pub fn new(user: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            listeners: Vec::new(),
        }
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn subscribe<F>(&mut self, conn: &Connection, mut on_change: F) -> Result<()>
    where
        F: FnMut(&[Transaction]) + 'static,
    {
        let all = list_transactions(conn, &self.user)?;
        on_change(&all);
        self.listeners.push(Box::new(on_change));
        Ok(())
    }

    pub fn append(&mut self, conn: &mut Connection, new: &NewTransaction) -> Result<Transaction> {
        let recorded = append_transaction(conn, &self.user, new)?;
        self.publish(conn)?;
        Ok(recorded)
    }

    pub fn publish(&mut self, conn: &Connection) -> Result<()> {
        if self.listeners.is_empty() {
            return Ok(());
        }
        let all = list_transactions(conn, &self.user)?;
        for listener in self.listeners.iter_mut() {
            listener(&all);
        }
        Ok(())
    }
}
