// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::AppConfig;
use crate::models::{NewTransaction, TxnType, YearMonth};
use crate::store;
use crate::utils::{
    arg, fmt_money, maybe_print_json, parse_bucket, parse_date, parse_decimal, parse_month,
    pretty_table,
};
use anyhow::{Context, Result};
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &mut Connection, cfg: &AppConfig, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, cfg, sub)?,
        Some(("list", sub)) => list(conn, cfg, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &mut Connection, cfg: &AppConfig, sub: &clap::ArgMatches) -> Result<()> {
    let new = NewTransaction {
        date: parse_date(arg(sub, "date")?)?,
        r#type: arg(sub, "type")?.parse::<TxnType>()?,
        amount: parse_decimal(arg(sub, "amount")?)?,
        account: arg(sub, "account")?.to_string(),
        category: sub
            .get_one::<String>("category")
            .map(|s| s.trim().to_string())
            .unwrap_or_default(),
        note: sub.get_one::<String>("note").map(|s| s.to_string()),
    };
    let t = store::append_transaction(conn, &cfg.user, &new)
        .with_context(|| format!("Could not record transaction on '{}'", new.account))?;
    println!(
        "Recorded {} {} on {} ({} / {}, {}% of {})",
        t.r#type,
        fmt_money(&t.amount),
        t.date,
        t.account,
        t.bucket,
        t.snapshot.allocation_percentage,
        fmt_money(&t.snapshot.monthly_salary)
    );
    Ok(())
}

fn list(conn: &Connection, cfg: &AppConfig, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, cfg, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.date.clone(),
                    r.r#type.clone(),
                    r.amount.clone(),
                    r.account.clone(),
                    r.bucket.clone(),
                    r.category.clone(),
                    r.note.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Date", "Type", "Amount", "Account", "Bucket", "Category", "Note"],
                rows,
            )
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: i64,
    pub date: String,
    pub r#type: String,
    pub amount: String,
    pub account: String,
    pub bucket: String,
    pub category: String,
    pub note: String,
}

/// Newest first, optionally filtered by month, bucket, account and category.
pub fn query_rows(
    conn: &Connection,
    cfg: &AppConfig,
    sub: &clap::ArgMatches,
) -> Result<Vec<TransactionRow>> {
    let month = sub
        .get_one::<String>("month")
        .map(|s| parse_month(s))
        .transpose()?;
    let bucket = sub
        .get_one::<String>("bucket")
        .map(|s| parse_bucket(s))
        .transpose()?;
    let account = sub.get_one::<String>("account").map(|s| s.trim());
    let category = sub.get_one::<String>("category").map(|s| s.trim());

    let mut txns = match (bucket, month) {
        (Some(b), Some(m)) => store::list_partition(conn, &cfg.user, b, m)?,
        _ => store::list_transactions(conn, &cfg.user)?,
    };
    txns.retain(|t| {
        month.is_none_or(|m| YearMonth::of(t.date) == m)
            && bucket.is_none_or(|b| t.bucket == b)
            && account.is_none_or(|a| t.account == a)
            && category.is_none_or(|c| t.category == c)
    });
    txns.reverse();
    if let Some(limit) = sub.get_one::<usize>("limit") {
        txns.truncate(*limit);
    }

    Ok(txns
        .into_iter()
        .map(|t| TransactionRow {
            id: t.id,
            date: t.date.to_string(),
            r#type: t.r#type.to_string(),
            amount: fmt_money(&t.amount),
            account: t.account,
            bucket: t.bucket.to_string(),
            category: t.category,
            note: t.note.unwrap_or_default(),
        })
        .collect())
}
