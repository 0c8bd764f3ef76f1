// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::AppConfig;
use crate::ledger::{
    compute_category_breakdown_top, compute_daily_totals, compute_monthly_trend,
    compute_net_worth_series,
};
use crate::models::{Period, YearMonth};
use crate::policy::summarize_month;
use crate::store;
use crate::utils::{
    arg, fmt_money, maybe_print_json, parse_bucket, parse_date, parse_month, pretty_table,
};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, cfg: &AppConfig, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(conn, cfg, sub)?,
        Some(("breakdown", sub)) => breakdown(conn, cfg, sub)?,
        Some(("trend", sub)) => trend(conn, cfg, sub)?,
        Some(("networth", sub)) => networth(conn, cfg, sub)?,
        Some(("calendar", sub)) => calendar(conn, cfg, sub)?,
        _ => {}
    }
    Ok(())
}

fn current_month() -> YearMonth {
    YearMonth::of(chrono::Utc::now().date_naive())
}

fn month_or_current(sub: &clap::ArgMatches) -> Result<YearMonth> {
    match sub.get_one::<String>("month") {
        Some(s) => parse_month(s),
        None => Ok(current_month()),
    }
}

fn summary(conn: &Connection, cfg: &AppConfig, sub: &clap::ArgMatches) -> Result<()> {
    let month = month_or_current(sub)?;
    let txns = store::list_transactions(conn, &cfg.user)?;
    let policy = store::load_settings(conn, &cfg.user)?;
    let data = summarize_month(&txns, &policy, month, current_month());
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .iter()
            .map(|s| {
                vec![
                    s.bucket.to_string(),
                    fmt_money(&s.allocated),
                    fmt_money(&s.spent),
                    fmt_money(&s.balance),
                ]
            })
            .collect();
        println!("{}", month);
        println!(
            "{}",
            pretty_table(&["Bucket", "Allocated", "Spent", "Remaining"], rows)
        );
    }
    Ok(())
}

fn breakdown(conn: &Connection, cfg: &AppConfig, sub: &clap::ArgMatches) -> Result<()> {
    let bucket = parse_bucket(arg(sub, "bucket")?)?;
    let period = match sub.get_one::<String>("day") {
        Some(d) => Period::Day(parse_date(d)?),
        None => Period::Month(month_or_current(sub)?),
    };
    let top = sub
        .get_one::<usize>("top")
        .copied()
        .unwrap_or(cfg.breakdown_top_n);
    let txns = store::list_transactions(conn, &cfg.user)?;
    let data = compute_category_breakdown_top(&txns, bucket, period, top);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let mut rows: Vec<Vec<String>> = data
            .entries
            .iter()
            .map(|c| vec![c.category.clone(), fmt_money(&c.amount)])
            .collect();
        if !data.other.is_zero() {
            rows.push(vec!["(other)".into(), fmt_money(&data.other)]);
        }
        println!("{} {}", bucket, period);
        println!("{}", pretty_table(&["Category", "Amount"], rows));
    }
    Ok(())
}

fn trend(conn: &Connection, cfg: &AppConfig, sub: &clap::ArgMatches) -> Result<()> {
    let bucket = parse_bucket(arg(sub, "bucket")?)?;
    let txns = store::list_transactions(conn, &cfg.user)?;
    let data = compute_monthly_trend(&txns, bucket);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .iter()
            .map(|p| {
                vec![
                    p.month.to_string(),
                    fmt_money(&p.allocated),
                    fmt_money(&p.spent),
                    fmt_money(&p.net_amount),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Month", "Allocated", "Spent", "Net"], rows));
    }
    Ok(())
}

fn networth(conn: &Connection, cfg: &AppConfig, sub: &clap::ArgMatches) -> Result<()> {
    let txns = store::list_transactions(conn, &cfg.user)?;
    let data = compute_net_worth_series(&txns);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .iter()
            .map(|p| vec![p.month.to_string(), fmt_money(&p.cumulative_balance)])
            .collect();
        println!("{}", pretty_table(&["Month", "Net worth"], rows));
    }
    Ok(())
}

fn calendar(conn: &Connection, cfg: &AppConfig, sub: &clap::ArgMatches) -> Result<()> {
    let month = parse_month(arg(sub, "month")?)?;
    let txns = store::list_transactions(conn, &cfg.user)?;
    let data = compute_daily_totals(&txns, month);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .iter()
            .map(|d| {
                vec![
                    d.date.to_string(),
                    fmt_money(&d.credits),
                    fmt_money(&d.debits),
                    fmt_money(&(d.credits - d.debits)),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Day", "Credits", "Debits", "Net"], rows));
    }
    Ok(())
}
