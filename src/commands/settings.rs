// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::AppConfig;
use crate::ledger::compute_bucket_allocation;
use crate::models::Bucket;
use crate::store;
use crate::utils::{fmt_money, maybe_print_json, parse_decimal, pretty_table};
use anyhow::Result;
use rusqlite::Connection;
use serde_json::json;

pub fn handle(conn: &Connection, cfg: &AppConfig, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => show(conn, cfg, sub)?,
        Some(("set", sub)) => set(conn, cfg, sub)?,
        _ => {}
    }
    Ok(())
}

fn show(conn: &Connection, cfg: &AppConfig, sub: &clap::ArgMatches) -> Result<()> {
    let policy = store::load_settings(conn, &cfg.user)?;
    let data: Vec<_> = Bucket::ALL
        .iter()
        .map(|b| {
            json!({
                "bucket": b.as_str(),
                "percentage": policy.percentage_for(*b),
                "allocated": compute_bucket_allocation(&policy, *b),
            })
        })
        .collect();
    let out = json!({ "monthly_salary": policy.monthly_salary, "buckets": data });
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &out)? {
        println!("Monthly salary: {}", fmt_money(&policy.monthly_salary));
        let rows = Bucket::ALL
            .iter()
            .map(|b| {
                vec![
                    b.to_string(),
                    format!("{}%", policy.percentage_for(*b)),
                    fmt_money(&compute_bucket_allocation(&policy, *b)),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Bucket", "Share", "Allocated"], rows));
    }
    Ok(())
}

/// Unspecified fields keep their saved value; the result is saved as a whole.
fn set(conn: &Connection, cfg: &AppConfig, sub: &clap::ArgMatches) -> Result<()> {
    let mut policy = store::load_settings(conn, &cfg.user)?;
    let fields = [
        ("salary", &mut policy.monthly_salary),
        ("needs", &mut policy.needs_percentage),
        ("wants", &mut policy.wants_percentage),
        ("investments", &mut policy.investments_percentage),
    ];
    for (name, slot) in fields {
        if let Some(raw) = sub.get_one::<String>(name) {
            *slot = parse_decimal(raw)?;
        }
    }
    store::save_settings(conn, &cfg.user, &policy)?;
    println!(
        "Saved: salary {}, needs {}%, wants {}%, investments {}%, savings {}%",
        fmt_money(&policy.monthly_salary),
        policy.needs_percentage,
        policy.wants_percentage,
        policy.investments_percentage,
        policy.savings_percentage()
    );
    Ok(())
}
