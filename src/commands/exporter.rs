// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::AppConfig;
use crate::store;
use crate::utils::arg;
use anyhow::{Result, bail};
use rusqlite::Connection;
use serde_json::json;

pub fn handle(conn: &Connection, cfg: &AppConfig, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(conn, cfg, sub),
        _ => Ok(()),
    }
}

fn export_transactions(conn: &Connection, cfg: &AppConfig, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = arg(sub, "format")?.to_lowercase();
    let out = arg(sub, "out")?;
    let txns = store::list_transactions(conn, &cfg.user)?;

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record([
                "date",
                "type",
                "amount",
                "account",
                "bucket",
                "category",
                "note",
                "monthly_salary",
                "allocation_percentage",
            ])?;
            for t in &txns {
                wtr.write_record([
                    t.date.to_string(),
                    t.r#type.to_string(),
                    t.amount.to_string(),
                    t.account.clone(),
                    t.bucket.to_string(),
                    t.category.clone(),
                    t.note.clone().unwrap_or_default(),
                    t.snapshot.monthly_salary.to_string(),
                    t.snapshot.allocation_percentage.to_string(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let items: Vec<_> = txns
                .iter()
                .map(|t| {
                    json!({
                        "date": t.date.to_string(),
                        "type": t.r#type.as_str(),
                        "amount": t.amount.to_string(),
                        "account": t.account,
                        "bucket": t.bucket.as_str(),
                        "category": t.category,
                        "note": t.note,
                        "monthly_salary": t.snapshot.monthly_salary.to_string(),
                        "allocation_percentage": t.snapshot.allocation_percentage.to_string(),
                    })
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        other => bail!("Unknown format: {} (use csv|json)", other),
    }
    tracing::info!(count = txns.len(), out, "exported transactions");
    println!("Exported {} transactions to {}", txns.len(), out);
    Ok(())
}
