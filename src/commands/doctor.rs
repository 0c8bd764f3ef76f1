// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::accounts;
use crate::categories::list_categories;
use crate::config::AppConfig;
use crate::models::Bucket;
use crate::store;
use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;
use std::collections::{BTreeSet, HashMap};

/// Issue code and detail for every integrity problem found.
pub fn diagnose(conn: &Connection, cfg: &AppConfig) -> Result<Vec<(String, String)>> {
    let mut rows: Vec<(String, String)> = Vec::new();

    let policy = store::load_settings(conn, &cfg.user)?;
    if let Err(e) = policy.validate() {
        rows.push(("invalid_settings".into(), e.to_string()));
    }

    let txns = store::list_transactions(conn, &cfg.user)?;

    let unknown: BTreeSet<&str> = txns
        .iter()
        .map(|t| t.account.as_str())
        .filter(|a| !accounts::is_registered(a))
        .collect();
    for a in unknown {
        rows.push(("unregistered_account".into(), a.to_string()));
    }

    let mut registry: HashMap<Bucket, Vec<String>> = HashMap::new();
    for bucket in Bucket::ALL {
        registry.insert(bucket, list_categories(conn, &cfg.user, bucket)?);
    }
    let mut orphaned = BTreeSet::new();
    for t in &txns {
        if t.category == store::UNCATEGORIZED {
            continue;
        }
        if !registry.get(&t.bucket).is_some_and(|c| c.contains(&t.category)) {
            orphaned.insert(format!("{} / {}", t.bucket, t.category));
        }
    }
    for o in orphaned {
        rows.push(("orphaned_category".into(), o));
    }

    for t in txns.iter().filter(|t| t.amount < Decimal::ZERO) {
        rows.push(("negative_amount".into(), format!("#{} on {}", t.id, t.date)));
    }

    Ok(rows)
}

pub fn handle(conn: &Connection, cfg: &AppConfig) -> Result<()> {
    let rows: Vec<Vec<String>> = diagnose(conn, cfg)?
        .into_iter()
        .map(|(code, detail)| vec![code, detail])
        .collect();
    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
