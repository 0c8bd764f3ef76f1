// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Per-bucket category lists. Renames and deletes never touch existing
//! transactions; their old labels stay as plain strings.

use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info};

use crate::errors::{LedgerError, Result};
use crate::models::Bucket;

pub fn default_categories(bucket: Bucket) -> &'static [&'static str] {
    match bucket {
        Bucket::Needs => &[
            "Rent",
            "Groceries",
            "Utilities",
            "Transportation",
            "Insurance",
            "Healthcare",
        ],
        Bucket::Wants => &[
            "Dining Out",
            "Entertainment",
            "Shopping",
            "Travel",
            "Subscriptions",
        ],
        Bucket::Savings => &["Salary", "Emergency Fund", "Bonus", "Transfer"],
        Bucket::Investments => &["Stocks", "Mutual Funds", "Retirement", "Crypto"],
    }
}

fn clean(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(LedgerError::InvalidCategory(name.to_string()));
    }
    Ok(name.to_string())
}

fn store(conn: &Connection, user: &str, bucket: Bucket, labels: &[String]) -> Result<()> {
    conn.execute(
        "INSERT INTO categories(user_id, bucket, labels) VALUES (?1, ?2, ?3)
         ON CONFLICT(user_id, bucket) DO UPDATE SET labels=excluded.labels",
        params![user, bucket.as_str(), serde_json::to_string(labels)?],
    )?;
    Ok(())
}

/// Categories for `bucket`, seeding the defaults the first time a user's
/// list is read.
pub fn list_categories(conn: &Connection, user: &str, bucket: Bucket) -> Result<Vec<String>> {
    let raw: Option<String> = conn
        .query_row(
            "SELECT labels FROM categories WHERE user_id=?1 AND bucket=?2",
            params![user, bucket.as_str()],
            |r| r.get(0),
        )
        .optional()?;
    match raw {
        Some(json) => Ok(serde_json::from_str(&json)?),
        None => {
            let seeded: Vec<String> = default_categories(bucket)
                .iter()
                .map(|s| s.to_string())
                .collect();
            store(conn, user, bucket, &seeded)?;
            debug!(user, %bucket, "seeded default categories");
            Ok(seeded)
        }
    }
}

/// Appends `name` unless it is already listed. Returns whether it was added.
pub fn add_category(conn: &Connection, user: &str, bucket: Bucket, name: &str) -> Result<bool> {
    let name = clean(name)?;
    let mut labels = list_categories(conn, user, bucket)?;
    if labels.contains(&name) {
        return Ok(false);
    }
    labels.push(name);
    store(conn, user, bucket, &labels)?;
    info!(user, %bucket, "category added");
    Ok(true)
}

/// Renames the first occurrence of `old`. Returns whether anything changed.
pub fn edit_category(
    conn: &Connection,
    user: &str,
    bucket: Bucket,
    old: &str,
    new: &str,
) -> Result<bool> {
    let new = clean(new)?;
    let old = old.trim();
    let mut labels = list_categories(conn, user, bucket)?;
    let Some(slot) = labels.iter_mut().find(|l| l.as_str() == old) else {
        return Ok(false);
    };
    *slot = new;
    store(conn, user, bucket, &labels)?;
    info!(user, %bucket, old, "category renamed");
    Ok(true)
}

/// Removes every occurrence of `name`, returning how many were dropped.
pub fn delete_category(conn: &Connection, user: &str, bucket: Bucket, name: &str) -> Result<usize> {
    let name = name.trim();
    let mut labels = list_categories(conn, user, bucket)?;
    let before = labels.len();
    labels.retain(|l| l != name);
    let removed = before - labels.len();
    if removed > 0 {
        store(conn, user, bucket, &labels)?;
        info!(user, %bucket, name, removed, "category deleted");
    }
    Ok(removed)
}
