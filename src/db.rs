// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::Connection;
use std::fs;
use std::path::{Path, PathBuf};

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.savvysaver", "SavvySaver", "savvy-saver"));

pub fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")
}

pub fn default_db_path() -> Result<PathBuf> {
    let proj = project_dirs()?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("savvy-saver.sqlite"))
}

pub fn open_or_init(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let mut conn =
        Connection::open(path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&mut conn)?;
    tracing::debug!(path = %path.display(), "database ready");
    Ok(conn)
}

/// Tables mirror the per-user tree: settings, transactions partitioned by
/// bucket/year/month, goals, and one category list per bucket.
pub fn init_schema(conn: &mut Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS settings(
        user_id TEXT PRIMARY KEY,
        monthly_salary TEXT NOT NULL,
        needs_percentage TEXT NOT NULL,
        wants_percentage TEXT NOT NULL,
        investments_percentage TEXT NOT NULL,
        updated_at TEXT NOT NULL DEFAULT (datetime('now'))
    );

    CREATE TABLE IF NOT EXISTS transactions(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id TEXT NOT NULL,
        bucket TEXT NOT NULL,
        year INTEGER NOT NULL,
        month INTEGER NOT NULL,
        date TEXT NOT NULL,
        timestamp INTEGER NOT NULL,
        type TEXT NOT NULL CHECK(type IN ('Credit','Debit')),
        amount TEXT NOT NULL,
        account TEXT NOT NULL,
        category TEXT NOT NULL,
        note TEXT,
        monthly_salary TEXT NOT NULL,
        allocation_percentage TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_transactions_partition
        ON transactions(user_id, bucket, year, month);
    CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(user_id, date);

    CREATE TABLE IF NOT EXISTS goals(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id TEXT NOT NULL,
        name TEXT NOT NULL,
        target_amount TEXT NOT NULL,
        current_amount TEXT NOT NULL DEFAULT '0'
    );

    CREATE TABLE IF NOT EXISTS categories(
        user_id TEXT NOT NULL,
        bucket TEXT NOT NULL,
        labels TEXT NOT NULL,
        PRIMARY KEY(user_id, bucket)
    );
    "#,
    )?;
    Ok(())
}
