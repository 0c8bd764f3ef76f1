// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::categories::{add_category, delete_category, edit_category, list_categories};
use crate::config::AppConfig;
use crate::models::Bucket;
use crate::utils::{arg, maybe_print_json, parse_bucket, pretty_table};
use anyhow::Result;
use rusqlite::Connection;
use serde::Serialize;

#[derive(Serialize)]
struct CategoryRow {
    bucket: Bucket,
    category: String,
}

pub fn handle(conn: &Connection, cfg: &AppConfig, m: &clap::ArgMatches) -> Result<()> {
    let user = cfg.user.as_str();
    match m.subcommand() {
        Some(("list", sub)) => {
            let buckets = match sub.get_one::<String>("bucket") {
                Some(b) => vec![parse_bucket(b)?],
                None => Bucket::ALL.to_vec(),
            };
            let mut data = Vec::new();
            for bucket in buckets {
                for category in list_categories(conn, user, bucket)? {
                    data.push(CategoryRow { bucket, category });
                }
            }
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
                let rows = data
                    .into_iter()
                    .map(|r| vec![r.bucket.to_string(), r.category])
                    .collect();
                println!("{}", pretty_table(&["Bucket", "Category"], rows));
            }
        }
        Some(("add", sub)) => {
            let bucket = parse_bucket(arg(sub, "bucket")?)?;
            let name = arg(sub, "name")?;
            if add_category(conn, user, bucket, name)? {
                println!("Added category '{}' to {}", name, bucket);
            } else {
                println!("Category '{}' already exists in {}", name, bucket);
            }
        }
        Some(("rename", sub)) => {
            let bucket = parse_bucket(arg(sub, "bucket")?)?;
            let from = arg(sub, "from")?;
            let to = arg(sub, "to")?;
            if edit_category(conn, user, bucket, from, to)? {
                println!("Renamed '{}' to '{}' in {}", from, to, bucket);
            } else {
                println!("No category '{}' in {}", from, bucket);
            }
        }
        Some(("rm", sub)) => {
            let bucket = parse_bucket(arg(sub, "bucket")?)?;
            let name = arg(sub, "name")?;
            let removed = delete_category(conn, user, bucket, name)?;
            println!("Removed {} occurrence(s) of '{}' from {}", removed, name, bucket);
        }
        _ => {}
    }
    Ok(())
}
