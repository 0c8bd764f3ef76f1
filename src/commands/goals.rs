// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::AppConfig;
use crate::goals;
use crate::utils::{arg, fmt_money, maybe_print_json, parse_decimal, pretty_table};
use anyhow::{Context, Result};
use rusqlite::Connection;

pub fn handle(conn: &Connection, cfg: &AppConfig, m: &clap::ArgMatches) -> Result<()> {
    let user = cfg.user.as_str();
    match m.subcommand() {
        Some(("add", sub)) => {
            let target = parse_decimal(arg(sub, "target")?)?;
            let g = goals::add_goal(conn, user, arg(sub, "name")?, target)?;
            println!("Added goal #{} '{}' (target {})", g.id, g.name, fmt_money(&g.target_amount));
        }
        Some(("list", sub)) => {
            let data = goals::list_goals(conn, user)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
                let rows = data
                    .iter()
                    .map(|g| {
                        vec![
                            g.id.to_string(),
                            g.name.clone(),
                            fmt_money(&g.current_amount),
                            fmt_money(&g.target_amount),
                            format!("{}%", g.progress().round_dp(1)),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["ID", "Goal", "Saved", "Target", "Progress"], rows)
                );
            }
        }
        Some(("contribute", sub)) => {
            let id = *sub.get_one::<i64>("id").context("Missing goal id")?;
            let amount = parse_decimal(arg(sub, "amount")?)?;
            let g = goals::contribute(conn, user, id, amount)?;
            println!(
                "Goal '{}' now at {} of {} ({}%)",
                g.name,
                fmt_money(&g.current_amount),
                fmt_money(&g.target_amount),
                g.progress().round_dp(1)
            );
        }
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").context("Missing goal id")?;
            goals::remove_goal(conn, user, id)?;
            println!("Removed goal #{}", id);
        }
        _ => {}
    }
    Ok(())
}
