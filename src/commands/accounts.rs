// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::accounts::accounts_in;
use crate::config::AppConfig;
use crate::ledger::compute_account_balances;
use crate::store;
use crate::utils::{fmt_money, maybe_print_json, parse_bucket, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, cfg: &AppConfig, m: &clap::ArgMatches) -> Result<()> {
    if let Some(("list", sub)) = m.subcommand() {
        let txns = store::list_transactions(conn, &cfg.user)?;
        let mut accounts = compute_account_balances(&txns);
        if let Some(b) = sub.get_one::<String>("bucket") {
            let names: Vec<&str> = accounts_in(parse_bucket(b)?).collect();
            accounts.retain(|a| names.contains(&a.name.as_str()));
        }
        if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &accounts)? {
            let rows = accounts
                .iter()
                .map(|a| vec![a.name.clone(), a.bucket.to_string(), fmt_money(&a.balance)])
                .collect();
            println!("{}", pretty_table(&["Account", "Bucket", "Balance"], rows));
        }
    }
    Ok(())
}
