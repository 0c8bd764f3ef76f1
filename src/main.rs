// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use savvy_saver::{cli, commands, config, db};

fn main() -> Result<()> {
    let matches = cli::build_cli().get_matches();

    let mut cfg = config::load_app_configuration()?;
    if let Some(user) = matches.get_one::<String>("user") {
        cfg.set_user(user)?;
    }

    // Logs go to stderr; stdout carries command output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.log_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let db_path = cfg.database_path()?;
    let mut conn = db::open_or_init(&db_path)?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", db_path.display());
        }
        Some(("settings", sub)) => commands::settings::handle(&conn, &cfg, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&mut conn, &cfg, sub)?,
        Some(("account", sub)) => commands::accounts::handle(&conn, &cfg, sub)?,
        Some(("category", sub)) => commands::categories::handle(&conn, &cfg, sub)?,
        Some(("goal", sub)) => commands::goals::handle(&conn, &cfg, sub)?,
        Some(("report", sub)) => commands::reports::handle(&conn, &cfg, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&conn, &cfg, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&conn, &cfg)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
