// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use financeflow::{cli, commands, engine, store};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let store = store::Store::open_default()?;
    let mut ledger = engine::Ledger::open(store)?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", store::db_path()?.display());
        }
        Some(("account", sub)) => commands::accounts::handle(&mut ledger, sub)?,
        Some(("category", sub)) => commands::categories::handle(&mut ledger, sub)?,
        Some(("op", sub)) => commands::operations::handle(&mut ledger, sub)?,
        Some(("budget", sub)) => commands::budgets::handle(&mut ledger, sub)?,
        Some(("goal", sub)) => commands::goals::handle(&mut ledger, sub)?,
        Some(("report", sub)) => commands::reports::handle(&ledger, sub)?,
        Some(("settings", sub)) => commands::settings::handle(&mut ledger, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
