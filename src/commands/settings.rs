// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::engine::Ledger;

pub const APP_LOCK_KEY: &str = "app_lock";

pub fn handle(ledger: &mut Ledger, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("lock", sub)) => lock(ledger, sub)?,
        Some(("reset", _)) => reset(ledger)?,
        _ => {}
    }
    Ok(())
}

fn lock(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let state = sub.get_one::<String>("state").unwrap();
    match state.as_str() {
        "on" | "off" => {
            ledger.store().set_setting(APP_LOCK_KEY, state)?;
            println!("App lock turned {}", state);
            Ok(())
        }
        other => Err(anyhow::anyhow!(
            "Invalid lock state '{}', expected on|off",
            other
        )),
    }
}

fn reset(ledger: &mut Ledger) -> Result<()> {
    ledger.reset()?;
    println!("All data removed; built-in categories re-seeded");
    Ok(())
}
