// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use uuid::Uuid;

use crate::engine::Ledger;
use crate::error::LedgerError;
use crate::models::{Account, AccountKind};
use crate::utils::{fmt_money, parse_decimal, pretty_table};

pub fn handle(ledger: &mut Ledger, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(ledger, sub)?,
        Some(("list", _)) => list(ledger),
        Some(("rm", sub)) => rm(ledger, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(ledger: &mut Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap().trim().to_string();
    if name.is_empty() {
        return Err(LedgerError::EmptyName("Account").into());
    }
    let kind: AccountKind = sub.get_one::<String>("type").unwrap().parse()?;
    let currency = sub.get_one::<String>("currency").unwrap().to_uppercase();
    let balance = parse_decimal(sub.get_one::<String>("balance").unwrap())?;

    ledger.add_account(Account {
        id: Uuid::new_v4(),
        name: name.clone(),
        balance,
        currency: currency.clone(),
        kind,
    });
    println!("Added account '{}' ({}, {})", name, kind.as_str(), currency);
    Ok(())
}

fn list(ledger: &Ledger) {
    let rows = ledger
        .accounts()
        .iter()
        .map(|a| {
            vec![
                a.name.clone(),
                a.kind.as_str().to_string(),
                fmt_money(&a.balance, &a.currency),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Name", "Type", "Balance"], rows));
}

fn rm(ledger: &mut Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let id = ledger
        .find_account_by_name(name)
        .map(|a| a.id)
        .ok_or_else(|| LedgerError::UnknownAccount(name.clone()))?;
    ledger.delete_account(id);
    println!("Removed account '{}'", name);
    Ok(())
}
