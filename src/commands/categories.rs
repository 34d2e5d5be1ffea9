// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use uuid::Uuid;

use crate::engine::Ledger;
use crate::error::LedgerError;
use crate::models::{Category, OperationKind};
use crate::utils::pretty_table;

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
        return Err(LedgerError::EmptyName("Category").into());
    }
    let kind: OperationKind = sub.get_one::<String>("type").unwrap().parse()?;
    let icon = sub.get_one::<String>("icon").unwrap().clone();
    let color = sub
        .get_one::<String>("color")
        .unwrap()
        .trim_start_matches('#')
        .to_uppercase();

    ledger.add_category(Category {
        id: Uuid::new_v4(),
        name: name.clone(),
        icon,
        color,
        kind,
        is_custom: true,
    });
    println!("Added category '{}' ({})", name, kind.as_str());
    Ok(())
}

fn list(ledger: &Ledger) {
    let rows = ledger
        .categories()
        .iter()
        .map(|c| {
            vec![
                c.icon.clone(),
                c.name.clone(),
                c.kind.as_str().to_string(),
                c.color.clone(),
                if c.is_custom { "custom" } else { "built-in" }.to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["", "Name", "Type", "Color", "Origin"], rows)
    );
}

fn rm(ledger: &mut Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let id = ledger
        .find_category_by_name(name)
        .map(|c| c.id)
        .ok_or_else(|| LedgerError::UnknownCategory(name.clone()))?;
    ledger.delete_category(id);
    println!("Removed category '{}'", name);
    Ok(())
}
