// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use uuid::Uuid;

use crate::engine::Ledger;
use crate::error::LedgerError;
use crate::models::Goal;
use crate::utils::{parse_date, parse_positive_amount, pretty_table};

pub fn handle(ledger: &mut Ledger, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(ledger, sub)?,
        Some(("list", _)) => list(ledger),
        Some(("fund", sub)) => fund(ledger, sub)?,
        Some(("rm", sub)) => rm(ledger, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(ledger: &mut Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap().trim().to_string();
    if name.is_empty() {
        return Err(LedgerError::EmptyName("Goal").into());
    }
    let target = parse_positive_amount(sub.get_one::<String>("target").unwrap())?;
    let deadline = parse_date(sub.get_one::<String>("deadline").unwrap())?;
    let account_name = sub.get_one::<String>("account").unwrap();
    let (account_id, currency) = ledger
        .find_account_by_name(account_name)
        .map(|a| (a.id, a.currency.clone()))
        .ok_or_else(|| LedgerError::UnknownAccount(account_name.clone()))?;

    ledger.add_goal(Goal {
        id: Uuid::new_v4(),
        name: name.clone(),
        target_amount: target,
        current_amount: rust_decimal::Decimal::ZERO,
        deadline,
        currency,
        account_id,
    });
    println!("Added goal '{}' (target {}, by {})", name, target, deadline);
    Ok(())
}

fn list(ledger: &Ledger) {
    let today = chrono::Utc::now().date_naive();
    let rows = ledger
        .goals()
        .iter()
        .map(|g| {
            let view = ledger.goal_view(g, today);
            vec![
                g.name.clone(),
                format!("{:.2} / {:.2} {}", g.current_amount, g.target_amount, g.currency),
                format!("{:.0}%", view.percentage),
                view.days_remaining.to_string(),
                ledger.account_name(g.account_id),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Goal", "Progress", "Done", "Days left", "Account"], rows)
    );
}

fn fund(ledger: &mut Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let amount = parse_positive_amount(sub.get_one::<String>("amount").unwrap())?;
    let id = ledger
        .find_goal_by_name(name)
        .map(|g| g.id)
        .ok_or_else(|| LedgerError::UnknownGoal(name.clone()))?;
    let goal = ledger.add_funds(id, amount)?;
    println!(
        "Funded '{}' with {} (now {:.2} of {:.2})",
        goal.name, amount, goal.current_amount, goal.target_amount
    );
    Ok(())
}

fn rm(ledger: &mut Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let id = ledger
        .find_goal_by_name(name)
        .map(|g| g.id)
        .ok_or_else(|| LedgerError::UnknownGoal(name.clone()))?;
    ledger.delete_goal(id);
    println!("Removed goal '{}'", name);
    Ok(())
}
