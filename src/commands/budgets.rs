// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use serde::Serialize;
use uuid::Uuid;

use crate::engine::Ledger;
use crate::error::LedgerError;
use crate::models::{Budget, BudgetPeriod};
use crate::utils::{maybe_print_json, parse_date, parse_positive_amount, pretty_table};

pub fn handle(ledger: &mut Ledger, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(ledger, sub)?,
        Some(("list", _)) => list(ledger),
        Some(("status", sub)) => status(ledger, sub)?,
        Some(("rm", sub)) => rm(ledger, sub)?,
        _ => {}
    }
    Ok(())
}

fn rm(ledger: &mut Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let category_name = sub.get_one::<String>("category").unwrap();
    let category_id = ledger
        .find_category_by_name(category_name)
        .map(|c| c.id)
        .ok_or_else(|| LedgerError::UnknownCategory(category_name.clone()))?;
    let ids: Vec<Uuid> = ledger
        .budgets()
        .iter()
        .filter(|b| b.category_id == category_id)
        .map(|b| b.id)
        .collect();
    let count = ids.len();
    for id in ids {
        ledger.delete_budget(id);
    }
    println!("Removed {} budget(s) for '{}'", count, category_name);
    Ok(())
}

fn set(ledger: &mut Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let category_name = sub.get_one::<String>("category").unwrap();
    let limit = parse_positive_amount(sub.get_one::<String>("limit").unwrap())?;
    let period: BudgetPeriod = sub.get_one::<String>("period").unwrap().parse()?;
    let start_date = match sub.get_one::<String>("start") {
        Some(s) => parse_date(s)?,
        None => chrono::Utc::now().date_naive(),
    };
    let currency = sub.get_one::<String>("currency").unwrap().to_uppercase();

    let category_id = ledger
        .find_category_by_name(category_name)
        .map(|c| c.id)
        .ok_or_else(|| LedgerError::UnknownCategory(category_name.clone()))?;

    ledger.add_budget(Budget {
        id: Uuid::new_v4(),
        category_id,
        limit,
        spent: rust_decimal::Decimal::ZERO,
        period,
        start_date,
        currency,
    });
    println!(
        "Budget set: {} / {} per {}",
        category_name,
        limit,
        period.as_str()
    );
    Ok(())
}

fn list(ledger: &Ledger) {
    let rows = ledger
        .budgets()
        .iter()
        .map(|b| {
            vec![
                ledger.category_name(b.category_id),
                b.limit.to_string(),
                b.period.as_str().to_string(),
                b.start_date.to_string(),
                b.currency.clone(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Category", "Limit", "Period", "Start", "CCY"], rows)
    );
}

#[derive(Serialize)]
struct BudgetStatusRow {
    category: String,
    spent: String,
    limit: String,
    percentage: String,
    state: &'static str,
}

fn status(ledger: &mut Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");

    // Write recomputed spent back as the cached column before rendering.
    ledger.refresh_budget_spent();

    let data: Vec<BudgetStatusRow> = ledger
        .budgets()
        .iter()
        .map(|b| {
            let view = ledger.budget_view(b);
            BudgetStatusRow {
                category: ledger.category_name(b.category_id),
                spent: format!("{:.2}", view.spent),
                limit: format!("{:.2}", b.limit),
                percentage: format!("{:.0}%", view.percentage),
                state: if view.is_exceeded {
                    "EXCEEDED"
                } else if view.is_warning {
                    "WARNING"
                } else {
                    "OK"
                },
            }
        })
        .collect();

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows = data
            .into_iter()
            .map(|r| vec![r.category, r.spent, r.limit, r.percentage, r.state.to_string()])
            .collect();
        println!(
            "{}",
            pretty_table(&["Category", "Spent", "Limit", "Used", "State"], rows)
        );
    }
    Ok(())
}
