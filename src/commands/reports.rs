// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::Months;
use serde::Serialize;

use crate::engine::Ledger;
use crate::utils::{maybe_print_json, pretty_table};

pub fn handle(ledger: &Ledger, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("dashboard", sub)) => dashboard(ledger, sub)?,
        Some(("monthly", sub)) => monthly(ledger, sub)?,
        Some(("trend", sub)) => trend(ledger, sub)?,
        _ => {}
    }
    Ok(())
}

fn dashboard(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let today = chrono::Utc::now().date_naive();
    let view = ledger.dashboard(today);

    if maybe_print_json(json_flag, jsonl_flag, &view)? {
        return Ok(());
    }
    println!("Total balance:      {:.2}", view.total_balance);
    println!("This week expenses: {:.2}", view.week_expenses);
    println!("This week income:   {:.2}", view.week_income);
    let rows = view
        .recent
        .iter()
        .map(|op| {
            vec![
                op.date.to_string(),
                op.kind.as_str().to_string(),
                ledger.category_name(op.category_id),
                format!("{:.2} {}", op.amount, op.currency),
                op.description.clone(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Date", "Type", "Category", "Amount", "Description"], rows)
    );
    Ok(())
}

fn monthly(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let today = chrono::Utc::now().date_naive();
    let stats = ledger.monthly_stats(today);

    if maybe_print_json(json_flag, jsonl_flag, &stats)? {
        return Ok(());
    }
    println!("Monthly expenses: {:.2}", stats.expenses);
    println!("Monthly income:   {:.2}", stats.income);
    let rows = stats
        .top_categories
        .iter()
        .map(|(name, amount)| vec![name.clone(), format!("{:.2}", amount)])
        .collect();
    println!("{}", pretty_table(&["Top category", "Spent"], rows));
    Ok(())
}

#[derive(Serialize)]
struct TrendRow {
    month: String,
    expenses: String,
}

fn trend(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let today = chrono::Utc::now().date_naive();
    let totals = ledger.expense_trend(today);

    // Buckets run oldest to newest; label each with its calendar month.
    let data: Vec<TrendRow> = totals
        .iter()
        .enumerate()
        .map(|(i, total)| {
            let month = today
                .checked_sub_months(Months::new((totals.len() - 1 - i) as u32))
                .unwrap_or(today);
            TrendRow {
                month: month.format("%Y-%m").to_string(),
                expenses: format!("{:.2}", total),
            }
        })
        .collect();

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows = data
            .into_iter()
            .map(|r| vec![r.month, r.expenses])
            .collect();
        println!("{}", pretty_table(&["Month", "Expenses"], rows));
    }
    Ok(())
}
