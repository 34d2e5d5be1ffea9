// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use serde::Serialize;
use uuid::Uuid;

use crate::engine::Ledger;
use crate::error::LedgerError;
use crate::models::{Operation, OperationKind};
use crate::utils::{maybe_print_json, parse_date, parse_positive_amount, pretty_table};

pub fn handle(ledger: &mut Ledger, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(ledger, sub)?,
        Some(("list", sub)) => list(ledger, sub)?,
        Some(("rm", sub)) => rm(ledger, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(ledger: &mut Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let account_name = sub.get_one::<String>("account").unwrap();
    let category_name = sub.get_one::<String>("category").unwrap();
    let amount = parse_positive_amount(sub.get_one::<String>("amount").unwrap())?;
    let kind: OperationKind = sub.get_one::<String>("type").unwrap().parse()?;
    let date = match sub.get_one::<String>("date") {
        Some(s) => parse_date(s)?,
        None => chrono::Utc::now().date_naive(),
    };
    let description = sub.get_one::<String>("desc").unwrap().clone();

    let (account_id, currency) = ledger
        .find_account_by_name(account_name)
        .map(|a| (a.id, a.currency.clone()))
        .ok_or_else(|| LedgerError::UnknownAccount(account_name.clone()))?;
    let category_id = ledger
        .find_category_by_name(category_name)
        .map(|c| c.id)
        .ok_or_else(|| LedgerError::UnknownCategory(category_name.clone()))?;

    ledger.record_operation(Operation {
        id: Uuid::new_v4(),
        kind,
        amount,
        currency,
        category_id,
        date,
        account_id,
        description,
    });
    println!(
        "Recorded {} {} on {} ({}, acct: {})",
        kind.as_str(),
        amount,
        date,
        category_name,
        account_name
    );
    Ok(())
}

#[derive(Serialize)]
pub struct OperationRow {
    pub id: String,
    pub date: String,
    pub kind: String,
    pub account: String,
    pub category: String,
    pub amount: String,
    pub currency: String,
    pub description: String,
}

pub fn query_rows(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<Vec<OperationRow>> {
    let kind = match sub.get_one::<String>("type") {
        Some(s) => Some(s.parse::<OperationKind>()?),
        None => None,
    };
    let category_id = match sub.get_one::<String>("category") {
        Some(name) => Some(
            ledger
                .find_category_by_name(name)
                .map(|c| c.id)
                .ok_or_else(|| LedgerError::UnknownCategory(name.clone()))?,
        ),
        None => None,
    };
    let search = sub.get_one::<String>("search").map(|s| s.as_str());

    let mut ops = ledger.filter_operations(kind, category_id, search);
    if let Some(limit) = sub.get_one::<usize>("limit") {
        ops.truncate(*limit);
    }
    Ok(ops
        .into_iter()
        .map(|op| OperationRow {
            id: op.id.to_string(),
            date: op.date.to_string(),
            kind: op.kind.as_str().to_string(),
            account: ledger.account_name(op.account_id),
            category: ledger.category_name(op.category_id),
            amount: op.amount.to_string(),
            currency: op.currency.clone(),
            description: op.description.clone(),
        })
        .collect())
}

fn list(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(ledger, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.date.clone(),
                    r.kind.clone(),
                    r.account.clone(),
                    r.category.clone(),
                    r.amount.clone(),
                    r.currency.clone(),
                    r.description.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Date", "Type", "Account", "Category", "Amount", "CCY", "Description"],
                rows,
            )
        );
    }
    Ok(())
}

fn rm(ledger: &mut Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let raw = sub.get_one::<String>("id").unwrap();
    let id = Uuid::parse_str(raw).with_context(|| format!("Invalid operation id '{}'", raw))?;
    ledger.delete_operation(id);
    println!("Removed operation {}", id);
    Ok(())
}
