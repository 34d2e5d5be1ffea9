// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use financeflow::commands::operations;
use financeflow::engine::Ledger;
use financeflow::models::{Account, AccountKind, Operation, OperationKind};
use financeflow::store::Store;
use financeflow::{cli, utils};

fn ledger() -> Ledger {
    Ledger::open(Store::open_in_memory().unwrap()).unwrap()
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn setup(ledger: &mut Ledger) -> Uuid {
    let account = Uuid::new_v4();
    ledger.add_account(Account {
        id: account,
        name: "Main".to_string(),
        balance: Decimal::from(1000),
        currency: "USD".to_string(),
        kind: AccountKind::Card,
    });
    let food = ledger.find_category_by_name("Food").unwrap().id;
    let salary = ledger.find_category_by_name("Salary").unwrap().id;
    let entries = [
        (OperationKind::Expense, 10, food, "2025-01-01", "groceries at market"),
        (OperationKind::Expense, 20, food, "2025-01-02", "Lunch Downtown"),
        (OperationKind::Income, 500, salary, "2025-01-03", "january salary"),
    ];
    for (kind, amount, category_id, day, desc) in entries {
        ledger.record_operation(Operation {
            id: Uuid::new_v4(),
            kind,
            amount: Decimal::from(amount),
            currency: "USD".to_string(),
            category_id,
            date: date(day),
            account_id: account,
            description: desc.to_string(),
        });
    }
    account
}

fn list_matches(args: &[&str]) -> clap::ArgMatches {
    let mut argv = vec!["financeflow", "op", "list"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    let (_, op_m) = matches.subcommand().unwrap();
    let (_, list_m) = op_m.subcommand().unwrap();
    list_m.clone()
}

#[test]
fn filter_by_kind() {
    let mut ledger = ledger();
    setup(&mut ledger);
    let ops = ledger.filter_operations(Some(OperationKind::Income), None, None);
    assert_eq!(ops.len(), 1);
    assert_eq!(ops[0].amount, Decimal::from(500));
}

#[test]
fn filter_by_category_and_search_is_case_insensitive() {
    let mut ledger = ledger();
    setup(&mut ledger);
    let food = ledger.find_category_by_name("Food").unwrap().id;

    let ops = ledger.filter_operations(None, Some(food), None);
    assert_eq!(ops.len(), 2);

    let ops = ledger.filter_operations(None, Some(food), Some("LUNCH"));
    assert_eq!(ops.len(), 1);
    assert_eq!(ops[0].description, "Lunch Downtown");
}

#[test]
fn filters_compose_conjunctively() {
    let mut ledger = ledger();
    setup(&mut ledger);
    let food = ledger.find_category_by_name("Food").unwrap().id;
    let ops = ledger.filter_operations(Some(OperationKind::Income), Some(food), None);
    assert!(ops.is_empty());
}

#[test]
fn list_limit_respected() {
    let mut ledger = ledger();
    setup(&mut ledger);
    let rows = operations::query_rows(&ledger, &list_matches(&["--limit", "2"])).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].date, "2025-01-03");
}

#[test]
fn list_resolves_display_names() {
    let mut ledger = ledger();
    setup(&mut ledger);
    let rows = operations::query_rows(&ledger, &list_matches(&["--type", "expense"])).unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.account == "Main"));
    assert!(rows.iter().all(|r| r.category == "Food"));
}

#[test]
fn positive_amount_boundary_is_enforced() {
    assert!(utils::parse_positive_amount("10.50").is_ok());
    assert!(utils::parse_positive_amount("0").is_err());
    assert!(utils::parse_positive_amount("-3").is_err());
    assert!(utils::parse_positive_amount("abc").is_err());
}
