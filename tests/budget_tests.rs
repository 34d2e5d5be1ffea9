// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use financeflow::engine::Ledger;
use financeflow::models::{
    Account, AccountKind, Budget, BudgetPeriod, Operation, OperationKind,
};
use financeflow::store::Store;

fn ledger() -> Ledger {
    Ledger::open(Store::open_in_memory().unwrap()).unwrap()
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn add_account(ledger: &mut Ledger, balance: i64) -> Uuid {
    let id = Uuid::new_v4();
    ledger.add_account(Account {
        id,
        name: "Main".to_string(),
        balance: Decimal::from(balance),
        currency: "KZT".to_string(),
        kind: AccountKind::Card,
    });
    id
}

fn spend(ledger: &mut Ledger, amount: i64, category_id: Uuid, account_id: Uuid, day: &str) {
    ledger.record_operation(Operation {
        id: Uuid::new_v4(),
        kind: OperationKind::Expense,
        amount: Decimal::from(amount),
        currency: "KZT".to_string(),
        category_id,
        date: date(day),
        account_id,
        description: String::new(),
    });
}

fn add_budget(ledger: &mut Ledger, category_id: Uuid, limit: i64, start: &str) -> Budget {
    let budget = Budget {
        id: Uuid::new_v4(),
        category_id,
        limit: Decimal::from(limit),
        spent: Decimal::ZERO,
        period: BudgetPeriod::Month,
        start_date: date(start),
        currency: "KZT".to_string(),
    };
    ledger.add_budget(budget.clone());
    budget
}

#[test]
fn food_budget_scenario() {
    let mut ledger = ledger();
    let account = add_account(&mut ledger, 1000);
    let food = ledger.find_category_by_name("Food").unwrap().id;

    spend(&mut ledger, 200, food, account, "2025-08-10");
    let budget = add_budget(&mut ledger, food, 500, "2025-08-01");

    let account_balance = ledger.accounts().iter().find(|a| a.id == account).unwrap().balance;
    assert_eq!(account_balance, Decimal::from(800));

    let view = ledger.budget_view(&budget);
    assert_eq!(view.spent, Decimal::from(200));
    assert_eq!(view.percentage, Decimal::from(40));
    assert!(!view.is_exceeded);
    assert!(!view.is_warning);
}

#[test]
fn warning_then_exceeded() {
    let mut ledger = ledger();
    let account = add_account(&mut ledger, 1000);
    let food = ledger.find_category_by_name("Food").unwrap().id;
    let budget = add_budget(&mut ledger, food, 100, "2025-08-01");

    spend(&mut ledger, 60, food, account, "2025-08-02");
    spend(&mut ledger, 35, food, account, "2025-08-03");
    let view = ledger.budget_view(&budget);
    assert_eq!(view.percentage, Decimal::from(95));
    assert!(view.is_warning);
    assert!(!view.is_exceeded);

    spend(&mut ledger, 10, food, account, "2025-08-04");
    let view = ledger.budget_view(&budget);
    assert_eq!(view.spent, Decimal::from(105));
    // Percentage clamps at 100 even while spent runs past the limit.
    assert_eq!(view.percentage, Decimal::from(100));
    assert!(view.is_exceeded);
    assert!(!view.is_warning);
}

#[test]
fn zero_limit_reports_zero_percentage() {
    let mut ledger = ledger();
    let account = add_account(&mut ledger, 1000);
    let food = ledger.find_category_by_name("Food").unwrap().id;
    let budget = add_budget(&mut ledger, food, 0, "2025-08-01");

    spend(&mut ledger, 50, food, account, "2025-08-02");
    let view = ledger.budget_view(&budget);
    assert_eq!(view.percentage, Decimal::ZERO);
    assert!(view.is_exceeded);
    assert!(!view.is_warning);
}

#[test]
fn spent_sums_entire_history_ignoring_period() {
    let mut ledger = ledger();
    let account = add_account(&mut ledger, 10_000);
    let food = ledger.find_category_by_name("Food").unwrap().id;
    // Budget starts in 2025; the 2022 expense still counts.
    let budget = add_budget(&mut ledger, food, 500, "2025-08-01");

    spend(&mut ledger, 100, food, account, "2022-01-15");
    spend(&mut ledger, 50, food, account, "2025-08-10");

    let view = ledger.budget_view(&budget);
    assert_eq!(view.spent, Decimal::from(150));
}

#[test]
fn only_matching_expense_operations_count() {
    let mut ledger = ledger();
    let account = add_account(&mut ledger, 1000);
    let food = ledger.find_category_by_name("Food").unwrap().id;
    let transport = ledger.find_category_by_name("Transport").unwrap().id;
    let salary = ledger.find_category_by_name("Salary").unwrap().id;
    let budget = add_budget(&mut ledger, food, 500, "2025-08-01");

    spend(&mut ledger, 80, food, account, "2025-08-02");
    spend(&mut ledger, 40, transport, account, "2025-08-02");
    ledger.record_operation(Operation {
        id: Uuid::new_v4(),
        kind: OperationKind::Income,
        amount: Decimal::from(999),
        currency: "KZT".to_string(),
        category_id: salary,
        date: date("2025-08-02"),
        account_id: account,
        description: String::new(),
    });

    assert_eq!(ledger.budget_view(&budget).spent, Decimal::from(80));
}

#[test]
fn warning_exceeded_and_normal_partition_budgets() {
    let mut ledger = ledger();
    let account = add_account(&mut ledger, 10_000);
    let food = ledger.find_category_by_name("Food").unwrap().id;
    let transport = ledger.find_category_by_name("Transport").unwrap().id;
    let health = ledger.find_category_by_name("Health").unwrap().id;

    add_budget(&mut ledger, food, 100, "2025-08-01"); // will be exceeded
    add_budget(&mut ledger, transport, 100, "2025-08-01"); // will be warning
    add_budget(&mut ledger, health, 100, "2025-08-01"); // stays normal

    spend(&mut ledger, 150, food, account, "2025-08-02");
    spend(&mut ledger, 85, transport, account, "2025-08-02");
    spend(&mut ledger, 10, health, account, "2025-08-02");

    assert_eq!(ledger.exceeded_budgets().len(), 1);
    assert_eq!(ledger.warning_budgets().len(), 1);
    assert_eq!(ledger.normal_budgets().len(), 1);
    for budget in ledger.budgets() {
        let view = ledger.budget_view(budget);
        assert!(!(view.is_warning && view.is_exceeded));
    }
}

#[test]
fn deleting_budget_leaves_operations_alone() {
    let mut ledger = ledger();
    let account = add_account(&mut ledger, 1000);
    let food = ledger.find_category_by_name("Food").unwrap().id;
    let budget = add_budget(&mut ledger, food, 500, "2025-08-01");
    spend(&mut ledger, 120, food, account, "2025-08-02");

    ledger.delete_budget(budget.id);
    assert!(ledger.budgets().is_empty());
    assert_eq!(ledger.operations().len(), 1);
}

#[test]
fn refresh_writes_cached_spent_back() {
    let mut ledger = ledger();
    let account = add_account(&mut ledger, 1000);
    let food = ledger.find_category_by_name("Food").unwrap().id;
    add_budget(&mut ledger, food, 500, "2025-08-01");
    spend(&mut ledger, 120, food, account, "2025-08-02");

    ledger.refresh_budget_spent();
    assert_eq!(ledger.budgets()[0].spent, Decimal::from(120));
}
