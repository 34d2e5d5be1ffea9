// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use financeflow::engine::Ledger;
use financeflow::models::{Account, AccountKind, Operation, OperationKind};
use financeflow::store::Store;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn sample_account() -> Account {
    Account {
        id: Uuid::new_v4(),
        name: "Main".to_string(),
        balance: Decimal::from(1000),
        currency: "USD".to_string(),
        kind: AccountKind::Card,
    }
}

fn sample_operation(account_id: Uuid, day: &str) -> Operation {
    Operation {
        id: Uuid::new_v4(),
        kind: OperationKind::Expense,
        amount: Decimal::from(10),
        currency: "USD".to_string(),
        category_id: Uuid::new_v4(),
        date: date(day),
        account_id,
        description: String::new(),
    }
}

#[test]
fn default_categories_seed_exactly_once() {
    let store = Store::open_in_memory().unwrap();
    assert_eq!(store.seed_default_categories().unwrap(), 15);
    assert_eq!(store.seed_default_categories().unwrap(), 0);
    assert_eq!(store.category_count().unwrap(), 15);

    let categories = store.list_categories().unwrap();
    assert!(categories.iter().all(|c| !c.is_custom));
    let expense = categories
        .iter()
        .filter(|c| c.kind == OperationKind::Expense)
        .count();
    let income = categories
        .iter()
        .filter(|c| c.kind == OperationKind::Income)
        .count();
    assert_eq!(expense, 10);
    assert_eq!(income, 5);
}

#[test]
fn operations_come_back_newest_first() {
    let store = Store::open_in_memory().unwrap();
    let account = sample_account();
    store.insert_account(&account).unwrap();
    for day in ["2025-03-05", "2025-06-01", "2025-01-20"] {
        store.insert_operation(&sample_operation(account.id, day)).unwrap();
    }

    let dates: Vec<NaiveDate> = store
        .list_operations()
        .unwrap()
        .iter()
        .map(|op| op.date)
        .collect();
    assert_eq!(dates, vec![date("2025-06-01"), date("2025-03-05"), date("2025-01-20")]);
}

#[test]
fn account_roundtrip_preserves_fields() {
    let store = Store::open_in_memory().unwrap();
    let account = Account {
        balance: "123.45".parse().unwrap(),
        kind: AccountKind::Crypto,
        ..sample_account()
    };
    store.insert_account(&account).unwrap();

    let loaded = store.list_accounts().unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].id, account.id);
    assert_eq!(loaded[0].balance, account.balance);
    assert_eq!(loaded[0].kind, AccountKind::Crypto);
}

#[test]
fn settings_roundtrip_and_overwrite() {
    let store = Store::open_in_memory().unwrap();
    assert_eq!(store.setting("app_lock").unwrap(), None);
    store.set_setting("app_lock", "on").unwrap();
    assert_eq!(store.setting("app_lock").unwrap(), Some("on".to_string()));
    store.set_setting("app_lock", "off").unwrap();
    assert_eq!(store.setting("app_lock").unwrap(), Some("off".to_string()));
}

#[test]
fn reset_wipes_records_reseeds_categories_keeps_settings() {
    let mut ledger = Ledger::open(Store::open_in_memory().unwrap()).unwrap();
    ledger.store().set_setting("app_lock", "on").unwrap();
    let account = sample_account();
    ledger.add_account(account.clone());
    ledger.record_operation(sample_operation(account.id, "2025-06-01"));
    let old_food = ledger.find_category_by_name("Food").unwrap().id;

    ledger.reset().unwrap();

    assert!(ledger.accounts().is_empty());
    assert!(ledger.operations().is_empty());
    assert_eq!(ledger.categories().len(), 15);
    // Re-seeded categories are fresh records, not the old rows.
    assert!(ledger.categories().iter().all(|c| c.id != old_food));
    assert_eq!(
        ledger.store().setting("app_lock").unwrap(),
        Some("on".to_string())
    );
}

#[test]
fn store_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("financeflow.sqlite");

    let account = sample_account();
    {
        let store = Store::open(&path).unwrap();
        store.insert_account(&account).unwrap();
    }
    let store = Store::open(&path).unwrap();
    let loaded = store.list_accounts().unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].id, account.id);
}
