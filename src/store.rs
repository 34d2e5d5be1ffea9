// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::models::{Account, Budget, Category, Goal, Operation, OperationKind};

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("io.financeflow", "FinanceFlow", "financeflow"));

pub fn db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("financeflow.sqlite"))
}

/// Record store over SQLite: the five record kinds as tables keyed by a
/// UUID string, plus a settings key-value table. Constructed explicitly
/// and handed to the ledger; there is no global instance.
///
/// Tables deliberately carry no foreign-key actions: deleting a category
/// or account leaves dependent operations, budgets, and goals in place.
pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open_default() -> Result<Self> {
        Self::open(&db_path()?)
    }

    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Open DB at {}", path.display()))?;
        let store = Store { conn };
        store.init_schema()?;
        Ok(store)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Store { conn };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            r#"
        CREATE TABLE IF NOT EXISTS settings(
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS accounts(
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            balance TEXT NOT NULL DEFAULT '0',
            currency TEXT NOT NULL,
            kind TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS categories(
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            icon TEXT NOT NULL,
            color TEXT NOT NULL,
            kind TEXT NOT NULL,
            is_custom INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS operations(
            id TEXT PRIMARY KEY,
            kind TEXT NOT NULL,
            amount TEXT NOT NULL,
            currency TEXT NOT NULL,
            category_id TEXT NOT NULL,
            date TEXT NOT NULL,
            account_id TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );
        CREATE INDEX IF NOT EXISTS idx_operations_date ON operations(date);

        CREATE TABLE IF NOT EXISTS budgets(
            id TEXT PRIMARY KEY,
            category_id TEXT NOT NULL,
            limit_amount TEXT NOT NULL,
            spent TEXT NOT NULL DEFAULT '0',
            period TEXT NOT NULL,
            start_date TEXT NOT NULL,
            currency TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS goals(
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            target_amount TEXT NOT NULL,
            current_amount TEXT NOT NULL DEFAULT '0',
            deadline TEXT NOT NULL,
            currency TEXT NOT NULL,
            account_id TEXT NOT NULL
        );
        "#,
        )?;
        Ok(())
    }

    /// Seed the built-in categories. Runs only on a first launch, i.e.
    /// while the categories table is still empty. Returns how many rows
    /// were inserted.
    pub fn seed_default_categories(&self) -> Result<usize> {
        if self.category_count()? > 0 {
            return Ok(0);
        }
        let defaults: &[(&str, &str, &str, OperationKind)] = &[
            ("Food", "🍔", "FF6B6B", OperationKind::Expense),
            ("Transport", "🚗", "4ECDC4", OperationKind::Expense),
            ("Housing", "🏠", "95E1D3", OperationKind::Expense),
            ("Health", "💊", "FFB6B9", OperationKind::Expense),
            ("Entertainment", "🎬", "C7CEEA", OperationKind::Expense),
            ("Subscriptions", "📱", "B5EAD7", OperationKind::Expense),
            ("Shopping", "🛍️", "FFDAC1", OperationKind::Expense),
            ("Education", "📚", "E0BBE4", OperationKind::Expense),
            ("Utilities", "⚡", "D4F1F4", OperationKind::Expense),
            ("Other", "📌", "CCCCCC", OperationKind::Expense),
            ("Salary", "💼", "91D1BA", OperationKind::Income),
            ("Freelance", "💻", "88CCEE", OperationKind::Income),
            ("Gifts", "🎁", "FFDDC1", OperationKind::Income),
            ("Dividends", "📈", "B4E7FF", OperationKind::Income),
            ("Other income", "💰", "FFE5B4", OperationKind::Income),
        ];
        for (name, icon, color, kind) in defaults {
            self.insert_category(&Category {
                id: Uuid::new_v4(),
                name: (*name).to_string(),
                icon: (*icon).to_string(),
                color: (*color).to_string(),
                kind: *kind,
                is_custom: false,
            })?;
        }
        Ok(defaults.len())
    }

    pub fn category_count(&self) -> Result<usize> {
        let n: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM categories", [], |r| r.get(0))?;
        Ok(n as usize)
    }

    // ----- accounts -----

    pub fn list_accounts(&self) -> Result<Vec<Account>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, balance, currency, kind FROM accounts ORDER BY name")?;
        let mut rows = stmt.query([])?;
        let mut out = Vec::new();
        while let Some(r) = rows.next()? {
            let id: String = r.get(0)?;
            let name: String = r.get(1)?;
            let balance: String = r.get(2)?;
            let currency: String = r.get(3)?;
            let kind: String = r.get(4)?;
            out.push(Account {
                id: parse_id(&id)?,
                name,
                balance: parse_stored_decimal(&balance, "accounts.balance")?,
                currency,
                kind: kind.parse()?,
            });
        }
        Ok(out)
    }

    pub fn insert_account(&self, account: &Account) -> Result<()> {
        self.conn.execute(
            "INSERT INTO accounts(id, name, balance, currency, kind) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                account.id.to_string(),
                account.name,
                account.balance.to_string(),
                account.currency,
                account.kind.as_str()
            ],
        )?;
        Ok(())
    }

    pub fn update_account(&self, account: &Account) -> Result<()> {
        self.conn.execute(
            "UPDATE accounts SET name=?2, balance=?3, currency=?4, kind=?5 WHERE id=?1",
            params![
                account.id.to_string(),
                account.name,
                account.balance.to_string(),
                account.currency,
                account.kind.as_str()
            ],
        )?;
        Ok(())
    }

    pub fn delete_account(&self, id: Uuid) -> Result<()> {
        self.conn
            .execute("DELETE FROM accounts WHERE id=?1", params![id.to_string()])?;
        Ok(())
    }

    // ----- categories -----

    pub fn list_categories(&self) -> Result<Vec<Category>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, icon, color, kind, is_custom FROM categories ORDER BY name",
        )?;
        let mut rows = stmt.query([])?;
        let mut out = Vec::new();
        while let Some(r) = rows.next()? {
            let id: String = r.get(0)?;
            let name: String = r.get(1)?;
            let icon: String = r.get(2)?;
            let color: String = r.get(3)?;
            let kind: String = r.get(4)?;
            let is_custom: bool = r.get(5)?;
            out.push(Category {
                id: parse_id(&id)?,
                name,
                icon,
                color,
                kind: kind.parse()?,
                is_custom,
            });
        }
        Ok(out)
    }

    pub fn insert_category(&self, category: &Category) -> Result<()> {
        self.conn.execute(
            "INSERT INTO categories(id, name, icon, color, kind, is_custom)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                category.id.to_string(),
                category.name,
                category.icon,
                category.color,
                category.kind.as_str(),
                category.is_custom
            ],
        )?;
        Ok(())
    }

    pub fn delete_category(&self, id: Uuid) -> Result<()> {
        self.conn
            .execute("DELETE FROM categories WHERE id=?1", params![id.to_string()])?;
        Ok(())
    }

    // ----- operations -----

    /// Operations come back newest first; rowid breaks same-day ties so
    /// the order is stable across reloads.
    pub fn list_operations(&self) -> Result<Vec<Operation>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, kind, amount, currency, category_id, date, account_id, description
             FROM operations ORDER BY date DESC, rowid DESC",
        )?;
        let mut rows = stmt.query([])?;
        let mut out = Vec::new();
        while let Some(r) = rows.next()? {
            let id: String = r.get(0)?;
            let kind: String = r.get(1)?;
            let amount: String = r.get(2)?;
            let currency: String = r.get(3)?;
            let category_id: String = r.get(4)?;
            let date: String = r.get(5)?;
            let account_id: String = r.get(6)?;
            let description: String = r.get(7)?;
            out.push(Operation {
                id: parse_id(&id)?,
                kind: kind.parse()?,
                amount: parse_stored_decimal(&amount, "operations.amount")?,
                currency,
                category_id: parse_id(&category_id)?,
                date: parse_stored_date(&date)?,
                account_id: parse_id(&account_id)?,
                description,
            });
        }
        Ok(out)
    }

    pub fn insert_operation(&self, op: &Operation) -> Result<()> {
        self.conn.execute(
            "INSERT INTO operations(id, kind, amount, currency, category_id, date, account_id, description)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                op.id.to_string(),
                op.kind.as_str(),
                op.amount.to_string(),
                op.currency,
                op.category_id.to_string(),
                op.date.to_string(),
                op.account_id.to_string(),
                op.description
            ],
        )?;
        Ok(())
    }

    pub fn delete_operation(&self, id: Uuid) -> Result<()> {
        self.conn
            .execute("DELETE FROM operations WHERE id=?1", params![id.to_string()])?;
        Ok(())
    }

    // ----- budgets -----

    pub fn list_budgets(&self) -> Result<Vec<Budget>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, category_id, limit_amount, spent, period, start_date, currency
             FROM budgets ORDER BY start_date, rowid",
        )?;
        let mut rows = stmt.query([])?;
        let mut out = Vec::new();
        while let Some(r) = rows.next()? {
            let id: String = r.get(0)?;
            let category_id: String = r.get(1)?;
            let limit: String = r.get(2)?;
            let spent: String = r.get(3)?;
            let period: String = r.get(4)?;
            let start_date: String = r.get(5)?;
            let currency: String = r.get(6)?;
            out.push(Budget {
                id: parse_id(&id)?,
                category_id: parse_id(&category_id)?,
                limit: parse_stored_decimal(&limit, "budgets.limit_amount")?,
                spent: parse_stored_decimal(&spent, "budgets.spent")?,
                period: period.parse()?,
                start_date: parse_stored_date(&start_date)?,
                currency,
            });
        }
        Ok(out)
    }

    pub fn insert_budget(&self, budget: &Budget) -> Result<()> {
        self.conn.execute(
            "INSERT INTO budgets(id, category_id, limit_amount, spent, period, start_date, currency)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                budget.id.to_string(),
                budget.category_id.to_string(),
                budget.limit.to_string(),
                budget.spent.to_string(),
                budget.period.as_str(),
                budget.start_date.to_string(),
                budget.currency
            ],
        )?;
        Ok(())
    }

    pub fn update_budget_spent(&self, id: Uuid, spent: Decimal) -> Result<()> {
        self.conn.execute(
            "UPDATE budgets SET spent=?2 WHERE id=?1",
            params![id.to_string(), spent.to_string()],
        )?;
        Ok(())
    }

    pub fn delete_budget(&self, id: Uuid) -> Result<()> {
        self.conn
            .execute("DELETE FROM budgets WHERE id=?1", params![id.to_string()])?;
        Ok(())
    }

    // ----- goals -----

    pub fn list_goals(&self) -> Result<Vec<Goal>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, target_amount, current_amount, deadline, currency, account_id
             FROM goals ORDER BY deadline, rowid",
        )?;
        let mut rows = stmt.query([])?;
        let mut out = Vec::new();
        while let Some(r) = rows.next()? {
            let id: String = r.get(0)?;
            let name: String = r.get(1)?;
            let target: String = r.get(2)?;
            let current: String = r.get(3)?;
            let deadline: String = r.get(4)?;
            let currency: String = r.get(5)?;
            let account_id: String = r.get(6)?;
            out.push(Goal {
                id: parse_id(&id)?,
                name,
                target_amount: parse_stored_decimal(&target, "goals.target_amount")?,
                current_amount: parse_stored_decimal(&current, "goals.current_amount")?,
                deadline: parse_stored_date(&deadline)?,
                currency,
                account_id: parse_id(&account_id)?,
            });
        }
        Ok(out)
    }

    pub fn insert_goal(&self, goal: &Goal) -> Result<()> {
        self.conn.execute(
            "INSERT INTO goals(id, name, target_amount, current_amount, deadline, currency, account_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                goal.id.to_string(),
                goal.name,
                goal.target_amount.to_string(),
                goal.current_amount.to_string(),
                goal.deadline.to_string(),
                goal.currency,
                goal.account_id.to_string()
            ],
        )?;
        Ok(())
    }

    pub fn update_goal(&self, goal: &Goal) -> Result<()> {
        self.conn.execute(
            "UPDATE goals SET name=?2, target_amount=?3, current_amount=?4, deadline=?5, currency=?6, account_id=?7
             WHERE id=?1",
            params![
                goal.id.to_string(),
                goal.name,
                goal.target_amount.to_string(),
                goal.current_amount.to_string(),
                goal.deadline.to_string(),
                goal.currency,
                goal.account_id.to_string()
            ],
        )?;
        Ok(())
    }

    pub fn delete_goal(&self, id: Uuid) -> Result<()> {
        self.conn
            .execute("DELETE FROM goals WHERE id=?1", params![id.to_string()])?;
        Ok(())
    }

    // ----- settings -----

    pub fn setting(&self, key: &str) -> Result<Option<String>> {
        let v: Option<String> = self
            .conn
            .query_row("SELECT value FROM settings WHERE key=?1", params![key], |r| {
                r.get(0)
            })
            .optional()?;
        Ok(v)
    }

    pub fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO settings(key, value) VALUES(?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value=excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    /// Wipe all record tables. Settings survive.
    pub fn reset_all(&self) -> Result<()> {
        self.conn.execute_batch(
            "DELETE FROM operations;
             DELETE FROM budgets;
             DELETE FROM goals;
             DELETE FROM accounts;
             DELETE FROM categories;",
        )?;
        Ok(())
    }
}

fn parse_id(s: &str) -> Result<Uuid> {
    Uuid::parse_str(s).with_context(|| format!("Invalid record id '{}'", s))
}

fn parse_stored_decimal(s: &str, column: &str) -> Result<Decimal> {
    s.parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}' in {}", s, column))
}

fn parse_stored_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}' in store", s))
}
