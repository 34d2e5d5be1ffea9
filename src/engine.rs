// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;

use anyhow::Result;
use chrono::{Datelike, Duration, Months, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, error};
use uuid::Uuid;

use crate::error::LedgerError;
use crate::models::{Account, Budget, Category, Goal, Operation, OperationKind};
use crate::store::Store;

const WARNING_THRESHOLD: u32 = 80;
const TOP_CATEGORY_COUNT: usize = 5;
const RECENT_OPERATION_COUNT: usize = 5;
const TREND_MONTHS: i32 = 12;

/// Derived state of one budget, recomputed from the operation history on
/// every read. `is_warning` and `is_exceeded` are mutually exclusive;
/// together with "normal" they partition all budgets.
#[derive(Debug, Clone, Serialize)]
pub struct BudgetView {
    pub spent: Decimal,
    pub percentage: Decimal,
    pub is_exceeded: bool,
    pub is_warning: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct GoalView {
    pub percentage: Decimal,
    pub days_remaining: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthlyStats {
    pub expenses: Decimal,
    pub income: Decimal,
    /// Category display name -> summed expense inside the window.
    /// Operations whose category no longer resolves land under "Unknown".
    pub by_category: Vec<(String, Decimal)>,
    /// `by_category` sorted by amount descending, first five entries.
    pub top_categories: Vec<(String, Decimal)>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub total_balance: Decimal,
    pub week_expenses: Decimal,
    pub week_income: Decimal,
    pub recent: Vec<Operation>,
}

/// The ledger engine: a working set of all records projected from the
/// store, plus the mutation rules and derived views over it.
///
/// Every mutation persists first and then reloads the entire working set.
/// Persistence failures are logged and swallowed; the working set stays at
/// its pre-call snapshot and the caller sees no error. Validation failures
/// (`LedgerError`) are the one thing surfaced.
pub struct Ledger {
    store: Store,
    accounts: Vec<Account>,
    operations: Vec<Operation>,
    categories: Vec<Category>,
    budgets: Vec<Budget>,
    goals: Vec<Goal>,
}

impl Ledger {
    /// Open the ledger over a store: seeds built-in categories on a first
    /// run, then projects the full working set.
    pub fn open(store: Store) -> Result<Self> {
        let seeded = store.seed_default_categories()?;
        if seeded > 0 {
            debug!(count = seeded, "seeded default categories");
        }
        let mut ledger = Ledger {
            store,
            accounts: Vec::new(),
            operations: Vec::new(),
            categories: Vec::new(),
            budgets: Vec::new(),
            goals: Vec::new(),
        };
        ledger.reload()?;
        Ok(ledger)
    }

    /// Rebuild the working set from the store. All lists are loaded before
    /// any field is replaced, so a failing load leaves the snapshot intact.
    pub fn reload(&mut self) -> Result<()> {
        let accounts = self.store.list_accounts()?;
        let operations = self.store.list_operations()?;
        let categories = self.store.list_categories()?;
        let budgets = self.store.list_budgets()?;
        let goals = self.store.list_goals()?;
        self.accounts = accounts;
        self.operations = operations;
        self.categories = categories;
        self.budgets = budgets;
        self.goals = goals;
        Ok(())
    }

    fn reload_or_log(&mut self) {
        if let Err(err) = self.reload() {
            error!(error = %err, "failed to reload working set");
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn budgets(&self) -> &[Budget] {
        &self.budgets
    }

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    // ----- mutations -----

    pub fn add_account(&mut self, account: Account) {
        if let Err(err) = self.store.insert_account(&account) {
            error!(error = %err, account = %account.name, "failed to persist account");
            return;
        }
        self.reload_or_log();
    }

    pub fn update_account(&mut self, account: &Account) {
        if let Err(err) = self.store.update_account(account) {
            error!(error = %err, account = %account.name, "failed to update account");
            return;
        }
        self.reload_or_log();
    }

    pub fn delete_account(&mut self, id: Uuid) {
        if let Err(err) = self.store.delete_account(id) {
            error!(error = %err, %id, "failed to delete account");
            return;
        }
        self.reload_or_log();
    }

    pub fn add_category(&mut self, category: Category) {
        if let Err(err) = self.store.insert_category(&category) {
            error!(error = %err, category = %category.name, "failed to persist category");
            return;
        }
        self.reload_or_log();
    }

    /// Deleting a category does not cascade: operations, budgets, and goals
    /// that reference it stay put and resolve their name to "Unknown".
    pub fn delete_category(&mut self, id: Uuid) {
        if let Err(err) = self.store.delete_category(id) {
            error!(error = %err, %id, "failed to delete category");
            return;
        }
        self.reload_or_log();
    }

    /// Record an operation and apply its balance effect to the target
    /// account: expense and transfer debit, income credits. Transfers carry
    /// a single leg; the data model has no destination account to credit.
    ///
    /// The operation is persisted even when its account id does not resolve;
    /// the balance step is silently skipped in that case. The caller
    /// validates `amount > 0` at the input boundary.
    pub fn record_operation(&mut self, op: Operation) {
        let updated_account = self.accounts.iter().find(|a| a.id == op.account_id).map(|account| {
            let balance = match op.kind {
                OperationKind::Expense | OperationKind::Transfer => account.balance - op.amount,
                OperationKind::Income => account.balance + op.amount,
            };
            Account {
                balance,
                ..account.clone()
            }
        });

        if let Err(err) = self.store.insert_operation(&op) {
            error!(error = %err, operation = %op.id, "failed to persist operation");
            return;
        }
        if let Some(account) = updated_account {
            if let Err(err) = self.store.update_account(&account) {
                error!(error = %err, account = %account.name, "failed to persist balance");
                return;
            }
        }
        debug!(operation = %op.id, kind = op.kind.as_str(), amount = %op.amount, "recorded operation");
        self.reload_or_log();
    }

    /// Remove an operation. The balance effect it had is not reversed.
    pub fn delete_operation(&mut self, id: Uuid) {
        if let Err(err) = self.store.delete_operation(id) {
            error!(error = %err, %id, "failed to delete operation");
            return;
        }
        self.reload_or_log();
    }

    pub fn add_budget(&mut self, budget: Budget) {
        if let Err(err) = self.store.insert_budget(&budget) {
            error!(error = %err, budget = %budget.id, "failed to persist budget");
            return;
        }
        self.reload_or_log();
    }

    pub fn delete_budget(&mut self, id: Uuid) {
        if let Err(err) = self.store.delete_budget(id) {
            error!(error = %err, %id, "failed to delete budget");
            return;
        }
        self.reload_or_log();
    }

    /// Write the recomputed spent amounts back to the store as the cached
    /// `spent` column. The cache is never read by views; it only keeps the
    /// stored rows plausible for external readers.
    pub fn refresh_budget_spent(&mut self) {
        for budget in &self.budgets {
            let spent = spent_for_category(&self.operations, budget.category_id);
            if let Err(err) = self.store.update_budget_spent(budget.id, spent) {
                error!(error = %err, budget = %budget.id, "failed to refresh budget spent");
                return;
            }
        }
        self.reload_or_log();
    }

    pub fn add_goal(&mut self, goal: Goal) {
        if let Err(err) = self.store.insert_goal(&goal) {
            error!(error = %err, goal = %goal.name, "failed to persist goal");
            return;
        }
        self.reload_or_log();
    }

    pub fn delete_goal(&mut self, id: Uuid) {
        if let Err(err) = self.store.delete_goal(id) {
            error!(error = %err, %id, "failed to delete goal");
            return;
        }
        self.reload_or_log();
    }

    /// Fund a goal. The new amount clamps at the target; over-funding caps
    /// silently and the excess is not tracked. The linked account balance is
    /// untouched: goal funding is accounting-only.
    ///
    /// Returns the goal as it stands after the call, which is the pre-call
    /// record if persistence failed.
    pub fn add_funds(&mut self, goal_id: Uuid, amount: Decimal) -> Result<Goal, LedgerError> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::AmountNotPositive);
        }
        let Some(goal) = self.goals.iter().find(|g| g.id == goal_id) else {
            return Err(LedgerError::UnknownGoal(goal_id.to_string()));
        };
        let mut updated = goal.clone();
        updated.current_amount = (updated.current_amount + amount).min(updated.target_amount);

        match self.store.update_goal(&updated) {
            Ok(()) => self.reload_or_log(),
            Err(err) => error!(error = %err, goal = %updated.name, "failed to persist goal funding"),
        }
        Ok(self
            .goals
            .iter()
            .find(|g| g.id == goal_id)
            .cloned()
            .unwrap_or(updated))
    }

    /// Wipe every record and start over as a first run: built-in categories
    /// are seeded again. Settings survive.
    pub fn reset(&mut self) -> Result<()> {
        self.store.reset_all()?;
        let _ = self.store.seed_default_categories()?;
        self.reload()
    }

    // ----- lookups -----

    pub fn find_account_by_name(&self, name: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.name == name)
    }

    pub fn find_category_by_name(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn find_goal_by_name(&self, name: &str) -> Option<&Goal> {
        self.goals.iter().find(|g| g.name == name)
    }

    /// Display name for a category id; dangling references degrade to
    /// "Unknown" instead of erroring.
    pub fn category_name(&self, id: Uuid) -> String {
        self.categories
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| "Unknown".to_string())
    }

    pub fn account_name(&self, id: Uuid) -> String {
        self.accounts
            .iter()
            .find(|a| a.id == id)
            .map(|a| a.name.clone())
            .unwrap_or_else(|| "Unknown".to_string())
    }

    // ----- derived views (pure over the working set) -----

    /// Spent, percentage, and alert state for one budget. Spent sums the
    /// category's expense operations over the entire history; the budget's
    /// period and start date do not bound the sum.
    pub fn budget_view(&self, budget: &Budget) -> BudgetView {
        let spent = spent_for_category(&self.operations, budget.category_id);
        let percentage = percentage_of(spent, budget.limit);
        let is_exceeded = spent > budget.limit;
        let is_warning = percentage >= Decimal::from(WARNING_THRESHOLD) && !is_exceeded;
        BudgetView {
            spent,
            percentage,
            is_exceeded,
            is_warning,
        }
    }

    pub fn warning_budgets(&self) -> Vec<&Budget> {
        self.budgets
            .iter()
            .filter(|b| self.budget_view(b).is_warning)
            .collect()
    }

    pub fn exceeded_budgets(&self) -> Vec<&Budget> {
        self.budgets
            .iter()
            .filter(|b| self.budget_view(b).is_exceeded)
            .collect()
    }

    pub fn normal_budgets(&self) -> Vec<&Budget> {
        self.budgets
            .iter()
            .filter(|b| {
                let view = self.budget_view(b);
                !view.is_warning && !view.is_exceeded
            })
            .collect()
    }

    pub fn goal_view(&self, goal: &Goal, today: NaiveDate) -> GoalView {
        GoalView {
            percentage: percentage_of(goal.current_amount, goal.target_amount),
            days_remaining: (goal.deadline - today).num_days().max(0),
        }
    }

    /// Aggregates over the trailing month window `[today - 1 month, today]`.
    pub fn monthly_stats(&self, today: NaiveDate) -> MonthlyStats {
        let month_ago = today.checked_sub_months(Months::new(1)).unwrap_or(today);
        let in_window = |op: &&Operation| op.date >= month_ago && op.date <= today;

        let expenses = self
            .operations
            .iter()
            .filter(|op| op.kind == OperationKind::Expense)
            .filter(in_window)
            .map(|op| op.amount)
            .sum();
        let income = self
            .operations
            .iter()
            .filter(|op| op.kind == OperationKind::Income)
            .filter(in_window)
            .map(|op| op.amount)
            .sum();

        let mut per_category: BTreeMap<String, Decimal> = BTreeMap::new();
        for op in self
            .operations
            .iter()
            .filter(|op| op.kind == OperationKind::Expense)
            .filter(in_window)
        {
            *per_category
                .entry(self.category_name(op.category_id))
                .or_insert(Decimal::ZERO) += op.amount;
        }
        let by_category: Vec<(String, Decimal)> = per_category.into_iter().collect();

        let mut top_categories = by_category.clone();
        top_categories.sort_by(|a, b| b.1.cmp(&a.1));
        top_categories.truncate(TOP_CATEGORY_COUNT);

        MonthlyStats {
            expenses,
            income,
            by_category,
            top_categories,
        }
    }

    /// Twelve expense sums, oldest to newest month. An operation lands in
    /// the bucket given by the whole-month difference between its date and
    /// today (offset 0 = the current month); offsets outside 0..12 drop out.
    pub fn expense_trend(&self, today: NaiveDate) -> Vec<Decimal> {
        let mut totals = vec![Decimal::ZERO; TREND_MONTHS as usize];
        for op in self
            .operations
            .iter()
            .filter(|op| op.kind == OperationKind::Expense)
        {
            let offset = whole_months_between(op.date, today);
            if (0..TREND_MONTHS).contains(&offset) {
                totals[(TREND_MONTHS - offset - 1) as usize] += op.amount;
            }
        }
        totals
    }

    /// Total balance, trailing-week flows, and the five most recent
    /// operations.
    pub fn dashboard(&self, today: NaiveDate) -> Dashboard {
        let week_ago = today - Duration::days(7);
        let in_week = |op: &&Operation| op.date >= week_ago && op.date <= today;
        Dashboard {
            total_balance: self.accounts.iter().map(|a| a.balance).sum(),
            week_expenses: self
                .operations
                .iter()
                .filter(|op| op.kind == OperationKind::Expense)
                .filter(in_week)
                .map(|op| op.amount)
                .sum(),
            week_income: self
                .operations
                .iter()
                .filter(|op| op.kind == OperationKind::Income)
                .filter(in_week)
                .map(|op| op.amount)
                .sum(),
            recent: self
                .operations
                .iter()
                .take(RECENT_OPERATION_COUNT)
                .cloned()
                .collect(),
        }
    }

    /// Conjunction of kind, category, and case-insensitive description
    /// filters over the (date-descending) operation list.
    pub fn filter_operations(
        &self,
        kind: Option<OperationKind>,
        category_id: Option<Uuid>,
        search: Option<&str>,
    ) -> Vec<&Operation> {
        let needle = search.map(|s| s.to_lowercase());
        self.operations
            .iter()
            .filter(|op| kind.is_none_or(|k| op.kind == k))
            .filter(|op| category_id.is_none_or(|c| op.category_id == c))
            .filter(|op| {
                needle
                    .as_deref()
                    .is_none_or(|n| op.description.to_lowercase().contains(n))
            })
            .collect()
    }
}

fn spent_for_category(operations: &[Operation], category_id: Uuid) -> Decimal {
    operations
        .iter()
        .filter(|op| op.kind == OperationKind::Expense && op.category_id == category_id)
        .map(|op| op.amount)
        .sum()
}

/// `min(part / whole * 100, 100)` for `whole > 0`, else 0.
fn percentage_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole > Decimal::ZERO {
        ((part / whole) * Decimal::ONE_HUNDRED).min(Decimal::ONE_HUNDRED)
    } else {
        Decimal::ZERO
    }
}

/// Whole calendar months elapsed from `from` to `to`: the raw month
/// difference, minus one while the day-of-month has not been reached yet.
/// Negative when `from` is in the future.
fn whole_months_between(from: NaiveDate, to: NaiveDate) -> i32 {
    let mut months =
        (to.year() - from.year()) * 12 + (to.month() as i32 - from.month() as i32);
    if to.day() < from.day() {
        months -= 1;
    }
    months
}
