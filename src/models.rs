// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of a recorded operation. Categories carry the same tag so that
/// expense categories pair with expenses, income with income, etc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Expense,
    Income,
    Transfer,
}

impl OperationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Expense => "expense",
            OperationKind::Income => "income",
            OperationKind::Transfer => "transfer",
        }
    }
}

impl FromStr for OperationKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "expense" => Ok(OperationKind::Expense),
            "income" => Ok(OperationKind::Income),
            "transfer" => Ok(OperationKind::Transfer),
            other => Err(anyhow::anyhow!(
                "Invalid operation type '{}', expected expense|income|transfer",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    Cash,
    Card,
    Deposit,
    Wallet,
    Crypto,
}

impl AccountKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountKind::Cash => "cash",
            AccountKind::Card => "card",
            AccountKind::Deposit => "deposit",
            AccountKind::Wallet => "wallet",
            AccountKind::Crypto => "crypto",
        }
    }
}

impl FromStr for AccountKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cash" => Ok(AccountKind::Cash),
            "card" => Ok(AccountKind::Card),
            "deposit" => Ok(AccountKind::Deposit),
            "wallet" => Ok(AccountKind::Wallet),
            "crypto" => Ok(AccountKind::Crypto),
            other => Err(anyhow::anyhow!(
                "Invalid account type '{}', expected cash|card|deposit|wallet|crypto",
                other
            )),
        }
    }
}

/// Budget period. Stored with the budget but not used to bound the spent
/// calculation, which sums the category's entire expense history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetPeriod {
    Week,
    Month,
    Quarter,
    Year,
}

impl BudgetPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetPeriod::Week => "week",
            BudgetPeriod::Month => "month",
            BudgetPeriod::Quarter => "quarter",
            BudgetPeriod::Year => "year",
        }
    }
}

impl FromStr for BudgetPeriod {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "week" => Ok(BudgetPeriod::Week),
            "month" => Ok(BudgetPeriod::Month),
            "quarter" => Ok(BudgetPeriod::Quarter),
            "year" => Ok(BudgetPeriod::Year),
            other => Err(anyhow::anyhow!(
                "Invalid period '{}', expected week|month|quarter|year",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    pub balance: Decimal,
    pub currency: String,
    pub kind: AccountKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub icon: String,
    pub color: String,
    pub kind: OperationKind,
    pub is_custom: bool,
}

/// A single recorded income/expense/transfer event. Amounts are stored
/// positive; the kind decides the sign of the balance effect.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Operation {
    pub id: Uuid,
    pub kind: OperationKind,
    pub amount: Decimal,
    pub currency: String,
    pub category_id: Uuid,
    pub date: NaiveDate,
    pub account_id: Uuid,
    pub description: String,
}

/// A spending cap tied to one category. `spent` is a cached value written
/// back on refresh; views always recompute from operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    pub id: Uuid,
    pub category_id: Uuid,
    pub limit: Decimal,
    pub spent: Decimal,
    pub period: BudgetPeriod,
    pub start_date: NaiveDate,
    pub currency: String,
}

/// A savings target funded by manual top-ups; funding never touches the
/// linked account's real balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub id: Uuid,
    pub name: String,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    pub deadline: NaiveDate,
    pub currency: String,
    pub account_id: Uuid,
}
