// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Input-boundary validation failures. These are surfaced to the caller
/// with a readable message and never leave partial state behind.
/// Persistence failures are a separate concern: the engine logs them and
/// leaves the working set untouched.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Amount must be positive")]
    AmountNotPositive,
    #[error("{0} name must not be empty")]
    EmptyName(&'static str),
    #[error("Account '{0}' not found")]
    UnknownAccount(String),
    #[error("Category '{0}' not found")]
    UnknownCategory(String),
    #[error("Goal '{0}' not found")]
    UnknownGoal(String),
}
