// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use thiserror::Error;

/// Failures raised at the write boundary of the ledger and by the store.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Account '{0}' is not mapped to any bucket")]
    UnknownAccount(String),

    #[error("Invalid amount {0}: amounts must be between 0 and 1000000000000 with at most two decimal places")]
    InvalidAmount(Decimal),

    #[error("Invalid monthly salary {0}: salary must be between 0 and 1000000000000")]
    InvalidSalary(Decimal),

    #[error("Invalid {field} {value}: percentages must be between 0 and 100")]
    InvalidPercentage { field: &'static str, value: Decimal },

    #[error("Needs, wants and investments add up to {0}%, leaving a negative savings share")]
    OverAllocated(Decimal),

    #[error("Unknown bucket '{0}' (expected needs, wants, savings or investments)")]
    UnknownBucket(String),

    #[error("Unknown transaction type '{0}' (expected credit or debit)")]
    UnknownTxnType(String),

    #[error("Invalid month '{0}', expected YYYY-MM")]
    InvalidMonth(String),

    #[error("Invalid category name '{0}'")]
    InvalidCategory(String),

    #[error("User id must not be blank")]
    BlankUser,

    #[error("Corrupt record: {0}")]
    Corrupt(String),

    #[error("Goal {0} not found")]
    GoalNotFound(i64),

    #[error("Invalid goal: {0}")]
    InvalidGoal(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LedgerError>;
