// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::errors::{LedgerError, Result};
use crate::models::Bucket;

/// Closed set of accounts a transaction may be recorded against.
pub const ACCOUNTS: &[(&str, Bucket)] = &[
    ("Main Checking", Bucket::Needs),
    ("Credit Card", Bucket::Wants),
    ("Emergency Fund", Bucket::Savings),
    ("High-Yield Savings", Bucket::Savings),
    ("Brokerage", Bucket::Investments),
    ("Retirement 401k", Bucket::Investments),
];

pub fn bucket_for(account: &str) -> Result<Bucket> {
    let name = account.trim();
    ACCOUNTS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, b)| *b)
        .ok_or_else(|| LedgerError::UnknownAccount(name.to_string()))
}

pub fn is_registered(account: &str) -> bool {
    bucket_for(account).is_ok()
}

pub fn accounts_in(bucket: Bucket) -> impl Iterator<Item = &'static str> {
    ACCOUNTS
        .iter()
        .filter(move |(_, b)| *b == bucket)
        .map(|(n, _)| *n)
}
