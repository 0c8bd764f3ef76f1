// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Allocation policy (the user's salary split) and the rules for choosing
//! which policy applies to a period.
//!
//! Live views read the latest saved settings. Anything historical reads the
//! snapshot frozen onto each transaction when it was recorded, so later edits
//! to the settings never reinterpret past months.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{LedgerError, Result};
use crate::models::{
    Bucket, BucketSummary, MAX_AMOUNT, Period, PolicySnapshot, Transaction, YearMonth,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationPolicy {
    pub monthly_salary: Decimal,
    pub needs_percentage: Decimal,
    pub wants_percentage: Decimal,
    pub investments_percentage: Decimal,
}

impl Default for AllocationPolicy {
    fn default() -> Self {
        Self {
            monthly_salary: Decimal::ZERO,
            needs_percentage: Decimal::from(50),
            wants_percentage: Decimal::from(30),
            investments_percentage: Decimal::from(10),
        }
    }
}

impl AllocationPolicy {
    /// Complement of the other three shares. Negative only for a policy
    /// that would fail [`AllocationPolicy::validate`].
    pub fn savings_percentage(&self) -> Decimal {
        Decimal::ONE_HUNDRED
            - (self.needs_percentage + self.wants_percentage + self.investments_percentage)
    }

    pub fn percentage_for(&self, bucket: Bucket) -> Decimal {
        match bucket {
            Bucket::Needs => self.needs_percentage,
            Bucket::Wants => self.wants_percentage,
            Bucket::Investments => self.investments_percentage,
            Bucket::Savings => self.savings_percentage(),
        }
    }

    pub fn snapshot_for(&self, bucket: Bucket) -> PolicySnapshot {
        PolicySnapshot {
            monthly_salary: self.monthly_salary,
            allocation_percentage: self.percentage_for(bucket),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.monthly_salary < Decimal::ZERO || self.monthly_salary > MAX_AMOUNT {
            return Err(LedgerError::InvalidSalary(self.monthly_salary));
        }
        let fields = [
            ("needs percentage", self.needs_percentage),
            ("wants percentage", self.wants_percentage),
            ("investments percentage", self.investments_percentage),
        ];
        for (field, value) in fields {
            if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
                return Err(LedgerError::InvalidPercentage { field, value });
            }
        }
        let committed = self.needs_percentage + self.wants_percentage + self.investments_percentage;
        if committed > Decimal::ONE_HUNDRED {
            return Err(LedgerError::OverAllocated(committed));
        }
        Ok(())
    }
}

/// Frozen snapshot of the last transaction (by date, timestamp, then id)
/// that touched `bucket` in `month`.
pub fn frozen_snapshot(
    transactions: &[Transaction],
    bucket: Bucket,
    month: YearMonth,
) -> Option<PolicySnapshot> {
    transactions
        .iter()
        .filter(|t| t.bucket == bucket && YearMonth::of(t.date) == month)
        .max_by_key(|t| (t.date, t.timestamp, t.id))
        .map(|t| t.snapshot)
}

/// Allocation for `bucket` in `month`: the live policy for the current month,
/// otherwise the snapshot recorded on that month's transactions. Past months
/// with no transactions fall back to the live policy.
pub fn resolve_allocation(
    transactions: &[Transaction],
    live: &AllocationPolicy,
    bucket: Bucket,
    month: YearMonth,
    current_month: YearMonth,
) -> Decimal {
    if month == current_month {
        return crate::ledger::compute_bucket_allocation(live, bucket);
    }
    match frozen_snapshot(transactions, bucket, month) {
        Some(snapshot) => snapshot.allocated(),
        None => crate::ledger::compute_bucket_allocation(live, bucket),
    }
}

/// Bucket summaries for `month`, with each allocation resolved as in
/// [`resolve_allocation`].
pub fn summarize_month(
    transactions: &[Transaction],
    live: &AllocationPolicy,
    month: YearMonth,
    current_month: YearMonth,
) -> Vec<BucketSummary> {
    Bucket::ALL
        .iter()
        .map(|&bucket| {
            let allocated = resolve_allocation(transactions, live, bucket, month, current_month);
            let spent =
                crate::ledger::compute_bucket_spent(transactions, bucket, Period::Month(month));
            BucketSummary {
                bucket,
                allocated,
                spent,
                balance: allocated - spent,
            }
        })
        .collect()
}
