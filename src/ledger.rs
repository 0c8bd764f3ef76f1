// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Pure aggregations over an already loaded transaction list.
//!
//! Nothing here touches the store. Negative amounts, and amounts above
//! [`MAX_AMOUNT`], are treated as zero so a bad record cannot skew or overflow
//! a sum; the write path rejects them before they get this far.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::accounts::ACCOUNTS;
use crate::models::{
    Account, Bucket, BucketSummary, CategoryAmount, CategoryBreakdown, DailyTotal, MAX_AMOUNT,
    NetWorthPoint, Period, Transaction, TrendPoint, TxnType, YearMonth,
};
use crate::policy::AllocationPolicy;

pub const DEFAULT_TOP_N: usize = 5;

fn effective_amount(t: &Transaction) -> Decimal {
    if t.amount > MAX_AMOUNT {
        return Decimal::ZERO;
    }
    t.amount.max(Decimal::ZERO)
}

fn signed_amount(t: &Transaction) -> Decimal {
    match t.r#type {
        TxnType::Credit => effective_amount(t),
        TxnType::Debit => -effective_amount(t),
    }
}

/// Contribution of one transaction to a bucket's "spent" figure. Savings
/// counts net deposits; every other bucket counts debits only.
fn spent_contribution(t: &Transaction) -> Decimal {
    match (t.bucket, t.r#type) {
        (Bucket::Savings, _) => signed_amount(t),
        (_, TxnType::Debit) => effective_amount(t),
        (_, TxnType::Credit) => Decimal::ZERO,
    }
}

fn counts_toward_breakdown(t: &Transaction) -> bool {
    match t.bucket {
        Bucket::Savings => t.r#type == TxnType::Credit,
        _ => t.r#type == TxnType::Debit,
    }
}

/// Replays `transactions` in the order they happened: date first, creation
/// timestamp second, id last.
fn chronological(transactions: &[Transaction]) -> Vec<&Transaction> {
    let mut ordered: Vec<&Transaction> = transactions.iter().collect();
    ordered.sort_by_key(|t| (t.date, t.timestamp, t.id));
    ordered
}

pub fn compute_account_balance(transactions: &[Transaction], account_name: &str) -> Decimal {
    transactions
        .iter()
        .filter(|t| t.account == account_name)
        .map(signed_amount)
        .sum()
}

/// Balance of every registered account, in registry order.
pub fn compute_account_balances(transactions: &[Transaction]) -> Vec<Account> {
    ACCOUNTS
        .iter()
        .map(|(name, bucket)| Account {
            name: (*name).to_string(),
            bucket: *bucket,
            balance: compute_account_balance(transactions, name),
        })
        .collect()
}

pub fn compute_bucket_allocation(policy: &AllocationPolicy, bucket: Bucket) -> Decimal {
    policy.snapshot_for(bucket).allocated()
}

pub fn compute_bucket_spent(transactions: &[Transaction], bucket: Bucket, period: Period) -> Decimal {
    transactions
        .iter()
        .filter(|t| t.bucket == bucket && period.contains(t.date))
        .map(spent_contribution)
        .sum()
}

pub fn compute_bucket_summary(
    transactions: &[Transaction],
    policy: &AllocationPolicy,
    bucket: Bucket,
    period: Period,
) -> BucketSummary {
    let allocated = compute_bucket_allocation(policy, bucket);
    let spent = compute_bucket_spent(transactions, bucket, period);
    BucketSummary {
        bucket,
        allocated,
        spent,
        balance: allocated - spent,
    }
}

pub fn compute_bucket_summaries(
    transactions: &[Transaction],
    policy: &AllocationPolicy,
    period: Period,
) -> Vec<BucketSummary> {
    Bucket::ALL
        .iter()
        .map(|b| compute_bucket_summary(transactions, policy, *b, period))
        .collect()
}

pub fn compute_category_breakdown(
    transactions: &[Transaction],
    bucket: Bucket,
    period: Period,
) -> CategoryBreakdown {
    compute_category_breakdown_top(transactions, bucket, period, DEFAULT_TOP_N)
}

/// Groups qualifying transactions by their literal category string. Ties on
/// amount are ordered by category name so the cut is deterministic.
pub fn compute_category_breakdown_top(
    transactions: &[Transaction],
    bucket: Bucket,
    period: Period,
    limit: usize,
) -> CategoryBreakdown {
    let mut agg: HashMap<&str, Decimal> = HashMap::new();
    for t in transactions
        .iter()
        .filter(|t| t.bucket == bucket && period.contains(t.date) && counts_toward_breakdown(t))
    {
        *agg.entry(t.category.as_str()).or_insert(Decimal::ZERO) += effective_amount(t);
    }

    let mut items: Vec<CategoryAmount> = agg
        .into_iter()
        .map(|(category, amount)| CategoryAmount {
            category: category.to_string(),
            amount,
        })
        .collect();
    items.sort_by(|a, b| b.amount.cmp(&a.amount).then_with(|| a.category.cmp(&b.category)));

    let other: Decimal = items.iter().skip(limit).map(|c| c.amount).sum();
    items.truncate(limit);
    CategoryBreakdown {
        entries: items,
        other,
    }
}

/// Month by month allocated vs spent for one bucket, using the policy frozen
/// on the transactions themselves. When snapshots differ within a month the
/// latest transaction wins.
pub fn compute_monthly_trend(transactions: &[Transaction], bucket: Bucket) -> Vec<TrendPoint> {
    let mut months: BTreeMap<YearMonth, (Decimal, Decimal)> = BTreeMap::new();
    for t in chronological(transactions)
        .into_iter()
        .filter(|t| t.bucket == bucket)
    {
        let entry = months
            .entry(YearMonth::of(t.date))
            .or_insert((Decimal::ZERO, Decimal::ZERO));
        entry.0 = t.snapshot.allocated();
        entry.1 += spent_contribution(t);
    }

    months
        .into_iter()
        .map(|(month, (allocated, spent))| TrendPoint {
            month,
            allocated,
            spent,
            net_amount: allocated - spent,
        })
        .collect()
}

/// Running balance across every account, sampled at the last transaction of
/// each month.
pub fn compute_net_worth_series(transactions: &[Transaction]) -> Vec<NetWorthPoint> {
    let mut running = Decimal::ZERO;
    let mut series: Vec<NetWorthPoint> = Vec::new();
    for t in chronological(transactions) {
        running += signed_amount(t);
        let month = YearMonth::of(t.date);
        if let Some(last) = series.last_mut().filter(|p| p.month == month) {
            last.cumulative_balance = running;
        } else {
            series.push(NetWorthPoint {
                month,
                cumulative_balance: running,
            });
        }
    }
    series
}

/// Per-day credit and debit totals for the calendar view. Days without
/// activity are omitted.
pub fn compute_daily_totals(transactions: &[Transaction], month: YearMonth) -> Vec<DailyTotal> {
    let mut days: BTreeMap<NaiveDate, (Decimal, Decimal)> = BTreeMap::new();
    for t in transactions.iter().filter(|t| YearMonth::of(t.date) == month) {
        let entry = days.entry(t.date).or_insert((Decimal::ZERO, Decimal::ZERO));
        match t.r#type {
            TxnType::Credit => entry.0 += effective_amount(t),
            TxnType::Debit => entry.1 += effective_amount(t),
        }
    }
    days.into_iter()
        .map(|(date, (credits, debits))| DailyTotal {
            date,
            credits,
            debits,
        })
        .collect()
}
