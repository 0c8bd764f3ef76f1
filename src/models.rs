// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::LedgerError;

/// Largest amount or salary the ledger accepts (one trillion). Keeps every
/// product and sum well inside `Decimal`'s range.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0);

/// Decimal places a currency amount may carry.
pub const AMOUNT_SCALE: u32 = 2;

/// Accepts amounts in `[0, MAX_AMOUNT]` with at most two decimal places.
/// Trailing zeros do not count, so `10.500` passes.
pub fn check_amount(amount: Decimal) -> Result<Decimal, LedgerError> {
    let in_range = amount >= Decimal::ZERO && amount <= MAX_AMOUNT;
    if !in_range || amount.normalize().scale() > AMOUNT_SCALE {
        return Err(LedgerError::InvalidAmount(amount));
    }
    Ok(amount)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Bucket {
    Needs,
    Wants,
    Savings,
    Investments,
}

impl Bucket {
    pub const ALL: [Bucket; 4] = [
        Bucket::Needs,
        Bucket::Wants,
        Bucket::Savings,
        Bucket::Investments,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Bucket::Needs => "Needs",
            Bucket::Wants => "Wants",
            Bucket::Savings => "Savings",
            Bucket::Investments => "Investments",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Bucket {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "needs" => Ok(Bucket::Needs),
            "wants" => Ok(Bucket::Wants),
            "savings" => Ok(Bucket::Savings),
            "investments" => Ok(Bucket::Investments),
            _ => Err(LedgerError::UnknownBucket(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TxnType {
    Credit,
    Debit,
}

impl TxnType {
    pub fn as_str(self) -> &'static str {
        match self {
            TxnType::Credit => "Credit",
            TxnType::Debit => "Debit",
        }
    }
}

impl fmt::Display for TxnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TxnType {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "credit" => Ok(TxnType::Credit),
            "debit" => Ok(TxnType::Debit),
            _ => Err(LedgerError::UnknownTxnType(s.to_string())),
        }
    }
}

/// Calendar month used as the period key for trends and summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    pub fn of(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month())
    }

    pub fn first_day(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.len() != 7 {
            return Err(LedgerError::InvalidMonth(s.to_string()));
        }
        NaiveDate::parse_from_str(&format!("{}-01", trimmed), "%Y-%m-%d")
            .map(Self::of)
            .map_err(|_| LedgerError::InvalidMonth(s.to_string()))
    }
}

impl From<YearMonth> for String {
    fn from(m: YearMonth) -> Self {
        m.to_string()
    }
}

impl TryFrom<String> for YearMonth {
    type Error = LedgerError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// A window of dates an aggregate is computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Month(YearMonth),
    Day(NaiveDate),
}

impl Period {
    pub fn contains(&self, date: NaiveDate) -> bool {
        match self {
            Period::Month(m) => YearMonth::of(date) == *m,
            Period::Day(d) => *d == date,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::Month(m) => write!(f, "{}", m),
            Period::Day(d) => write!(f, "{}", d),
        }
    }
}

/// Allocation figures frozen onto a transaction when it is recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicySnapshot {
    pub monthly_salary: Decimal,
    pub allocation_percentage: Decimal,
}

impl PolicySnapshot {
    /// Zero when the stored figures are too large to multiply.
    pub fn allocated(&self) -> Decimal {
        self.monthly_salary
            .checked_mul(self.allocation_percentage)
            .map_or(Decimal::ZERO, |v| v / Decimal::ONE_HUNDRED)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub date: NaiveDate,
    /// Creation instant in epoch milliseconds.
    pub timestamp: i64,
    pub r#type: TxnType,
    pub amount: Decimal,
    pub account: String,
    pub bucket: Bucket,
    pub category: String,
    pub note: Option<String>,
    pub snapshot: PolicySnapshot,
}

/// Input for recording a transaction; the store fills in id, bucket,
/// timestamp and the policy snapshot.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub date: NaiveDate,
    pub r#type: TxnType,
    pub amount: Decimal,
    pub account: String,
    pub category: String,
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub name: String,
    pub bucket: Bucket,
    pub balance: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketSummary {
    pub bucket: Bucket,
    pub allocated: Decimal,
    pub spent: Decimal,
    pub balance: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryAmount {
    pub category: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    /// Largest categories, descending, at most the requested count.
    pub entries: Vec<CategoryAmount>,
    /// Sum of the categories that did not make the cut.
    pub other: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub month: YearMonth,
    pub allocated: Decimal,
    pub spent: Decimal,
    pub net_amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetWorthPoint {
    pub month: YearMonth,
    pub cumulative_balance: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub credits: Decimal,
    pub debits: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: i64,
    pub name: String,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
}

impl Goal {
    /// Percentage of the target reached, capped at 100.
    pub fn progress(&self) -> Decimal {
        if self.target_amount <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        if self.current_amount >= self.target_amount {
            return Decimal::ONE_HUNDRED;
        }
        let pct = self.current_amount / self.target_amount * Decimal::ONE_HUNDRED;
        pct.max(Decimal::ZERO)
    }
}
