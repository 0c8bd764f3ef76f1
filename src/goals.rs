// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;
use tracing::info;

use crate::errors::{LedgerError, Result};
use crate::models::{Goal, MAX_AMOUNT, check_amount};
use crate::store::decimal_column;

fn to_goal(id: i64, name: String, target: &str, current: &str) -> Result<Goal> {
    Ok(Goal {
        id,
        name,
        target_amount: decimal_column(target, "goal target")?,
        current_amount: decimal_column(current, "goal progress")?,
    })
}

pub fn add_goal(conn: &Connection, user: &str, name: &str, target: Decimal) -> Result<Goal> {
    let name = name.trim();
    if name.is_empty() {
        return Err(LedgerError::InvalidGoal("name must not be empty".into()));
    }
    if target <= Decimal::ZERO || target > MAX_AMOUNT {
        return Err(LedgerError::InvalidGoal(format!(
            "target {} must be positive and at most {}",
            target, MAX_AMOUNT
        )));
    }
    conn.execute(
        "INSERT INTO goals(user_id, name, target_amount, current_amount) VALUES (?1, ?2, ?3, '0')",
        params![user, name, target.to_string()],
    )?;
    let id = conn.last_insert_rowid();
    info!(user, id, name, "goal added");
    Ok(Goal {
        id,
        name: name.to_string(),
        target_amount: target,
        current_amount: Decimal::ZERO,
    })
}

pub fn list_goals(conn: &Connection, user: &str) -> Result<Vec<Goal>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, target_amount, current_amount FROM goals WHERE user_id=?1 ORDER BY id",
    )?;
    let rows = stmt.query_map(params![user], |r| {
        Ok((
            r.get::<_, i64>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, String>(3)?,
        ))
    })?;
    let mut goals = Vec::new();
    for row in rows {
        let (id, name, target, current) = row?;
        goals.push(to_goal(id, name, &target, &current)?);
    }
    Ok(goals)
}

pub fn get_goal(conn: &Connection, user: &str, id: i64) -> Result<Goal> {
    let row = conn
        .query_row(
            "SELECT name, target_amount, current_amount FROM goals WHERE user_id=?1 AND id=?2",
            params![user, id],
            |r| {
                Ok((
                    r.get::<_, String>(0)?,
                    r.get::<_, String>(1)?,
                    r.get::<_, String>(2)?,
                ))
            },
        )
        .optional()?;
    let (name, target, current) = row.ok_or(LedgerError::GoalNotFound(id))?;
    to_goal(id, name, &target, &current)
}

/// Adds `amount` to the goal's progress. Withdrawals (negative amounts) are
/// allowed but progress never drops below zero.
pub fn contribute(conn: &Connection, user: &str, id: i64, amount: Decimal) -> Result<Goal> {
    check_amount(amount.abs())?;
    let mut goal = get_goal(conn, user, id)?;
    let total = goal
        .current_amount
        .checked_add(amount)
        .filter(|t| *t <= MAX_AMOUNT)
        .ok_or(LedgerError::InvalidAmount(amount))?;
    goal.current_amount = total.max(Decimal::ZERO);
    conn.execute(
        "UPDATE goals SET current_amount=?1 WHERE user_id=?2 AND id=?3",
        params![goal.current_amount.to_string(), user, id],
    )?;
    info!(user, id, current = %goal.current_amount, "goal progress updated");
    Ok(goal)
}

pub fn remove_goal(conn: &Connection, user: &str, id: i64) -> Result<()> {
    let n = conn.execute(
        "DELETE FROM goals WHERE user_id=?1 AND id=?2",
        params![user, id],
    )?;
    if n == 0 {
        return Err(LedgerError::GoalNotFound(id));
    }
    info!(user, id, "goal removed");
    Ok(())
}
