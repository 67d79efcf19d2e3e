//! Periodic alert rules.
//!
//! The watcher looks at the calendar and at recorded expenses and posts
//! informational alerts:
//!
//! - `rent_due_soon`: rent is due on the 1st; fires within 5 days of it.
//! - `payroll_incoming`: paydays are the 1st and the 15th; fires within 3
//!   days of the next one.
//! - `spend_up_month_over_month`: this month's spending so far exceeds the
//!   whole previous month.
//!
//! Each rule fires at most once per key (due date, payday or month) for the
//! lifetime of a [`AlertWatcher`].

use std::collections::HashSet;

use chrono::{Datelike, Months, NaiveDate, NaiveDateTime, NaiveTime};

use crate::{Alert, AlertCmd, Expense, MoneyCents, ResultEngine, Store};

pub const RENT_DUE_SOON: &str = "rent_due_soon";
pub const PAYROLL_INCOMING: &str = "payroll_incoming";
pub const SPEND_UP: &str = "spend_up_month_over_month";

const RENT_WARNING_DAYS: i64 = 5;
const PAYROLL_WARNING_DAYS: i64 = 3;
const PAYDAYS: [u32; 2] = [1, 15];

#[derive(Debug, Default)]
pub struct AlertWatcher {
    fired: HashSet<(&'static str, NaiveDate)>,
}

impl AlertWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate every rule against `store` and post the alerts that fire.
    pub fn run_once(&mut self, store: &Store, now: NaiveDateTime) -> ResultEngine<Vec<Alert>> {
        let expenses = store.expenses();
        self.evaluate(now, &expenses)
            .into_iter()
            .map(|cmd| store.create_alert(cmd))
            .collect()
    }

    /// Alerts due at `now`, marking them as fired.
    pub fn evaluate(&mut self, now: NaiveDateTime, expenses: &[Expense]) -> Vec<AlertCmd> {
        let mut due = Vec::new();

        if let Some(rent_date) = next_rent_date(now.date()) {
            let days = days_until(now, rent_date);
            if 0 < days && days <= RENT_WARNING_DAYS && self.fire(RENT_DUE_SOON, rent_date) {
                due.push(AlertCmd::new(
                    RENT_DUE_SOON,
                    format!("Rent is due in {days} day(s) on {rent_date}."),
                    "medium",
                ));
            }
        }

        if let Some(payday) = next_payday(now) {
            let days = days_until(now, payday);
            if 0 < days && days <= PAYROLL_WARNING_DAYS && self.fire(PAYROLL_INCOMING, payday) {
                due.push(AlertCmd::new(
                    PAYROLL_INCOMING,
                    format!("Payroll expected on {payday}."),
                    "low",
                ));
            }
        }

        if let Some(alert) = self.spend_up(now.date(), expenses) {
            due.push(alert);
        }

        due
    }

    fn spend_up(&mut self, today: NaiveDate, expenses: &[Expense]) -> Option<AlertCmd> {
        let month_start = today.with_day(1)?;
        let prev_start = month_start.checked_sub_months(Months::new(1))?;
        let prev_end = month_start.pred_opt()?;

        let this_month = sum_between(expenses, month_start, today);
        let last_month = sum_between(expenses, prev_start, prev_end);
        if !this_month.is_positive() || this_month <= last_month {
            return None;
        }
        if !self.fire(SPEND_UP, month_start) {
            return None;
        }

        let delta = this_month - last_month;
        Some(
            AlertCmd::new(
                SPEND_UP,
                format!(
                    "Spending is up by ${} vs last month.",
                    group_thousands(whole_units(delta))
                ),
                "medium",
            )
            .amount(-delta.to_f64()),
        )
    }

    /// Record `(rule, key)`; `false` when it already fired.
    fn fire(&mut self, rule: &'static str, key: NaiveDate) -> bool {
        self.fired.insert((rule, key))
    }
}

/// The 1st of this month when today is the 1st, otherwise the 1st of next
/// month.
fn next_rent_date(today: NaiveDate) -> Option<NaiveDate> {
    let month_start = today.with_day(1)?;
    if today.day() > 1 {
        month_start.checked_add_months(Months::new(1))
    } else {
        Some(month_start)
    }
}

/// The earliest of this month's paydays not before `now`, or the 1st of next
/// month.
fn next_payday(now: NaiveDateTime) -> Option<NaiveDate> {
    let today = now.date();
    PAYDAYS
        .iter()
        .filter_map(|day| today.with_day(*day))
        .find(|payday| payday.and_time(NaiveTime::MIN) >= now)
        .or_else(|| {
            today
                .with_day(1)
                .and_then(|start| start.checked_add_months(Months::new(1)))
        })
}

/// Whole days from `now` to midnight of `date`.
fn days_until(now: NaiveDateTime, date: NaiveDate) -> i64 {
    (date.and_time(NaiveTime::MIN) - now).num_days()
}

fn sum_between(expenses: &[Expense], from: NaiveDate, to: NaiveDate) -> MoneyCents {
    expenses
        .iter()
        .filter(|expense| from <= expense.date && expense.date <= to)
        .fold(MoneyCents::ZERO, |total, expense| total + expense.amount)
}

/// Round cents half-up to whole units.
fn whole_units(amount: MoneyCents) -> i64 {
    (amount.cents() + 50) / 100
}

fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if value < 0 {
        grouped.insert(0, '-');
    }
    grouped
}
