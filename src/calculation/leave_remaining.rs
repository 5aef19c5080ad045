//! Leave balance calculation.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::{LeaveBalanceEntry, LeaveRemaining};

/// Computes the leave days an employee has left as of `date`.
///
/// Ledger rows for the employee dated on or before `date` are summed:
/// positive balances as allocations and negative balances as usage. Deleted
/// rows and rows with a malformed balance are skipped. When `leave_type` is
/// given, only rows of that type count.
///
/// # Examples
///
/// ```
/// use leave_engine::calculation::select_leave_remaining;
/// use leave_engine::models::LeaveBalanceEntry;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let ledger: Vec<LeaveBalanceEntry> = serde_json::from_str(r#"[
///     {"employee_id": "emp_001", "effective_date": "2024-01-01", "balance": 12},
///     {"employee_id": "emp_001", "effective_date": "2024-02-10", "balance": -2}
/// ]"#).unwrap();
///
/// let remaining = select_leave_remaining(
///     "emp_001",
///     NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
///     &ledger,
///     None,
/// );
/// assert_eq!(remaining.remaining, Decimal::from(10));
/// ```
pub fn select_leave_remaining(
    employee_id: &str,
    date: NaiveDate,
    balances: &[LeaveBalanceEntry],
    leave_type: Option<&str>,
) -> LeaveRemaining {
    let (allocated, used) = balances
        .iter()
        .filter(|entry| {
            entry.employee_id == employee_id
                && !entry.deleted
                && entry.effective_date <= date
                && leave_type.is_none_or(|wanted| entry.leave_type.as_deref() == Some(wanted))
        })
        .filter_map(|entry| entry.balance)
        .fold((Decimal::ZERO, Decimal::ZERO), |(allocated, used), amount| {
            if amount >= Decimal::ZERO {
                (allocated.saturating_add(amount), used)
            } else {
                (allocated, used.saturating_add(amount.abs()))
            }
        });

    LeaveRemaining {
        allocated,
        used,
        remaining: allocated.saturating_sub(used),
    }
}
