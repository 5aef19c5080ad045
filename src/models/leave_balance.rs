//! Leave balance ledger models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::lenient;

/// One movement in an employee's leave ledger.
///
/// Positive balances are allocations (accruals, grants); negative balances
/// are usage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveBalanceEntry {
    /// The employee this movement belongs to.
    pub employee_id: String,
    /// The date the movement takes effect.
    #[serde(deserialize_with = "lenient::date")]
    pub effective_date: NaiveDate,
    /// The kind of leave (e.g., "vacation", "sick").
    #[serde(default)]
    pub leave_type: Option<String>,
    /// Days allocated (positive) or used (negative).
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub balance: Option<Decimal>,
    /// Soft-delete marker.
    #[serde(default, deserialize_with = "lenient::default_false_flag")]
    pub deleted: bool,
}

/// Leave days remaining for an employee at a given date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRemaining {
    /// Total days allocated up to the date.
    pub allocated: Decimal,
    /// Total days used up to the date, as a positive number.
    pub used: Decimal,
    /// `allocated - used`.
    pub remaining: Decimal,
}
