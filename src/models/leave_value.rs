//! Leave day value result models.
//!
//! This module contains the [`LeaveDayValue`] type returned by the detailed
//! leave day valuation, together with its [`Diagnostics`] and the
//! [`AuditStep`] entries that record each decision.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::LeavePayMethod;

/// History totals attached to a leave day valuation for debugging.
///
/// # Example
///
/// ```
/// use leave_engine::models::Diagnostics;
/// use rust_decimal::Decimal;
///
/// let diagnostics = Diagnostics {
///     total_earnings: Decimal::from(1000),
///     total_hours: Decimal::from(50),
///     worked_days_count: 10,
/// };
/// assert_eq!(diagnostics.worked_days_count, 10);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Diagnostics {
    /// Sum of payments over the window.
    pub total_earnings: Decimal,
    /// Sum of hours over the window.
    pub total_hours: Decimal,
    /// Number of distinct worked dates over the window.
    pub worked_days_count: usize,
}

/// A single step in the audit trace recording a valuation decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// The detailed outcome of valuing one leave day.
///
/// A zero `value` is always accompanied by either `insufficient_data` or
/// `pre_start_date` explaining why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveDayValue {
    /// The monetary value of the leave day.
    pub value: Decimal,
    /// No positive value could be derived from the available data.
    pub insufficient_data: bool,
    /// The method that was applied.
    pub method: LeavePayMethod,
    /// History totals of the primary window, when a history scan took place.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostics: Option<Diagnostics>,
    /// The date precedes the employee's start date.
    pub pre_start_date: bool,
    /// Every decision taken while valuing the day.
    pub audit_trace: Vec<AuditStep>,
}
