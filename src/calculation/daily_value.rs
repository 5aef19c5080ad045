//! Daily value calculation functionality.
//!
//! This module derives the value of one leave day from an employee's work
//! history over a lookback window, using either the average daily earnings
//! or the average hourly rate multiplied by the average worked-day length.

use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;

use crate::models::{AuditStep, LeavePayMethod, ServiceDefinition, WorkSessionRecord};

use super::history::{HistoryAggregate, aggregate_employee_history};

/// The result of valuing a day over one lookback window.
#[derive(Debug, Clone)]
pub struct DailyValueResult {
    /// The computed day value; zero when the history is insufficient.
    pub value: Decimal,
    /// First date of the window (inclusive).
    pub start: NaiveDate,
    /// Last date of the window (inclusive).
    pub end: NaiveDate,
    /// The history totals the value was derived from.
    pub aggregate: HistoryAggregate,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Returns the inclusive window `[date − months, date]`.
///
/// Month subtraction clamps to the end of shorter months, so 31 May minus
/// three months is 29 February in a leap year.
///
/// # Examples
///
/// ```
/// use leave_engine::calculation::lookback_range;
/// use chrono::NaiveDate;
///
/// let (start, end) = lookback_range(NaiveDate::from_ymd_opt(2024, 5, 31).unwrap(), 3);
/// assert_eq!(start, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
/// assert_eq!(end, NaiveDate::from_ymd_opt(2024, 5, 31).unwrap());
/// ```
pub fn lookback_range(date: NaiveDate, months: u32) -> (NaiveDate, NaiveDate) {
    let start = date
        .checked_sub_months(Months::new(months))
        .unwrap_or(NaiveDate::MIN);
    (start, date)
}

/// Computes the value of one day from the history in a lookback window.
///
/// # Arguments
///
/// * `method` - The leave pay method; only `AvgHourlyXAvgDayHours` differs
///   from the average-daily-earnings formula
/// * `lookback_months` - Length of the window ending on `date`
/// * `employee_id` - The employee whose history is used
/// * `date` - The leave date, which closes the window
/// * `records` - Time-entry rows
/// * `services` - Service catalog
/// * `step_number` - The step number for audit trail sequencing
///
/// # Returns
///
/// A zero value when the window has no worked days or no positive earnings,
/// or, for the hourly method, no positive hours. The aggregated totals are
/// always attached so that callers can report why.
///
/// # Examples
///
/// ```
/// use leave_engine::calculation::compute_daily_value;
/// use leave_engine::models::{LeavePayMethod, WorkSessionRecord};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let records: Vec<WorkSessionRecord> = serde_json::from_str(r#"[
///     {"employee_id": "emp_001", "date": "2024-03-04", "entry_type": "hours", "hours": 8, "total_payment": 600},
///     {"employee_id": "emp_001", "date": "2024-03-05", "entry_type": "hours", "hours": 8, "total_payment": 400}
/// ]"#).unwrap();
///
/// let result = compute_daily_value(
///     LeavePayMethod::AvgDaily,
///     2,
///     "emp_001",
///     NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
///     &records,
///     &[],
///     1,
/// );
/// assert_eq!(result.value, Decimal::from(500));
/// ```
pub fn compute_daily_value(
    method: LeavePayMethod,
    lookback_months: u32,
    employee_id: &str,
    date: NaiveDate,
    records: &[WorkSessionRecord],
    services: &[ServiceDefinition],
    step_number: u32,
) -> DailyValueResult {
    let (start, end) = lookback_range(date, lookback_months);
    let aggregate = aggregate_employee_history(employee_id, records, services, start, end);

    let earnings = aggregate.total_earnings;
    let hours = aggregate.total_hours;
    let days = Decimal::from(aggregate.worked_days_count());

    let (value, reasoning) = if days.is_zero() || earnings <= Decimal::ZERO {
        (
            Decimal::ZERO,
            format!(
                "No payable history between {} and {} ({} worked days, ${} earnings)",
                start,
                end,
                aggregate.worked_days_count(),
                earnings.normalize()
            ),
        )
    } else if method == LeavePayMethod::AvgHourlyXAvgDayHours {
        if hours <= Decimal::ZERO {
            (
                Decimal::ZERO,
                format!(
                    "No hours recorded between {} and {}; hourly average unavailable",
                    start, end
                ),
            )
        } else {
            let avg_hourly = earnings.checked_div(hours).unwrap_or(Decimal::ZERO);
            let avg_day_hours = hours.checked_div(days).unwrap_or(Decimal::ZERO);
            let value = avg_hourly.checked_mul(avg_day_hours).unwrap_or(Decimal::ZERO);
            (
                value,
                format!(
                    "${} / {}h = ${}/h x ({}h / {} days = {}h/day) = ${}",
                    earnings.normalize(),
                    hours.normalize(),
                    avg_hourly.normalize(),
                    hours.normalize(),
                    days,
                    avg_day_hours.normalize(),
                    value.normalize()
                ),
            )
        }
    } else {
        let value = earnings.checked_div(days).unwrap_or(Decimal::ZERO);
        (
            value,
            format!(
                "${} / {} worked days = ${}",
                earnings.normalize(),
                days,
                value.normalize()
            ),
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "daily_value".to_string(),
        rule_name: "Daily Value From History".to_string(),
        input: serde_json::json!({
            "employee_id": employee_id,
            "method": method.as_str(),
            "lookback_months": lookback_months,
            "window_start": start.to_string(),
            "window_end": end.to_string()
        }),
        output: serde_json::json!({
            "value": value.normalize().to_string(),
            "total_earnings": earnings.normalize().to_string(),
            "total_hours": hours.normalize().to_string(),
            "worked_days_count": aggregate.worked_days_count()
        }),
        reasoning,
    };

    DailyValueResult {
        value,
        start,
        end,
        aggregate,
        audit_step,
    }
}
