//! Work history aggregation functionality.
//!
//! This module scans an employee's time entries within a date window and
//! totals the payable earnings, hours, and distinct worked days that the
//! averaging leave pay methods are based on.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::{Diagnostics, EntryType, ServiceDefinition, WorkSessionRecord, find_service};

/// Minutes in one hour, for converting session durations.
pub const MINUTES_PER_HOUR: Decimal = Decimal::from_parts(60, 0, 0, false, 0);

/// Totals of an employee's payable work within a date window.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryAggregate {
    /// Sum of `total_payment` over the surviving rows.
    pub total_earnings: Decimal,
    /// Sum of resolved hours over the surviving rows.
    pub total_hours: Decimal,
    /// Distinct dates with positive hours or a non-zero payment.
    pub worked_days: BTreeSet<NaiveDate>,
}

impl HistoryAggregate {
    /// Returns the number of distinct worked days.
    pub fn worked_days_count(&self) -> usize {
        self.worked_days.len()
    }

    /// Returns the totals as reportable diagnostics.
    pub fn diagnostics(&self) -> Diagnostics {
        Diagnostics {
            total_earnings: self.total_earnings,
            total_hours: self.total_hours,
            worked_days_count: self.worked_days_count(),
        }
    }
}

/// Resolves the hours a row represents.
///
/// An explicit positive `hours` value wins. Otherwise session rows are
/// converted from the service duration: `duration_minutes × sessions_count / 60`.
/// Unknown services, missing durations, and every other row type yield zero.
///
/// # Examples
///
/// ```
/// use leave_engine::calculation::resolve_hours_for_row;
/// use leave_engine::models::{ServiceDefinition, WorkSessionRecord};
/// use rust_decimal::Decimal;
///
/// let services = vec![ServiceDefinition {
///     id: "svc_45".to_string(),
///     name: None,
///     duration_minutes: Some(Decimal::from(45)),
/// }];
/// let record: WorkSessionRecord = serde_json::from_str(r#"{
///     "employee_id": "emp_001",
///     "date": "2024-03-04",
///     "entry_type": "session",
///     "sessions_count": 4,
///     "service_id": "svc_45"
/// }"#).unwrap();
///
/// assert_eq!(resolve_hours_for_row(&record, &services), Decimal::from(3));
/// ```
pub fn resolve_hours_for_row(record: &WorkSessionRecord, services: &[ServiceDefinition]) -> Decimal {
    if let Some(hours) = record.hours.filter(|h| *h > Decimal::ZERO) {
        return hours;
    }

    if record.entry_type != EntryType::Session {
        return Decimal::ZERO;
    }

    let duration = record
        .service_id
        .as_deref()
        .and_then(|id| find_service(services, id))
        .and_then(|service| service.duration_minutes)
        .filter(|minutes| *minutes > Decimal::ZERO);

    match (duration, record.sessions_count) {
        (Some(minutes), Some(count)) if count > 0 => minutes
            .checked_mul(Decimal::from(count))
            .and_then(|total| total.checked_div(MINUTES_PER_HOUR))
            .unwrap_or(Decimal::ZERO),
        _ => Decimal::ZERO,
    }
}

/// Aggregates an employee's payable work history over `[start, end]`.
///
/// Only rows that belong to the employee, are not deleted, are payable, fall
/// within the inclusive range, and are work entries (`hours` or `session`)
/// contribute. Missing or malformed amounts count as zero.
///
/// # Arguments
///
/// * `employee_id` - The employee whose history is scanned
/// * `records` - Time-entry rows, possibly for many employees
/// * `services` - Service catalog for session-to-hours conversion
/// * `start` - First date of the window (inclusive)
/// * `end` - Last date of the window (inclusive)
pub fn aggregate_employee_history(
    employee_id: &str,
    records: &[WorkSessionRecord],
    services: &[ServiceDefinition],
    start: NaiveDate,
    end: NaiveDate,
) -> HistoryAggregate {
    let mut aggregate = HistoryAggregate::default();

    let rows = records.iter().filter_map(|r| {
        let day = r.date?;
        let keep = r.employee_id == employee_id
            && r.counts_toward_history()
            && (start..=end).contains(&day)
            && r.entry_type.is_work();
        keep.then_some((day, r))
    });

    for (day, record) in rows {
        let payment = record.payment_or_zero();
        aggregate.total_earnings = aggregate.total_earnings.saturating_add(payment);

        let hours = resolve_hours_for_row(record, services);
        aggregate.total_hours = aggregate.total_hours.saturating_add(hours);

        if hours > Decimal::ZERO || !payment.is_zero() {
            aggregate.worked_days.insert(day);
        }
    }

    aggregate
}
