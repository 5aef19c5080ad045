//! Hour summaries for payroll reports.
//!
//! This module provides the filter predicate shared by payroll reports and
//! the selectors that total hours per pay arrangement: hourly staff, global
//! staff, and instructor sessions ("meeting" hours).

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{
    Employee, EmployeeType, EntryType, ServiceDefinition, WorkSessionRecord,
};

use super::history::resolve_hours_for_row;

/// Criteria a time entry must satisfy to be included in a report.
///
/// Empty lists and `None` fields do not constrain.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntryFilters {
    /// First date included.
    #[serde(default)]
    pub date_from: Option<NaiveDate>,
    /// Last date included.
    #[serde(default)]
    pub date_to: Option<NaiveDate>,
    /// Only these employees.
    #[serde(default)]
    pub employee_ids: Vec<String>,
    /// Only employees of this type.
    #[serde(default)]
    pub employee_type: Option<EmployeeType>,
    /// Only rows for this service.
    #[serde(default)]
    pub service_id: Option<String>,
    /// Only employees holding at least one of these employment scopes.
    #[serde(default)]
    pub scopes: Vec<String>,
}

/// Per-arrangement hour totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoursSummary {
    /// Hours logged by hourly employees.
    pub hourly_hours: Decimal,
    /// Session hours delivered by instructors.
    pub meeting_hours: Decimal,
    /// Hours logged by global employees.
    pub global_hours: Decimal,
    /// Sum of the three.
    pub total_hours: Decimal,
}

/// Returns true if `record` satisfies every criterion in `filters`.
///
/// `employee` is the record's employee, if known. Criteria on the employee
/// (type and scopes) never match an unknown employee. Deleted rows and rows
/// without a date never match.
pub fn entry_matches_filters(
    record: &WorkSessionRecord,
    employee: Option<&Employee>,
    filters: &EntryFilters,
) -> bool {
    let Some(day) = record.date else {
        return false;
    };
    if record.deleted {
        return false;
    }
    if filters.date_from.is_some_and(|from| day < from) {
        return false;
    }
    if filters.date_to.is_some_and(|to| day > to) {
        return false;
    }
    if !filters.employee_ids.is_empty() && !filters.employee_ids.contains(&record.employee_id) {
        return false;
    }
    if let Some(service_id) = &filters.service_id {
        if record.service_id.as_ref() != Some(service_id) {
            return false;
        }
    }
    if let Some(employee_type) = filters.employee_type {
        if employee.map(|e| e.employee_type) != Some(employee_type) {
            return false;
        }
    }
    if !filters.scopes.is_empty() {
        let in_scope = employee.is_some_and(|e| {
            e.employment_scopes
                .iter()
                .any(|scope| filters.scopes.contains(scope))
        });
        if !in_scope {
            return false;
        }
    }
    true
}

fn employee_index(employees: &[Employee]) -> HashMap<&str, &Employee> {
    employees.iter().map(|e| (e.id.as_str(), e)).collect()
}

fn sum_hours<F>(
    records: &[WorkSessionRecord],
    employees: &[Employee],
    filters: &EntryFilters,
    employee_type: EmployeeType,
    entry_type: EntryType,
    hours_of: F,
) -> Decimal
where
    F: Fn(&WorkSessionRecord) -> Decimal,
{
    let index = employee_index(employees);
    records
        .iter()
        .filter(|r| r.entry_type == entry_type)
        .filter(|r| {
            let employee = index.get(r.employee_id.as_str()).copied();
            employee.is_some_and(|e| e.employee_type == employee_type)
                && entry_matches_filters(r, employee, filters)
        })
        .fold(Decimal::ZERO, |total, r| total.saturating_add(hours_of(r)))
}

fn logged_hours(record: &WorkSessionRecord) -> Decimal {
    record.hours.unwrap_or(Decimal::ZERO)
}

/// Total hours logged by hourly employees.
pub fn select_hourly_hours(
    records: &[WorkSessionRecord],
    employees: &[Employee],
    filters: &EntryFilters,
) -> Decimal {
    sum_hours(
        records,
        employees,
        filters,
        EmployeeType::Hourly,
        EntryType::Hours,
        logged_hours,
    )
}

/// Total session hours delivered by instructors.
///
/// Rows without explicit hours are converted from the service duration.
pub fn select_meeting_hours(
    records: &[WorkSessionRecord],
    employees: &[Employee],
    services: &[ServiceDefinition],
    filters: &EntryFilters,
) -> Decimal {
    sum_hours(
        records,
        employees,
        filters,
        EmployeeType::Instructor,
        EntryType::Session,
        |r| resolve_hours_for_row(r, services),
    )
}

/// Total hours logged by global employees.
pub fn select_global_hours(
    records: &[WorkSessionRecord],
    employees: &[Employee],
    filters: &EntryFilters,
) -> Decimal {
    sum_hours(
        records,
        employees,
        filters,
        EmployeeType::Global,
        EntryType::Hours,
        logged_hours,
    )
}

/// Hourly, meeting, and global hours combined.
pub fn select_total_hours(
    records: &[WorkSessionRecord],
    employees: &[Employee],
    services: &[ServiceDefinition],
    filters: &EntryFilters,
) -> Decimal {
    summarize_hours(records, employees, services, filters).total_hours
}

/// Computes every hour total in one call.
pub fn summarize_hours(
    records: &[WorkSessionRecord],
    employees: &[Employee],
    services: &[ServiceDefinition],
    filters: &EntryFilters,
) -> HoursSummary {
    let hourly_hours = select_hourly_hours(records, employees, filters);
    let meeting_hours = select_meeting_hours(records, employees, services, filters);
    let global_hours = select_global_hours(records, employees, filters);

    HoursSummary {
        hourly_hours,
        meeting_hours,
        global_hours,
        total_hours: hourly_hours
            .saturating_add(meeting_hours)
            .saturating_add(global_hours),
    }
}
