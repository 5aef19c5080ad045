//! Leave day valuation.
//!
//! This module ties policy resolution, the fixed-rate rule, and the
//! history-based daily value together to answer what one day of paid leave
//! is worth for an employee.
//!
//! Valuation never fails. Every condition that prevents a positive value
//! degrades to a zero value with a flag explaining why, and is logged at
//! debug level.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use crate::config::{LeavePaySettings, OrgSettings};
use crate::models::{
    AuditStep, Diagnostics, Employee, LEGAL_FALLBACK_MONTHS, LeaveDayValue, LeavePayMethod, LeavePayPolicy,
    ServiceDefinition, WorkSessionRecord,
};

use super::daily_value::compute_daily_value;
use super::policy::resolve_policy_for_employee;

/// Everything a leave day valuation reads.
///
/// All collections are borrowed; valuation never mutates them.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeaveValueInputs<'a> {
    /// Known employees.
    pub employees: &'a [Employee],
    /// Time-entry history.
    pub work_sessions: &'a [WorkSessionRecord],
    /// Service catalog.
    pub services: &'a [ServiceDefinition],
    /// Policy supplied for this computation, overriding settings.
    pub leave_pay_policy: Option<&'a LeavePaySettings>,
    /// Organization settings.
    pub settings: Option<&'a OrgSettings>,
}

/// Returns the value of one leave day for `employee_id` on `date`.
///
/// This is the plain-number form of [`select_leave_day_value_detailed`].
///
/// # Examples
///
/// ```
/// use leave_engine::calculation::{LeaveValueInputs, select_leave_day_value};
/// use leave_engine::models::WorkSessionRecord;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let sessions: Vec<WorkSessionRecord> = serde_json::from_str(r#"[
///     {"employee_id": "emp_001", "date": "2024-03-04", "entry_type": "hours", "hours": 8, "total_payment": 480}
/// ]"#).unwrap();
///
/// let inputs = LeaveValueInputs {
///     work_sessions: &sessions,
///     ..Default::default()
/// };
///
/// let value = select_leave_day_value("emp_001", NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(), &inputs);
/// assert_eq!(value, Decimal::from(480));
/// ```
pub fn select_leave_day_value(employee_id: &str, date: NaiveDate, inputs: &LeaveValueInputs<'_>) -> Decimal {
    select_leave_day_value_detailed(employee_id, date, inputs).value
}

/// Values one leave day and reports how the value was reached.
///
/// # Decision order
///
/// 1. Resolve the policy and the method (employee override if valid).
/// 2. A date before the employee's start date is worth zero (`pre_start_date`).
/// 3. `fixed_rate`: the employee's positive personal rate, else the policy's
///    fixed default, else zero with `insufficient_data`. No history is read.
/// 4. Otherwise compute the daily value over `lookback_months`.
/// 5. Under `legal` with `legal_allow_12m_if_better`, also compute over 12
///    months and keep the larger value.
/// 6. A non-positive result is reported as zero with `insufficient_data`.
pub fn select_leave_day_value_detailed(
    employee_id: &str,
    date: NaiveDate,
    inputs: &LeaveValueInputs<'_>,
) -> LeaveDayValue {
    let employee = inputs.employees.iter().find(|e| e.id == employee_id);
    let mut audit_trace = Vec::new();
    let mut step_number: u32 = 1;

    let resolution =
        resolve_policy_for_employee(employee, inputs.leave_pay_policy, inputs.settings, step_number);
    let method = resolution.method;
    let policy = resolution.policy;
    audit_trace.push(resolution.audit_step);
    step_number += 1;

    if let Some(start_date) = employee
        .filter(|e| e.is_before_start(date))
        .and_then(|e| e.start_date)
    {
        debug!(
            employee_id,
            %date,
            %start_date,
            "Leave date precedes employment start; valuing at zero"
        );
        audit_trace.push(AuditStep {
            step_number,
            rule_id: "pre_start_date".to_string(),
            rule_name: "Employment Start Check".to_string(),
            input: serde_json::json!({
                "date": date.to_string(),
                "start_date": start_date.to_string()
            }),
            output: serde_json::json!({ "value": "0", "pre_start_date": true }),
            reasoning: format!(
                "Leave date {} is before employment start {}; no leave pay",
                date, start_date
            ),
        });
        return LeaveDayValue {
            value: Decimal::ZERO,
            insufficient_data: false,
            method,
            diagnostics: None,
            pre_start_date: true,
            audit_trace,
        };
    }

    if method == LeavePayMethod::FixedRate {
        let (value, step) = fixed_rate_value(employee, &policy, step_number);
        audit_trace.push(step);
        return finish(employee_id, date, method, value, None, audit_trace);
    }

    let base = compute_daily_value(
        method,
        policy.lookback_months,
        employee_id,
        date,
        inputs.work_sessions,
        inputs.services,
        step_number,
    );
    step_number += 1;
    let diagnostics = base.aggregate.diagnostics();
    let mut best = base.value;
    audit_trace.push(base.audit_step);

    if method == LeavePayMethod::Legal && policy.legal_allow_12m_if_better {
        let alternate = compute_daily_value(
            method,
            LEGAL_FALLBACK_MONTHS,
            employee_id,
            date,
            inputs.work_sessions,
            inputs.services,
            step_number,
        );
        step_number += 1;
        audit_trace.push(alternate.audit_step);

        let fallback_wins = alternate.value > best;
        audit_trace.push(AuditStep {
            step_number,
            rule_id: "legal_12m_fallback".to_string(),
            rule_name: "Legal 12-Month Comparison".to_string(),
            input: serde_json::json!({
                "lookback_value": best.normalize().to_string(),
                "twelve_month_value": alternate.value.normalize().to_string()
            }),
            output: serde_json::json!({
                "value": best.max(alternate.value).normalize().to_string(),
                "fallback_applied": fallback_wins
            }),
            reasoning: if fallback_wins {
                format!(
                    "12-month value ${} exceeds {}-month value ${}",
                    alternate.value.normalize(),
                    policy.lookback_months,
                    best.normalize()
                )
            } else {
                format!(
                    "{}-month value ${} kept; 12-month value ${} is not larger",
                    policy.lookback_months,
                    best.normalize(),
                    alternate.value.normalize()
                )
            },
        });

        if fallback_wins {
            best = alternate.value;
        }
    }

    finish(employee_id, date, method, best, Some(diagnostics), audit_trace)
}

fn fixed_rate_value(
    employee: Option<&Employee>,
    policy: &LeavePayPolicy,
    step_number: u32,
) -> (Decimal, AuditStep) {
    let personal = employee.and_then(Employee::positive_fixed_day_rate);
    let (value, source) = match (personal, policy.fixed_rate_default) {
        (Some(rate), _) => (rate, "employee"),
        (None, Some(rate)) => (rate, "policy_default"),
        (None, None) => (Decimal::ZERO, "none"),
    };

    let reasoning = match source {
        "employee" => format!("Using employee fixed day rate ${}", value.normalize()),
        "policy_default" => format!("Using policy fixed day rate ${}", value.normalize()),
        _ => "No fixed day rate configured for employee or policy".to_string(),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "fixed_rate".to_string(),
        rule_name: "Fixed Day Rate".to_string(),
        input: serde_json::json!({
            "employee_rate": personal.map(|r| r.to_string()),
            "policy_default": policy.fixed_rate_default.map(|r| r.to_string())
        }),
        output: serde_json::json!({
            "value": value.normalize().to_string(),
            "source": source
        }),
        reasoning,
    };

    (value, audit_step)
}

fn finish(
    employee_id: &str,
    date: NaiveDate,
    method: LeavePayMethod,
    value: Decimal,
    diagnostics: Option<Diagnostics>,
    audit_trace: Vec<AuditStep>,
) -> LeaveDayValue {
    if value <= Decimal::ZERO {
        debug!(
            employee_id,
            %date,
            method = method.as_str(),
            total_earnings = ?diagnostics.as_ref().map(|d| d.total_earnings),
            worked_days = ?diagnostics.as_ref().map(|d| d.worked_days_count),
            "Insufficient data to value leave day"
        );
        return LeaveDayValue {
            value: Decimal::ZERO,
            insufficient_data: true,
            method,
            diagnostics,
            pre_start_date: false,
            audit_trace,
        };
    }

    LeaveDayValue {
        value,
        insufficient_data: false,
        method,
        diagnostics,
        pre_start_date: false,
        audit_trace,
    }
}
