//! Leave pay policy resolution and method sanitation.
//!
//! A policy may be supplied explicitly by the caller or configured in the
//! organization settings. This module picks the applicable one, fills in
//! system defaults, and decides which method applies to an employee.

use rust_decimal::Decimal;

use crate::config::{LeavePaySettings, OrgSettings};
use crate::models::{AuditStep, Employee, LeavePayMethod, LeavePayPolicy};

/// Where the applied policy came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicySource {
    /// Supplied by the caller for this computation.
    Explicit,
    /// Read from the organization settings.
    Settings,
    /// Neither was present; system defaults apply.
    SystemDefault,
}

impl PolicySource {
    /// Returns the snake_case name used in audit output.
    pub fn as_str(&self) -> &'static str {
        match self {
            PolicySource::Explicit => "explicit",
            PolicySource::Settings => "settings",
            PolicySource::SystemDefault => "system_default",
        }
    }
}

/// The policy and method that apply to one employee.
#[derive(Debug, Clone)]
pub struct PolicyResolution {
    /// The normalized policy.
    pub policy: LeavePayPolicy,
    /// The method to apply.
    pub method: LeavePayMethod,
    /// Where the policy came from.
    pub source: PolicySource,
    /// The audit step recording this resolution.
    pub audit_step: AuditStep,
}

/// Returns `candidate` as a method if it names a known method, else `fallback`.
///
/// # Examples
///
/// ```
/// use leave_engine::calculation::sanitize_method;
/// use leave_engine::models::LeavePayMethod;
///
/// assert_eq!(
///     sanitize_method(Some("fixed_rate"), LeavePayMethod::Legal),
///     LeavePayMethod::FixedRate
/// );
/// assert_eq!(
///     sanitize_method(Some("bogus"), LeavePayMethod::Legal),
///     LeavePayMethod::Legal
/// );
/// assert_eq!(sanitize_method(None, LeavePayMethod::AvgDaily), LeavePayMethod::AvgDaily);
/// ```
pub fn sanitize_method(candidate: Option<&str>, fallback: LeavePayMethod) -> LeavePayMethod {
    candidate
        .and_then(|raw| raw.parse::<LeavePayMethod>().ok())
        .unwrap_or(fallback)
}

fn select_settings<'a>(
    explicit: Option<&'a LeavePaySettings>,
    settings: Option<&'a OrgSettings>,
) -> (Option<&'a LeavePaySettings>, PolicySource) {
    if let Some(policy) = explicit {
        return (Some(policy), PolicySource::Explicit);
    }
    match settings.and_then(|s| s.leave_pay_policy.as_ref()) {
        Some(policy) => (Some(policy), PolicySource::Settings),
        None => (None, PolicySource::SystemDefault),
    }
}

fn normalize(raw: Option<&LeavePaySettings>) -> LeavePayPolicy {
    let defaults = LeavePayPolicy::default();
    let Some(raw) = raw else {
        return defaults;
    };

    LeavePayPolicy {
        default_method: sanitize_method(raw.default_method.as_deref(), defaults.default_method),
        lookback_months: raw
            .lookback_months
            .filter(|months| *months > 0)
            .unwrap_or(defaults.lookback_months),
        legal_allow_12m_if_better: raw
            .legal_allow_12m_if_better
            .unwrap_or(defaults.legal_allow_12m_if_better),
        fixed_rate_default: raw.fixed_rate_default.filter(|rate| *rate > Decimal::ZERO),
    }
}

/// Resolves the leave pay policy for one computation.
///
/// Precedence: the explicit policy, then the policy in the organization
/// settings, then the system default. Fields missing from the chosen policy,
/// unknown methods, and non-positive lookbacks or fixed rates are replaced by
/// system defaults.
///
/// Settings delivered as key/value rows are normalized into [`OrgSettings`]
/// when they are deserialized, so both settings shapes resolve identically.
pub fn resolve_leave_pay_policy(
    explicit: Option<&LeavePaySettings>,
    settings: Option<&OrgSettings>,
) -> LeavePayPolicy {
    normalize(select_settings(explicit, settings).0)
}

/// Resolves the policy and the method that applies to `employee`.
///
/// The employee's personal method override is honored only when it names a
/// known method; otherwise the policy's default method applies.
pub fn resolve_policy_for_employee(
    employee: Option<&Employee>,
    explicit: Option<&LeavePaySettings>,
    settings: Option<&OrgSettings>,
    step_number: u32,
) -> PolicyResolution {
    let (raw, source) = select_settings(explicit, settings);
    let policy = normalize(raw);

    let override_raw = employee.and_then(|e| e.leave_pay_method.as_deref());
    let method = sanitize_method(override_raw, policy.default_method);
    let override_applied = override_raw.is_some_and(|raw| raw.parse::<LeavePayMethod>().is_ok());

    let reasoning = match (override_raw, override_applied) {
        (Some(raw), true) => format!("Employee override '{}' applied over {} policy", raw, source.as_str()),
        (Some(raw), false) => format!(
            "Employee override '{}' is not a known method; using {} policy default {}",
            raw,
            source.as_str(),
            policy.default_method
        ),
        (None, _) => format!(
            "Using {} policy default method {}",
            source.as_str(),
            policy.default_method
        ),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "policy_resolution".to_string(),
        rule_name: "Leave Pay Policy Resolution".to_string(),
        input: serde_json::json!({
            "employee_id": employee.map(|e| e.id.clone()),
            "employee_method_override": override_raw,
            "policy_source": source.as_str()
        }),
        output: serde_json::json!({
            "method": method.as_str(),
            "lookback_months": policy.lookback_months,
            "legal_allow_12m_if_better": policy.legal_allow_12m_if_better,
            "fixed_rate_default": policy.fixed_rate_default.map(|r| r.to_string())
        }),
        reasoning,
    };

    PolicyResolution {
        policy,
        method,
        source,
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EmployeeType;

    fn policy_settings(method: &str, months: u32) -> LeavePaySettings {
        LeavePaySettings {
            default_method: Some(method.to_string()),
            lookback_months: Some(months),
            legal_allow_12m_if_better: None,
            fixed_rate_default: None,
        }
    }

    fn org_settings(method: &str, months: u32) -> OrgSettings {
        OrgSettings {
            leave_pay_policy: Some(policy_settings(method, months)),
        }
    }

    fn employee_with_override(method: Option<&str>) -> Employee {
        Employee {
            id: "emp_001".to_string(),
            employee_type: EmployeeType::Hourly,
            start_date: None,
            leave_fixed_day_rate: None,
            leave_pay_method: method.map(str::to_string),
            employment_scopes: vec![],
        }
    }

    #[test]
    fn test_explicit_policy_wins_over_settings() {
        let explicit = policy_settings("avg_daily", 2);
        let settings = org_settings("fixed_rate", 6);

        let policy = resolve_leave_pay_policy(Some(&explicit), Some(&settings));
        assert_eq!(policy.default_method, LeavePayMethod::AvgDaily);
        assert_eq!(policy.lookback_months, 2);
    }

    #[test]
    fn test_settings_policy_used_without_explicit() {
        let settings = org_settings("fixed_rate", 6);
        let policy = resolve_leave_pay_policy(None, Some(&settings));
        assert_eq!(policy.default_method, LeavePayMethod::FixedRate);
        assert_eq!(policy.lookback_months, 6);
    }

    #[test]
    fn test_row_settings_resolve_like_object_settings() {
        let rows: OrgSettings = serde_json::from_str(
            r#"[{"key": "leave_pay_policy", "settings_value": {"default_method": "avg_daily", "lookback_months": 5}}]"#,
        )
        .unwrap();
        let object: OrgSettings = serde_json::from_str(
            r#"{"leave_pay_policy": {"default_method": "avg_daily", "lookback_months": 5}}"#,
        )
        .unwrap();

        assert_eq!(
            resolve_leave_pay_policy(None, Some(&rows)),
            resolve_leave_pay_policy(None, Some(&object))
        );
    }

    #[test]
    fn test_system_default_when_nothing_configured() {
        assert_eq!(resolve_leave_pay_policy(None, None), LeavePayPolicy::default());
        assert_eq!(
            resolve_leave_pay_policy(None, Some(&OrgSettings::default())),
            LeavePayPolicy::default()
        );
    }

    #[test]
    fn test_invalid_fields_fall_back_to_defaults() {
        let explicit = LeavePaySettings {
            default_method: Some("weekly".to_string()),
            lookback_months: Some(0),
            legal_allow_12m_if_better: Some(true),
            fixed_rate_default: Some(Decimal::from(-5)),
        };

        let policy = resolve_leave_pay_policy(Some(&explicit), None);
        assert_eq!(policy.default_method, LeavePayMethod::Legal);
        assert_eq!(policy.lookback_months, 3);
        assert!(policy.legal_allow_12m_if_better);
        assert_eq!(policy.fixed_rate_default, None);
    }

    #[test]
    fn test_valid_employee_override_is_honored() {
        let employee = employee_with_override(Some("avg_hourly_x_avg_day_hours"));
        let resolution =
            resolve_policy_for_employee(Some(&employee), None, Some(&org_settings("legal", 3)), 1);

        assert_eq!(resolution.method, LeavePayMethod::AvgHourlyXAvgDayHours);
        assert_eq!(resolution.source, PolicySource::Settings);
        assert!(resolution.audit_step.reasoning.contains("applied"));
    }

    #[test]
    fn test_invalid_employee_override_uses_policy_default() {
        let employee = employee_with_override(Some("hourly_magic"));
        let resolution =
            resolve_policy_for_employee(Some(&employee), None, Some(&org_settings("avg_daily", 3)), 1);

        assert_eq!(resolution.method, LeavePayMethod::AvgDaily);
        assert!(resolution.audit_step.reasoning.contains("not a known method"));
    }

    #[test]
    fn test_unknown_employee_uses_policy_default() {
        let resolution = resolve_policy_for_employee(None, None, None, 4);

        assert_eq!(resolution.method, LeavePayMethod::Legal);
        assert_eq!(resolution.source, PolicySource::SystemDefault);
        assert_eq!(resolution.audit_step.step_number, 4);
        assert_eq!(resolution.audit_step.output["method"], "legal");
    }
}
