//! Property tests for leave day valuation.
//!
//! Histories, policies, and employees are generated at random and the
//! valuation is checked for properties that must hold for any input.

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use rust_decimal::Decimal;

use leave_engine::calculation::{
    LeaveValueInputs, select_leave_day_value, select_leave_day_value_detailed,
};
use leave_engine::config::LeavePaySettings;
use leave_engine::models::{
    Employee, EmployeeType, EntryType, LeavePayMethod, ServiceDefinition, WorkSessionRecord,
};

const EMPLOYEE_ID: &str = "emp_001";

fn leave_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 7, 1).unwrap()
}

fn services() -> Vec<ServiceDefinition> {
    vec![ServiceDefinition {
        id: "svc_45".to_string(),
        name: None,
        duration_minutes: Some(Decimal::from(45)),
    }]
}

fn entry_type_strategy() -> impl Strategy<Value = EntryType> {
    prop_oneof![
        Just(EntryType::Hours),
        Just(EntryType::Session),
        Just(EntryType::LeaveSystemPaid),
        Just(EntryType::Adjustment),
    ]
}

prop_compose! {
    fn record_strategy()(
        days_before in proptest::option::weighted(0.95, 0i64..500),
        other_employee in proptest::bool::weighted(0.2),
        entry_type in entry_type_strategy(),
        hours_cents in proptest::option::of(0i64..1_200),
        sessions_count in proptest::option::of(0u32..6),
        payment_cents in proptest::option::of(-5_000i64..100_000),
        payable in proptest::bool::weighted(0.9),
        deleted in proptest::bool::weighted(0.1),
    ) -> WorkSessionRecord {
        WorkSessionRecord {
            id: None,
            employee_id: if other_employee { "emp_002" } else { EMPLOYEE_ID }.to_string(),
            date: days_before.map(|d| leave_date() - Duration::days(d)),
            entry_type,
            hours: hours_cents.map(|c| Decimal::new(c, 2)),
            sessions_count,
            service_id: Some("svc_45".to_string()),
            total_payment: payment_cents.map(|c| Decimal::new(c, 2)),
            payable,
            deleted,
        }
    }
}

fn method_name_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("legal".to_string()),
        Just("avg_daily".to_string()),
        Just("avg_hourly_x_avg_day_hours".to_string()),
        Just("fixed_rate".to_string()),
        "[a-z_]{0,12}",
    ]
}

prop_compose! {
    fn policy_strategy()(
        default_method in proptest::option::of(method_name_strategy()),
        lookback_months in proptest::option::of(0u32..24),
        legal_allow_12m_if_better in proptest::option::of(any::<bool>()),
        fixed_cents in proptest::option::of(-10_000i64..50_000),
    ) -> LeavePaySettings {
        LeavePaySettings {
            default_method,
            lookback_months,
            legal_allow_12m_if_better,
            fixed_rate_default: fixed_cents.map(|c| Decimal::new(c, 2)),
        }
    }
}

prop_compose! {
    fn employee_strategy()(
        start_offset in proptest::option::of(-400i64..60),
        rate_cents in proptest::option::of(-10_000i64..50_000),
        method in proptest::option::of(method_name_strategy()),
    ) -> Employee {
        Employee {
            id: EMPLOYEE_ID.to_string(),
            employee_type: EmployeeType::Hourly,
            start_date: start_offset.map(|d| leave_date() + Duration::days(d)),
            leave_fixed_day_rate: rate_cents.map(|c| Decimal::new(c, 2)),
            leave_pay_method: method,
            employment_scopes: vec![],
        }
    }
}

proptest! {
    #[test]
    fn value_is_never_negative_and_zero_is_explained(
        records in proptest::collection::vec(record_strategy(), 0..30),
        policy in proptest::option::of(policy_strategy()),
        employee in proptest::option::of(employee_strategy()),
    ) {
        let employees: Vec<Employee> = employee.into_iter().collect();
        let services = services();
        let inputs = LeaveValueInputs {
            employees: &employees,
            work_sessions: &records,
            services: &services,
            leave_pay_policy: policy.as_ref(),
            settings: None,
        };

        let result = select_leave_day_value_detailed(EMPLOYEE_ID, leave_date(), &inputs);
        prop_assert!(result.value >= Decimal::ZERO);
        prop_assert!(!(result.insufficient_data && result.pre_start_date));
        if result.value.is_zero() {
            prop_assert!(result.insufficient_data || result.pre_start_date);
        } else {
            prop_assert!(!result.insufficient_data);
        }
        prop_assert_eq!(result.audit_trace[0].rule_id.as_str(), "policy_resolution");
        for (i, step) in result.audit_trace.iter().enumerate() {
            prop_assert_eq!(step.step_number as usize, i + 1);
        }
    }

    #[test]
    fn valuation_is_idempotent_and_leaves_inputs_untouched(
        records in proptest::collection::vec(record_strategy(), 0..30),
        policy in proptest::option::of(policy_strategy()),
        employee in proptest::option::of(employee_strategy()),
    ) {
        let employees: Vec<Employee> = employee.into_iter().collect();
        let services = services();
        let records_before = records.clone();
        let employees_before = employees.clone();
        let policy_before = policy.clone();

        let inputs = LeaveValueInputs {
            employees: &employees,
            work_sessions: &records,
            services: &services,
            leave_pay_policy: policy.as_ref(),
            settings: None,
        };

        let first = select_leave_day_value_detailed(EMPLOYEE_ID, leave_date(), &inputs);
        let second = select_leave_day_value_detailed(EMPLOYEE_ID, leave_date(), &inputs);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(select_leave_day_value(EMPLOYEE_ID, leave_date(), &inputs), first.value);

        prop_assert_eq!(records, records_before);
        prop_assert_eq!(employees, employees_before);
        prop_assert_eq!(policy, policy_before);
    }

    #[test]
    fn legal_fallback_never_lowers_the_value(
        records in proptest::collection::vec(record_strategy(), 0..30),
        lookback_months in 1u32..12,
    ) {
        let with_fallback = LeavePaySettings {
            default_method: Some("legal".to_string()),
            lookback_months: Some(lookback_months),
            legal_allow_12m_if_better: Some(true),
            fixed_rate_default: None,
        };
        let without_fallback = LeavePaySettings {
            legal_allow_12m_if_better: Some(false),
            ..with_fallback.clone()
        };
        let services = services();
        let value_with = |policy: &LeavePaySettings| {
            let inputs = LeaveValueInputs {
                work_sessions: &records,
                services: &services,
                leave_pay_policy: Some(policy),
                ..Default::default()
            };
            select_leave_day_value_detailed(EMPLOYEE_ID, leave_date(), &inputs)
        };

        let allowed = value_with(&with_fallback);
        let denied = value_with(&without_fallback);
        prop_assert_eq!(allowed.method, LeavePayMethod::Legal);
        prop_assert!(allowed.value >= denied.value);
        prop_assert_eq!(allowed.diagnostics, denied.diagnostics);
    }
}
