//! Employee model and related types.
//!
//! This module defines the Employee struct and EmployeeType enum
//! for representing workers whose leave days are valued by the engine.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::lenient;

/// Represents how an employee is paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeType {
    /// Paid per logged hour.
    Hourly,
    /// Paid a fixed monthly or daily rate.
    Global,
    /// Paid per delivered session of a service.
    Instructor,
}

impl EmployeeType {
    /// Returns the snake_case name used in settings and API payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            EmployeeType::Hourly => "hourly",
            EmployeeType::Global => "global",
            EmployeeType::Instructor => "instructor",
        }
    }
}

/// Represents an employee of an organization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// How the employee is paid.
    pub employee_type: EmployeeType,
    /// The date employment began. Timestamps are truncated to their date.
    #[serde(default, deserialize_with = "lenient::optional_date")]
    pub start_date: Option<NaiveDate>,
    /// Personal fixed value of one leave day, overriding the policy default.
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub leave_fixed_day_rate: Option<Decimal>,
    /// Personal leave pay method override, honored only when it names a known method.
    #[serde(default)]
    pub leave_pay_method: Option<String>,
    /// Employment scope tags (e.g., departments or branches).
    #[serde(default)]
    pub employment_scopes: Vec<String>,
}

impl Employee {
    /// Returns true if `date` falls before the employee's start date.
    ///
    /// Employees without a start date are treated as always employed.
    ///
    /// # Examples
    ///
    /// ```
    /// use leave_engine::models::{Employee, EmployeeType};
    /// use chrono::NaiveDate;
    ///
    /// let employee = Employee {
    ///     id: "emp_001".to_string(),
    ///     employee_type: EmployeeType::Hourly,
    ///     start_date: NaiveDate::from_ymd_opt(2024, 2, 1),
    ///     leave_fixed_day_rate: None,
    ///     leave_pay_method: None,
    ///     employment_scopes: vec![],
    /// };
    /// assert!(employee.is_before_start(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()));
    /// assert!(!employee.is_before_start(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()));
    /// ```
    pub fn is_before_start(&self, date: NaiveDate) -> bool {
        self.start_date.is_some_and(|start| start > date)
    }

    /// Returns the personal fixed leave day rate when it is a positive amount.
    pub fn positive_fixed_day_rate(&self) -> Option<Decimal> {
        self.leave_fixed_day_rate.filter(|rate| *rate > Decimal::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_employee(employee_type: EmployeeType) -> Employee {
        Employee {
            id: "emp_001".to_string(),
            employee_type,
            start_date: NaiveDate::from_ymd_opt(2023, 6, 1),
            leave_fixed_day_rate: None,
            leave_pay_method: None,
            employment_scopes: vec![],
        }
    }

    #[test]
    fn test_deserialize_hourly_employee() {
        let json = r#"{
            "id": "emp_001",
            "employee_type": "hourly",
            "start_date": "2023-06-01"
        }"#;

        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.id, "emp_001");
        assert_eq!(employee.employee_type, EmployeeType::Hourly);
        assert_eq!(employee.start_date, NaiveDate::from_ymd_opt(2023, 6, 1));
        assert!(employee.leave_pay_method.is_none());
        assert!(employee.employment_scopes.is_empty());
    }

    #[test]
    fn test_deserialize_instructor_with_timestamp_start_and_string_rate() {
        let json = r#"{
            "id": "emp_002",
            "employee_type": "instructor",
            "start_date": "2024-02-01T00:00:00+00:00",
            "leave_fixed_day_rate": "250",
            "leave_pay_method": "fixed_rate",
            "employment_scopes": ["north_branch"]
        }"#;

        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.employee_type, EmployeeType::Instructor);
        assert_eq!(employee.start_date, NaiveDate::from_ymd_opt(2024, 2, 1));
        assert_eq!(employee.leave_fixed_day_rate, Some(Decimal::from(250)));
        assert_eq!(employee.leave_pay_method.as_deref(), Some("fixed_rate"));
        assert_eq!(employee.employment_scopes, vec!["north_branch"]);
    }

    #[test]
    fn test_null_start_date_is_none() {
        let json = r#"{"id": "emp_003", "employee_type": "global", "start_date": null}"#;
        let employee: Employee = serde_json::from_str(json).unwrap();
        assert!(employee.start_date.is_none());
        assert!(!employee.is_before_start(NaiveDate::from_ymd_opt(1999, 1, 1).unwrap()));
    }

    #[test]
    fn test_positive_fixed_day_rate_ignores_zero_and_negative() {
        let mut employee = create_test_employee(EmployeeType::Global);
        assert_eq!(employee.positive_fixed_day_rate(), None);

        employee.leave_fixed_day_rate = Some(Decimal::ZERO);
        assert_eq!(employee.positive_fixed_day_rate(), None);

        employee.leave_fixed_day_rate = Some(Decimal::from(-10));
        assert_eq!(employee.positive_fixed_day_rate(), None);

        employee.leave_fixed_day_rate = Some(Decimal::from(180));
        assert_eq!(employee.positive_fixed_day_rate(), Some(Decimal::from(180)));
    }

    #[test]
    fn test_employee_type_serialization() {
        assert_eq!(
            serde_json::to_string(&EmployeeType::Hourly).unwrap(),
            "\"hourly\""
        );
        assert_eq!(
            serde_json::to_string(&EmployeeType::Global).unwrap(),
            "\"global\""
        );
        assert_eq!(
            serde_json::to_string(&EmployeeType::Instructor).unwrap(),
            "\"instructor\""
        );
        assert_eq!(EmployeeType::Instructor.as_str(), "instructor");
    }
}
