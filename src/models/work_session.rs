//! Work session records and service definitions.
//!
//! A [`WorkSessionRecord`] is one time-entry row per worked or leave day per
//! employee. Numeric columns are read leniently so that a malformed amount
//! degrades to zero instead of rejecting the row.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::lenient;

/// The kind of a time-entry row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryType {
    /// Hours logged directly.
    Hours,
    /// Sessions of a service delivered (instructors).
    Session,
    /// Manual monetary adjustment.
    Adjustment,
    /// Paid leave funded by the system.
    LeaveSystemPaid,
    /// Paid leave funded by the employee's balance.
    LeaveEmployeePaid,
    /// Unpaid leave.
    LeaveUnpaid,
    /// Half day of leave.
    LeaveHalfDay,
    /// Paid sick day.
    PaidSick,
    /// Any entry type this engine does not know about, or none at all.
    #[default]
    #[serde(other)]
    Other,
}

impl EntryType {
    /// Returns true for entries that represent actual work.
    pub fn is_work(&self) -> bool {
        matches!(self, EntryType::Hours | EntryType::Session)
    }

    /// Returns true for leave and sick-day entries.
    pub fn is_leave(&self) -> bool {
        matches!(
            self,
            EntryType::LeaveSystemPaid
                | EntryType::LeaveEmployeePaid
                | EntryType::LeaveUnpaid
                | EntryType::LeaveHalfDay
                | EntryType::PaidSick
        )
    }
}

/// One time-entry row for an employee.
///
/// # Example
///
/// ```
/// use leave_engine::models::{EntryType, WorkSessionRecord};
///
/// let record: WorkSessionRecord = serde_json::from_str(r#"{
///     "employee_id": "emp_001",
///     "date": "2024-03-04",
///     "entry_type": "hours",
///     "hours": 8,
///     "total_payment": "400.00"
/// }"#).unwrap();
///
/// assert_eq!(record.entry_type, EntryType::Hours);
/// assert!(record.payable);
/// assert!(!record.deleted);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkSessionRecord {
    /// Row identifier, when the row has been persisted.
    #[serde(default)]
    pub id: Option<String>,
    /// The employee this row belongs to.
    pub employee_id: String,
    /// The calendar date of the row. Timestamps are truncated to their date;
    /// a missing or unreadable date leaves the row out of every date-based
    /// selection.
    #[serde(default, deserialize_with = "lenient::optional_date")]
    pub date: Option<NaiveDate>,
    /// The kind of row. Missing or unreadable values become [`EntryType::Other`].
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub entry_type: EntryType,
    /// Hours worked, if logged directly.
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub hours: Option<Decimal>,
    /// Number of sessions delivered, for session rows.
    #[serde(default, deserialize_with = "lenient::count")]
    pub sessions_count: Option<u32>,
    /// The service delivered, for session rows.
    #[serde(default)]
    pub service_id: Option<String>,
    /// The amount paid for this row.
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub total_payment: Option<Decimal>,
    /// Whether the row counts toward payroll. Only an explicit `false` excludes it.
    #[serde(default = "default_payable", deserialize_with = "lenient::default_true_flag")]
    pub payable: bool,
    /// Soft-delete marker.
    #[serde(default, deserialize_with = "lenient::default_false_flag")]
    pub deleted: bool,
}

fn default_payable() -> bool {
    true
}

impl WorkSessionRecord {
    /// Returns the recorded payment, treating a missing amount as zero.
    pub fn payment_or_zero(&self) -> Decimal {
        self.total_payment.unwrap_or(Decimal::ZERO)
    }

    /// Returns true if the row may contribute to payroll history.
    pub fn counts_toward_history(&self) -> bool {
        !self.deleted && self.payable
    }
}

/// A bookable service, used to convert session counts into hours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceDefinition {
    /// Unique identifier for the service.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Length of one session in minutes.
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub duration_minutes: Option<Decimal>,
}

/// Finds a service by id.
pub fn find_service<'a>(
    services: &'a [ServiceDefinition],
    service_id: &str,
) -> Option<&'a ServiceDefinition> {
    services.iter().find(|s| s.id == service_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_session_record() {
        let json = r#"{
            "id": "ws_1",
            "employee_id": "emp_002",
            "date": "2024-03-05T10:00:00Z",
            "entry_type": "session",
            "sessions_count": 3,
            "service_id": "svc_45",
            "total_payment": 300
        }"#;

        let record: WorkSessionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2024, 3, 5));
        assert_eq!(record.entry_type, EntryType::Session);
        assert_eq!(record.sessions_count, Some(3));
        assert_eq!(record.service_id.as_deref(), Some("svc_45"));
        assert_eq!(record.payment_or_zero(), Decimal::from(300));
        assert!(record.hours.is_none());
    }

    #[test]
    fn test_payable_only_false_when_explicit() {
        let base = r#""employee_id": "e", "date": "2024-01-01", "entry_type": "hours""#;

        let absent: WorkSessionRecord = serde_json::from_str(&format!("{{{}}}", base)).unwrap();
        assert!(absent.payable);

        let null: WorkSessionRecord =
            serde_json::from_str(&format!("{{{}, \"payable\": null}}", base)).unwrap();
        assert!(null.payable);

        let explicit: WorkSessionRecord =
            serde_json::from_str(&format!("{{{}, \"payable\": false}}", base)).unwrap();
        assert!(!explicit.payable);
        assert!(!explicit.counts_toward_history());
    }

    #[test]
    fn test_deleted_record_does_not_count() {
        let json = r#"{
            "employee_id": "e",
            "date": "2024-01-01",
            "entry_type": "hours",
            "deleted": true
        }"#;
        let record: WorkSessionRecord = serde_json::from_str(json).unwrap();
        assert!(record.deleted);
        assert!(!record.counts_toward_history());
    }

    #[test]
    fn test_malformed_payment_is_zero() {
        let json = r#"{
            "employee_id": "e",
            "date": "2024-01-01",
            "entry_type": "hours",
            "hours": "NaN hours",
            "total_payment": "n/a"
        }"#;
        let record: WorkSessionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.payment_or_zero(), Decimal::ZERO);
        assert!(record.hours.is_none());
    }

    #[test]
    fn test_unknown_entry_type_is_other() {
        let entry_type: EntryType = serde_json::from_str("\"bonus_points\"").unwrap();
        assert_eq!(entry_type, EntryType::Other);
        assert!(!entry_type.is_work());
        assert!(!entry_type.is_leave());
    }

    #[test]
    fn test_unreadable_date_and_entry_type_do_not_reject_the_row() {
        let json = r#"[
            {"employee_id": "e", "date": null, "entry_type": "hours", "hours": 8},
            {"employee_id": "e", "date": "31/03/2024", "entry_type": null},
            {"employee_id": "e"}
        ]"#;
        let records: Vec<WorkSessionRecord> = serde_json::from_str(json).unwrap();

        assert_eq!(records[0].date, None);
        assert_eq!(records[0].entry_type, EntryType::Hours);
        assert_eq!(records[1].date, None);
        assert_eq!(records[1].entry_type, EntryType::Other);
        assert_eq!(records[2].date, None);
        assert_eq!(records[2].entry_type, EntryType::Other);
    }

    #[test]
    fn test_entry_type_classification() {
        assert!(EntryType::Hours.is_work());
        assert!(EntryType::Session.is_work());
        assert!(!EntryType::Adjustment.is_work());
        assert!(EntryType::LeaveHalfDay.is_leave());
        assert!(EntryType::PaidSick.is_leave());
        assert!(!EntryType::Hours.is_leave());
    }

    #[test]
    fn test_find_service() {
        let services = vec![
            ServiceDefinition {
                id: "svc_45".to_string(),
                name: Some("Lesson".to_string()),
                duration_minutes: Some(Decimal::from(45)),
            },
            ServiceDefinition {
                id: "svc_60".to_string(),
                name: None,
                duration_minutes: Some(Decimal::from(60)),
            },
        ];
        assert_eq!(find_service(&services, "svc_60").unwrap().id, "svc_60");
        assert!(find_service(&services, "missing").is_none());
    }
}
