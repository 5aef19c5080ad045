//! Request types for the Leave Engine API.
//!
//! This module defines the JSON request structures for every endpoint.
//! Organization settings in a request may use either settings shape; they are
//! normalized while the body is deserialized.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calculation::EntryFilters;
use crate::config::{LeavePaySettings, OrgSettings};
use crate::error::{EngineError, EngineResult};
use crate::models::lenient;
use crate::models::{Employee, LeaveBalanceEntry, ServiceDefinition, WorkSessionRecord};

/// Request body for the `/leave/day-value` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveDayValueRequest {
    /// The employee whose leave day is valued.
    pub employee_id: String,
    /// The leave date. Timestamps are truncated to their date.
    #[serde(deserialize_with = "lenient::date")]
    pub date: NaiveDate,
    /// Known employees.
    #[serde(default)]
    pub employees: Vec<Employee>,
    /// Time-entry history.
    #[serde(default)]
    pub work_sessions: Vec<WorkSessionRecord>,
    /// Service catalog; the organization catalog is used when empty.
    #[serde(default)]
    pub services: Vec<ServiceDefinition>,
    /// Policy for this computation, overriding settings.
    #[serde(default)]
    pub leave_pay_policy: Option<LeavePaySettings>,
    /// Organization settings; the loaded organization settings are used when absent.
    #[serde(default)]
    pub settings: Option<OrgSettings>,
    /// Return the full result with diagnostics and audit trace.
    #[serde(default)]
    pub collect_diagnostics: bool,
}

impl LeaveDayValueRequest {
    /// Checks fields that deserialize fine but cannot be valued.
    pub fn validate(&self) -> EngineResult<()> {
        if self.employee_id.trim().is_empty() {
            return Err(EngineError::InvalidRequest {
                field: "employee_id".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

/// Request body for the `/hours/summary` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoursSummaryRequest {
    /// Known employees.
    #[serde(default)]
    pub employees: Vec<Employee>,
    /// Time-entry rows to summarize.
    #[serde(default)]
    pub work_sessions: Vec<WorkSessionRecord>,
    /// Service catalog; the organization catalog is used when empty.
    #[serde(default)]
    pub services: Vec<ServiceDefinition>,
    /// Report filters.
    #[serde(default)]
    pub filters: EntryFilters,
}

/// Request body for the `/leave/remaining` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveRemainingRequest {
    /// The employee whose balance is read.
    pub employee_id: String,
    /// The date the balance is read at.
    #[serde(deserialize_with = "lenient::date")]
    pub date: NaiveDate,
    /// Leave ledger rows.
    #[serde(default)]
    pub balances: Vec<LeaveBalanceEntry>,
    /// Restrict to one kind of leave.
    #[serde(default)]
    pub leave_type: Option<String>,
}

/// Request body for the `/time-entries/conflicts` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConflictCheckRequest {
    /// Rows already stored.
    #[serde(default)]
    pub existing: Vec<WorkSessionRecord>,
    /// Rows about to be written.
    pub incoming: Vec<WorkSessionRecord>,
}
