//! Core data models for the Leave Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod employee;
mod leave_balance;
mod leave_policy;
mod leave_value;
pub(crate) mod lenient;
mod work_session;

pub use employee::{Employee, EmployeeType};
pub use leave_balance::{LeaveBalanceEntry, LeaveRemaining};
pub use leave_policy::{
    DEFAULT_LOOKBACK_MONTHS, LEGAL_FALLBACK_MONTHS, LeavePayMethod, LeavePayPolicy,
};
pub use leave_value::{AuditStep, Diagnostics, LeaveDayValue};
pub use work_session::{EntryType, ServiceDefinition, WorkSessionRecord, find_service};
