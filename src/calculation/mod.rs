//! Calculation logic for the Leave Engine.
//!
//! This module contains the leave day valuation (history aggregation, policy
//! resolution, daily value, and the orchestrating selector), the hour
//! selectors used by payroll reports, leave balance lookup, and time-entry
//! date conflict detection.

mod conflicts;
mod daily_value;
mod history;
mod hours;
mod leave_remaining;
mod leave_value;
mod policy;

pub use conflicts::{ConflictKind, ConflictSource, DateConflict, detect_date_conflicts};
pub use daily_value::{DailyValueResult, compute_daily_value, lookback_range};
pub use history::{
    HistoryAggregate, MINUTES_PER_HOUR, aggregate_employee_history, resolve_hours_for_row,
};
pub use hours::{
    EntryFilters, HoursSummary, entry_matches_filters, select_global_hours, select_hourly_hours,
    select_meeting_hours, select_total_hours, summarize_hours,
};
pub use leave_remaining::select_leave_remaining;
pub use leave_value::{LeaveValueInputs, select_leave_day_value, select_leave_day_value_detailed};
pub use policy::{
    PolicyResolution, PolicySource, resolve_leave_pay_policy, resolve_policy_for_employee,
    sanitize_method,
};
