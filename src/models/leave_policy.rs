//! Leave pay policy models.
//!
//! This module contains the [`LeavePayMethod`] enumeration and the resolved
//! [`LeavePayPolicy`] an organization applies when valuing leave days.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Default number of months of history used by the averaging methods.
pub const DEFAULT_LOOKBACK_MONTHS: u32 = 3;

/// Length of the alternate window used by the legal fallback rule.
pub const LEGAL_FALLBACK_MONTHS: u32 = 12;

/// How the value of one leave day is determined.
///
/// # Example
///
/// ```
/// use leave_engine::models::LeavePayMethod;
///
/// let method: LeavePayMethod = "avg_hourly_x_avg_day_hours".parse().unwrap();
/// assert_eq!(method, LeavePayMethod::AvgHourlyXAvgDayHours);
/// assert!("weekly_magic".parse::<LeavePayMethod>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeavePayMethod {
    /// Statutory method: average daily earnings over the lookback window,
    /// optionally compared against a 12-month window.
    Legal,
    /// Average daily earnings over the lookback window.
    AvgDaily,
    /// Average hourly rate multiplied by average hours per worked day.
    AvgHourlyXAvgDayHours,
    /// A fixed amount per leave day.
    FixedRate,
}

impl LeavePayMethod {
    /// All methods accepted from settings and employee overrides.
    pub const ALL: [LeavePayMethod; 4] = [
        LeavePayMethod::Legal,
        LeavePayMethod::AvgDaily,
        LeavePayMethod::AvgHourlyXAvgDayHours,
        LeavePayMethod::FixedRate,
    ];

    /// Returns the snake_case identifier of the method.
    pub fn as_str(&self) -> &'static str {
        match self {
            LeavePayMethod::Legal => "legal",
            LeavePayMethod::AvgDaily => "avg_daily",
            LeavePayMethod::AvgHourlyXAvgDayHours => "avg_hourly_x_avg_day_hours",
            LeavePayMethod::FixedRate => "fixed_rate",
        }
    }
}

impl fmt::Display for LeavePayMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeavePayMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        LeavePayMethod::ALL
            .into_iter()
            .find(|m| m.as_str() == needle)
            .ok_or_else(|| format!("Invalid LeavePayMethod: {}", s))
    }
}

/// A fully resolved leave pay policy.
///
/// Policies are immutable for the duration of one computation. Partial or
/// malformed policies coming from settings are normalized into this type by
/// [`crate::calculation::resolve_leave_pay_policy`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeavePayPolicy {
    /// Method used when the employee has no valid personal override.
    pub default_method: LeavePayMethod,
    /// Number of months of history averaged by the history-based methods.
    pub lookback_months: u32,
    /// Under the legal method, also try a 12-month window and keep the larger value.
    pub legal_allow_12m_if_better: bool,
    /// Organization-wide fixed leave day value.
    pub fixed_rate_default: Option<Decimal>,
}

impl Default for LeavePayPolicy {
    fn default() -> Self {
        Self {
            default_method: LeavePayMethod::Legal,
            lookback_months: DEFAULT_LOOKBACK_MONTHS,
            legal_allow_12m_if_better: false,
            fixed_rate_default: None,
        }
    }
}
