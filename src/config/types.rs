//! Configuration types for organization settings.
//!
//! Organization settings reach the engine in two shapes: a parsed settings
//! object, or the raw list of key/value rows stored by the settings table.
//! Both are normalized here into a single [`OrgSettings`] struct so that
//! business logic never branches on the incoming shape.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::lenient;
use crate::models::{LeavePayPolicy, ServiceDefinition};

/// The settings key holding the leave pay policy.
pub const LEAVE_PAY_POLICY_KEY: &str = "leave_pay_policy";

/// A leave pay policy as stored in settings or supplied by a caller.
///
/// Every field is optional and loosely typed; unknown methods and
/// non-positive lookbacks are replaced by system defaults when the policy is
/// resolved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeavePaySettings {
    /// Requested default method, validated at resolution time.
    #[serde(default)]
    pub default_method: Option<String>,
    /// Requested lookback in months.
    #[serde(default, deserialize_with = "lenient::count")]
    pub lookback_months: Option<u32>,
    /// Whether the legal method may fall back to a 12-month window.
    #[serde(default, deserialize_with = "lenient::optional_flag")]
    pub legal_allow_12m_if_better: Option<bool>,
    /// Organization-wide fixed leave day value.
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub fixed_rate_default: Option<Decimal>,
}

impl From<LeavePayPolicy> for LeavePaySettings {
    fn from(policy: LeavePayPolicy) -> Self {
        Self {
            default_method: Some(policy.default_method.as_str().to_string()),
            lookback_months: Some(policy.lookback_months),
            legal_allow_12m_if_better: Some(policy.legal_allow_12m_if_better),
            fixed_rate_default: policy.fixed_rate_default,
        }
    }
}

/// One row of the settings table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingRow {
    /// The setting key.
    pub key: String,
    /// The stored value: a JSON document, or a string containing one.
    #[serde(alias = "value", default)]
    pub settings_value: serde_json::Value,
}

/// The settings object shape.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SettingsObject {
    /// The leave pay policy, if configured.
    #[serde(default)]
    pub leave_pay_policy: Option<LeavePaySettings>,
}

/// Settings exactly as received, before normalization.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SettingsPayload {
    /// A list of key/value rows.
    Rows(Vec<SettingRow>),
    /// A parsed settings object.
    Object(SettingsObject),
}

/// Normalized organization settings.
///
/// # Example
///
/// ```
/// use leave_engine::config::OrgSettings;
///
/// let from_object: OrgSettings = serde_json::from_str(
///     r#"{"leave_pay_policy": {"default_method": "avg_daily"}}"#,
/// ).unwrap();
/// let from_rows: OrgSettings = serde_json::from_str(
///     r#"[{"key": "leave_pay_policy", "settings_value": {"default_method": "avg_daily"}}]"#,
/// ).unwrap();
///
/// assert_eq!(from_object, from_rows);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SettingsPayload")]
pub struct OrgSettings {
    /// The organization's leave pay policy, if configured.
    pub leave_pay_policy: Option<LeavePaySettings>,
}

impl TryFrom<SettingsPayload> for OrgSettings {
    type Error = EngineError;

    fn try_from(payload: SettingsPayload) -> Result<Self, Self::Error> {
        match payload {
            SettingsPayload::Object(object) => Ok(Self {
                leave_pay_policy: object.leave_pay_policy,
            }),
            SettingsPayload::Rows(rows) => {
                let leave_pay_policy = rows
                    .iter()
                    .find(|row| row.key == LEAVE_PAY_POLICY_KEY)
                    .map(decode_policy_row)
                    .transpose()?
                    .flatten();
                Ok(Self { leave_pay_policy })
            }
        }
    }
}

fn decode_policy_row(row: &SettingRow) -> Result<Option<LeavePaySettings>, EngineError> {
    let invalid = |message: String| EngineError::InvalidSetting {
        key: row.key.clone(),
        message,
    };

    let value = match &row.settings_value {
        serde_json::Value::Null => return Ok(None),
        serde_json::Value::String(encoded) => {
            serde_json::from_str::<serde_json::Value>(encoded).map_err(|e| invalid(e.to_string()))?
        }
        other => other.clone(),
    };

    serde_json::from_value(value)
        .map(Some)
        .map_err(|e| invalid(e.to_string()))
}

/// Service catalog configuration file structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServicesConfig {
    /// All services offered by the organization.
    #[serde(default)]
    pub services: Vec<ServiceDefinition>,
}
