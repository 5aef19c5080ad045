//! Configuration loading and management for the Leave Engine.
//!
//! This module provides functionality to load an organization's settings and
//! service catalog from YAML files, and normalizes the two shapes in which
//! settings are delivered.
//!
//! # Example
//!
//! ```no_run
//! use leave_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/org").unwrap();
//! println!("Services: {}", config.services().len());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    LEAVE_PAY_POLICY_KEY, LeavePaySettings, OrgSettings, ServicesConfig, SettingRow,
    SettingsObject, SettingsPayload,
};
