//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading organization
//! settings and the service catalog from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};
use crate::models::{LeavePayPolicy, ServiceDefinition, find_service};

use super::types::{OrgSettings, ServicesConfig};

/// Loads and provides access to one organization's configuration.
///
/// # Directory Structure
///
/// ```text
/// config/org/
/// ├── settings.yaml   # Organization settings (object or key/value rows)
/// └── services.yaml   # Service catalog
/// ```
///
/// # Example
///
/// ```no_run
/// use leave_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/org").unwrap();
/// println!("Default method: {}", loader.leave_pay_policy().default_method);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    settings: OrgSettings,
    services: Vec<ServiceDefinition>,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing (`ConfigNotFound`)
    /// - Any file contains invalid YAML or an undecodable setting (`ConfigParseError`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let settings = Self::load_yaml::<OrgSettings>(&path.join("settings.yaml"))?;
        let services = Self::load_yaml::<ServicesConfig>(&path.join("services.yaml"))?.services;

        Ok(Self { settings, services })
    }

    /// Builds a loader from already-parsed parts.
    pub fn from_parts(settings: OrgSettings, services: Vec<ServiceDefinition>) -> Self {
        Self { settings, services }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the normalized organization settings.
    pub fn settings(&self) -> &OrgSettings {
        &self.settings
    }

    /// Returns the service catalog.
    pub fn services(&self) -> &[ServiceDefinition] {
        &self.services
    }

    /// Gets a service by id.
    pub fn get_service(&self, id: &str) -> Option<&ServiceDefinition> {
        find_service(&self.services, id)
    }

    /// Returns the organization's leave pay policy with defaults applied.
    pub fn leave_pay_policy(&self) -> LeavePayPolicy {
        crate::calculation::resolve_leave_pay_policy(None, Some(&self.settings))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LeavePayMethod;
    use std::path::PathBuf;

    fn temp_config_dir(name: &str, settings: Option<&str>, services: Option<&str>) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "leave_engine_{}_{}",
            name,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        if let Some(content) = settings {
            fs::write(dir.join("settings.yaml"), content).unwrap();
        }
        if let Some(content) = services {
            fs::write(dir.join("services.yaml"), content).unwrap();
        }
        dir
    }

    const SERVICES: &str = "services:\n  - id: svc_45\n    name: Lesson\n    duration_minutes: 45\n";

    #[test]
    fn test_load_object_settings() {
        let dir = temp_config_dir(
            "object",
            Some("leave_pay_policy:\n  default_method: avg_daily\n  lookback_months: 6\n"),
            Some(SERVICES),
        );

        let loader = ConfigLoader::load(&dir).unwrap();
        let policy = loader.leave_pay_policy();
        assert_eq!(policy.default_method, LeavePayMethod::AvgDaily);
        assert_eq!(policy.lookback_months, 6);
        assert_eq!(loader.services().len(), 1);
        assert_eq!(
            loader.get_service("svc_45").unwrap().name.as_deref(),
            Some("Lesson")
        );

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_load_row_settings() {
        let dir = temp_config_dir(
            "rows",
            Some(
                "- key: leave_pay_policy\n  settings_value:\n    default_method: fixed_rate\n    fixed_rate_default: 100\n",
            ),
            Some(SERVICES),
        );

        let loader = ConfigLoader::load(&dir).unwrap();
        let policy = loader.leave_pay_policy();
        assert_eq!(policy.default_method, LeavePayMethod::FixedRate);
        assert_eq!(policy.fixed_rate_default, Some(rust_decimal::Decimal::from(100)));

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_missing_settings_file_is_config_not_found() {
        let dir = temp_config_dir("missing", None, Some(SERVICES));

        match ConfigLoader::load(&dir).unwrap_err() {
            EngineError::ConfigNotFound { path } => assert!(path.ends_with("settings.yaml")),
            other => panic!("Expected ConfigNotFound, got {:?}", other),
        }

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_invalid_yaml_is_parse_error() {
        let dir = temp_config_dir("invalid", Some("leave_pay_policy: [unclosed"), Some(SERVICES));

        match ConfigLoader::load(&dir).unwrap_err() {
            EngineError::ConfigParseError { path, .. } => assert!(path.ends_with("settings.yaml")),
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_default_loader_uses_system_policy() {
        let loader = ConfigLoader::default();
        assert_eq!(loader.leave_pay_policy(), LeavePayPolicy::default());
        assert!(loader.services().is_empty());
    }
}
