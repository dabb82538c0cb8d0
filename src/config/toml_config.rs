use crate::utils::error::{InventoryError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    pub inventory: Option<InventorySection>,
    pub controls: Option<ControlsSection>,
    pub logging: Option<LoggingSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InventorySection {
    pub data_file: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ControlsSection {
    pub small_step: Option<u64>,
    pub large_step: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingSection {
    pub log_file: Option<String>,
    pub level: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入設定
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| InventoryError::ConfigError {
            message: format!("cannot read settings file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析設定
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| InventoryError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    pub fn data_file(&self) -> Option<&str> {
        self.inventory.as_ref()?.data_file.as_deref()
    }

    pub fn small_step(&self) -> Option<u64> {
        self.controls.as_ref()?.small_step
    }

    pub fn large_step(&self) -> Option<u64> {
        self.controls.as_ref()?.large_step
    }

    pub fn log_file(&self) -> Option<&str> {
        self.logging.as_ref()?.log_file.as_deref()
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref()?.level.as_deref()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(path) = self.data_file() {
            validation::validate_path("inventory.data_file", path)?;
        }
        if let Some(step) = self.small_step() {
            validation::validate_positive_number("controls.small_step", step, 1)?;
        }
        if let Some(step) = self.large_step() {
            validation::validate_positive_number("controls.large_step", step, 1)?;
        }
        if let Some(path) = self.log_file() {
            validation::validate_path("logging.log_file", path)?;
        }
        if let Some(level) = self.log_level() {
            validation::validate_one_of("logging.level", level, &LOG_LEVELS)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_settings_file() {
        let config = TomlConfig::from_toml_str(
            r#"
            [inventory]
            data_file = "stock/cables.json"

            [controls]
            small_step = 2
            large_step = 20

            [logging]
            log_file = "inventory.log"
            level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.data_file(), Some("stock/cables.json"));
        assert_eq!(config.small_step(), Some(2));
        assert_eq!(config.large_step(), Some(20));
        assert_eq!(config.log_file(), Some("inventory.log"));
        assert_eq!(config.log_level(), Some("debug"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_settings_file_is_valid() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config.data_file(), None);
        assert_eq!(config.small_step(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = TomlConfig::from_toml_str("[controls]\nhuge_step = 100\n").unwrap_err();
        assert!(matches!(err, InventoryError::ConfigError { .. }));
    }

    #[test]
    fn test_invalid_values_fail_validation() {
        let zero_step = TomlConfig::from_toml_str("[controls]\nsmall_step = 0\n").unwrap();
        assert!(zero_step.validate().is_err());

        let bad_level = TomlConfig::from_toml_str("[logging]\nlevel = \"loud\"\n").unwrap();
        assert!(bad_level.validate().is_err());

        let empty_path = TomlConfig::from_toml_str("[inventory]\ndata_file = \"\"\n").unwrap();
        assert!(empty_path.validate().is_err());
    }

    #[test]
    fn test_missing_settings_file() {
        let err = TomlConfig::from_file("/nonexistent/inventory.toml").unwrap_err();
        assert!(matches!(err, InventoryError::ConfigError { .. }));
    }
}
