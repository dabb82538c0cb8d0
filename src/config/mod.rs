pub mod toml_config;

use crate::core::input::StepConfig;
use crate::core::store::DEFAULT_DATA_FILE;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};
use toml_config::TomlConfig;

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "cable-inventory")]
#[command(version, about = "Count network cable stock by length and color")]
pub struct CliConfig {
    #[arg(long, help = "Inventory JSON file, loaded at start and written on save")]
    pub file: Option<String>,

    #[arg(long, help = "Optional TOML settings file")]
    pub config: Option<String>,

    #[arg(long, help = "Write logs to this file")]
    pub log_file: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

/// 命令列與設定檔合併後的最終設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub data_file: String,
    pub steps: StepConfig,
    pub log_file: Option<String>,
    pub log_level: Option<String>,
    pub verbose: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_file: DEFAULT_DATA_FILE.to_string(),
            steps: StepConfig::default(),
            log_file: None,
            log_level: None,
            verbose: false,
        }
    }
}

impl Settings {
    /// 命令列參數優先於設定檔
    pub fn resolve(cli: &CliConfig) -> Result<Self> {
        let file_config = match &cli.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };
        file_config.validate()?;
        Ok(Self::merge(cli, &file_config))
    }

    pub fn merge(cli: &CliConfig, file_config: &TomlConfig) -> Self {
        let defaults = Self::default();
        Self {
            data_file: cli
                .file
                .clone()
                .or_else(|| file_config.data_file().map(str::to_string))
                .unwrap_or(defaults.data_file),
            steps: StepConfig {
                small_step: file_config.small_step().unwrap_or(defaults.steps.small_step),
                large_step: file_config.large_step().unwrap_or(defaults.steps.large_step),
            },
            log_file: cli
                .log_file
                .clone()
                .or_else(|| file_config.log_file().map(str::to_string)),
            log_level: file_config.log_level().map(str::to_string),
            verbose: cli.verbose,
        }
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validation::validate_path("data_file", &self.data_file)?;
        validation::validate_positive_number("small_step", self.steps.small_step, 1)?;
        validation::validate_positive_number("large_step", self.steps.large_step, 1)?;
        validation::validate_not_greater(
            "small_step",
            self.steps.small_step,
            "large_step",
            self.steps.large_step,
        )?;
        if let Some(path) = &self.log_file {
            validation::validate_path("log_file", path)?;
        }
        Ok(())
    }
}
