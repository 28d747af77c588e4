use crate::config::{DEFAULT_CELL_SIZE, DEFAULT_SIZE};
use crate::core::ConfigProvider;
use crate::utils::error::{Result, TableError};
use crate::utils::validation::{validate_log_level, validate_table_dimensions, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Optional run settings file. Every section and key may be omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub table: Option<TableConfig>,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableConfig {
    pub size: Option<u32>,
    pub cell_size: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MonitoringConfig {
    #[serde(default)]
    pub enabled: bool,
    pub log_level: Option<String>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// Parses TOML after replacing `${VAR}` placeholders from the environment.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| TableError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Unknown variables are left untouched.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| TableError::ConfigError {
            message: format!("invalid placeholder pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn table_size(&self) -> Option<u32> {
        self.table.as_ref().and_then(|t| t.size)
    }

    pub fn table_cell_size(&self) -> Option<u32> {
        self.table.as_ref().and_then(|t| t.cell_size)
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }

    pub fn log_level(&self) -> Option<&str> {
        self.monitoring
            .as_ref()
            .and_then(|m| m.log_level.as_deref())
    }
}

impl ConfigProvider for TomlConfig {
    fn size(&self) -> u32 {
        self.table_size().unwrap_or(DEFAULT_SIZE)
    }

    fn cell_size(&self) -> u32 {
        self.table_cell_size().unwrap_or(DEFAULT_CELL_SIZE)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_table_dimensions(self.size(), self.cell_size())?;
        if let Some(level) = self.log_level() {
            validate_log_level("monitoring.log_level", level)?;
        }
        Ok(())
    }
}
