// Planner configuration read from the environment

use std::path::PathBuf;
use thiserror::Error;

use crate::catalog::CatalogError;
use crate::catalog_data::{CatalogData, CatalogFormat};

pub const CATALOG_ENV: &str = "WANDERPLAN_CATALOG";
pub const CATALOG_FORMAT_ENV: &str = "WANDERPLAN_CATALOG_FORMAT";
pub const LOG_ENV: &str = "WANDERPLAN_LOG";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Log filter cannot be empty")]
    EmptyLogFilter,

    #[error("Restart keyword cannot be empty")]
    EmptyRestartKeyword,

    #[error("Unknown catalog format: {0} (expected json or xml)")]
    UnknownFormat(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlannerConfig {
    // None loads the built-in seed catalog
    pub catalog_path: Option<PathBuf>,
    // None infers the format from the file extension
    pub catalog_format: Option<CatalogFormat>,
    // tracing EnvFilter directives
    pub log_filter: String,
    // Typed at any prompt to start over
    pub restart_keyword: String,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            catalog_path: None,
            catalog_format: None,
            log_filter: "warn".to_string(),
            restart_keyword: "x".to_string(),
        }
    }
}

impl PlannerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    // Build from any key/value source; unset or blank values keep their defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(path) = lookup(CATALOG_ENV) {
            config.catalog_path = Some(PathBuf::from(path.trim()));
        }

        if let Some(format) = lookup(CATALOG_FORMAT_ENV) {
            let parsed =
                CatalogFormat::from_name(&format).ok_or_else(|| ConfigError::UnknownFormat(format.clone()))?;
            config.catalog_format = Some(parsed);
        }

        if let Some(filter) = lookup(LOG_ENV) {
            config.log_filter = filter;
        }

        config.validate()?;
        Ok(config)
    }

    // The configured catalog file, or the built-in seed when none is set
    pub fn load_catalog(&self) -> Result<CatalogData, CatalogError> {
        match &self.catalog_path {
            Some(path) => CatalogData::load(path, self.catalog_format),
            None => CatalogData::builtin(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.log_filter.trim().is_empty() {
            return Err(ConfigError::EmptyLogFilter);
        }
        if self.restart_keyword.trim().is_empty() {
            return Err(ConfigError::EmptyRestartKeyword);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use test_case::test_case;

    fn config_from(pairs: &[(&str, &str)]) -> Result<PlannerConfig, ConfigError> {
        let values: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        PlannerConfig::from_lookup(|key| values.get(key).cloned())
    }

    #[test]
    fn test_defaults_without_environment() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config, PlannerConfig::default());
        assert_eq!(config.log_filter, "warn");
        assert_eq!(config.restart_keyword, "x");
        assert!(config.catalog_path.is_none());
    }

    #[test]
    fn test_reads_every_variable() {
        let config = config_from(&[
            (CATALOG_ENV, "/srv/catalog.data"),
            (CATALOG_FORMAT_ENV, "XML"),
            (LOG_ENV, "wanderplan=debug"),
        ])
        .unwrap();

        assert_eq!(config.catalog_path, Some(PathBuf::from("/srv/catalog.data")));
        assert_eq!(config.catalog_format, Some(CatalogFormat::Xml));
        assert_eq!(config.log_filter, "wanderplan=debug");
    }

    #[test]
    fn test_blank_values_keep_defaults() {
        let config = config_from(&[(CATALOG_ENV, "  "), (LOG_ENV, "")]).unwrap();
        assert_eq!(config, PlannerConfig::default());
    }

    #[test]
    fn test_missing_catalog_file() {
        let config = PlannerConfig {
            catalog_path: Some(PathBuf::from("/nonexistent/wanderplan/catalog.json")),
            ..PlannerConfig::default()
        };
        assert!(matches!(config.load_catalog(), Err(CatalogError::IoError(_))));
    }

    #[test]
    fn test_unknown_format() {
        let result = config_from(&[(CATALOG_FORMAT_ENV, "yaml")]);
        assert_eq!(result, Err(ConfigError::UnknownFormat("yaml".to_string())));
    }

    #[test_case("", "x", Err(ConfigError::EmptyLogFilter); "#1 empty log filter")]
    #[test_case("info", " ", Err(ConfigError::EmptyRestartKeyword); "#2 blank restart keyword")]
    #[test_case("info", "restart", Ok(()); "#3 valid")]
    fn test_validate(log_filter: &str, restart_keyword: &str, expected: Result<(), ConfigError>) {
        let config = PlannerConfig {
            log_filter: log_filter.to_string(),
            restart_keyword: restart_keyword.to_string(),
            ..PlannerConfig::default()
        };
        assert_eq!(config.validate(), expected);
    }
}
