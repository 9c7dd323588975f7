//! Configuration of the reconciliation walk

use serde::{Deserialize, Serialize};

use crate::reconciliation::AccountFilter;
use crate::types::*;

/// Depth of the legacy chart of accounts
pub const DEFAULT_MAX_LEVELS: usize = 4;

/// Immutable walk configuration owned by the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationConfig {
    /// Number of hierarchy levels; the last one is the leaf level
    pub max_levels: usize,
    /// One filter template per level
    pub filters: Vec<AccountFilter>,
}

impl Default for ReconciliationConfig {
    fn default() -> Self {
        Self {
            max_levels: DEFAULT_MAX_LEVELS,
            filters: AccountFilter::defaults(),
        }
    }
}

impl ReconciliationConfig {
    /// Parse a configuration from TOML
    ///
    /// ```toml
    /// max_levels = 2
    ///
    /// [[filters]]
    /// group_key_range = { start = 5, end = 15 }
    ///
    /// [[filters]]
    /// group_key_range = { start = 5, end = 25 }
    /// detail_key_range = { start = 5, end = 15 }
    /// ```
    pub fn from_toml_str(input: &str) -> ReconciliationResult<Self> {
        let config: Self = toml::from_str(input)
            .map_err(|e| ReconciliationError::Configuration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every level has a filter template
    pub fn validate(&self) -> ReconciliationResult<()> {
        if self.max_levels == 0 {
            return Err(ReconciliationError::Configuration(
                "max_levels must be at least 1".to_string(),
            ));
        }

        if self.filters.len() < self.max_levels {
            return Err(ReconciliationError::Configuration(format!(
                "{} levels configured but only {} filter templates",
                self.max_levels,
                self.filters.len()
            )));
        }

        if let Some(level) = self.filters.iter().position(|f| f.parent_key.is_some()) {
            return Err(ReconciliationError::Configuration(format!(
                "filter template for level {} must not carry a parent key",
                level
            )));
        }

        Ok(())
    }

    /// Index of the deepest level
    pub fn leaf_level(&self) -> usize {
        self.max_levels - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ReconciliationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_levels, 4);
        assert_eq!(config.leaf_level(), 3);
    }

    #[test]
    fn test_parse_toml() {
        let config = ReconciliationConfig::from_toml_str(
            r#"
            max_levels = 2

            [[filters]]
            group_key_range = { start = 5, end = 15 }

            [[filters]]
            group_key_range = { start = 5, end = 25 }
            detail_key_range = { start = 5, end = 15 }
            "#,
        )
        .unwrap();

        assert_eq!(config.max_levels, 2);
        assert_eq!(config.filters, AccountFilter::defaults()[..2].to_vec());
    }

    #[test]
    fn test_missing_filter_template_is_rejected() {
        let config = ReconciliationConfig {
            max_levels: 5,
            filters: AccountFilter::defaults(),
        };
        assert!(matches!(
            config.validate(),
            Err(ReconciliationError::Configuration(_))
        ));
    }

    #[test]
    fn test_zero_levels_is_rejected() {
        let config = ReconciliationConfig {
            max_levels: 0,
            filters: Vec::new(),
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_toml_is_a_configuration_error() {
        let err = ReconciliationConfig::from_toml_str("max_levels = \"four\"").unwrap_err();
        assert!(matches!(err, ReconciliationError::Configuration(_)));
    }
}
