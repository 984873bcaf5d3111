// SPDX-FileCopyrightText: 2026 Fitwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization checks serde attributes cannot express.

use crate::diagnostic::ConfigError;
use crate::model::FitwiseConfig;

/// Validate a configuration, collecting every problem rather than stopping
/// at the first.
pub fn validate_config(config: &FitwiseConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let mut fail = |message: String| errors.push(ConfigError::Validation { message });

    if config.storage.database_path.trim().is_empty() {
        fail("storage.database_path must not be empty".to_string());
    }
    if config.storage.data_dir.trim().is_empty() {
        fail("storage.data_dir must not be empty".to_string());
    }
    if config.knowledge.model_name.trim().is_empty() {
        fail("knowledge.model_name must not be empty".to_string());
    }
    if config.knowledge.default_top_k == 0 {
        fail("knowledge.default_top_k must be at least 1".to_string());
    }
    if config.assistant.activity_window_days == 0 {
        fail("assistant.activity_window_days must be at least 1".to_string());
    }
    if let Some(path) = &config.knowledge.fact_base_path {
        if path.trim().is_empty() {
            fail("knowledge.fact_base_path must not be empty when set".to_string());
        }
    }
    if !matches!(
        config.app.log_level.as_str(),
        "trace" | "debug" | "info" | "warn" | "error"
    ) {
        fail(format!(
            "app.log_level `{}` is not one of trace, debug, info, warn, error",
            config.app.log_level
        ));
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn has_message(errors: &[ConfigError], needle: &str) -> bool {
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains(needle)))
    }

    #[test]
    fn default_config_validates() {
        assert!(validate_config(&FitwiseConfig::default()).is_ok());
    }

    #[test]
    fn empty_database_path_fails() {
        let mut config = FitwiseConfig::default();
        config.storage.database_path = "  ".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_message(&errors, "database_path"));
    }

    #[test]
    fn unknown_log_level_fails() {
        let mut config = FitwiseConfig::default();
        config.app.log_level = "loud".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_message(&errors, "log_level"));
    }

    #[test]
    fn all_errors_are_reported() {
        let mut config = FitwiseConfig::default();
        config.knowledge.default_top_k = 0;
        config.assistant.activity_window_days = 0;
        config.knowledge.fact_base_path = Some(String::new());
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
