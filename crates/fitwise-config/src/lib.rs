// SPDX-FileCopyrightText: 2026 Fitwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration for Fitwise.
//!
//! TOML files are merged over compiled defaults following the XDG hierarchy,
//! `FITWISE_*` environment variables override them, and the result is
//! validated before use. Failures come back as miette diagnostics.

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

pub use diagnostic::{render_errors, ConfigError};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::FitwiseConfig;

/// Load configuration from the XDG hierarchy and validate it.
pub fn load_and_validate() -> Result<FitwiseConfig, Vec<ConfigError>> {
    match loader::load_config() {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => {
            let sources = collect_toml_sources();
            Err(diagnostic::figment_to_config_errors(err, &sources))
        }
    }
}

/// Load configuration from an explicit file path and validate it.
pub fn load_and_validate_path(path: &std::path::Path) -> Result<FitwiseConfig, Vec<ConfigError>> {
    match loader::load_config_from_path(path) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => {
            let sources = std::fs::read_to_string(path)
                .map(|content| vec![(path.display().to_string(), content)])
                .unwrap_or_default();
            Err(diagnostic::figment_to_config_errors(err, &sources))
        }
    }
}

/// Load configuration from a TOML string and validate it.
pub fn load_and_validate_str(toml_content: &str) -> Result<FitwiseConfig, Vec<ConfigError>> {
    match loader::load_config_from_str(toml_content) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => {
            let sources = vec![("<inline>".to_string(), toml_content.to_string())];
            Err(diagnostic::figment_to_config_errors(err, &sources))
        }
    }
}

/// Reads every config file that exists so errors can point into it.
fn collect_toml_sources() -> Vec<(String, String)> {
    loader::config_paths()
        .into_iter()
        .filter_map(|path| {
            std::fs::read_to_string(&path)
                .ok()
                .map(|content| (path.display().to_string(), content))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_config_overrides_defaults() {
        let config = load_and_validate_str(
            r#"
[knowledge]
default_top_k = 5

[assistant]
activity_window_days = 14
"#,
        )
        .unwrap();
        assert_eq!(config.knowledge.default_top_k, 5);
        assert_eq!(config.assistant.activity_window_days, 14);
        assert_eq!(config.knowledge.model_name, "all-MiniLM-L6-v2");
    }

    #[test]
    fn unknown_key_reports_suggestion() {
        let errors = load_and_validate_str("[knowledge]\nmodel_nme = \"x\"\n").unwrap_err();
        assert!(errors.iter().any(|e| matches!(
            e,
            ConfigError::UnknownKey { suggestion: Some(s), .. } if s == "model_name"
        )));
    }

    #[test]
    fn invalid_values_are_collected() {
        let errors = load_and_validate_str(
            r#"
[knowledge]
default_top_k = 0
model_name = ""
"#,
        )
        .unwrap_err();
        assert_eq!(errors.len(), 2);
    }
}
