// SPDX-FileCopyrightText: 2026 Fitwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs.
//!
//! Every struct rejects unknown keys so typos surface at startup.

use serde::{Deserialize, Serialize};

/// Top-level configuration. All sections are optional.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FitwiseConfig {
    #[serde(default)]
    pub app: AppConfig,

    /// Record store and data directory settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Embedding model and retrieval settings.
    #[serde(default)]
    pub knowledge: KnowledgeConfig,

    /// Assistant facade settings.
    #[serde(default)]
    pub assistant: AssistantConfig,
}

/// Process-wide settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Storage locations.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite record store.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Directory holding corpus files and the cached embedding model.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            data_dir: default_data_dir(),
        }
    }
}

fn default_data_dir() -> String {
    dirs::data_dir()
        .map(|p| p.join("fitwise"))
        .unwrap_or_else(|| std::path::PathBuf::from(".fitwise"))
        .to_string_lossy()
        .into_owned()
}

fn default_database_path() -> String {
    std::path::Path::new(&default_data_dir())
        .join("fitwise.db")
        .to_string_lossy()
        .into_owned()
}

/// Embedding model and retrieval settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct KnowledgeConfig {
    /// Pinned sentence-embedding model. Used as the cache directory name.
    #[serde(default = "default_model_name")]
    pub model_name: String,

    /// Download URL for the ONNX model weights.
    #[serde(default = "default_model_url")]
    pub model_url: String,

    /// Download URL for the matching `tokenizer.json`.
    #[serde(default = "default_tokenizer_url")]
    pub tokenizer_url: String,

    /// Number of passages returned when a caller does not ask for a count.
    #[serde(default = "default_top_k")]
    pub default_top_k: usize,

    /// Optional text file of static facts, one per line, indexed alongside
    /// the user's own records.
    #[serde(default)]
    pub fact_base_path: Option<String>,
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            model_name: default_model_name(),
            model_url: default_model_url(),
            tokenizer_url: default_tokenizer_url(),
            default_top_k: default_top_k(),
            fact_base_path: None,
        }
    }
}

fn default_model_name() -> String {
    "all-MiniLM-L6-v2".to_string()
}

fn default_model_url() -> String {
    "https://huggingface.co/onnx-community/all-MiniLM-L6-v2-ONNX/resolve/main/onnx/model_quantized.onnx"
        .to_string()
}

fn default_tokenizer_url() -> String {
    "https://huggingface.co/sentence-transformers/all-MiniLM-L6-v2/resolve/main/tokenizer.json"
        .to_string()
}

fn default_top_k() -> usize {
    3
}

/// Assistant facade settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AssistantConfig {
    /// Hand retrieved text to an external generator instead of returning it verbatim.
    #[serde(default)]
    pub generation_enabled: bool,

    /// Credential for the external generator. Required when generation is enabled.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model identifier passed to the external generator.
    #[serde(default = "default_generation_model")]
    pub generation_model: String,

    /// How far back the activity checker looks for a logged workout.
    #[serde(default = "default_activity_window_days")]
    pub activity_window_days: u32,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            generation_enabled: false,
            api_key: None,
            generation_model: default_generation_model(),
            activity_window_days: default_activity_window_days(),
        }
    }
}

fn default_generation_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_activity_window_days() -> u32 {
    7
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let config = FitwiseConfig::default();
        assert_eq!(config.app.log_level, "info");
        assert_eq!(config.knowledge.default_top_k, 3);
        assert!(config.knowledge.fact_base_path.is_none());
        assert!(!config.assistant.generation_enabled);
        assert!(config.storage.database_path.ends_with("fitwise.db"));
    }

    #[test]
    fn deny_unknown_section_fields() {
        let result = toml::from_str::<FitwiseConfig>("[storage]\ndatabase = \"x\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let config: FitwiseConfig =
            toml::from_str("[assistant]\ngeneration_enabled = true\n").unwrap();
        assert!(config.assistant.generation_enabled);
        assert_eq!(config.assistant.activity_window_days, 7);
    }
}
