// SPDX-FileCopyrightText: 2026 Fitwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered merging.
//!
//! Lookup order: `/etc/fitwise/fitwise.toml`, then
//! `~/.config/fitwise/fitwise.toml`, then `./fitwise.toml`, then
//! `FITWISE_*` environment variables. Later layers win.

#![allow(clippy::result_large_err)] // figment::Error is external

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::FitwiseConfig;

/// Config sections addressable from environment variables.
const ENV_SECTIONS: [&str; 4] = ["app", "storage", "knowledge", "assistant"];

/// Candidate config files, lowest precedence first.
pub fn config_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from("/etc/fitwise/fitwise.toml")];
    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("fitwise/fitwise.toml"));
    }
    paths.push(PathBuf::from("fitwise.toml"));
    paths
}

/// Load configuration from the standard hierarchy with env var overrides.
pub fn load_config() -> Result<FitwiseConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string over compiled defaults.
pub fn load_config_from_str(toml_content: &str) -> Result<FitwiseConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(FitwiseConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from one file with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<FitwiseConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(FitwiseConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// The full layered Figment before extraction.
pub fn build_figment() -> Figment {
    config_paths().into_iter().fold(
        Figment::new().merge(Serialized::defaults(FitwiseConfig::default())),
        |figment, path| figment.merge(Toml::file(path)),
    )
    .merge(env_provider())
}

/// Maps `FITWISE_<SECTION>_<KEY>` onto `<section>.<key>`.
///
/// Only the section prefix is split so keys containing underscores
/// (`database_path`, `default_top_k`) survive intact. Figment hands the
/// key over in its original case.
fn env_provider() -> Env {
    Env::prefixed("FITWISE_").map(|key| {
        let key_str = key.as_str().to_ascii_lowercase();
        ENV_SECTIONS
            .iter()
            .find_map(|section| {
                key_str
                    .strip_prefix(section)
                    .and_then(|rest| rest.strip_prefix('_'))
                    .map(|rest| format!("{section}.{rest}"))
            })
            .unwrap_or(key_str)
            .into()
    })
}
