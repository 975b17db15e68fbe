// SPDX-FileCopyrightText: 2026 Mesa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layered configuration loading with Figment.
//!
//! Lookup order: `/etc/mesa/mesa.toml` < `~/.config/mesa/mesa.toml` <
//! `./mesa.toml` < `MESA_*` environment variables.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::MesaConfig;

/// Top-level sections, used to turn `MESA_<SECTION>_<KEY>` into `section.key`.
const SECTIONS: &[&str] = &[
    "assistant",
    "openrouter",
    "knowledge",
    "reservations",
    "notifications",
];

/// Candidate config files, lowest priority first.
pub fn config_file_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from("/etc/mesa/mesa.toml")];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("mesa").join("mesa.toml"));
    }
    paths.push(PathBuf::from("mesa.toml"));
    paths
}

/// Load configuration from the standard hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `OPENROUTER_API_KEY` (the variable the embedding job also reads)
/// 3. Config files from [`config_file_paths`]
/// 4. `MESA_*` environment variables
pub fn load_config() -> Result<MesaConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no files, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<MesaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(MesaConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from an explicit file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<MesaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(MesaConfig::default()))
        .merge(api_key_fallback())
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used for standard loading, before extraction.
pub fn build_figment() -> Figment {
    let mut figment = Figment::new()
        .merge(Serialized::defaults(MesaConfig::default()))
        .merge(api_key_fallback());
    for path in config_file_paths() {
        figment = figment.merge(Toml::file(path));
    }
    figment.merge(env_provider())
}

/// `OPENROUTER_API_KEY` maps onto `openrouter.api_key`.
fn api_key_fallback() -> Env {
    Env::raw()
        .only(&["OPENROUTER_API_KEY"])
        .map(|_| "openrouter.api_key".into())
}

/// `MESA_` prefixed variables, mapped section by section.
///
/// Only the first underscore after a known section name becomes a dot, so
/// `MESA_OPENROUTER_API_KEY` maps to `openrouter.api_key`, not
/// `openrouter.api.key`.
fn env_provider() -> Env {
    Env::prefixed("MESA_").map(|key| map_env_key(key.as_str()).into())
}

pub(crate) fn map_env_key(key: &str) -> String {
    for section in SECTIONS {
        if let Some(rest) = key
            .strip_prefix(section)
            .and_then(|rest| rest.strip_prefix('_'))
        {
            return format!("{section}.{rest}");
        }
    }
    key.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_keys_map_to_sections() {
        assert_eq!(map_env_key("openrouter_api_key"), "openrouter.api_key");
        assert_eq!(
            map_env_key("assistant_history_max_pairs"),
            "assistant.history_max_pairs"
        );
        assert_eq!(map_env_key("reservations_table_limit"), "reservations.table_limit");
        assert_eq!(map_env_key("unknown_key"), "unknown_key");
    }

    #[test]
    fn local_file_has_highest_file_priority() {
        let paths = config_file_paths();
        assert_eq!(paths.last(), Some(&PathBuf::from("mesa.toml")));
        assert_eq!(paths.first(), Some(&PathBuf::from("/etc/mesa/mesa.toml")));
    }
}
