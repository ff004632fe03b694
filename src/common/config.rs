//! Configuration schema, defaults, and layered loading.
//!
//! Precedence: defaults < config file < environment

use anyhow::{ensure, Context, Result};
use directories::ProjectDirs;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub fn config_path() -> PathBuf {
    ProjectDirs::from("", "", "updrop")
        .map(|p| p.config_dir().join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("updrop.toml"))
}

/// Options recognized by the upload queue.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UploaderConfig {
    /// Comma-separated MIME/extension patterns, e.g. `"image/*,.pdf"`.
    /// Unset means every type is admitted.
    pub accept: Option<String>,
    /// Per-file size cap in bytes.
    pub max_file_size: Option<u64>,
    /// Cumulative size cap for a single admission batch, in bytes.
    pub max_total_size: Option<u64>,
    /// Allow more than one file per drag-and-drop batch.
    pub multiple: bool,
    /// Skip image preview generation.
    pub no_thumbnails: bool,
    /// Freeze all user-driven queue mutations.
    pub disable: bool,
}

impl UploaderConfig {
    /// Parsed form of `accept`; empty when no patterns are configured.
    pub fn accept_patterns(&self) -> Vec<AcceptPattern> {
        self.accept
            .as_deref()
            .map(AcceptPattern::parse_list)
            .unwrap_or_default()
    }

    /// Rejects configurations the queue cannot honor.
    pub fn validate(&self) -> Result<()> {
        if let Some(max) = self.max_file_size {
            ensure!(max > 0, "Invalid config: max_file_size must be > 0");
        }
        if let Some(max) = self.max_total_size {
            ensure!(max > 0, "Invalid config: max_total_size must be > 0");
        }
        if self.accept.is_some() {
            ensure!(
                !self.accept_patterns().is_empty(),
                "Invalid config: accept contains no usable patterns"
            );
        }
        Ok(())
    }
}

/// One normalized `accept` pattern. Matches a candidate when its MIME type
/// starts with the pattern or its filename ends with it, case-insensitively.
/// A `"type/*"` wildcard is stored as the `"TYPE/"` prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptPattern(String);

impl AcceptPattern {
    /// Splits a comma-separated `accept` string into normalized patterns.
    /// Blank segments are skipped.
    pub fn parse_list(accept: &str) -> Vec<AcceptPattern> {
        accept
            .split(',')
            .filter_map(|raw| {
                let mut pattern = raw.trim().to_string();
                if pattern.ends_with("/*") {
                    pattern.pop();
                }
                if pattern.is_empty() {
                    None
                } else {
                    Some(AcceptPattern(pattern.to_uppercase()))
                }
            })
            .collect()
    }

    pub fn matches(&self, mime_type: &str, file_name: &str) -> bool {
        mime_type.to_uppercase().starts_with(&self.0)
            || file_name.to_uppercase().ends_with(&self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Loads config from defaults/file/env.
pub fn load_config() -> Result<UploaderConfig> {
    let path = config_path();

    let config: UploaderConfig = Figment::new()
        .merge(Serialized::defaults(UploaderConfig::default()))
        .merge(Toml::file(&path))
        .merge(Env::prefixed("UPDROP_"))
        .extract()
        .context("Failed to load configuration")?;

    config.validate()?;

    Ok(config)
}
