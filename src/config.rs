// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::LedgerError;
use crate::ledger::DEFAULT_TOP_N;

pub const CONFIG_ENV: &str = "SAVVY_SAVER_CONFIG";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub user: String,
    pub database_path: Option<PathBuf>,
    pub log_filter: String,
    pub breakdown_top_n: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            user: "default".into(),
            database_path: None,
            log_filter: "warn".into(),
            breakdown_top_n: DEFAULT_TOP_N,
        }
    }
}

impl AppConfig {
    /// Replaces the configured user, trimmed. A blank id is rejected.
    pub fn set_user(&mut self, user: &str) -> Result<()> {
        let user = user.trim();
        if user.is_empty() {
            return Err(LedgerError::BlankUser.into());
        }
        self.user = user.to_string();
        Ok(())
    }

    pub fn database_path(&self) -> Result<PathBuf> {
        match &self.database_path {
            Some(p) => Ok(p.clone()),
            None => crate::db::default_db_path(),
        }
    }
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let mut cfg: AppConfig = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse TOML from config file {}", path.display()))?;
    let user = cfg.user.clone();
    cfg.set_user(&user)
        .with_context(|| format!("Invalid user in config file {}", path.display()))?;
    Ok(cfg)
}

/// Loads `$SAVVY_SAVER_CONFIG`, else `config.toml` in the platform config
/// dir. A missing file yields the defaults.
pub fn load_app_configuration() -> Result<AppConfig> {
    let path = match std::env::var_os(CONFIG_ENV) {
        Some(p) => PathBuf::from(p),
        None => crate::db::project_dirs()?.config_dir().join("config.toml"),
    };
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let cfg = load_config(&path)?;
    tracing::debug!(path = %path.display(), user = %cfg.user, "loaded configuration");
    Ok(cfg)
}
