// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Runtime configuration.
//!
//! Precedence: command-line flag, environment variable (both handled by clap),
//! then the persisted `settings` table, then built-in defaults. The database
//! path cannot come from `settings` because the settings live in the database.

use rusqlite::Connection;
use std::path::PathBuf;

use crate::auth::AuthBackend;
use crate::auth::identity_toolkit::DEFAULT_BASE_URL;
use crate::error::{AppError, AppResult};
use crate::utils::{get_setting, set_setting};

pub const KEY_AUTH_BACKEND: &str = "auth.backend";
pub const KEY_API_KEY: &str = "auth.api_key";
pub const KEY_AUTH_URL: &str = "auth.base_url";
pub const KEY_REPORTS_DIR: &str = "reports.dir";

pub const KNOWN_KEYS: &[&str] = &[KEY_AUTH_BACKEND, KEY_API_KEY, KEY_AUTH_URL, KEY_REPORTS_DIR];

/// Values given explicitly on the command line or through the environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub db_path: Option<PathBuf>,
    pub auth_backend: Option<String>,
    pub api_key: Option<String>,
    pub auth_base_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub db_path: PathBuf,
    pub auth_backend: AuthBackend,
    pub api_key: Option<String>,
    pub auth_base_url: String,
    pub reports_dir: Option<PathBuf>,
}

impl Config {
    pub fn db_path(overrides: &ConfigOverrides) -> AppResult<PathBuf> {
        match &overrides.db_path {
            Some(p) => Ok(p.clone()),
            None => crate::db::default_db_path(),
        }
    }

    pub fn resolve(overrides: &ConfigOverrides, conn: &Connection) -> AppResult<Config> {
        let db_path = Config::db_path(overrides)?;

        let backend_raw = match &overrides.auth_backend {
            Some(b) => Some(b.clone()),
            None => get_setting(conn, KEY_AUTH_BACKEND)?,
        };
        let auth_backend = match backend_raw {
            Some(b) => b.parse()?,
            None => AuthBackend::Local,
        };

        let api_key = match &overrides.api_key {
            Some(k) => Some(k.clone()),
            None => get_setting(conn, KEY_API_KEY)?,
        }
        .filter(|k| !k.trim().is_empty());

        let auth_base_url = match &overrides.auth_base_url {
            Some(u) => u.clone(),
            None => get_setting(conn, KEY_AUTH_URL)?.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        };

        let reports_dir = get_setting(conn, KEY_REPORTS_DIR)?.map(PathBuf::from);

        let cfg = Config {
            db_path,
            auth_backend,
            api_key,
            auth_base_url,
            reports_dir,
        };
        tracing::debug!(backend = %cfg.auth_backend, db = %cfg.db_path.display(), "configuration resolved");
        Ok(cfg)
    }
}

/// Validates and stores one persisted setting.
pub fn set_value(conn: &Connection, key: &str, value: &str) -> AppResult<()> {
    let value = value.trim();
    match key {
        KEY_AUTH_BACKEND => {
            let backend: AuthBackend = value.parse()?;
            set_setting(conn, key, backend.as_str())
        }
        KEY_AUTH_URL => {
            if !(value.starts_with("http://") || value.starts_with("https://")) {
                return Err(AppError::Config(format!("URL inválida '{}'", value)));
            }
            set_setting(conn, key, value)
        }
        KEY_API_KEY | KEY_REPORTS_DIR => set_setting(conn, key, value),
        other => Err(AppError::Config(format!(
            "chave desconhecida '{}' (conhecidas: {})",
            other,
            KNOWN_KEYS.join(", ")
        ))),
    }
}

pub fn get_value(conn: &Connection, key: &str) -> AppResult<Option<String>> {
    if !KNOWN_KEYS.contains(&key) {
        return Err(AppError::Config(format!("chave desconhecida '{}'", key)));
    }
    get_setting(conn, key)
}
