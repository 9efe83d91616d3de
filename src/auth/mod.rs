// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Email/password authentication.
//!
//! Two providers implement [`AuthProvider`]: [`IdentityToolkitAuth`] talks to the
//! Firebase Identity Toolkit REST API, [`LocalAuth`] keeps Argon2 password hashes
//! in the local database for offline use.

pub mod identity_toolkit;
pub mod local;
pub mod session;

use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::User;

pub use identity_toolkit::IdentityToolkitAuth;
pub use local::LocalAuth;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuthBackend {
    Local,
    IdentityToolkit,
}

impl AuthBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthBackend::Local => "local",
            AuthBackend::IdentityToolkit => "identity-toolkit",
        }
    }
}

impl fmt::Display for AuthBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthBackend {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "local" => Ok(AuthBackend::Local),
            "identity-toolkit" | "firebase" => Ok(AuthBackend::IdentityToolkit),
            other => Err(AppError::Config(format!(
                "backend de autenticação desconhecido '{}' (use local ou firebase)",
                other
            ))),
        }
    }
}

/// A signed-in user plus whatever tokens the provider handed out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthSession {
    pub user: User,
    pub backend: AuthBackend,
    pub id_token: Option<String>,
    pub refresh_token: Option<String>,
}

pub trait AuthProvider {
    fn backend(&self) -> AuthBackend;

    fn sign_in(&self, email: &str, password: &str) -> AppResult<AuthSession>;

    fn sign_up(&self, display_name: &str, email: &str, password: &str) -> AppResult<AuthSession>;

    fn send_email_verification(&self, session: &AuthSession) -> AppResult<()>;

    fn send_password_reset(&self, email: &str) -> AppResult<()>;

    /// Fresh copy of the user record (e.g. to pick up a verified e-mail).
    fn current_user(&self, session: &AuthSession) -> AppResult<User>;

    fn update_profile(
        &self,
        session: &AuthSession,
        display_name: Option<&str>,
        photo_url: Option<&str>,
    ) -> AppResult<User>;
}

pub fn build_provider<'a>(config: &Config, conn: &'a Connection) -> AppResult<Box<dyn AuthProvider + 'a>> {
    match config.auth_backend {
        AuthBackend::Local => Ok(Box::new(LocalAuth::new(conn))),
        AuthBackend::IdentityToolkit => {
            let api_key = config.api_key.clone().ok_or_else(|| {
                AppError::Config(
                    "FIREBASE_API_KEY não definido; use --api-key ou `fincontrol config set auth.api_key <chave>`"
                        .into(),
                )
            })?;
            Ok(Box::new(IdentityToolkitAuth::new(
                config.auth_base_url.clone(),
                api_key,
            )?))
        }
    }
}
