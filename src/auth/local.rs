// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::{SecondsFormat, Utc};
use rusqlite::{Connection, OptionalExtension, params};

use super::{AuthBackend, AuthProvider, AuthSession};
use crate::error::{AppError, AppResult};
use crate::models::{User, new_id};

pub struct LocalAuth<'a> {
    conn: &'a Connection,
    hasher: Argon2<'static>,
}

impl<'a> LocalAuth<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self::with_hasher(conn, Argon2::default())
    }

    pub fn with_hasher(conn: &'a Connection, hasher: Argon2<'static>) -> Self {
        Self { conn, hasher }
    }

    fn hash(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        self.hasher
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| AppError::Auth(format!("Falha ao processar a senha: {}", e)))
    }

    fn find_by_email(&self, email: &str) -> AppResult<Option<(User, String)>> {
        let row = self
            .conn
            .query_row(
                "SELECT id, email, display_name, photo_url, email_verified, password_hash
                 FROM users WHERE email=?1",
                params![email.trim()],
                |r| {
                    Ok((
                        User {
                            id: r.get(0)?,
                            email: r.get(1)?,
                            display_name: r.get(2)?,
                            photo_url: r.get(3)?,
                            email_verified: r.get(4)?,
                        },
                        r.get::<_, String>(5)?,
                    ))
                },
            )
            .optional()?;
        Ok(row)
    }

    fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        let user = self
            .conn
            .query_row(
                "SELECT id, email, display_name, photo_url, email_verified FROM users WHERE id=?1",
                params![id],
                |r| {
                    Ok(User {
                        id: r.get(0)?,
                        email: r.get(1)?,
                        display_name: r.get(2)?,
                        photo_url: r.get(3)?,
                        email_verified: r.get(4)?,
                    })
                },
            )
            .optional()?;
        Ok(user)
    }

    fn session(user: User) -> AuthSession {
        AuthSession {
            user,
            backend: AuthBackend::Local,
            id_token: None,
            refresh_token: None,
        }
    }
}

fn invalid_credentials() -> AppError {
    AppError::Auth("E-mail ou senha incorretos".into())
}

impl AuthProvider for LocalAuth<'_> {
    fn backend(&self) -> AuthBackend {
        AuthBackend::Local
    }

    fn sign_in(&self, email: &str, password: &str) -> AppResult<AuthSession> {
        let (user, stored) = self.find_by_email(email)?.ok_or_else(invalid_credentials)?;
        let parsed = PasswordHash::new(&stored)
            .map_err(|e| AppError::Corrupt(format!("password hash for {}: {}", user.id, e)))?;
        self.hasher
            .verify_password(password.as_bytes(), &parsed)
            .map_err(|_| invalid_credentials())?;
        Ok(Self::session(user))
    }

    fn sign_up(&self, display_name: &str, email: &str, password: &str) -> AppResult<AuthSession> {
        if self.find_by_email(email)?.is_some() {
            return Err(AppError::Auth("Este e-mail já está em uso".into()));
        }
        let user = User {
            id: new_id(),
            email: email.trim().to_string(),
            display_name: display_name.trim().to_string(),
            photo_url: None,
            email_verified: false,
        };
        let hash = self.hash(password)?;
        self.conn.execute(
            "INSERT INTO users(id, email, display_name, photo_url, email_verified, password_hash, created_at)
             VALUES (?1, ?2, ?3, NULL, 0, ?4, ?5)",
            params![
                user.id,
                user.email,
                user.display_name,
                hash,
                Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
            ],
        )?;
        Ok(Self::session(user))
    }

    fn send_email_verification(&self, _session: &AuthSession) -> AppResult<()> {
        Err(AppError::Unsupported(
            "o backend local não envia e-mails de verificação".into(),
        ))
    }

    fn send_password_reset(&self, _email: &str) -> AppResult<()> {
        Err(AppError::Unsupported(
            "o backend local não envia e-mails de redefinição de senha".into(),
        ))
    }

    fn current_user(&self, session: &AuthSession) -> AppResult<User> {
        self.find_by_id(&session.user.id)?
            .ok_or(AppError::NotAuthenticated)
    }

    fn update_profile(
        &self,
        session: &AuthSession,
        display_name: Option<&str>,
        photo_url: Option<&str>,
    ) -> AppResult<User> {
        let mut user = self.current_user(session)?;
        if let Some(name) = display_name {
            user.display_name = name.trim().to_string();
        }
        if let Some(url) = photo_url {
            user.photo_url = Some(url.trim().to_string()).filter(|u| !u.is_empty());
        }
        self.conn.execute(
            "UPDATE users SET display_name=?1, photo_url=?2 WHERE id=?3",
            params![user.display_name, user.photo_url, user.id],
        )?;
        Ok(user)
    }
}

#[cfg(test)]
pub(crate) fn fast_hasher() -> Argon2<'static> {
    let params = argon2::Params::new(1024, 1, 1, None).unwrap();
    Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params)
}
