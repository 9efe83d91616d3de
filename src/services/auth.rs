// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::Connection;

use crate::auth::{AuthProvider, AuthSession, session};
use crate::error::{AppError, AppResult};
use crate::models::User;
use crate::validation::{
    validate_display_name, validate_email, validate_password, validate_password_confirmation,
};

/// Login/registration use-cases. Field checks run before the provider is called.
pub struct AuthService<'a> {
    provider: &'a dyn AuthProvider,
    conn: &'a Connection,
}

impl<'a> AuthService<'a> {
    pub fn new(provider: &'a dyn AuthProvider, conn: &'a Connection) -> Self {
        Self { provider, conn }
    }

    pub fn login(&self, email: &str, password: &str) -> AppResult<AuthSession> {
        validate_email(email)?;
        validate_password(password)?;
        let s = self.provider.sign_in(email.trim(), password)?;
        session::save(self.conn, &s)?;
        tracing::info!(user = %s.user.id, backend = %s.backend, "signed in");
        Ok(s)
    }

    pub fn register(
        &self,
        display_name: &str,
        email: &str,
        password: &str,
        confirmation: &str,
    ) -> AppResult<AuthSession> {
        validate_display_name(display_name)?;
        validate_email(email)?;
        validate_password(password)?;
        validate_password_confirmation(password, confirmation)?;
        let s = self
            .provider
            .sign_up(display_name.trim(), email.trim(), password)?;
        session::save(self.conn, &s)?;
        tracing::info!(user = %s.user.id, backend = %s.backend, "registered");
        // Registration stands even if the verification mail cannot be sent.
        if let Err(e) = self.provider.send_email_verification(&s) {
            tracing::warn!(error = %e, "verification e-mail not sent");
        }
        Ok(s)
    }

    pub fn logout(&self) -> AppResult<()> {
        session::clear(self.conn)?;
        tracing::info!("signed out");
        Ok(())
    }

    /// The stored session, or `NotAuthenticated`. A session created by a
    /// different backend than the configured one does not count.
    pub fn current_session(&self) -> AppResult<AuthSession> {
        match session::load(self.conn)? {
            Some(s) if s.backend == self.provider.backend() => Ok(s),
            Some(s) => {
                tracing::debug!(stored = %s.backend, "ignoring session from another backend");
                Err(AppError::NotAuthenticated)
            }
            None => Err(AppError::NotAuthenticated),
        }
    }

    pub fn current_user(&self) -> AppResult<User> {
        Ok(self.current_session()?.user)
    }

    /// Re-reads the user from the provider and updates the stored session.
    pub fn refresh_user(&self) -> AppResult<User> {
        let mut s = self.current_session()?;
        s.user = self.provider.current_user(&s)?;
        session::save(self.conn, &s)?;
        Ok(s.user)
    }

    pub fn send_email_verification(&self) -> AppResult<()> {
        let s = self.current_session()?;
        self.provider.send_email_verification(&s)
    }

    pub fn reset_password(&self, email: &str) -> AppResult<()> {
        validate_email(email)?;
        self.provider.send_password_reset(email.trim())
    }

    pub fn update_profile(
        &self,
        display_name: Option<&str>,
        photo_url: Option<&str>,
    ) -> AppResult<User> {
        if let Some(name) = display_name {
            validate_display_name(name)?;
        }
        let mut s = self.current_session()?;
        s.user = self.provider.update_profile(&s, display_name, photo_url)?;
        session::save(self.conn, &s)?;
        Ok(s.user)
    }
}
