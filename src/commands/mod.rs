// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod auth;
pub mod balance;
pub mod categories;
pub mod config;
pub mod exporter;
pub mod home;
pub mod reports;
pub mod transactions;

use clap::ArgMatches;
use rusqlite::Connection;

use crate::auth::AuthProvider;
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::{TransactionType, User};
use crate::services::AuthService;
use crate::summary::Month;

/// Everything a command handler needs.
pub struct Context<'a> {
    pub conn: &'a Connection,
    pub config: &'a Config,
    pub auth: &'a dyn AuthProvider,
}

impl<'a> Context<'a> {
    pub fn auth_service(&self) -> AuthService<'a> {
        AuthService::new(self.auth, self.conn)
    }

    /// The signed-in user; every data command goes through here.
    pub fn user(&self) -> AppResult<User> {
        self.auth_service().current_user()
    }
}

pub fn dispatch(ctx: &Context, matches: &ArgMatches) -> AppResult<bool> {
    match matches.subcommand() {
        Some(("auth", sub)) => auth::handle(ctx, sub)?,
        Some(("category", sub)) => categories::handle(ctx, sub)?,
        Some(("tx", sub)) => transactions::handle(ctx, sub)?,
        Some(("balance", sub)) => balance::handle(ctx, sub)?,
        Some(("home", sub)) => home::handle(ctx, sub)?,
        Some(("report", sub)) => reports::handle(ctx, sub)?,
        Some(("export", sub)) => exporter::handle(ctx, sub)?,
        _ => return Ok(false),
    }
    Ok(true)
}

pub(crate) fn required<'m>(m: &'m ArgMatches, name: &str) -> AppResult<&'m str> {
    m.get_one::<String>(name)
        .map(|s| s.as_str())
        .ok_or_else(|| AppError::validation(format!("O argumento --{} é obrigatório", name)))
}

pub(crate) fn optional<'m>(m: &'m ArgMatches, name: &str) -> Option<&'m str> {
    m.get_one::<String>(name).map(|s| s.as_str())
}

pub(crate) fn type_flag(m: &ArgMatches) -> AppResult<Option<TransactionType>> {
    optional(m, "type").map(str::parse).transpose()
}

pub(crate) fn month_flag(m: &ArgMatches) -> AppResult<Month> {
    match optional(m, "month") {
        Some(s) => s.parse(),
        None => Ok(Month::current()),
    }
}
