// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

#![allow(dead_code)]

use argon2::{Algorithm, Argon2, Params, Version};
use fincontrol::auth::identity_toolkit::DEFAULT_BASE_URL;
use fincontrol::auth::{AuthBackend, LocalAuth};
use fincontrol::commands::{self, Context};
use fincontrol::config::Config;
use fincontrol::error::AppResult;
use fincontrol::models::User;
use fincontrol::cli;
use rusqlite::Connection;

pub fn fast_auth(conn: &Connection) -> LocalAuth<'_> {
    let params = Params::new(1024, 1, 1, None).unwrap();
    LocalAuth::with_hasher(conn, Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

pub fn config() -> Config {
    Config {
        db_path: ":memory:".into(),
        auth_backend: AuthBackend::Local,
        api_key: None,
        auth_base_url: DEFAULT_BASE_URL.into(),
        reports_dir: None,
    }
}

pub fn run(ctx: &Context, args: &[&str]) -> AppResult<bool> {
    let mut argv = vec!["fincontrol"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    commands::dispatch(ctx, &matches)
}

/// Registers and signs in a fresh user.
pub fn sign_up(ctx: &Context, name: &str, email: &str) -> User {
    run(
        ctx,
        &["auth", "register", "--name", name, "--email", email, "--password", "segredo1"],
    )
    .unwrap();
    ctx.user().unwrap()
}
