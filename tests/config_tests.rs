// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use fincontrol::auth::{AuthBackend, AuthProvider, build_provider};
use fincontrol::commands::config;
use fincontrol::config::{Config, ConfigOverrides, get_value};
use fincontrol::error::{AppError, AppResult};
use fincontrol::{cli, db};
use rusqlite::Connection;

fn overrides() -> ConfigOverrides {
    ConfigOverrides {
        db_path: Some(":memory:".into()),
        ..Default::default()
    }
}

fn config_cmd(conn: &Connection, args: &[&str]) -> AppResult<()> {
    let mut argv = vec!["fincontrol", "config"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    match matches.subcommand() {
        Some(("config", sub)) => config::handle(conn, sub),
        _ => panic!("no config subcommand"),
    }
}

#[test]
fn settings_stay_editable_without_an_api_key() {
    let conn = db::open_in_memory().unwrap();
    config_cmd(&conn, &["set", "auth.backend", "firebase"]).unwrap();

    let cfg = Config::resolve(&overrides(), &conn).unwrap();
    assert_eq!(cfg.auth_backend, AuthBackend::IdentityToolkit);
    let err = build_provider(&cfg, &conn).err().unwrap();
    assert!(matches!(err, AppError::Config(_)));

    // the recovery steps the error message points to
    config_cmd(&conn, &["list"]).unwrap();
    config_cmd(&conn, &["set", "auth.api_key", "K123"]).unwrap();
    let cfg = Config::resolve(&overrides(), &conn).unwrap();
    assert_eq!(cfg.api_key.as_deref(), Some("K123"));
    let provider = build_provider(&cfg, &conn).unwrap();
    assert_eq!(provider.backend(), AuthBackend::IdentityToolkit);

    config_cmd(&conn, &["set", "auth.backend", "local"]).unwrap();
    let cfg = Config::resolve(&overrides(), &conn).unwrap();
    assert_eq!(cfg.auth_backend, AuthBackend::Local);
}

#[test]
fn unknown_keys_and_bad_values_are_rejected() {
    let conn = db::open_in_memory().unwrap();
    let err = config_cmd(&conn, &["set", "tema", "escuro"]).unwrap_err();
    assert!(matches!(err, AppError::Config(_)));
    let err = config_cmd(&conn, &["set", "auth.base_url", "ftp://x"]).unwrap_err();
    assert!(matches!(err, AppError::Config(_)));
    assert!(config_cmd(&conn, &["get", "tema"]).is_err());

    config_cmd(&conn, &["set", "reports.dir", "/tmp/relatorios"]).unwrap();
    assert_eq!(
        get_value(&conn, "reports.dir").unwrap().as_deref(),
        Some("/tmp/relatorios")
    );
}
