// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::process::ExitCode;

use fincontrol::auth::build_provider;
use fincontrol::commands::{self, Context};
use fincontrol::config::{Config, ConfigOverrides};
use fincontrol::services::CategoryService;
use fincontrol::storage::SqliteCategoryRepository;
use fincontrol::{cli, db, logging};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("Erro: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let matches = cli::build_cli().get_matches();
    logging::init(matches.get_count("verbose"));

    let overrides = ConfigOverrides {
        db_path: matches.get_one::<std::path::PathBuf>("db").cloned(),
        auth_backend: matches.get_one::<String>("auth").cloned(),
        api_key: matches.get_one::<String>("api_key").cloned(),
        auth_base_url: matches.get_one::<String>("auth_url").cloned(),
    };
    let conn = db::open_or_init(&Config::db_path(&overrides)?)?;
    let config = Config::resolve(&overrides, &conn)?;

    if let Some(("init", _)) = matches.subcommand() {
        let repo = SqliteCategoryRepository::new(&conn);
        let restored = CategoryService::new(&repo).seed_defaults()?;
        println!("Database initialized at {}", config.db_path.display());
        if restored > 0 {
            println!("{} default categories restored", restored);
        }
        return Ok(());
    }

    // settings must stay editable while the configured backend is unusable
    if let Some(("config", sub)) = matches.subcommand() {
        commands::config::handle(&conn, sub)?;
        return Ok(());
    }

    let provider = build_provider(&config, &conn)?;
    let ctx = Context {
        conn: &conn,
        config: &config,
        auth: provider.as_ref(),
    };
    if !commands::dispatch(&ctx, &matches)? {
        cli::build_cli().print_help()?;
        println!();
    }
    Ok(())
}
