// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

fn type_arg(required: bool) -> Arg {
    Arg::new("type")
        .long("type")
        .short('t')
        .required(required)
        .help("expense | income (despesa | receita)")
}

fn month_arg() -> Arg {
    Arg::new("month")
        .long("month")
        .short('m')
        .help("Month as YYYY-MM (default: current month)")
}

fn tx_form_args(cmd: Command, required: bool) -> Command {
    cmd.arg(type_arg(required))
        .arg(
            Arg::new("amount")
                .long("amount")
                .short('a')
                .required(required)
                .allow_hyphen_values(true)
                .help("Positive amount, e.g. 42.90"),
        )
        .arg(
            Arg::new("category")
                .long("category")
                .short('c')
                .required(required)
                .help("Category name"),
        )
        .arg(
            Arg::new("description")
                .long("description")
                .short('d')
                .help("Free text"),
        )
        .arg(
            Arg::new("date")
                .long("date")
                .help("YYYY-MM-DD (default: today)"),
        )
}

pub fn build_cli() -> Command {
    Command::new("fincontrol")
        .version(clap::crate_version!())
        .about("Personal finance tracking: transactions, categories, balance and monthly PDF reports")
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .env("FINCONTROL_DB")
                .value_parser(value_parser!(std::path::PathBuf))
                .help("Path of the SQLite database"),
        )
        .arg(
            Arg::new("auth")
                .long("auth")
                .global(true)
                .env("FINCONTROL_AUTH")
                .help("Auth backend: local | firebase"),
        )
        .arg(
            Arg::new("api_key")
                .long("api-key")
                .global(true)
                .env("FIREBASE_API_KEY")
                .hide_env_values(true)
                .help("Firebase Web API key for the Identity Toolkit backend"),
        )
        .arg(
            Arg::new("auth_url")
                .long("auth-url")
                .global(true)
                .env("FINCONTROL_AUTH_URL")
                .help("Identity Toolkit base URL"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::Count)
                .help("More log output (-v info, -vv debug)"),
        )
        .subcommand(Command::new("init").about("Create the database and default categories"))
        .subcommand(
            Command::new("auth")
                .about("Sign in, register and manage the profile")
                .subcommand(
                    Command::new("register")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("email").long("email").required(true))
                        .arg(
                            Arg::new("password")
                                .long("password")
                                .required(true)
                                .env("FINCONTROL_PASSWORD")
                                .hide_env_values(true),
                        )
                        .arg(
                            Arg::new("confirm")
                                .long("confirm")
                                .help("Password confirmation (defaults to --password)"),
                        ),
                )
                .subcommand(
                    Command::new("login")
                        .arg(Arg::new("email").long("email").required(true))
                        .arg(
                            Arg::new("password")
                                .long("password")
                                .required(true)
                                .env("FINCONTROL_PASSWORD")
                                .hide_env_values(true),
                        ),
                )
                .subcommand(Command::new("logout"))
                .subcommand(json_flags(
                    Command::new("whoami")
                        .arg(
                            Arg::new("refresh")
                                .long("refresh")
                                .action(ArgAction::SetTrue)
                                .help("Reload the user from the provider"),
                        ),
                ))
                .subcommand(Command::new("verify-email").about("Send the verification e-mail again"))
                .subcommand(
                    Command::new("reset-password")
                        .arg(Arg::new("email").long("email").required(true)),
                )
                .subcommand(
                    Command::new("profile")
                        .arg(Arg::new("name").long("name"))
                        .arg(Arg::new("photo_url").long("photo-url")),
                ),
        )
        .subcommand(
            Command::new("category")
                .about("Manage categories")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(type_arg(true))
                        .arg(Arg::new("color").long("color").help("#RRGGBB")),
                )
                .subcommand(
                    Command::new("edit")
                        .arg(Arg::new("id").long("id").required(true))
                        .arg(Arg::new("name").long("name"))
                        .arg(type_arg(false))
                        .arg(Arg::new("color").long("color")),
                )
                .subcommand(json_flags(Command::new("list").arg(type_arg(false))))
                .subcommand(
                    Command::new("rm").arg(
                        Arg::new("id")
                            .long("id")
                            .required(true)
                            .help("Category id or name"),
                    ),
                ),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and browse transactions")
                .subcommand(tx_form_args(Command::new("add"), true))
                .subcommand(tx_form_args(
                    Command::new("edit").arg(Arg::new("id").long("id").required(true)),
                    false,
                ))
                .subcommand(json_flags(
                    Command::new("list")
                        .arg(month_arg())
                        .arg(type_arg(false))
                        .arg(Arg::new("category").long("category").short('c'))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                ))
                .subcommand(Command::new("rm").arg(Arg::new("id").long("id").required(true))),
        )
        .subcommand(
            Command::new("balance")
                .about("Track the account balance")
                .subcommand(
                    Command::new("add").visible_alias("set").arg(
                        Arg::new("amount")
                            .long("amount")
                            .required(true)
                            .allow_hyphen_values(true),
                    ),
                )
                .subcommand(
                    Command::new("edit")
                        .arg(Arg::new("id").long("id").required(true))
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .required(true)
                                .allow_hyphen_values(true),
                        ),
                )
                .subcommand(json_flags(Command::new("list")))
                .subcommand(Command::new("rm").arg(Arg::new("id").long("id").required(true)))
                .subcommand(Command::new("show").about("Current balance")),
        )
        .subcommand(json_flags(
            Command::new("home")
                .about("Dashboard for the signed-in user")
                .arg(month_arg()),
        ))
        .subcommand(
            Command::new("report")
                .about("Monthly reports")
                .subcommand(json_flags(Command::new("summary").arg(month_arg())))
                .subcommand(
                    Command::new("pdf")
                        .arg(month_arg())
                        .arg(
                            Arg::new("out")
                                .long("out")
                                .short('o')
                                .help("Output file (default: downloads folder)"),
                        ),
                ),
        )
        .subcommand(
            Command::new("export").subcommand(
                Command::new("transactions")
                    .arg(
                        Arg::new("format")
                            .long("format")
                            .required(true)
                            .help("csv|json"),
                    )
                    .arg(Arg::new("out").long("out").required(true))
                    .arg(month_arg()),
            ),
        )
        .subcommand(
            Command::new("config")
                .about("Persisted settings")
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("key").required(true))
                        .arg(Arg::new("value").required(true)),
                )
                .subcommand(Command::new("get").arg(Arg::new("key").required(true)))
                .subcommand(Command::new("list")),
        )
}
