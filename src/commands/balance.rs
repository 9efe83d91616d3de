// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::ArgMatches;

use super::{Context, required};
use crate::error::AppResult;
use crate::money::format_currency;
use crate::services::BalanceService;
use crate::storage::SqliteBalanceRepository;
use crate::utils::{maybe_print_json, parse_decimal, pretty_table};

pub fn handle(ctx: &Context, m: &ArgMatches) -> AppResult<()> {
    let user = ctx.user()?;
    let repo = SqliteBalanceRepository::new(ctx.conn);
    let svc = BalanceService::new(&repo);
    match m.subcommand() {
        Some(("add", sub)) => {
            let b = svc.add(&user.id, parse_decimal(required(sub, "amount")?)?)?;
            println!("Saldo registrado: {} ({})", format_currency(b.amount), b.id);
        }
        Some(("edit", sub)) => {
            let b = svc.edit(
                &user.id,
                required(sub, "id")?,
                parse_decimal(required(sub, "amount")?)?,
            )?;
            println!("Saldo atualizado: {}", format_currency(b.amount));
        }
        Some(("list", sub)) => {
            let data = svc.list(&user.id)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
                let rows = data
                    .iter()
                    .map(|b| {
                        vec![
                            format_currency(b.amount),
                            b.updated_at
                                .with_timezone(&chrono::Local)
                                .format("%d/%m/%Y %H:%M")
                                .to_string(),
                            b.id.clone(),
                        ]
                    })
                    .collect();
                println!("{}", pretty_table(&["Saldo", "Atualizado em", "ID"], rows));
            }
        }
        Some(("rm", sub)) => {
            let b = svc.delete(&user.id, required(sub, "id")?)?;
            println!("Saldo {} removido", b.id);
        }
        Some(("show", _)) => {
            println!("Saldo atual: {}", format_currency(svc.current(&user.id)?));
        }
        _ => {}
    }
    Ok(())
}
