// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::Local;
use clap::ArgMatches;

use super::{Context, month_flag, optional, required, type_flag};
use crate::error::{AppError, AppResult};
use crate::models::Transaction;
use crate::money::format_currency;
use crate::services::TransactionService;
use crate::services::transactions::{TransactionFilter, TransactionInput};
use crate::storage::{SqliteCategoryRepository, SqliteTransactionRepository};
use crate::summary::Month;
use crate::utils::{maybe_print_json, parse_date, parse_decimal, pretty_table};

pub fn handle(ctx: &Context, m: &ArgMatches) -> AppResult<()> {
    let user = ctx.user()?;
    let repo = SqliteTransactionRepository::new(ctx.conn);
    let categories = SqliteCategoryRepository::new(ctx.conn);
    let svc = TransactionService::new(&repo, &categories);
    match m.subcommand() {
        Some(("add", sub)) => {
            let t = svc.add(&user.id, new_input(sub)?)?;
            println!(
                "{} de {} registrada em {}",
                t.r#type.label(),
                format_currency(t.amount),
                t.date.format("%d/%m/%Y")
            );
            print_month(&svc, &user.id, Month::of(t.date))?;
        }
        Some(("edit", sub)) => {
            let existing = svc.get(&user.id, required(sub, "id")?)?;
            let t = svc.edit(&user.id, &existing.id, edited_input(sub, &existing)?)?;
            println!("Transação {} atualizada", t.id);
            print_month(&svc, &user.id, Month::of(t.date))?;
        }
        Some(("list", sub)) => {
            let filter = TransactionFilter {
                month: Some(month_flag(sub)?),
                r#type: type_flag(sub)?,
                category: optional(sub, "category").map(str::to_string),
                limit: sub.get_one::<usize>("limit").copied(),
            };
            let data = svc.list(&user.id, &filter)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
                print_table(&data);
            }
        }
        Some(("rm", sub)) => {
            let t = svc.delete(&user.id, required(sub, "id")?)?;
            println!("Transação {} removida", t.id);
            print_month(&svc, &user.id, Month::of(t.date))?;
        }
        _ => {}
    }
    Ok(())
}

fn new_input(sub: &ArgMatches) -> AppResult<TransactionInput> {
    let r#type = type_flag(sub)?
        .ok_or_else(|| AppError::validation("O argumento --type é obrigatório"))?;
    Ok(TransactionInput {
        r#type,
        amount: parse_decimal(required(sub, "amount")?)?,
        category: required(sub, "category")?.to_string(),
        description: optional(sub, "description").unwrap_or_default().to_string(),
        date: match optional(sub, "date") {
            Some(d) => parse_date(d)?,
            None => Local::now().date_naive(),
        },
    })
}

/// Missing flags keep the stored values; the result is written back whole.
fn edited_input(sub: &ArgMatches, existing: &Transaction) -> AppResult<TransactionInput> {
    Ok(TransactionInput {
        r#type: type_flag(sub)?.unwrap_or(existing.r#type),
        amount: match optional(sub, "amount") {
            Some(a) => parse_decimal(a)?,
            None => existing.amount,
        },
        category: optional(sub, "category")
            .map(str::to_string)
            .unwrap_or_else(|| existing.category.clone()),
        description: optional(sub, "description")
            .map(str::to_string)
            .unwrap_or_else(|| existing.description.clone()),
        date: match optional(sub, "date") {
            Some(d) => parse_date(d)?,
            None => existing.date,
        },
    })
}

fn print_month(svc: &TransactionService, user_id: &str, month: Month) -> AppResult<()> {
    let filter = TransactionFilter {
        month: Some(month),
        ..Default::default()
    };
    let data = svc.list(user_id, &filter)?;
    println!("{}", month.display_name());
    print_table(&data);
    Ok(())
}

fn print_table(data: &[Transaction]) {
    let rows = data
        .iter()
        .map(|t| {
            vec![
                t.date.format("%d/%m/%Y").to_string(),
                t.r#type.label().to_string(),
                t.category.clone(),
                t.description.clone(),
                format_currency(t.signed_amount()),
                t.id.clone(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Data", "Tipo", "Categoria", "Descrição", "Valor", "ID"], rows)
    );
}
