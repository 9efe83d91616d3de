// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::ArgMatches;
use serde_json::json;
use std::path::Path;

use super::{Context, optional, required};
use crate::error::{AppError, AppResult};
use crate::models::Transaction;
use crate::money::format_amount;
use crate::services::TransactionService;
use crate::services::transactions::TransactionFilter;
use crate::storage::{SqliteCategoryRepository, SqliteTransactionRepository};
use crate::summary::Month;

pub fn handle(ctx: &Context, m: &ArgMatches) -> AppResult<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => {
            let user = ctx.user()?;
            let month = optional(sub, "month").map(str::parse::<Month>).transpose()?;
            let out = required(sub, "out")?;
            let repo = SqliteTransactionRepository::new(ctx.conn);
            let categories = SqliteCategoryRepository::new(ctx.conn);
            let filter = TransactionFilter {
                month,
                ..Default::default()
            };
            let mut rows = TransactionService::new(&repo, &categories).list(&user.id, &filter)?;
            // oldest first, like a ledger
            rows.reverse();
            let n = export_transactions(&rows, required(sub, "format")?, Path::new(out))?;
            println!("{}", exported_line(n, out));
            Ok(())
        }
        _ => Ok(()),
    }
}

/// Writes `rows` as csv or json; returns how many were written.
pub fn export_transactions(rows: &[Transaction], format: &str, out: &Path) -> AppResult<usize> {
    match format.trim().to_lowercase().as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out).map_err(csv_err)?;
            wtr.write_record(["date", "type", "category", "description", "amount", "id"])
                .map_err(csv_err)?;
            for t in rows {
                wtr.write_record([
                    t.date.to_string(),
                    t.r#type.as_str().to_string(),
                    t.category.clone(),
                    t.description.clone(),
                    format_amount(t.amount),
                    t.id.clone(),
                ])
                .map_err(csv_err)?;
            }
            wtr.flush()?;
        }
        "json" => {
            let items: Vec<_> = rows
                .iter()
                .map(|t| {
                    json!({
                        "date": t.date.to_string(), "type": t.r#type, "category": t.category,
                        "description": t.description, "amount": format_amount(t.amount), "id": t.id
                    })
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        other => {
            return Err(AppError::validation(format!(
                "Formato desconhecido: {} (use csv|json)",
                other
            )));
        }
    }
    tracing::info!(path = %out.display(), count = rows.len(), "transactions exported");
    Ok(rows.len())
}

fn exported_line(count: usize, out: &str) -> String {
    format!("{} transações exportadas para {}", count, out)
}

fn csv_err(e: csv::Error) -> AppError {
    match e.into_kind() {
        csv::ErrorKind::Io(io) => AppError::Io(io),
        other => AppError::Export(format!("{:?}", other)),
    }
}
