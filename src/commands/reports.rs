// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::Local;
use clap::ArgMatches;
use std::path::PathBuf;

use super::{Context, month_flag, optional};
use crate::error::AppResult;
use crate::money::{format_currency, format_percentage};
use crate::report::{build_layout, default_report_path, pdf::write_pdf};
use crate::services::ReportService;
use crate::services::reports::REPORT_RECENT_LIMIT;
use crate::storage::{SqliteBalanceRepository, SqliteTransactionRepository};
use crate::summary::CategoryTotal;
use crate::utils::{maybe_print_json, pretty_table};

pub fn handle(ctx: &Context, m: &ArgMatches) -> AppResult<()> {
    let user = ctx.user()?;
    let transactions = SqliteTransactionRepository::new(ctx.conn);
    let balances = SqliteBalanceRepository::new(ctx.conn);
    let svc = ReportService::new(&transactions, &balances);
    match m.subcommand() {
        Some(("summary", sub)) => {
            let s = svc.monthly(&user.id, month_flag(sub)?, REPORT_RECENT_LIMIT)?;
            if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
                return Ok(());
            }
            println!("{}", s.month.display_name());
            let rows = vec![
                vec!["Saldo atual".into(), format_currency(s.current_balance)],
                vec!["Receitas".into(), format_currency(s.total_income)],
                vec!["Despesas".into(), format_currency(s.total_expense)],
                vec!["Saldo do mês".into(), format_currency(s.net)],
                vec!["Transações".into(), s.transaction_count.to_string()],
            ];
            println!("{}", pretty_table(&["Resumo", "Valor"], rows));
            println!("{}", category_table("Despesas por categoria", &s.expenses_by_category));
            println!("{}", category_table("Receitas por categoria", &s.income_by_category));
        }
        Some(("pdf", sub)) => {
            let month = month_flag(sub)?;
            let s = svc.monthly(&user.id, month, REPORT_RECENT_LIMIT)?;
            let path = match optional(sub, "out") {
                Some(p) => PathBuf::from(p),
                None => default_report_path(month, ctx.config.reports_dir.as_deref())?,
            };
            let pages = write_pdf(&build_layout(&s, Local::now().naive_local()), &path)?;
            println!(
                "Relatório salvo em {} ({} página{})",
                path.display(),
                pages,
                if pages == 1 { "" } else { "s" }
            );
        }
        _ => {}
    }
    Ok(())
}

fn category_table(heading: &str, totals: &[CategoryTotal]) -> comfy_table::Table {
    let rows = totals
        .iter()
        .map(|c| {
            vec![
                c.category.clone(),
                format_currency(c.total),
                format_percentage(c.percentage),
                c.count.to_string(),
            ]
        })
        .collect();
    pretty_table(&[heading, "Total", "%", "Qtd."], rows)
}
