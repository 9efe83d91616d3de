// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::ArgMatches;

use super::{Context, month_flag};
use crate::error::AppResult;
use crate::money::{format_currency, format_percentage};
use crate::services::ReportService;
use crate::storage::{SqliteBalanceRepository, SqliteTransactionRepository};
use crate::utils::{maybe_print_json, pretty_table};

const TOP_CATEGORIES: usize = 3;

pub fn handle(ctx: &Context, m: &ArgMatches) -> AppResult<()> {
    let user = ctx.user()?;
    let transactions = SqliteTransactionRepository::new(ctx.conn);
    let balances = SqliteBalanceRepository::new(ctx.conn);
    let dash = ReportService::new(&transactions, &balances).dashboard(&user, month_flag(m)?)?;
    if maybe_print_json(m.get_flag("json"), m.get_flag("jsonl"), &dash)? {
        return Ok(());
    }

    println!("{}", dash.greeting);
    if !dash.email_verified {
        println!("Seu e-mail ainda não foi verificado (fincontrol auth verify-email).");
    }
    let s = &dash.summary;
    println!("{}", s.month.display_name());
    let rows = vec![
        vec!["Saldo atual".into(), format_currency(s.current_balance)],
        vec!["Receitas".into(), format_currency(s.total_income)],
        vec!["Despesas".into(), format_currency(s.total_expense)],
        vec!["Saldo do mês".into(), format_currency(s.net)],
    ];
    println!("{}", pretty_table(&["", "Valor"], rows));

    if !s.expenses_by_category.is_empty() {
        let rows = s
            .expenses_by_category
            .iter()
            .take(TOP_CATEGORIES)
            .map(|c| {
                vec![
                    c.category.clone(),
                    format_currency(c.total),
                    format_percentage(c.percentage),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Maiores despesas", "Total", "%"], rows));
    }

    if s.recent.is_empty() {
        println!("Nenhuma transação neste mês");
    } else {
        let rows = s
            .recent
            .iter()
            .map(|t| {
                vec![
                    t.date.format("%d/%m").to_string(),
                    t.category.clone(),
                    t.description.clone(),
                    format_currency(t.signed_amount()),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Data", "Categoria", "Descrição", "Valor"], rows)
        );
    }
    Ok(())
}
