// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Monthly report: a fixed textual layout built from a [`FinancialSummary`],
//! rendered to PDF by [`pdf`].

pub mod pdf;

use chrono::NaiveDateTime;
use directories::UserDirs;
use std::path::{Path, PathBuf};

use crate::error::AppResult;
use crate::money::{format_currency, format_percentage};
use crate::summary::{CategoryTotal, FinancialSummary, Month};
use crate::utils::truncate;

pub const REPORT_TITLE: &str = "Relatório Financeiro";

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Title(String),
    Text(String),
    Table {
        heading: String,
        columns: Vec<Column>,
        rows: Vec<Vec<String>>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub header: String,
    /// Width in millimetres.
    pub width: f32,
    /// Longest text that fits in the column.
    pub max_chars: usize,
}

fn col(header: &str, width: f32, max_chars: usize) -> Column {
    Column {
        header: header.to_string(),
        width,
        max_chars,
    }
}

pub fn build_layout(summary: &FinancialSummary, generated_at: NaiveDateTime) -> Vec<Block> {
    let mut blocks = vec![
        Block::Title(REPORT_TITLE.to_string()),
        Block::Text(format!(
            "Período: {} ({} a {})",
            summary.month.display_name(),
            summary.month.first_day().format("%d/%m/%Y"),
            summary.month.last_day().format("%d/%m/%Y")
        )),
        Block::Text(format!(
            "Gerado em: {}",
            generated_at.format("%d/%m/%Y %H:%M")
        )),
    ];

    blocks.push(Block::Table {
        heading: "Resumo".into(),
        columns: vec![col("Descrição", 90.0, 40), col("Valor", 60.0, 24)],
        rows: vec![
            vec!["Saldo atual".into(), format_currency(summary.current_balance)],
            vec!["Receitas".into(), format_currency(summary.total_income)],
            vec!["Despesas".into(), format_currency(summary.total_expense)],
            vec!["Saldo do mês".into(), format_currency(summary.net)],
        ],
    });

    blocks.push(category_table("Despesas por categoria", &summary.expenses_by_category));
    blocks.push(category_table("Receitas por categoria", &summary.income_by_category));

    let rows = summary
        .recent
        .iter()
        .map(|t| {
            vec![
                t.date.format("%d/%m/%Y").to_string(),
                t.r#type.label().to_string(),
                truncate(&t.category, 18),
                truncate(&t.description, 30),
                format_currency(t.amount),
            ]
        })
        .collect();
    blocks.push(Block::Table {
        heading: "Transações recentes".into(),
        columns: vec![
            col("Data", 25.0, 10),
            col("Tipo", 22.0, 8),
            col("Categoria", 38.0, 18),
            col("Descrição", 60.0, 30),
            col("Valor", 35.0, 16),
        ],
        rows,
    });
    blocks
}

fn category_table(heading: &str, totals: &[CategoryTotal]) -> Block {
    Block::Table {
        heading: heading.to_string(),
        columns: vec![col("Categoria", 80.0, 36), col("Valor", 50.0, 20), col("%", 30.0, 8)],
        rows: totals
            .iter()
            .map(|c| {
                vec![
                    truncate(&c.category, 36),
                    format_currency(c.total),
                    format_percentage(c.percentage),
                ]
            })
            .collect(),
    }
}

pub fn report_file_name(month: Month) -> String {
    format!("relatorio_financeiro_{:04}_{:02}.pdf", month.year(), month.month())
}

/// `reports_dir` when configured, otherwise the platform download directory,
/// falling back to documents and then the application data directory.
pub fn default_report_path(month: Month, reports_dir: Option<&Path>) -> AppResult<PathBuf> {
    let dir = match reports_dir {
        Some(d) => d.to_path_buf(),
        None => {
            let user_dirs = UserDirs::new();
            match user_dirs
                .as_ref()
                .and_then(|u| u.download_dir().or_else(|| u.document_dir()))
            {
                Some(d) => d.to_path_buf(),
                None => crate::db::project_dirs()?.data_dir().to_path_buf(),
            }
        }
    };
    Ok(dir.join(report_file_name(month)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Transaction, TransactionType};
    use chrono::{NaiveDate, TimeZone, Utc};
    use rust_decimal::Decimal;

    fn summary() -> FinancialSummary {
        let txs = vec![
            Transaction {
                id: "a".into(),
                user_id: "u1".into(),
                r#type: TransactionType::Income,
                amount: Decimal::new(3000, 0),
                category: "Salário".into(),
                description: "empresa".into(),
                date: NaiveDate::from_ymd_opt(2025, 3, 5).unwrap(),
                created_at: Utc.with_ymd_and_hms(2025, 3, 5, 9, 0, 0).unwrap(),
            },
            Transaction {
                id: "b".into(),
                user_id: "u1".into(),
                r#type: TransactionType::Expense,
                amount: Decimal::new(5, 0),
                category: "Lazer".into(),
                description: "sorvete".into(),
                date: NaiveDate::from_ymd_opt(2025, 3, 6).unwrap(),
                created_at: Utc.with_ymd_and_hms(2025, 3, 6, 9, 0, 0).unwrap(),
            },
        ];
        FinancialSummary::for_month(&txs, "2025-03".parse().unwrap(), Decimal::new(100, 0), 10)
    }

    #[test]
    fn layout_has_fixed_sections() {
        let generated = NaiveDate::from_ymd_opt(2025, 4, 1)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap();
        let blocks = build_layout(&summary(), generated);
        assert_eq!(blocks[0], Block::Title("Relatório Financeiro".into()));
        assert_eq!(blocks[1], Block::Text("Período: Março de 2025 (01/03/2025 a 31/03/2025)".into()));
        assert_eq!(blocks[2], Block::Text("Gerado em: 01/04/2025 10:30".into()));

        let headings: Vec<&str> = blocks
            .iter()
            .filter_map(|b| match b {
                Block::Table { heading, .. } => Some(heading.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(
            headings,
            ["Resumo", "Despesas por categoria", "Receitas por categoria", "Transações recentes"]
        );

        match &blocks[3] {
            Block::Table { rows, .. } => {
                assert_eq!(rows[0], ["Saldo atual", "R$ 100.00"]);
                assert_eq!(rows[3], ["Saldo do mês", "R$ 2995.00"]);
            }
            other => panic!("unexpected block {other:?}"),
        }
        match &blocks[6] {
            Block::Table { rows, .. } => {
                assert_eq!(rows.len(), 2);
                assert_eq!(rows[0][0], "06/03/2025");
                assert_eq!(rows[0][4], "R$ 5.00");
            }
            other => panic!("unexpected block {other:?}"),
        }
    }

    #[test]
    fn file_name_and_configured_dir() {
        let m: Month = "2025-03".parse().unwrap();
        assert_eq!(report_file_name(m), "relatorio_financeiro_2025_03.pdf");
        let p = default_report_path(m, Some(Path::new("/tmp/out"))).unwrap();
        assert_eq!(p, PathBuf::from("/tmp/out/relatorio_financeiro_2025_03.pdf"));
    }
}
