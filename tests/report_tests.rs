// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use common::{config, fast_auth, run, sign_up};
use fincontrol::commands::Context;
use fincontrol::db;
use fincontrol::services::ReportService;
use fincontrol::services::reports::REPORT_RECENT_LIMIT;
use fincontrol::storage::{SqliteBalanceRepository, SqliteTransactionRepository};
use fincontrol::summary::Month;
use rust_decimal::Decimal;
use tempfile::tempdir;

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn seed(ctx: &Context) {
    for (ty, amount, cat, date) in [
        ("income", "5000", "Salário", "2025-03-05"),
        ("income", "800", "Freelance", "2025-03-20"),
        ("expense", "1200", "Moradia", "2025-03-10"),
        ("expense", "350.50", "Alimentação", "2025-03-12"),
        ("expense", "149.50", "Alimentação", "2025-03-25"),
        ("expense", "999", "Lazer", "2025-04-02"),
    ] {
        run(ctx, &["tx", "add", "-t", ty, "-a", amount, "-c", cat, "--date", date]).unwrap();
    }
    run(ctx, &["balance", "add", "--amount", "4100"]).unwrap();
}

#[test]
fn monthly_summary_aggregates_the_month() {
    let conn = db::open_in_memory().unwrap();
    let cfg = config();
    let auth = fast_auth(&conn);
    let ctx = Context { conn: &conn, config: &cfg, auth: &auth };
    let user = sign_up(&ctx, "Ana", "ana@example.com");
    seed(&ctx);

    let txs = SqliteTransactionRepository::new(&conn);
    let balances = SqliteBalanceRepository::new(&conn);
    let s = ReportService::new(&txs, &balances)
        .monthly(&user.id, "2025-03".parse().unwrap(), REPORT_RECENT_LIMIT)
        .unwrap();

    assert_eq!(s.current_balance, dec("4100"));
    assert_eq!(s.total_income, dec("5800"));
    assert_eq!(s.total_expense, dec("1700"));
    assert_eq!(s.net, dec("4100"));
    assert_eq!(s.transaction_count, 5);

    let expenses: Vec<(&str, Decimal)> = s
        .expenses_by_category
        .iter()
        .map(|c| (c.category.as_str(), c.total))
        .collect();
    assert_eq!(expenses, [("Moradia", dec("1200")), ("Alimentação", dec("500"))]);
    assert_eq!(s.expenses_by_category[1].count, 2);
    assert_eq!(s.income_by_category[0].category, "Salário");
    assert_eq!(s.recent[0].date.to_string(), "2025-03-25");

    assert!(run(&ctx, &["report", "summary", "-m", "2025-03", "--json"]).unwrap());
    assert!(run(&ctx, &["home", "-m", "2025-03"]).unwrap());
}

#[test]
fn pdf_report_is_written_to_the_requested_path() {
    let conn = db::open_in_memory().unwrap();
    let cfg = config();
    let auth = fast_auth(&conn);
    let ctx = Context { conn: &conn, config: &cfg, auth: &auth };
    sign_up(&ctx, "Ana", "ana@example.com");
    seed(&ctx);

    let dir = tempdir().unwrap();
    let out = dir.path().join("reports").join("marco.pdf");
    run(&ctx, &["report", "pdf", "-m", "2025-03", "-o", out.to_str().unwrap()]).unwrap();

    let bytes = std::fs::read(&out).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn pdf_report_defaults_to_the_reports_dir() {
    let conn = db::open_in_memory().unwrap();
    let dir = tempdir().unwrap();
    let mut cfg = config();
    cfg.reports_dir = Some(dir.path().to_path_buf());
    let auth = fast_auth(&conn);
    let ctx = Context { conn: &conn, config: &cfg, auth: &auth };
    sign_up(&ctx, "Ana", "ana@example.com");

    // an empty month still produces a report
    run(&ctx, &["report", "pdf", "-m", "2024-12"]).unwrap();
    let expected = dir.path().join("relatorio_financeiro_2024_12.pdf");
    assert!(expected.exists());
    assert_eq!(Month::new(2024, 12).unwrap().to_string(), "2024-12");
}
