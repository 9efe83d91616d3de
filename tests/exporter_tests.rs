// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use common::{config, fast_auth, run, sign_up};
use fincontrol::commands::Context;
use fincontrol::db;
use serde_json::json;
use tempfile::tempdir;

fn seed(ctx: &Context) {
    run(
        ctx,
        &[
            "tx", "add", "-t", "income", "-a", "3000", "-c", "Salário", "-d", "Março",
            "--date", "2025-03-05",
        ],
    )
    .unwrap();
    run(
        ctx,
        &[
            "tx", "add", "-t", "expense", "-a", "12.5", "-c", "Transporte", "-d", "Ônibus, ida",
            "--date", "2025-03-06",
        ],
    )
    .unwrap();
    run(
        ctx,
        &["tx", "add", "-t", "expense", "-a", "99", "-c", "Lazer", "--date", "2025-04-01"],
    )
    .unwrap();
}

#[test]
fn export_transactions_writes_pretty_json() {
    let conn = db::open_in_memory().unwrap();
    let cfg = config();
    let auth = fast_auth(&conn);
    let ctx = Context { conn: &conn, config: &cfg, auth: &auth };
    sign_up(&ctx, "Ana", "ana@example.com");
    seed(&ctx);

    let dir = tempdir().unwrap();
    let out = dir.path().join("tx.json");
    run(
        &ctx,
        &[
            "export", "transactions", "--format", "JSON", "--out", out.to_str().unwrap(),
            "--month", "2025-03",
        ],
    )
    .unwrap();

    let data: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    let items = data.as_array().unwrap();
    assert_eq!(items.len(), 2);
    let first = &items[0];
    assert_eq!(first["date"], json!("2025-03-05"));
    assert_eq!(first["type"], json!("income"));
    assert_eq!(first["category"], json!("Salário"));
    assert_eq!(first["amount"], json!("3000.00"));
    assert_eq!(items[1]["amount"], json!("12.50"));
}

#[test]
fn export_transactions_writes_csv() {
    let conn = db::open_in_memory().unwrap();
    let cfg = config();
    let auth = fast_auth(&conn);
    let ctx = Context { conn: &conn, config: &cfg, auth: &auth };
    sign_up(&ctx, "Ana", "ana@example.com");
    seed(&ctx);

    let dir = tempdir().unwrap();
    let out = dir.path().join("tx.csv");
    run(&ctx, &["export", "transactions", "--format", "csv", "--out", out.to_str().unwrap()])
        .unwrap();

    let mut rdr = csv::Reader::from_path(&out).unwrap();
    let headers = rdr.headers().unwrap().clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        ["date", "type", "category", "description", "amount", "id"]
    );
    let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 3);
    assert_eq!(&rows[1][3], "Ônibus, ida");
    assert_eq!(&rows[2][0], "2025-04-01");
}

#[test]
fn unknown_format_writes_nothing() {
    let conn = db::open_in_memory().unwrap();
    let cfg = config();
    let auth = fast_auth(&conn);
    let ctx = Context { conn: &conn, config: &cfg, auth: &auth };
    sign_up(&ctx, "Ana", "ana@example.com");
    seed(&ctx);

    let dir = tempdir().unwrap();
    let out = dir.path().join("tx.xml");
    let err = run(
        &ctx,
        &["export", "transactions", "--format", "xml", "--out", out.to_str().unwrap()],
    )
    .unwrap_err();
    assert!(err.is_validation());
    assert!(!out.exists());
}
