// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use std::thread::sleep;
use std::time::Duration;

use common::{config, fast_auth, run, sign_up};
use fincontrol::commands::Context;
use fincontrol::db;
use fincontrol::services::BalanceService;
use fincontrol::storage::SqliteBalanceRepository;
use rust_decimal::Decimal;

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

#[test]
fn current_balance_is_the_latest_update() {
    let conn = db::open_in_memory().unwrap();
    let cfg = config();
    let auth = fast_auth(&conn);
    let ctx = Context { conn: &conn, config: &cfg, auth: &auth };
    let user = sign_up(&ctx, "Ana", "ana@example.com");
    let repo = SqliteBalanceRepository::new(&conn);
    let svc = BalanceService::new(&repo);

    assert_eq!(svc.current(&user.id).unwrap(), Decimal::ZERO);

    run(&ctx, &["balance", "add", "--amount", "1500"]).unwrap();
    sleep(Duration::from_millis(5));
    run(&ctx, &["balance", "add", "--amount", "1250,75"]).unwrap();
    assert_eq!(svc.current(&user.id).unwrap(), dec("1250.75"));

    let oldest = svc.list(&user.id).unwrap().pop().unwrap();
    assert_eq!(oldest.amount, dec("1500"));
    sleep(Duration::from_millis(5));
    run(&ctx, &["balance", "edit", "--id", &oldest.id, "--amount", "1600"]).unwrap();
    assert_eq!(svc.current(&user.id).unwrap(), dec("1600"));

    run(&ctx, &["balance", "rm", "--id", &oldest.id]).unwrap();
    assert_eq!(svc.current(&user.id).unwrap(), dec("1250.75"));
    assert!(run(&ctx, &["balance", "show"]).unwrap());
}

#[test]
fn balance_can_be_zero_but_not_negative() {
    let conn = db::open_in_memory().unwrap();
    let cfg = config();
    let auth = fast_auth(&conn);
    let ctx = Context { conn: &conn, config: &cfg, auth: &auth };
    sign_up(&ctx, "Ana", "ana@example.com");

    run(&ctx, &["balance", "add", "--amount", "0"]).unwrap();
    let err = run(&ctx, &["balance", "add", "--amount", "-10"]).unwrap_err();
    assert!(err.is_validation());
    let err = run(&ctx, &["balance", "edit", "--id", "nope", "--amount", "10"]).unwrap_err();
    assert!(err.is_not_found());
}
