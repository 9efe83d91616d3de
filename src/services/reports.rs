// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::error::AppResult;
use crate::models::User;
use crate::services::balance::BalanceService;
use crate::storage::{BalanceRepository, TransactionRepository};
use crate::summary::{FinancialSummary, Month};

pub const REPORT_RECENT_LIMIT: usize = 10;
pub const HOME_RECENT_LIMIT: usize = 5;

pub struct ReportService<'a> {
    transactions: &'a dyn TransactionRepository,
    balances: &'a dyn BalanceRepository,
}

/// What the home screen shows for the signed-in user.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub greeting: String,
    pub email_verified: bool,
    pub summary: FinancialSummary,
}

impl<'a> ReportService<'a> {
    pub fn new(
        transactions: &'a dyn TransactionRepository,
        balances: &'a dyn BalanceRepository,
    ) -> Self {
        Self {
            transactions,
            balances,
        }
    }

    pub fn monthly(&self, user_id: &str, month: Month, recent_limit: usize) -> AppResult<FinancialSummary> {
        let rows = self
            .transactions
            .list_for_user_between(user_id, month.first_day(), month.next().first_day())?;
        let balance = BalanceService::new(self.balances).current(user_id)?;
        let summary = FinancialSummary::for_month(&rows, month, balance, recent_limit);
        tracing::debug!(
            user = user_id,
            month = %month,
            count = summary.transaction_count,
            "monthly summary built"
        );
        Ok(summary)
    }

    pub fn dashboard(&self, user: &User, month: Month) -> AppResult<Dashboard> {
        let summary = self.monthly(&user.id, month, HOME_RECENT_LIMIT)?;
        Ok(Dashboard {
            greeting: greeting(user, Local::now()),
            email_verified: user.email_verified,
            summary,
        })
    }
}

pub fn greeting(user: &User, now: DateTime<Local>) -> String {
    use chrono::Timelike;
    let part = match now.hour() {
        5..=11 => "Bom dia",
        12..=17 => "Boa tarde",
        _ => "Boa noite",
    };
    let name = user
        .display_name
        .split_whitespace()
        .next()
        .unwrap_or(user.email.as_str());
    format!("{}, {}!", part, name)
}
