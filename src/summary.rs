// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Monthly aggregation over a user's transactions.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::AppError;
use crate::models::{Transaction, TransactionType};
use crate::money::percentage;

const MONTH_NAMES: [&str; 12] = [
    "Janeiro",
    "Fevereiro",
    "Março",
    "Abril",
    "Maio",
    "Junho",
    "Julho",
    "Agosto",
    "Setembro",
    "Outubro",
    "Novembro",
    "Dezembro",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month {
    year: i32,
    month: u32,
}

impl Month {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Month { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        Month {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn current() -> Self {
        Month::of(chrono::Local::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).expect("month is validated on construction")
    }

    pub fn next(&self) -> Month {
        if self.month == 12 {
            Month {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Month {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn last_day(&self) -> NaiveDate {
        self.next().first_day().pred_opt().expect("first of month has a predecessor")
    }

    /// Half-open: `[first day, first day of next month)`.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.first_day() && date < self.next().first_day()
    }

    pub fn display_name(&self) -> String {
        format!("{} de {}", MONTH_NAMES[(self.month - 1) as usize], self.year)
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Month {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || AppError::validation(format!("Mês inválido '{}', use AAAA-MM", s));
        let (y, m) = s.split_once('-').ok_or_else(invalid)?;
        if y.len() != 4 || m.len() != 2 {
            return Err(invalid());
        }
        let year: i32 = y.parse().map_err(|_| invalid())?;
        let month: u32 = m.parse().map_err(|_| invalid())?;
        Month::new(year, month).ok_or_else(invalid)
    }
}

impl Serialize for Month {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Decimal,
    pub percentage: Decimal,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct FinancialSummary {
    pub month: Month,
    pub current_balance: Decimal,
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub net: Decimal,
    pub transaction_count: usize,
    pub expenses_by_category: Vec<CategoryTotal>,
    pub income_by_category: Vec<CategoryTotal>,
    pub recent: Vec<Transaction>,
}

impl FinancialSummary {
    pub fn for_month(
        transactions: &[Transaction],
        month: Month,
        current_balance: Decimal,
        recent_limit: usize,
    ) -> Self {
        let mut total_income = Decimal::ZERO;
        let mut total_expense = Decimal::ZERO;
        let mut expense_map: HashMap<&str, (Decimal, usize)> = HashMap::new();
        let mut income_map: HashMap<&str, (Decimal, usize)> = HashMap::new();
        let mut in_month: Vec<&Transaction> = Vec::new();

        for t in transactions.iter().filter(|t| month.contains(t.date)) {
            let (total, map) = match t.r#type {
                TransactionType::Income => (&mut total_income, &mut income_map),
                TransactionType::Expense => (&mut total_expense, &mut expense_map),
            };
            *total += t.amount;
            let entry = map.entry(t.category.as_str()).or_insert((Decimal::ZERO, 0));
            entry.0 += t.amount;
            entry.1 += 1;
            in_month.push(t);
        }

        in_month.sort_by(|a, b| {
            b.date
                .cmp(&a.date)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });
        let transaction_count = in_month.len();
        let recent = in_month.into_iter().take(recent_limit).cloned().collect();

        FinancialSummary {
            month,
            current_balance,
            total_income,
            total_expense,
            net: total_income - total_expense,
            transaction_count,
            expenses_by_category: category_totals(expense_map, total_expense),
            income_by_category: category_totals(income_map, total_income),
            recent,
        }
    }
}

fn category_totals(map: HashMap<&str, (Decimal, usize)>, type_total: Decimal) -> Vec<CategoryTotal> {
    let mut out: Vec<CategoryTotal> = map
        .into_iter()
        .map(|(category, (total, count))| CategoryTotal {
            category: category.to_string(),
            total,
            percentage: percentage(total, type_total),
            count,
        })
        .collect();
    out.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.category.cmp(&b.category)));
    out
}
