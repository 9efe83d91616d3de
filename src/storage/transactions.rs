// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, SecondsFormat};
use rusqlite::{Connection, OptionalExtension, Row, params};

use super::{TransactionRepository, parse_stored_decimal, parse_stored_type, parse_timestamp};
use crate::error::{AppError, AppResult};
use crate::models::Transaction;

const COLUMNS: &str = "id, user_id, type, amount, category, description, date, created_at";

/// Row shape of the `transactions` collection.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDto {
    pub id: String,
    pub user_id: String,
    pub r#type: String,
    pub amount: String,
    pub category: String,
    pub description: String,
    pub date: String,
    pub created_at: String,
}

impl TransactionDto {
    pub fn from_domain(t: &Transaction) -> Self {
        TransactionDto {
            id: t.id.clone(),
            user_id: t.user_id.clone(),
            r#type: t.r#type.as_str().to_string(),
            amount: t.amount.to_string(),
            category: t.category.clone(),
            description: t.description.clone(),
            date: t.date.format("%Y-%m-%d").to_string(),
            created_at: t.created_at.to_rfc3339_opts(SecondsFormat::Nanos, true),
        }
    }

    pub fn into_domain(self) -> AppResult<Transaction> {
        let date = NaiveDate::parse_from_str(&self.date, "%Y-%m-%d")
            .map_err(|e| AppError::Corrupt(format!("date '{}': {}", self.date, e)))?;
        Ok(Transaction {
            r#type: parse_stored_type(&self.r#type)?,
            amount: parse_stored_decimal(&self.amount)?,
            created_at: parse_timestamp(&self.created_at)?,
            date,
            id: self.id,
            user_id: self.user_id,
            category: self.category,
            description: self.description,
        })
    }

    fn from_row(r: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(TransactionDto {
            id: r.get(0)?,
            user_id: r.get(1)?,
            r#type: r.get(2)?,
            amount: r.get(3)?,
            category: r.get(4)?,
            description: r.get(5)?,
            date: r.get(6)?,
            created_at: r.get(7)?,
        })
    }
}

pub struct SqliteTransactionRepository<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteTransactionRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    fn query(&self, sql: &str, params: &[&dyn rusqlite::ToSql]) -> AppResult<Vec<Transaction>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(params, TransactionDto::from_row)?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row?.into_domain()?);
        }
        Ok(out)
    }
}

impl TransactionRepository for SqliteTransactionRepository<'_> {
    fn list_for_user(&self, user_id: &str) -> AppResult<Vec<Transaction>> {
        let sql = format!(
            "SELECT {COLUMNS} FROM transactions WHERE user_id=?1 ORDER BY date DESC, created_at DESC"
        );
        self.query(&sql, &[&user_id])
    }

    fn list_for_user_between(
        &self,
        user_id: &str,
        from: NaiveDate,
        until: NaiveDate,
    ) -> AppResult<Vec<Transaction>> {
        let sql = format!(
            "SELECT {COLUMNS} FROM transactions
             WHERE user_id=?1 AND date>=?2 AND date<?3
             ORDER BY date DESC, created_at DESC"
        );
        let from = from.format("%Y-%m-%d").to_string();
        let until = until.format("%Y-%m-%d").to_string();
        self.query(&sql, &[&user_id, &from, &until])
    }

    fn get(&self, id: &str) -> AppResult<Option<Transaction>> {
        let sql = format!("SELECT {COLUMNS} FROM transactions WHERE id=?1");
        let dto = self
            .conn
            .query_row(&sql, params![id], TransactionDto::from_row)
            .optional()?;
        dto.map(TransactionDto::into_domain).transpose()
    }

    fn save(&self, transaction: &Transaction) -> AppResult<()> {
        let d = TransactionDto::from_domain(transaction);
        self.conn.execute(
            "INSERT OR REPLACE INTO transactions(id, user_id, type, amount, category, description, date, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                d.id,
                d.user_id,
                d.r#type,
                d.amount,
                d.category,
                d.description,
                d.date,
                d.created_at
            ],
        )?;
        Ok(())
    }

    fn delete(&self, id: &str) -> AppResult<bool> {
        let n = self
            .conn
            .execute("DELETE FROM transactions WHERE id=?1", params![id])?;
        Ok(n > 0)
    }
}
