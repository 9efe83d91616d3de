// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::SecondsFormat;
use rusqlite::{Connection, OptionalExtension, Row, params};

use super::{BalanceRepository, parse_stored_decimal, parse_timestamp};
use crate::error::AppResult;
use crate::models::Balance;

#[derive(Debug, Clone, PartialEq)]
pub struct BalanceDto {
    pub id: String,
    pub user_id: String,
    pub amount: String,
    pub updated_at: String,
}

impl BalanceDto {
    pub fn from_domain(b: &Balance) -> Self {
        BalanceDto {
            id: b.id.clone(),
            user_id: b.user_id.clone(),
            amount: b.amount.to_string(),
            updated_at: b.updated_at.to_rfc3339_opts(SecondsFormat::Nanos, true),
        }
    }

    pub fn into_domain(self) -> AppResult<Balance> {
        Ok(Balance {
            amount: parse_stored_decimal(&self.amount)?,
            updated_at: parse_timestamp(&self.updated_at)?,
            id: self.id,
            user_id: self.user_id,
        })
    }

    fn from_row(r: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(BalanceDto {
            id: r.get(0)?,
            user_id: r.get(1)?,
            amount: r.get(2)?,
            updated_at: r.get(3)?,
        })
    }
}

pub struct SqliteBalanceRepository<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteBalanceRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

impl BalanceRepository for SqliteBalanceRepository<'_> {
    fn list_for_user(&self, user_id: &str) -> AppResult<Vec<Balance>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, user_id, amount, updated_at FROM balances WHERE user_id=?1 ORDER BY updated_at DESC",
        )?;
        let rows = stmt.query_map(params![user_id], BalanceDto::from_row)?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row?.into_domain()?);
        }
        Ok(out)
    }

    fn get(&self, id: &str) -> AppResult<Option<Balance>> {
        let dto = self
            .conn
            .query_row(
                "SELECT id, user_id, amount, updated_at FROM balances WHERE id=?1",
                params![id],
                BalanceDto::from_row,
            )
            .optional()?;
        dto.map(BalanceDto::into_domain).transpose()
    }

    fn save(&self, balance: &Balance) -> AppResult<()> {
        let d = BalanceDto::from_domain(balance);
        self.conn.execute(
            "INSERT OR REPLACE INTO balances(id, user_id, amount, updated_at) VALUES (?1, ?2, ?3, ?4)",
            params![d.id, d.user_id, d.amount, d.updated_at],
        )?;
        Ok(())
    }

    fn delete(&self, id: &str) -> AppResult<bool> {
        let n = self
            .conn
            .execute("DELETE FROM balances WHERE id=?1", params![id])?;
        Ok(n > 0)
    }
}
