// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::{Connection, OptionalExtension, Row, params};

use super::{CategoryRepository, parse_stored_type};
use crate::error::AppResult;
use crate::models::{Category, TransactionType};

const COLUMNS: &str = "id, name, type, color, is_default";

/// (id, name, type, color) of the categories every database starts with.
pub const DEFAULT_CATEGORIES: &[(&str, &str, TransactionType, &str)] = &[
    ("default-expense-alimentacao", "Alimentação", TransactionType::Expense, "#FF7043"),
    ("default-expense-transporte", "Transporte", TransactionType::Expense, "#42A5F5"),
    ("default-expense-moradia", "Moradia", TransactionType::Expense, "#8D6E63"),
    ("default-expense-saude", "Saúde", TransactionType::Expense, "#EF5350"),
    ("default-expense-lazer", "Lazer", TransactionType::Expense, "#AB47BC"),
    ("default-expense-educacao", "Educação", TransactionType::Expense, "#5C6BC0"),
    ("default-expense-outros", "Outros", TransactionType::Expense, "#78909C"),
    ("default-income-salario", "Salário", TransactionType::Income, "#66BB6A"),
    ("default-income-freelance", "Freelance", TransactionType::Income, "#26A69A"),
    ("default-income-investimentos", "Investimentos", TransactionType::Income, "#FFCA28"),
    ("default-income-outros", "Outros", TransactionType::Income, "#9E9E9E"),
];

pub fn seed_default_categories(conn: &Connection) -> AppResult<()> {
    let mut stmt = conn.prepare(
        "INSERT OR IGNORE INTO categories(id, name, type, color, is_default) VALUES (?1, ?2, ?3, ?4, 1)",
    )?;
    for (id, name, ty, color) in DEFAULT_CATEGORIES {
        stmt.execute(params![id, name, ty.as_str(), color])?;
    }
    Ok(())
}

/// Row shape of the `categories` collection.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryDto {
    pub id: String,
    pub name: String,
    pub r#type: String,
    pub color: String,
    pub is_default: bool,
}

impl CategoryDto {
    pub fn from_domain(c: &Category) -> Self {
        CategoryDto {
            id: c.id.clone(),
            name: c.name.clone(),
            r#type: c.r#type.as_str().to_string(),
            color: c.color.clone(),
            is_default: c.is_default,
        }
    }

    pub fn into_domain(self) -> AppResult<Category> {
        Ok(Category {
            r#type: parse_stored_type(&self.r#type)?,
            id: self.id,
            name: self.name,
            color: self.color,
            is_default: self.is_default,
        })
    }

    fn from_row(r: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(CategoryDto {
            id: r.get(0)?,
            name: r.get(1)?,
            r#type: r.get(2)?,
            color: r.get(3)?,
            is_default: r.get(4)?,
        })
    }
}

pub struct SqliteCategoryRepository<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteCategoryRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    fn query(&self, sql: &str, params: &[&dyn rusqlite::ToSql]) -> AppResult<Vec<Category>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(params, CategoryDto::from_row)?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row?.into_domain()?);
        }
        Ok(out)
    }
}

impl CategoryRepository for SqliteCategoryRepository<'_> {
    fn list(&self) -> AppResult<Vec<Category>> {
        let sql = format!("SELECT {COLUMNS} FROM categories ORDER BY type, name");
        self.query(&sql, &[])
    }

    fn list_by_type(&self, r#type: TransactionType) -> AppResult<Vec<Category>> {
        let sql = format!("SELECT {COLUMNS} FROM categories WHERE type=?1 ORDER BY name");
        self.query(&sql, &[&r#type.as_str()])
    }

    fn get(&self, id: &str) -> AppResult<Option<Category>> {
        let sql = format!("SELECT {COLUMNS} FROM categories WHERE id=?1");
        let dto = self
            .conn
            .query_row(&sql, params![id], CategoryDto::from_row)
            .optional()?;
        dto.map(CategoryDto::into_domain).transpose()
    }

    fn find_by_name(&self, name: &str, r#type: TransactionType) -> AppResult<Option<Category>> {
        // SQLite's lower() only folds ASCII, so compare in Rust.
        let wanted = name.trim().to_lowercase();
        Ok(self
            .list_by_type(r#type)?
            .into_iter()
            .find(|c| c.name.to_lowercase() == wanted))
    }

    fn save(&self, category: &Category) -> AppResult<()> {
        let d = CategoryDto::from_domain(category);
        self.conn.execute(
            "INSERT OR REPLACE INTO categories(id, name, type, color, is_default) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![d.id, d.name, d.r#type, d.color, d.is_default],
        )?;
        Ok(())
    }

    fn delete(&self, id: &str) -> AppResult<bool> {
        let n = self
            .conn
            .execute("DELETE FROM categories WHERE id=?1", params![id])?;
        Ok(n > 0)
    }
}
