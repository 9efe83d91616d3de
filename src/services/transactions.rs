// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::error::{AppError, AppResult};
use crate::models::{Transaction, TransactionType, new_id};
use crate::storage::{CategoryRepository, TransactionRepository};
use crate::summary::Month;
use crate::validation::{validate_amount_positive, validate_non_empty};

/// Form fields for creating or overwriting a transaction.
#[derive(Debug, Clone)]
pub struct TransactionInput {
    pub r#type: TransactionType,
    pub amount: Decimal,
    pub category: String,
    pub description: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub month: Option<Month>,
    pub r#type: Option<TransactionType>,
    pub category: Option<String>,
    pub limit: Option<usize>,
}

pub struct TransactionService<'a> {
    repo: &'a dyn TransactionRepository,
    categories: &'a dyn CategoryRepository,
}

impl<'a> TransactionService<'a> {
    pub fn new(repo: &'a dyn TransactionRepository, categories: &'a dyn CategoryRepository) -> Self {
        Self { repo, categories }
    }

    /// Checks the form and returns the canonical category name.
    fn validate(&self, input: &TransactionInput) -> AppResult<String> {
        validate_amount_positive(input.amount)?;
        validate_non_empty("categoria", &input.category)?;
        let category = self
            .categories
            .find_by_name(&input.category, input.r#type)?
            .ok_or_else(|| {
                AppError::validation(format!(
                    "Categoria '{}' não existe para {}",
                    input.category.trim(),
                    input.r#type.label().to_lowercase()
                ))
            })?;
        Ok(category.name)
    }

    pub fn add(&self, user_id: &str, input: TransactionInput) -> AppResult<Transaction> {
        let category = self.validate(&input)?;
        let t = Transaction {
            id: new_id(),
            user_id: user_id.to_string(),
            r#type: input.r#type,
            amount: input.amount,
            category,
            description: input.description.trim().to_string(),
            date: input.date,
            created_at: Utc::now(),
        };
        self.repo.save(&t)?;
        tracing::info!(id = %t.id, kind = %t.r#type, amount = %t.amount, "transaction added");
        Ok(t)
    }

    pub fn get(&self, user_id: &str, id: &str) -> AppResult<Transaction> {
        match self.repo.get(id)? {
            Some(t) if t.user_id == user_id => Ok(t),
            _ => Err(AppError::transaction_not_found(id)),
        }
    }

    /// Full overwrite; id, owner and creation time are kept.
    pub fn edit(&self, user_id: &str, id: &str, input: TransactionInput) -> AppResult<Transaction> {
        let existing = self.get(user_id, id)?;
        let category = self.validate(&input)?;
        let t = Transaction {
            r#type: input.r#type,
            amount: input.amount,
            category,
            description: input.description.trim().to_string(),
            date: input.date,
            ..existing
        };
        self.repo.save(&t)?;
        tracing::info!(id = %t.id, "transaction updated");
        Ok(t)
    }

    pub fn delete(&self, user_id: &str, id: &str) -> AppResult<Transaction> {
        let t = self.get(user_id, id)?;
        self.repo.delete(id)?;
        tracing::info!(id, "transaction deleted");
        Ok(t)
    }

    pub fn list(&self, user_id: &str, filter: &TransactionFilter) -> AppResult<Vec<Transaction>> {
        let rows = match filter.month {
            Some(m) => self
                .repo
                .list_for_user_between(user_id, m.first_day(), m.next().first_day())?,
            None => self.repo.list_for_user(user_id)?,
        };
        let wanted_category = filter.category.as_ref().map(|c| c.trim().to_lowercase());
        let iter = rows
            .into_iter()
            .filter(|t| filter.r#type.is_none_or(|ty| t.r#type == ty))
            .filter(|t| {
                wanted_category
                    .as_ref()
                    .is_none_or(|c| t.category.to_lowercase() == *c)
            });
        Ok(match filter.limit {
            Some(n) => iter.take(n).collect(),
            None => iter.collect(),
        })
    }
}
