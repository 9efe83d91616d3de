// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Document collections (balances, transactions, categories) and the
//! repository traits the services are written against.
//!
//! Every write is a full-document overwrite keyed by id; the last write wins.

pub mod balances;
pub mod categories;
pub mod transactions;

use chrono::NaiveDate;

use crate::error::AppResult;
use crate::models::{Balance, Category, Transaction, TransactionType};

pub use balances::SqliteBalanceRepository;
pub use categories::SqliteCategoryRepository;
pub use transactions::SqliteTransactionRepository;

pub trait TransactionRepository {
    /// Newest first (date, then creation time).
    fn list_for_user(&self, user_id: &str) -> AppResult<Vec<Transaction>>;

    /// Transactions dated in `[from, until)`, newest first.
    fn list_for_user_between(
        &self,
        user_id: &str,
        from: NaiveDate,
        until: NaiveDate,
    ) -> AppResult<Vec<Transaction>>;

    fn get(&self, id: &str) -> AppResult<Option<Transaction>>;

    fn save(&self, transaction: &Transaction) -> AppResult<()>;

    /// Returns whether a document was removed.
    fn delete(&self, id: &str) -> AppResult<bool>;
}

pub trait CategoryRepository {
    fn list(&self) -> AppResult<Vec<Category>>;

    fn list_by_type(&self, r#type: TransactionType) -> AppResult<Vec<Category>>;

    fn get(&self, id: &str) -> AppResult<Option<Category>>;

    /// Case-insensitive lookup within one type.
    fn find_by_name(&self, name: &str, r#type: TransactionType) -> AppResult<Option<Category>>;

    fn save(&self, category: &Category) -> AppResult<()>;

    fn delete(&self, id: &str) -> AppResult<bool>;
}

pub trait BalanceRepository {
    /// Most recently updated first.
    fn list_for_user(&self, user_id: &str) -> AppResult<Vec<Balance>>;

    fn get(&self, id: &str) -> AppResult<Option<Balance>>;

    fn save(&self, balance: &Balance) -> AppResult<()>;

    fn delete(&self, id: &str) -> AppResult<bool>;
}

pub(crate) fn parse_timestamp(s: &str) -> AppResult<chrono::DateTime<chrono::Utc>> {
    chrono::DateTime::parse_from_rfc3339(s)
        .map(|d| d.with_timezone(&chrono::Utc))
        .map_err(|e| crate::error::AppError::Corrupt(format!("timestamp '{}': {}", s, e)))
}

pub(crate) fn parse_stored_decimal(s: &str) -> AppResult<rust_decimal::Decimal> {
    s.parse::<rust_decimal::Decimal>()
        .map_err(|e| crate::error::AppError::Corrupt(format!("amount '{}': {}", s, e)))
}

pub(crate) fn parse_stored_type(s: &str) -> AppResult<TransactionType> {
    match s {
        "expense" => Ok(TransactionType::Expense),
        "income" => Ok(TransactionType::Income),
        other => Err(crate::error::AppError::Corrupt(format!("type '{}'", other))),
    }
}
