// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::Utc;
use rust_decimal::Decimal;

use crate::error::{AppError, AppResult};
use crate::models::{Balance, new_id};
use crate::storage::BalanceRepository;
use crate::validation::validate_amount_non_negative;

pub struct BalanceService<'a> {
    repo: &'a dyn BalanceRepository,
}

impl<'a> BalanceService<'a> {
    pub fn new(repo: &'a dyn BalanceRepository) -> Self {
        Self { repo }
    }

    pub fn add(&self, user_id: &str, amount: Decimal) -> AppResult<Balance> {
        validate_amount_non_negative(amount)?;
        let b = Balance {
            id: new_id(),
            user_id: user_id.to_string(),
            amount,
            updated_at: Utc::now(),
        };
        self.repo.save(&b)?;
        tracing::info!(id = %b.id, amount = %b.amount, "balance added");
        Ok(b)
    }

    pub fn get(&self, user_id: &str, id: &str) -> AppResult<Balance> {
        match self.repo.get(id)? {
            Some(b) if b.user_id == user_id => Ok(b),
            _ => Err(AppError::balance_not_found(id)),
        }
    }

    pub fn edit(&self, user_id: &str, id: &str, amount: Decimal) -> AppResult<Balance> {
        validate_amount_non_negative(amount)?;
        let mut b = self.get(user_id, id)?;
        b.amount = amount;
        b.updated_at = Utc::now();
        self.repo.save(&b)?;
        tracing::info!(id = %b.id, amount = %b.amount, "balance updated");
        Ok(b)
    }

    pub fn delete(&self, user_id: &str, id: &str) -> AppResult<Balance> {
        let b = self.get(user_id, id)?;
        self.repo.delete(id)?;
        tracing::info!(id, "balance deleted");
        Ok(b)
    }

    pub fn list(&self, user_id: &str) -> AppResult<Vec<Balance>> {
        self.repo.list_for_user(user_id)
    }

    /// The most recently updated balance document, if any.
    pub fn latest(&self, user_id: &str) -> AppResult<Option<Balance>> {
        Ok(self.repo.list_for_user(user_id)?.into_iter().next())
    }

    pub fn current(&self, user_id: &str) -> AppResult<Decimal> {
        Ok(self
            .latest(user_id)?
            .map(|b| b.amount)
            .unwrap_or(Decimal::ZERO))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::SqliteBalanceRepository;

    #[test]
    fn current_is_latest_update() {
        let conn = crate::db::open_in_memory().unwrap();
        let repo = SqliteBalanceRepository::new(&conn);
        let svc = BalanceService::new(&repo);

        assert_eq!(svc.current("u1").unwrap(), Decimal::ZERO);
        let first = svc.add("u1", Decimal::new(1000, 0)).unwrap();
        std::thread::sleep(std::time::Duration::from_millis(2));
        svc.add("u1", Decimal::new(250, 0)).unwrap();
        assert_eq!(svc.current("u1").unwrap(), Decimal::new(250, 0));

        std::thread::sleep(std::time::Duration::from_millis(2));
        svc.edit("u1", &first.id, Decimal::new(1500, 0)).unwrap();
        assert_eq!(svc.current("u1").unwrap(), Decimal::new(1500, 0));
        assert_eq!(svc.list("u1").unwrap().len(), 2);
        assert_eq!(svc.current("u2").unwrap(), Decimal::ZERO);
    }

    #[test]
    fn rejects_negative_and_foreign_edits() {
        let conn = crate::db::open_in_memory().unwrap();
        let repo = SqliteBalanceRepository::new(&conn);
        let svc = BalanceService::new(&repo);

        assert!(svc.add("u1", Decimal::new(-1, 0)).unwrap_err().is_validation());
        let b = svc.add("u1", Decimal::ZERO).unwrap();
        assert!(svc.edit("u2", &b.id, Decimal::ONE).unwrap_err().is_not_found());
        assert!(svc.delete("u2", &b.id).unwrap_err().is_not_found());
        svc.delete("u1", &b.id).unwrap();
        assert!(svc.list("u1").unwrap().is_empty());
    }
}
