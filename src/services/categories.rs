// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{AppError, AppResult};
use crate::models::{Category, TransactionType, new_id};
use crate::storage::CategoryRepository;
use crate::storage::categories::DEFAULT_CATEGORIES;
use crate::validation::{validate_color, validate_non_empty};

pub const DEFAULT_COLOR: &str = "#607D8B";

pub struct CategoryService<'a> {
    repo: &'a dyn CategoryRepository,
}

#[derive(Debug, Clone, Default)]
pub struct CategoryChanges {
    pub name: Option<String>,
    pub r#type: Option<TransactionType>,
    pub color: Option<String>,
}

impl<'a> CategoryService<'a> {
    pub fn new(repo: &'a dyn CategoryRepository) -> Self {
        Self { repo }
    }

    pub fn list(&self, r#type: Option<TransactionType>) -> AppResult<Vec<Category>> {
        match r#type {
            Some(t) => self.repo.list_by_type(t),
            None => self.repo.list(),
        }
    }

    /// Looks a category up by id first, then by name within `type_hint` (or any type).
    pub fn find(&self, identifier: &str, type_hint: Option<TransactionType>) -> AppResult<Category> {
        if let Some(c) = self.repo.get(identifier)? {
            return Ok(c);
        }
        let types = match type_hint {
            Some(t) => vec![t],
            None => vec![TransactionType::Expense, TransactionType::Income],
        };
        let mut found = Vec::new();
        for t in types {
            if let Some(c) = self.repo.find_by_name(identifier, t)? {
                found.push(c);
            }
        }
        match found.len() {
            0 => Err(AppError::category_not_found(identifier)),
            1 => Ok(found.remove(0)),
            _ => Err(AppError::validation(format!(
                "Existe mais de uma categoria '{}'; informe o tipo",
                identifier.trim()
            ))),
        }
    }

    pub fn add(&self, name: &str, r#type: TransactionType, color: Option<&str>) -> AppResult<Category> {
        validate_non_empty("nome", name)?;
        let color = color.unwrap_or(DEFAULT_COLOR).trim().to_uppercase();
        validate_color(&color)?;
        if self.repo.find_by_name(name, r#type)?.is_some() {
            return Err(AppError::Duplicate {
                entity: "Categoria",
                identifier: name.trim().to_string(),
            });
        }
        let category = Category {
            id: new_id(),
            name: name.trim().to_string(),
            r#type,
            color,
            is_default: false,
        };
        self.repo.save(&category)?;
        tracing::info!(id = %category.id, name = %category.name, "category added");
        Ok(category)
    }

    pub fn edit(&self, id: &str, changes: CategoryChanges) -> AppResult<Category> {
        let mut category = self
            .repo
            .get(id)?
            .ok_or_else(|| AppError::category_not_found(id))?;
        if category.is_default {
            return Err(AppError::validation("Categorias padrão não podem ser alteradas"));
        }
        if let Some(name) = changes.name {
            validate_non_empty("nome", &name)?;
            category.name = name.trim().to_string();
        }
        if let Some(t) = changes.r#type {
            category.r#type = t;
        }
        if let Some(color) = changes.color {
            let color = color.trim().to_uppercase();
            validate_color(&color)?;
            category.color = color;
        }
        if let Some(existing) = self.repo.find_by_name(&category.name, category.r#type)? {
            if existing.id != category.id {
                return Err(AppError::Duplicate {
                    entity: "Categoria",
                    identifier: category.name,
                });
            }
        }
        self.repo.save(&category)?;
        tracing::info!(id = %category.id, "category updated");
        Ok(category)
    }

    pub fn delete(&self, id: &str) -> AppResult<Category> {
        let category = self
            .repo
            .get(id)?
            .ok_or_else(|| AppError::category_not_found(id))?;
        if category.is_default {
            return Err(AppError::validation("Categorias padrão não podem ser excluídas"));
        }
        self.repo.delete(id)?;
        tracing::info!(id, "category deleted");
        Ok(category)
    }

    /// Restores any default category missing from the store; returns how many were written.
    pub fn seed_defaults(&self) -> AppResult<usize> {
        let mut written = 0;
        for (id, name, r#type, color) in DEFAULT_CATEGORIES {
            if self.repo.get(id)?.is_some() {
                continue;
            }
            self.repo.save(&Category {
                id: id.to_string(),
                name: name.to_string(),
                r#type: *r#type,
                color: color.to_string(),
                is_default: true,
            })?;
            written += 1;
        }
        if written > 0 {
            tracing::info!(written, "default categories restored");
        }
        Ok(written)
    }
}
