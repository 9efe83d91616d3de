// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Client-side field checks run before anything reaches a provider or the store.

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;

use crate::error::{AppError, AppResult};

pub const MIN_PASSWORD_LEN: usize = 6;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("static email regex")
});

static COLOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("static color regex"));

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email.trim())
}

pub fn validate_email(email: &str) -> AppResult<()> {
    if email.trim().is_empty() {
        return Err(AppError::validation("O e-mail é obrigatório"));
    }
    if !is_valid_email(email) {
        return Err(AppError::validation("E-mail inválido"));
    }
    Ok(())
}

pub fn validate_password(password: &str) -> AppResult<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::validation(format!(
            "A senha deve ter pelo menos {} caracteres",
            MIN_PASSWORD_LEN
        )));
    }
    Ok(())
}

pub fn validate_password_confirmation(password: &str, confirmation: &str) -> AppResult<()> {
    if password != confirmation {
        return Err(AppError::validation("As senhas não coincidem"));
    }
    Ok(())
}

pub fn validate_display_name(name: &str) -> AppResult<()> {
    validate_non_empty("nome", name)
}

pub fn validate_non_empty(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("O campo {} é obrigatório", field)));
    }
    Ok(())
}

pub fn validate_amount_positive(amount: Decimal) -> AppResult<()> {
    if amount <= Decimal::ZERO {
        return Err(AppError::validation("O valor deve ser maior que zero"));
    }
    Ok(())
}

pub fn validate_amount_non_negative(amount: Decimal) -> AppResult<()> {
    if amount < Decimal::ZERO {
        return Err(AppError::validation("O valor não pode ser negativo"));
    }
    Ok(())
}

pub fn validate_color(color: &str) -> AppResult<()> {
    if !COLOR_RE.is_match(color.trim()) {
        return Err(AppError::validation(format!(
            "Cor inválida '{}': use o formato #RRGGBB",
            color.trim()
        )));
    }
    Ok(())
}
