// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Error type shared by repositories, auth providers and services.
//!
//! The `Display` text of every variant is the message shown to the user,
//! so it is written in Portuguese.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{entity} não encontrado(a): {identifier}")]
    NotFound {
        entity: &'static str,
        identifier: String,
    },

    #[error("{entity} já existe: {identifier}")]
    Duplicate {
        entity: &'static str,
        identifier: String,
    },

    #[error("{0}")]
    Auth(String),

    #[error("Nenhum usuário autenticado. Faça login com `fincontrol auth login`.")]
    NotAuthenticated,

    #[error("Operação não suportada: {0}")]
    Unsupported(String),

    #[error("Erro no banco de dados: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Dados inválidos armazenados: {0}")]
    Corrupt(String),

    #[error("Erro de conexão: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Erro ao gerar PDF: {0}")]
    Pdf(String),

    #[error("Erro ao exportar: {0}")]
    Export(String),

    #[error("Erro de arquivo: {0}")]
    Io(#[from] std::io::Error),

    #[error("Erro de configuração: {0}")]
    Config(String),

    #[error("Erro de serialização: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn transaction_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: "Transação",
            identifier: id.into(),
        }
    }

    pub fn category_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: "Categoria",
            identifier: id.into(),
        }
    }

    pub fn balance_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: "Saldo",
            identifier: id.into(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_entity() {
        let err = AppError::category_not_found("abc");
        assert_eq!(err.to_string(), "Categoria não encontrado(a): abc");
        assert!(err.is_not_found());
    }

    #[test]
    fn validation_message_is_passed_through() {
        let err = AppError::validation("E-mail inválido");
        assert_eq!(err.to_string(), "E-mail inválido");
        assert!(err.is_validation());
    }
}
