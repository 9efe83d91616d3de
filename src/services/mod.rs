// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod auth;
pub mod balance;
pub mod categories;
pub mod reports;
pub mod transactions;

pub use auth::AuthService;
pub use balance::BalanceService;
pub use categories::CategoryService;
pub use reports::ReportService;
pub use transactions::TransactionService;
