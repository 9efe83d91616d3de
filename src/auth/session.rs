// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The active session lives in the `settings` table as JSON.

use rusqlite::Connection;

use super::AuthSession;
use crate::error::AppResult;
use crate::utils::{delete_setting, get_setting, set_setting};

const SESSION_KEY: &str = "session";

pub fn save(conn: &Connection, session: &AuthSession) -> AppResult<()> {
    set_setting(conn, SESSION_KEY, &serde_json::to_string(session)?)
}

pub fn load(conn: &Connection) -> AppResult<Option<AuthSession>> {
    match get_setting(conn, SESSION_KEY)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

pub fn clear(conn: &Connection) -> AppResult<()> {
    delete_setting(conn, SESSION_KEY)
}
