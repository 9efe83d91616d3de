// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::ArgMatches;
use rusqlite::Connection;

use super::required;
use crate::config::{KEY_API_KEY, KNOWN_KEYS, get_value, set_value};
use crate::error::AppResult;
use crate::utils::{list_settings, pretty_table};

/// Runs without an auth provider.
pub fn handle(conn: &Connection, m: &ArgMatches) -> AppResult<()> {
    match m.subcommand() {
        Some(("set", sub)) => {
            let key = required(sub, "key")?;
            set_value(conn, key, required(sub, "value")?)?;
            println!("{} atualizado", key);
        }
        Some(("get", sub)) => match get_value(conn, required(sub, "key")?)? {
            Some(v) => println!("{}", v),
            None => println!("(não definido)"),
        },
        Some(("list", _)) => {
            let rows = list_settings(conn)?
                .into_iter()
                .filter(|(k, _)| KNOWN_KEYS.contains(&k.as_str()))
                .map(|(k, v)| {
                    let shown = if k == KEY_API_KEY { mask(&v) } else { v };
                    vec![k, shown]
                })
                .collect();
            println!("{}", pretty_table(&["Chave", "Valor"], rows));
        }
        _ => {}
    }
    Ok(())
}

fn mask(secret: &str) -> String {
    let tail: String = secret
        .chars()
        .rev()
        .take(4)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    format!("****{}", tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_key_is_masked() {
        assert_eq!(mask("AIzaSyExample1234"), "****1234");
        assert_eq!(mask("ab"), "****ab");
    }
}
