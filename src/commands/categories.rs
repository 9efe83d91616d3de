// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::ArgMatches;

use super::{Context, optional, required, type_flag};
use crate::error::{AppError, AppResult};
use crate::services::CategoryService;
use crate::services::categories::CategoryChanges;
use crate::storage::SqliteCategoryRepository;
use crate::utils::{maybe_print_json, pretty_table};

pub fn handle(ctx: &Context, m: &ArgMatches) -> AppResult<()> {
    // categories are shared, but managing them still requires a signed-in user
    ctx.user()?;
    let repo = SqliteCategoryRepository::new(ctx.conn);
    let svc = CategoryService::new(&repo);
    match m.subcommand() {
        Some(("add", sub)) => {
            let ty = type_flag(sub)?
                .ok_or_else(|| AppError::validation("O argumento --type é obrigatório"))?;
            let c = svc.add(required(sub, "name")?, ty, optional(sub, "color"))?;
            println!("Categoria '{}' ({}) adicionada", c.name, c.r#type.label());
        }
        Some(("edit", sub)) => {
            let target = svc.find(required(sub, "id")?, None)?;
            let c = svc.edit(
                &target.id,
                CategoryChanges {
                    name: optional(sub, "name").map(str::to_string),
                    r#type: type_flag(sub)?,
                    color: optional(sub, "color").map(str::to_string),
                },
            )?;
            println!("Categoria '{}' atualizada", c.name);
        }
        Some(("list", sub)) => {
            let data = svc.list(type_flag(sub)?)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
                let rows = data
                    .iter()
                    .map(|c| {
                        vec![
                            c.name.clone(),
                            c.r#type.label().to_string(),
                            c.color.clone(),
                            if c.is_default { "sim" } else { "" }.to_string(),
                            c.id.clone(),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["Categoria", "Tipo", "Cor", "Padrão", "ID"], rows)
                );
            }
        }
        Some(("rm", sub)) => {
            let target = svc.find(required(sub, "id")?, None)?;
            let c = svc.delete(&target.id)?;
            println!("Categoria '{}' removida", c.name);
        }
        _ => {}
    }
    Ok(())
}
