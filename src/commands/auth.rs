// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::ArgMatches;

use super::{Context, optional, required};
use crate::error::AppResult;
use crate::models::User;
use crate::utils::{maybe_print_json, pretty_table};

pub fn handle(ctx: &Context, m: &ArgMatches) -> AppResult<()> {
    let svc = ctx.auth_service();
    match m.subcommand() {
        Some(("register", sub)) => {
            let password = required(sub, "password")?;
            let confirm = optional(sub, "confirm").unwrap_or(password);
            let s = svc.register(
                required(sub, "name")?,
                required(sub, "email")?,
                password,
                confirm,
            )?;
            println!("Conta criada para {} ({})", s.user.display_name, s.user.email);
            if !s.user.email_verified {
                println!("Verifique seu e-mail para confirmar a conta.");
            }
        }
        Some(("login", sub)) => {
            let s = svc.login(required(sub, "email")?, required(sub, "password")?)?;
            println!("Bem-vindo(a), {}!", display(&s.user));
        }
        Some(("logout", _)) => {
            svc.logout()?;
            println!("Sessão encerrada");
        }
        Some(("whoami", sub)) => {
            let user = if sub.get_flag("refresh") {
                svc.refresh_user()?
            } else {
                svc.current_user()?
            };
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &user)? {
                print_user(&user, ctx);
            }
        }
        Some(("verify-email", _)) => {
            svc.send_email_verification()?;
            println!("E-mail de verificação enviado");
        }
        Some(("reset-password", sub)) => {
            let email = required(sub, "email")?;
            svc.reset_password(email)?;
            println!("Enviamos um link de redefinição de senha para {}", email.trim());
        }
        Some(("profile", sub)) => {
            let user = svc.update_profile(optional(sub, "name"), optional(sub, "photo_url"))?;
            println!("Perfil atualizado");
            print_user(&user, ctx);
        }
        _ => {}
    }
    Ok(())
}

fn display(user: &User) -> &str {
    if user.display_name.is_empty() {
        &user.email
    } else {
        &user.display_name
    }
}

fn print_user(user: &User, ctx: &Context) {
    let rows = vec![
        vec!["ID".into(), user.id.clone()],
        vec!["Nome".into(), user.display_name.clone()],
        vec!["E-mail".into(), user.email.clone()],
        vec![
            "E-mail verificado".into(),
            if user.email_verified { "sim" } else { "não" }.into(),
        ],
        vec!["Foto".into(), user.photo_url.clone().unwrap_or_default()],
        vec!["Backend".into(), ctx.config.auth_backend.to_string()],
    ];
    println!("{}", pretty_table(&["Campo", "Valor"], rows));
}
