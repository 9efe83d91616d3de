// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::{AuthBackend, AuthProvider, AuthSession};
use crate::error::{AppError, AppResult};
use crate::models::User;
use crate::utils::http_client;

pub const DEFAULT_BASE_URL: &str = "https://identitytoolkit.googleapis.com/v1";

pub struct IdentityToolkitAuth {
    client: reqwest::blocking::Client,
    base_url: String,
    api_key: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenResponse {
    id_token: String,
    refresh_token: Option<String>,
    local_id: String,
    email: Option<String>,
    display_name: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OobRequest<'a> {
    request_type: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    id_token: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct IdTokenRequest<'a> {
    id_token: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateRequest<'a> {
    id_token: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    display_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    photo_url: Option<&'a str>,
    return_secure_token: bool,
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    #[serde(default)]
    users: Vec<RemoteUser>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RemoteUser {
    local_id: String,
    email: Option<String>,
    #[serde(default)]
    email_verified: bool,
    display_name: Option<String>,
    photo_url: Option<String>,
}

impl From<RemoteUser> for User {
    fn from(u: RemoteUser) -> Self {
        User {
            id: u.local_id,
            email: u.email.unwrap_or_default(),
            display_name: u.display_name.unwrap_or_default(),
            photo_url: u.photo_url.filter(|p| !p.is_empty()),
            email_verified: u.email_verified,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Maps an Identity Toolkit error code (e.g. `EMAIL_EXISTS`, or
/// `WEAK_PASSWORD : Password should be ...`) to the message shown to the user.
pub fn map_error_code(message: &str) -> AppError {
    let code = message.split(" : ").next().unwrap_or(message).trim();
    let text = match code {
        "EMAIL_EXISTS" => "Este e-mail já está em uso",
        "EMAIL_NOT_FOUND" | "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" => {
            "E-mail ou senha incorretos"
        }
        "USER_DISABLED" => "Esta conta foi desativada",
        "TOO_MANY_ATTEMPTS_TRY_LATER" => "Muitas tentativas. Tente novamente mais tarde",
        "WEAK_PASSWORD" => "A senha deve ter pelo menos 6 caracteres",
        "INVALID_EMAIL" => "E-mail inválido",
        "MISSING_PASSWORD" => "A senha é obrigatória",
        "OPERATION_NOT_ALLOWED" => "Login com e-mail e senha não está habilitado",
        "TOKEN_EXPIRED" | "INVALID_ID_TOKEN" | "USER_NOT_FOUND" => {
            "Sessão expirada. Faça login novamente"
        }
        other => return AppError::Auth(format!("Erro de autenticação: {}", other)),
    };
    AppError::Auth(text.to_string())
}

impl IdentityToolkitAuth {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> AppResult<Self> {
        Ok(Self {
            client: http_client()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    pub fn endpoint(&self, method: &str) -> String {
        format!("{}/accounts:{}?key={}", self.base_url, method, self.api_key)
    }

    fn post<B: Serialize, R: DeserializeOwned>(&self, method: &str, body: &B) -> AppResult<R> {
        tracing::debug!(method, "identity toolkit request");
        let resp = self.client.post(self.endpoint(method)).json(body).send()?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp.json()?);
        }
        let raw = resp.text()?;
        tracing::warn!(method, %status, "identity toolkit request failed");
        match serde_json::from_str::<ErrorEnvelope>(&raw) {
            Ok(env) => Err(map_error_code(&env.error.message)),
            Err(_) => Err(AppError::Auth(format!("Erro de autenticação (HTTP {})", status))),
        }
    }

    fn lookup(&self, id_token: &str) -> AppResult<User> {
        let resp: LookupResponse = self.post("lookup", &IdTokenRequest { id_token })?;
        resp.users
            .into_iter()
            .next()
            .map(User::from)
            .ok_or_else(|| map_error_code("USER_NOT_FOUND"))
    }

    fn session_from(&self, tokens: TokenResponse, user: User) -> AuthSession {
        AuthSession {
            user,
            backend: AuthBackend::IdentityToolkit,
            id_token: Some(tokens.id_token),
            refresh_token: tokens.refresh_token,
        }
    }
}

fn require_token(session: &AuthSession) -> AppResult<&str> {
    session
        .id_token
        .as_deref()
        .ok_or_else(|| map_error_code("INVALID_ID_TOKEN"))
}

impl AuthProvider for IdentityToolkitAuth {
    fn backend(&self) -> AuthBackend {
        AuthBackend::IdentityToolkit
    }

    fn sign_in(&self, email: &str, password: &str) -> AppResult<AuthSession> {
        let tokens: TokenResponse = self.post(
            "signInWithPassword",
            &PasswordRequest {
                email,
                password,
                return_secure_token: true,
            },
        )?;
        let user = match self.lookup(&tokens.id_token) {
            Ok(u) => u,
            Err(e) => {
                // The sign-in itself succeeded; fall back to what it returned.
                tracing::warn!(error = %e, "lookup after sign-in failed");
                User {
                    id: tokens.local_id.clone(),
                    email: tokens.email.clone().unwrap_or_else(|| email.to_string()),
                    display_name: tokens.display_name.clone().unwrap_or_default(),
                    photo_url: None,
                    email_verified: false,
                }
            }
        };
        Ok(self.session_from(tokens, user))
    }

    fn sign_up(&self, display_name: &str, email: &str, password: &str) -> AppResult<AuthSession> {
        let tokens: TokenResponse = self.post(
            "signUp",
            &PasswordRequest {
                email,
                password,
                return_secure_token: true,
            },
        )?;
        let _: serde_json::Value = self.post(
            "update",
            &UpdateRequest {
                id_token: &tokens.id_token,
                display_name: Some(display_name),
                photo_url: None,
                return_secure_token: false,
            },
        )?;
        let user = User {
            id: tokens.local_id.clone(),
            email: tokens.email.clone().unwrap_or_else(|| email.to_string()),
            display_name: display_name.to_string(),
            photo_url: None,
            email_verified: false,
        };
        Ok(self.session_from(tokens, user))
    }

    fn send_email_verification(&self, session: &AuthSession) -> AppResult<()> {
        let _: serde_json::Value = self.post(
            "sendOobCode",
            &OobRequest {
                request_type: "VERIFY_EMAIL",
                id_token: Some(require_token(session)?),
                email: None,
            },
        )?;
        Ok(())
    }

    fn send_password_reset(&self, email: &str) -> AppResult<()> {
        let _: serde_json::Value = self.post(
            "sendOobCode",
            &OobRequest {
                request_type: "PASSWORD_RESET",
                id_token: None,
                email: Some(email),
            },
        )?;
        Ok(())
    }

    fn current_user(&self, session: &AuthSession) -> AppResult<User> {
        self.lookup(require_token(session)?)
    }

    fn update_profile(
        &self,
        session: &AuthSession,
        display_name: Option<&str>,
        photo_url: Option<&str>,
    ) -> AppResult<User> {
        let id_token = require_token(session)?;
        let _: serde_json::Value = self.post(
            "update",
            &UpdateRequest {
                id_token,
                display_name,
                photo_url,
                return_secure_token: false,
            },
        )?;
        self.lookup(id_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::TcpListener;
    use std::sync::{Arc, Mutex};
    use std::thread;

    #[test]
    fn maps_known_codes_to_portuguese() {
        assert_eq!(map_error_code("EMAIL_EXISTS").to_string(), "Este e-mail já está em uso");
        assert_eq!(
            map_error_code("INVALID_LOGIN_CREDENTIALS").to_string(),
            "E-mail ou senha incorretos"
        );
        assert_eq!(
            map_error_code("WEAK_PASSWORD : Password should be at least 6 characters").to_string(),
            "A senha deve ter pelo menos 6 caracteres"
        );
        assert_eq!(
            map_error_code("TOO_MANY_ATTEMPTS_TRY_LATER : Access disabled").to_string(),
            "Muitas tentativas. Tente novamente mais tarde"
        );
    }

    #[test]
    fn unknown_codes_keep_the_code() {
        let err = map_error_code("QUOTA_EXCEEDED");
        assert!(matches!(err, AppError::Auth(_)));
        assert_eq!(err.to_string(), "Erro de autenticação: QUOTA_EXCEEDED");
    }

    #[test]
    fn endpoint_carries_key() {
        let auth = IdentityToolkitAuth::new("http://localhost:9099/v1/", "k123").unwrap();
        assert_eq!(
            auth.endpoint("signUp"),
            "http://localhost:9099/v1/accounts:signUp?key=k123"
        );
    }

    #[test]
    fn request_bodies_use_camel_case() {
        let body = serde_json::to_value(PasswordRequest {
            email: "a@b.com",
            password: "segredo",
            return_secure_token: true,
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({"email": "a@b.com", "password": "segredo", "returnSecureToken": true})
        );
        let oob = serde_json::to_value(OobRequest {
            request_type: "PASSWORD_RESET",
            id_token: None,
            email: Some("a@b.com"),
        })
        .unwrap();
        assert_eq!(oob, serde_json::json!({"requestType": "PASSWORD_RESET", "email": "a@b.com"}));
    }

    #[test]
    fn lookup_user_converts() {
        let raw = r#"{"users":[{"localId":"abc","email":"a@b.com","emailVerified":true,"displayName":"Ana","photoUrl":""}]}"#;
        let resp: LookupResponse = serde_json::from_str(raw).unwrap();
        let user: User = resp.users.into_iter().next().unwrap().into();
        assert_eq!(user.id, "abc");
        assert!(user.email_verified);
        assert_eq!(user.photo_url, None);
    }

    type Seen = Arc<Mutex<Vec<(String, String)>>>;

    /// Local HTTP server answering `accounts:<method>` with a fixed status and body.
    /// Records `(method, request body)` for every call.
    fn canned_server(routes: &[(&'static str, u16, &'static str)]) -> (String, Seen) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let routes: HashMap<&str, (u16, &str)> =
            routes.iter().map(|(m, s, b)| (*m, (*s, *b))).collect();
        let seen: Seen = Arc::default();
        let log = Arc::clone(&seen);
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(mut stream) = stream else { break };
                let mut reader = BufReader::new(stream.try_clone().unwrap());
                let mut request_line = String::new();
                reader.read_line(&mut request_line).unwrap();
                let mut len = 0;
                loop {
                    let mut line = String::new();
                    reader.read_line(&mut line).unwrap();
                    let line = line.trim_end();
                    if line.is_empty() {
                        break;
                    }
                    if let Some((k, v)) = line.split_once(':') {
                        if k.eq_ignore_ascii_case("content-length") {
                            len = v.trim().parse().unwrap();
                        }
                    }
                }
                let mut body = vec![0; len];
                reader.read_exact(&mut body).unwrap();

                let method = request_line
                    .split("accounts:")
                    .nth(1)
                    .and_then(|rest| rest.split('?').next())
                    .unwrap_or_default()
                    .to_string();
                let (status, reply) = routes
                    .get(method.as_str())
                    .copied()
                    .unwrap_or((404, r#"{"error":{"message":"NOT_FOUND"}}"#));
                log.lock()
                    .unwrap()
                    .push((method, String::from_utf8(body).unwrap()));
                let response = format!(
                    "HTTP/1.1 {} Canned\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    reply.len(),
                    reply
                );
                stream.write_all(response.as_bytes()).unwrap();
            }
        });
        (format!("http://{}/v1", addr), seen)
    }

    const TOKENS: &str = r#"{"idToken":"tok-1","refreshToken":"ref-1","localId":"uid-1","email":"ana@example.com","displayName":"Ana Token"}"#;

    #[test]
    fn sign_in_builds_session_from_lookup() {
        let (url, seen) = canned_server(&[
            ("signInWithPassword", 200, TOKENS),
            (
                "lookup",
                200,
                r#"{"users":[{"localId":"uid-1","email":"ana@example.com","emailVerified":true,"displayName":"Ana Souza"}]}"#,
            ),
        ]);
        let auth = IdentityToolkitAuth::new(url, "k123").unwrap();
        let s = auth.sign_in("ana@example.com", "segredo1").unwrap();

        assert_eq!(s.backend, AuthBackend::IdentityToolkit);
        assert_eq!(s.id_token.as_deref(), Some("tok-1"));
        assert_eq!(s.refresh_token.as_deref(), Some("ref-1"));
        assert_eq!(s.user.id, "uid-1");
        assert_eq!(s.user.display_name, "Ana Souza");
        assert!(s.user.email_verified);

        let calls = seen.lock().unwrap();
        let methods: Vec<&str> = calls.iter().map(|(m, _)| m.as_str()).collect();
        assert_eq!(methods, ["signInWithPassword", "lookup"]);
        let lookup: serde_json::Value = serde_json::from_str(&calls[1].1).unwrap();
        assert_eq!(lookup, serde_json::json!({"idToken": "tok-1"}));
    }

    #[test]
    fn sign_in_falls_back_to_token_fields_when_lookup_fails() {
        let (url, _) = canned_server(&[
            ("signInWithPassword", 200, TOKENS),
            ("lookup", 400, r#"{"error":{"message":"INVALID_ID_TOKEN"}}"#),
        ]);
        let auth = IdentityToolkitAuth::new(url, "k123").unwrap();
        let s = auth.sign_in("ana@example.com", "segredo1").unwrap();

        assert_eq!(s.user.id, "uid-1");
        assert_eq!(s.user.email, "ana@example.com");
        assert_eq!(s.user.display_name, "Ana Token");
        assert!(!s.user.email_verified);
        assert_eq!(s.id_token.as_deref(), Some("tok-1"));
    }

    #[test]
    fn error_codes_from_the_server_become_messages() {
        let (url, seen) = canned_server(&[(
            "signUp",
            400,
            r#"{"error":{"code":400,"message":"EMAIL_EXISTS"}}"#,
        )]);
        let auth = IdentityToolkitAuth::new(url, "k123").unwrap();
        let err = auth.sign_up("Ana", "ana@example.com", "segredo1").unwrap_err();

        assert!(matches!(err, AppError::Auth(_)));
        assert_eq!(err.to_string(), "Este e-mail já está em uso");
        // no profile update after a failed sign-up
        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn sign_up_stores_the_display_name() {
        let (url, seen) = canned_server(&[("signUp", 200, TOKENS), ("update", 200, "{}")]);
        let auth = IdentityToolkitAuth::new(url, "k123").unwrap();
        let s = auth.sign_up("Ana Souza", "ana@example.com", "segredo1").unwrap();

        assert_eq!(s.user.display_name, "Ana Souza");
        assert_eq!(s.user.id, "uid-1");
        let calls = seen.lock().unwrap();
        assert_eq!(calls[1].0, "update");
        let update: serde_json::Value = serde_json::from_str(&calls[1].1).unwrap();
        assert_eq!(update["displayName"], "Ana Souza");
        assert_eq!(update["idToken"], "tok-1");
    }

    #[test]
    fn non_json_failures_report_the_status() {
        let (url, _) = canned_server(&[("sendOobCode", 503, "indisponível")]);
        let auth = IdentityToolkitAuth::new(url, "k123").unwrap();
        let err = auth.send_password_reset("ana@example.com").unwrap_err();
        assert!(err.to_string().contains("HTTP 503"), "{err}");
    }
}
