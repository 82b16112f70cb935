use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::{
    fmt,
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use super::{config::Config, request::Request};
use crate::result::{Error, Result};

const TOKEN_ENDPOINT: &str = "/oauth/token";

/// Account credentials for the password grant.
#[derive(Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct Auth {
    pub grant_type: String,
    pub client_id: String,
    pub client_secret: String,
    pub email: String,
    pub password: String,
}

impl Auth {
    pub fn password_grant(client_id: &str, client_secret: &str, email: &str, password: &str) -> Self {
        Auth {
            grant_type: "password".to_owned(),
            client_id: client_id.to_owned(),
            client_secret: client_secret.to_owned(),
            email: email.to_owned(),
            password: password.to_owned(),
        }
    }
}

impl fmt::Debug for Auth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Auth")
            .field("grant_type", &self.grant_type)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Body of `POST /oauth/token`.
#[derive(Serialize)]
pub struct TokenRequest<'a> {
    #[serde(flatten)]
    auth: &'a Auth,
    url: &'a str,
    streaming_url: &'a str,
}

impl<'a> TokenRequest<'a> {
    pub fn new(auth: &'a Auth, config: &'a Config) -> Self {
        TokenRequest {
            auth,
            url: config.api_url().as_str(),
            streaming_url: config.streaming_url(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Token {
    pub access_token: String,
    pub token_type: Option<String>,
    pub expires_in: Option<u64>,
    pub created_at: Option<u64>,
    pub refresh_token: Option<String>,
}

impl Token {
    /// `None` when either field is missing or the sum does not fit a
    /// `SystemTime`.
    pub fn expires_at(&self) -> Option<SystemTime> {
        UNIX_EPOCH
            .checked_add(Duration::from_secs(self.created_at?))?
            .checked_add(Duration::from_secs(self.expires_in?))
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("access_token", &"<redacted>")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .field("created_at", &self.created_at)
            .finish_non_exhaustive()
    }
}

/// Exchanges `auth` for a bearer token. Only an HTTP 200 carrying a
/// non-empty `access_token` counts as success.
pub fn authenticate(request: &Request, auth: &Auth, config: &Config) -> Result<Token> {
    let body = TokenRequest::new(auth, config);
    log::info!("Logging in as {}...", auth.email);

    let transport = |source| Error::Transport {
        endpoint: TOKEN_ENDPOINT.to_owned(),
        source,
    };
    let response = request.token(&body).send().map_err(transport)?;
    let status = response.status();
    let raw = response.text().map_err(transport)?;

    if status != StatusCode::OK {
        return Err(Error::Authentication {
            status: Some(status),
            reason: format!("token endpoint responded with {status}: {raw}"),
        });
    }

    let token: Token = serde_json::from_str(&raw).map_err(|err| Error::Authentication {
        status: Some(status),
        reason: format!("malformed token response: {err}"),
    })?;
    if token.access_token.is_empty() {
        return Err(Error::Authentication {
            status: Some(status),
            reason: "token endpoint returned an empty access token".to_owned(),
        });
    }

    match token.expires_at() {
        Some(expiration) => log::info!("Logged in until {:?}!", expiration),
        None => log::info!("Logged in!"),
    }

    Ok(token)
}
