//! Per-request credential exchange
//!
//! The caller's identity token arrives as a bearer header. It is bound into
//! an [`IdTokenSource`] and handed to an [`OidcCredentialsProvider`], which
//! trades it at the workspace's OIDC endpoint for an access token the
//! directory API accepts.

use crate::error::{DirectoryError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::debug;

const TOKEN_EXCHANGE_GRANT: &str = "urn:ietf:params:oauth:grant-type:token-exchange";
const JWT_TOKEN_TYPE: &str = "urn:ietf:params:oauth:token-type:jwt";
const TOKEN_SCOPE: &str = "all-apis";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Missing/invalid Authorization header")]
    MissingBearer,
}

/// Pull the token out of an `Authorization: Bearer <token>` header value
///
/// The scheme is matched case-sensitively and the token is trimmed.
pub fn extract_bearer(header: Option<&str>) -> std::result::Result<String, AuthError> {
    header
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token.trim().to_string())
        .ok_or(AuthError::MissingBearer)
}

/// Identity assertion presented to the token exchange
#[derive(Clone, PartialEq, Eq)]
pub struct IdToken {
    pub jwt: String,
}

impl IdToken {
    pub fn new(jwt: impl Into<String>) -> Self {
        Self { jwt: jwt.into() }
    }
}

impl std::fmt::Debug for IdToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdToken").field("jwt", &"<redacted>").finish()
    }
}

/// Supplies the identity token when the client performs its auth handshake
pub trait IdTokenSource: Send + Sync {
    fn id_token(&self) -> IdToken;
}

impl<F> IdTokenSource for F
where
    F: Fn() -> IdToken + Send + Sync,
{
    fn id_token(&self) -> IdToken {
        self()
    }
}

/// Produces the `Authorization` header value for directory calls
#[async_trait]
pub trait CredentialsProvider: Send + Sync {
    async fn authorization(&self) -> Result<String>;
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    token_type: Option<String>,
}

/// Exchanges the caller's identity token for a workspace access token
///
/// The exchanged token is kept for the lifetime of this provider only, which
/// is one inbound request.
pub struct OidcCredentialsProvider {
    http: Client,
    token_endpoint: String,
    client_id: Option<String>,
    source: Arc<dyn IdTokenSource>,
    exchanged: OnceCell<String>,
}

impl OidcCredentialsProvider {
    pub fn new(
        http: Client,
        host: &str,
        client_id: Option<String>,
        source: Arc<dyn IdTokenSource>,
    ) -> Self {
        Self {
            http,
            token_endpoint: format!("{}/oidc/v1/token", host.trim_end_matches('/')),
            client_id,
            source,
            exchanged: OnceCell::new(),
        }
    }

    async fn exchange(&self) -> Result<String> {
        let id_token = self.source.id_token();

        let mut form = vec![
            ("grant_type", TOKEN_EXCHANGE_GRANT),
            ("subject_token", id_token.jwt.as_str()),
            ("subject_token_type", JWT_TOKEN_TYPE),
            ("scope", TOKEN_SCOPE),
        ];
        if let Some(client_id) = &self.client_id {
            form.push(("client_id", client_id.as_str()));
        }

        debug!("Exchanging identity token at {}", self.token_endpoint);

        let response = self.http.post(&self.token_endpoint).form(&form).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DirectoryError::Auth(format!("{status} - {body}")));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| DirectoryError::Auth(format!("malformed token response: {e}")))?;

        let token_type = token.token_type.unwrap_or_else(|| "Bearer".to_string());
        Ok(format!("{} {}", token_type, token.access_token))
    }
}

#[async_trait]
impl CredentialsProvider for OidcCredentialsProvider {
    async fn authorization(&self) -> Result<String> {
        self.exchanged
            .get_or_try_init(|| self.exchange())
            .await
            .cloned()
    }
}
