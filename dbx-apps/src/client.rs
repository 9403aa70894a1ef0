//! HTTP implementation of [`AppsDirectory`] against the workspace REST API

use crate::app::App;
use crate::auth::{CredentialsProvider, IdToken, IdTokenSource, OidcCredentialsProvider};
use crate::directory::{AppsDirectory, DirectoryFactory, SharedDirectory};
use crate::error::{DirectoryError, Result};
use async_trait::async_trait;
use reqwest::{header, Client, Response};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

/// Where the workspace lives and how to identify to its token endpoint
#[derive(Debug, Clone)]
pub struct WorkspaceConfig {
    pub host: String,
    pub client_id: Option<String>,
}

impl WorkspaceConfig {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            client_id: None,
        }
    }

    fn base_url(&self) -> Result<Url> {
        let url = Url::parse(&self.host)
            .map_err(|e| DirectoryError::InvalidHost(format!("'{}': {}", self.host, e)))?;
        if url.cannot_be_a_base() {
            return Err(DirectoryError::InvalidHost(format!(
                "'{}' cannot be used as a base URL",
                self.host
            )));
        }
        Ok(url)
    }
}

#[derive(Debug, Deserialize)]
struct ListAppsPage {
    #[serde(default)]
    apps: Vec<serde_json::Value>,
    #[serde(default)]
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    error_code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Authenticated handle to the apps API, scoped to one caller
pub struct WorkspaceClient {
    http: Client,
    base_url: Url,
    credentials: Arc<dyn CredentialsProvider>,
}

impl WorkspaceClient {
    pub fn new(http: Client, base_url: Url, credentials: Arc<dyn CredentialsProvider>) -> Self {
        Self {
            http,
            base_url,
            credentials,
        }
    }

    fn apps_url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                DirectoryError::InvalidHost(format!("cannot-be-a-base URL {}", self.base_url))
            })?
            .pop_if_empty()
            .extend(["api", "2.0", "apps"])
            .extend(segments);
        Ok(url)
    }

    fn app_url(&self, name: &str, action: Option<&str>) -> Result<Url> {
        if name.trim().is_empty() {
            return Err(DirectoryError::InvalidName("app name is empty".to_string()));
        }
        match action {
            Some(action) => self.apps_url(&[name, action]),
            None => self.apps_url(&[name]),
        }
    }

    async fn authorized(&self, request: reqwest::RequestBuilder) -> Result<Response> {
        let authorization = self.credentials.authorization().await?;
        let response = request
            .header(header::AUTHORIZATION, authorization)
            .send()
            .await?;
        check_status(response).await
    }
}

async fn check_status(response: Response) -> Result<Response> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<ApiErrorBody>(&body) {
        Ok(ApiErrorBody {
            message: Some(message),
            error_code,
        }) => match error_code {
            Some(code) => format!("{code}: {message}"),
            None => message,
        },
        _ if body.is_empty() => format!("request failed with status {status}"),
        _ => body,
    };

    Err(DirectoryError::Api { status, message })
}

#[async_trait]
impl AppsDirectory for WorkspaceClient {
    async fn list(&self) -> Result<Vec<App>> {
        let url = self.apps_url(&[])?;
        let mut apps = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut request = self.http.get(url.clone());
            if let Some(token) = &page_token {
                request = request.query(&[("page_token", token)]);
            }

            let page: ListAppsPage = self.authorized(request).await?.json().await?;

            for item in page.apps {
                match serde_json::from_value::<App>(item) {
                    Ok(app) => apps.push(app),
                    Err(e) => warn!("Skipping app entry that could not be decoded: {}", e),
                }
            }

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        debug!("Listed {} apps", apps.len());
        Ok(apps)
    }

    async fn start(&self, name: &str) -> Result<()> {
        let url = self.app_url(name, Some("start"))?;
        let request = self.http.post(url).json(&serde_json::json!({}));
        self.authorized(request).await?;
        Ok(())
    }

    async fn get(&self, name: &str) -> Result<App> {
        let url = self.app_url(name, None)?;
        let app = self.authorized(self.http.get(url)).await?.json().await?;
        Ok(app)
    }
}

/// Hands out one [`WorkspaceClient`] per inbound request
///
/// Only the connection pool is shared; every handle exchanges its own
/// caller's token.
#[derive(Clone)]
pub struct WorkspaceClientFactory {
    http: Client,
    base_url: Url,
    client_id: Option<String>,
}

impl WorkspaceClientFactory {
    pub fn new(config: &WorkspaceConfig) -> Result<Self> {
        Self::with_http_client(config, Client::new())
    }

    pub fn with_http_client(config: &WorkspaceConfig, http: Client) -> Result<Self> {
        Ok(Self {
            http,
            base_url: config.base_url()?,
            client_id: config.client_id.clone(),
        })
    }
}

impl DirectoryFactory for WorkspaceClientFactory {
    fn connect(&self, bearer_token: String) -> SharedDirectory {
        let source: Arc<dyn IdTokenSource> = Arc::new(move || IdToken::new(bearer_token.clone()));
        let credentials = OidcCredentialsProvider::new(
            self.http.clone(),
            self.base_url.as_str(),
            self.client_id.clone(),
            source,
        );

        Arc::new(WorkspaceClient::new(
            self.http.clone(),
            self.base_url.clone(),
            Arc::new(credentials),
        ))
    }
}
