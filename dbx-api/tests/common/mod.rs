//! Common test utilities and helpers for dbx-api tests
//!
//! Provides an in-memory directory with call counters so tests can assert
//! both the HTTP surface and whether the upstream was reached at all.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use dbx_api::{create_app, AppState};
use dbx_apps::{App, AppsDirectory, DirectoryError, DirectoryFactory, Result, SharedDirectory};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

#[derive(Default)]
pub struct Calls {
    pub connects: AtomicUsize,
    pub list: AtomicUsize,
    pub start: AtomicUsize,
    pub get: AtomicUsize,
    pub tokens: Mutex<Vec<String>>,
}

impl Calls {
    pub fn upstream_total(&self) -> usize {
        self.list.load(Ordering::SeqCst)
            + self.start.load(Ordering::SeqCst)
            + self.get.load(Ordering::SeqCst)
    }

    pub fn connects(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }
}

/// Fake workspace contents shared by every handle the factory hands out
#[derive(Clone, Default)]
pub struct MockWorkspace {
    pub apps: Arc<Mutex<Vec<App>>>,
    pub failure: Arc<Mutex<Option<String>>>,
    pub calls: Arc<Calls>,
}

impl MockWorkspace {
    pub fn with_apps(apps: Vec<App>) -> Self {
        let workspace = Self::default();
        *workspace.apps.lock().unwrap() = apps;
        workspace
    }

    /// Make every directory call fail with this message
    pub fn failing(message: &str) -> Self {
        let workspace = Self::default();
        *workspace.failure.lock().unwrap() = Some(message.to_string());
        workspace
    }

    pub fn set_apps(&self, apps: Vec<App>) {
        *self.apps.lock().unwrap() = apps;
    }

    fn check_failure(&self) -> Result<()> {
        match self.failure.lock().unwrap().clone() {
            Some(message) => Err(DirectoryError::Api {
                status: 400,
                message,
            }),
            None => Ok(()),
        }
    }

    fn find(&self, name: &str) -> Result<App> {
        self.apps
            .lock()
            .unwrap()
            .iter()
            .find(|app| app.name == name)
            .cloned()
            .ok_or_else(|| DirectoryError::Api {
                status: 404,
                message: format!("App with name {name} does not exist or is deleted."),
            })
    }
}

pub struct MockDirectory {
    workspace: MockWorkspace,
}

#[async_trait]
impl AppsDirectory for MockDirectory {
    async fn list(&self) -> Result<Vec<App>> {
        self.workspace.calls.list.fetch_add(1, Ordering::SeqCst);
        self.workspace.check_failure()?;
        Ok(self.workspace.apps.lock().unwrap().clone())
    }

    async fn start(&self, name: &str) -> Result<()> {
        self.workspace.calls.start.fetch_add(1, Ordering::SeqCst);
        self.workspace.check_failure()?;
        self.workspace.find(name).map(|_| ())
    }

    async fn get(&self, name: &str) -> Result<App> {
        self.workspace.calls.get.fetch_add(1, Ordering::SeqCst);
        self.workspace.check_failure()?;
        self.workspace.find(name)
    }
}

impl DirectoryFactory for MockWorkspace {
    fn connect(&self, bearer_token: String) -> SharedDirectory {
        self.calls.connects.fetch_add(1, Ordering::SeqCst);
        self.calls.tokens.lock().unwrap().push(bearer_token);
        Arc::new(MockDirectory {
            workspace: self.clone(),
        })
    }
}

pub fn create_test_app(workspace: MockWorkspace) -> Router {
    create_app(
        AppState::new(workspace),
        &["http://localhost:3000".to_string()],
    )
    .expect("Failed to create test app")
}

/// Helper to extract JSON body from axum response
pub async fn extract_json_body<T>(response: axum::response::Response) -> T
where
    T: serde::de::DeserializeOwned,
{
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");

    serde_json::from_slice(&body).expect("Failed to deserialize JSON")
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}
