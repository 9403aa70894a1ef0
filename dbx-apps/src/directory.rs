use crate::app::App;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Remote directory of apps visible to one authenticated caller
#[async_trait]
pub trait AppsDirectory: Send + Sync {
    /// Every app the caller can see
    async fn list(&self) -> Result<Vec<App>>;

    /// Ask the directory to start an app; returns once the request is accepted
    async fn start(&self, name: &str) -> Result<()>;

    /// Current snapshot of one app
    async fn get(&self, name: &str) -> Result<App>;
}

pub type SharedDirectory = Arc<dyn AppsDirectory>;

/// Builds an isolated, authenticated directory handle for one inbound request
///
/// Implementations must not share credentials between handles.
pub trait DirectoryFactory: Send + Sync {
    fn connect(&self, bearer_token: String) -> SharedDirectory;
}
