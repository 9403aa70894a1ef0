//! Databricks Apps domain logic
//!
//! This crate holds everything the gateway needs that is not HTTP-server code:
//! the app model as the remote API reports it, the lifecycle reducers that
//! collapse compute and deployment status into `off`/`loading`/`on`, the
//! per-request token exchange, and the directory client that lists, starts
//! and fetches apps. It is consumed by the dbx-api service.

pub mod app;
pub mod auth;
pub mod client;
pub mod directory;
pub mod error;
pub mod lifecycle;

pub use app::{App, AppDeployment, ComputeState, ComputeStatus, DeploymentState, DeploymentStatus};
pub use auth::{
    extract_bearer, AuthError, CredentialsProvider, IdToken, IdTokenSource, OidcCredentialsProvider,
};
pub use client::{WorkspaceClient, WorkspaceClientFactory, WorkspaceConfig};
pub use directory::{AppsDirectory, DirectoryFactory, SharedDirectory};
pub use error::{DirectoryError, Result};
pub use lifecycle::{compute_aware_state, deployment_state, LifecycleState};
