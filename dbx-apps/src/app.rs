//! App records as the remote directory reports them
//!
//! Only the fields the gateway reads are modelled; anything else in the
//! remote payload is ignored during deserialization. The two state enums are
//! open on the remote side, so each carries an `Other` arm that preserves
//! the raw string instead of failing to decode.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct App {
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub compute_status: Option<ComputeStatus>,

    #[serde(default)]
    pub active_deployment: Option<AppDeployment>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputeStatus {
    #[serde(default)]
    pub state: Option<ComputeState>,

    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppDeployment {
    #[serde(default)]
    pub deployment_id: Option<String>,

    #[serde(default)]
    pub status: Option<DeploymentStatus>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentStatus {
    #[serde(default)]
    pub state: Option<DeploymentState>,

    #[serde(default)]
    pub message: Option<String>,
}

/// Rollout state of the most recent deployment
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DeploymentState {
    Succeeded,
    Failed,
    InProgress,
    Cancelled,
    Pending,
    Running,
    Other(String),
}

impl DeploymentState {
    pub fn as_str(&self) -> &str {
        match self {
            DeploymentState::Succeeded => "SUCCEEDED",
            DeploymentState::Failed => "FAILED",
            DeploymentState::InProgress => "IN_PROGRESS",
            DeploymentState::Cancelled => "CANCELLED",
            DeploymentState::Pending => "PENDING",
            DeploymentState::Running => "RUNNING",
            DeploymentState::Other(raw) => raw,
        }
    }
}

impl From<String> for DeploymentState {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "SUCCEEDED" => DeploymentState::Succeeded,
            "FAILED" => DeploymentState::Failed,
            "IN_PROGRESS" => DeploymentState::InProgress,
            "CANCELLED" => DeploymentState::Cancelled,
            "PENDING" => DeploymentState::Pending,
            "RUNNING" => DeploymentState::Running,
            _ => DeploymentState::Other(raw),
        }
    }
}

impl From<DeploymentState> for String {
    fn from(state: DeploymentState) -> Self {
        match state {
            DeploymentState::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for DeploymentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle of the compute backing an app
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ComputeState {
    Active,
    Starting,
    Running,
    Stopping,
    Stopped,
    Error,
    Deleting,
    Updating,
    Other(String),
}

impl ComputeState {
    pub fn as_str(&self) -> &str {
        match self {
            ComputeState::Active => "ACTIVE",
            ComputeState::Starting => "STARTING",
            ComputeState::Running => "RUNNING",
            ComputeState::Stopping => "STOPPING",
            ComputeState::Stopped => "STOPPED",
            ComputeState::Error => "ERROR",
            ComputeState::Deleting => "DELETING",
            ComputeState::Updating => "UPDATING",
            ComputeState::Other(raw) => raw,
        }
    }
}

impl From<String> for ComputeState {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "ACTIVE" => ComputeState::Active,
            "STARTING" => ComputeState::Starting,
            "RUNNING" => ComputeState::Running,
            "STOPPING" => ComputeState::Stopping,
            "STOPPED" => ComputeState::Stopped,
            "ERROR" => ComputeState::Error,
            "DELETING" => ComputeState::Deleting,
            "UPDATING" => ComputeState::Updating,
            _ => ComputeState::Other(raw),
        }
    }
}

impl From<ComputeState> for String {
    fn from(state: ComputeState) -> Self {
        match state {
            ComputeState::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ComputeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl App {
    /// Create a bare app record with only a name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            url: None,
            compute_status: None,
            active_deployment: None,
        }
    }

    /// `compute_status.state`, if every link of the chain is present
    pub fn compute_state(&self) -> Option<&ComputeState> {
        self.compute_status.as_ref()?.state.as_ref()
    }

    /// `active_deployment.status.state`, if every link of the chain is present
    pub fn deployment_state(&self) -> Option<&DeploymentState> {
        self.active_deployment.as_ref()?.status.as_ref()?.state.as_ref()
    }

    pub fn with_compute_state(mut self, state: ComputeState) -> Self {
        self.compute_status = Some(ComputeStatus {
            state: Some(state),
            message: None,
        });
        self
    }

    pub fn with_deployment_state(mut self, state: DeploymentState) -> Self {
        self.active_deployment = Some(AppDeployment {
            deployment_id: None,
            status: Some(DeploymentStatus {
                state: Some(state),
                message: None,
            }),
        });
        self
    }
}
