//! Collapse remote app status into the three states the front end renders
//!
//! Two reducers exist and they deliberately disagree on some inputs:
//! [`compute_aware_state`] looks at both the compute substrate and the
//! rollout, while [`deployment_state`] only looks at the rollout. Both are
//! total: absent data yields [`LifecycleState::Off`].

use crate::app::{App, AppDeployment, ComputeState, ComputeStatus, DeploymentState};
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum LifecycleState {
    Off,
    Loading,
    On,
}

impl LifecycleState {
    pub fn as_str(&self) -> &'static str {
        match self {
            LifecycleState::Off => "off",
            LifecycleState::Loading => "loading",
            LifecycleState::On => "on",
        }
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compute-aware reducer
///
/// Rules, first match wins:
/// 1. compute stopped or stopping: off
/// 2. compute starting, or deployment in progress: loading
/// 3. deployment succeeded: on
/// 4. anything else: off
///
/// An app with no compute status at all is off. A compute status that
/// carries no state skips the compute rules and is decided by the deployment.
pub fn compute_aware_state(
    compute: Option<&ComputeStatus>,
    deployment: Option<&DeploymentState>,
) -> LifecycleState {
    let Some(compute) = compute else {
        return LifecycleState::Off;
    };

    match (compute.state.as_ref(), deployment) {
        (Some(ComputeState::Stopped | ComputeState::Stopping), _) => LifecycleState::Off,
        (Some(ComputeState::Starting), _) | (_, Some(DeploymentState::InProgress)) => {
            LifecycleState::Loading
        }
        (_, Some(DeploymentState::Succeeded)) => LifecycleState::On,
        _ => LifecycleState::Off,
    }
}

/// Deployment-only reducer, used where compute status is not consulted
pub fn deployment_state(active_deployment: Option<&AppDeployment>) -> LifecycleState {
    let state = active_deployment
        .and_then(|deployment| deployment.status.as_ref())
        .and_then(|status| status.state.as_ref());

    match state {
        Some(DeploymentState::Succeeded) => LifecycleState::On,
        Some(DeploymentState::Pending | DeploymentState::Running) => LifecycleState::Loading,
        _ => LifecycleState::Off,
    }
}

impl App {
    /// Lifecycle from the active deployment alone
    pub fn lifecycle_state(&self) -> LifecycleState {
        deployment_state(self.active_deployment.as_ref())
    }

    /// Lifecycle from compute and deployment status together
    pub fn compute_aware_lifecycle(&self) -> LifecycleState {
        compute_aware_state(self.compute_status.as_ref(), self.deployment_state())
    }
}
