//! Request/response bodies served to the front end

use dbx_apps::{App, LifecycleState};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DeploymentStatusSummary {
    /// Remote deployment state, e.g. `SUCCEEDED`
    #[schema(example = "SUCCEEDED")]
    pub state: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DeploymentSummary {
    pub status: DeploymentStatusSummary,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AppResponse {
    #[schema(example = "my-app")]
    pub name: String,
    pub description: Option<String>,
    pub url: Option<String>,
    pub active_deployment: Option<DeploymentSummary>,
}

impl From<&App> for AppResponse {
    fn from(app: &App) -> Self {
        Self {
            name: app.name.clone(),
            description: app.description.clone(),
            url: app.url.clone(),
            active_deployment: app.active_deployment.as_ref().map(|_| DeploymentSummary {
                status: DeploymentStatusSummary {
                    state: app.deployment_state().map(|state| state.to_string()),
                },
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AppsListResponse {
    pub apps: Vec<AppResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StartAppResponse {
    pub success: bool,
    #[schema(example = "App my-app is starting")]
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AppStatusResponse {
    pub app: AppResponse,
    pub state: LifecycleState,
}

/// Compute-aware view of one app
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AppLifecycleResponse {
    pub app: AppResponse,
    #[schema(example = "ACTIVE")]
    pub compute_state: Option<String>,
    #[schema(example = "SUCCEEDED")]
    pub deployment_state: Option<String>,
    pub state: LifecycleState,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "healthy")]
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub detail: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use dbx_apps::{AppDeployment, DeploymentState};
    use serde_json::json;

    #[test]
    fn test_app_without_deployment_serializes_null() {
        let response = AppResponse::from(&App::new("plain"));

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "name": "plain",
                "description": null,
                "url": null,
                "active_deployment": null
            })
        );
    }

    #[test]
    fn test_deployment_state_is_flattened_to_string() {
        let app = App::new("live").with_deployment_state(DeploymentState::Succeeded);
        let response = AppResponse::from(&app);

        assert_eq!(
            serde_json::to_value(&response).unwrap()["active_deployment"],
            json!({ "status": { "state": "SUCCEEDED" } })
        );
    }

    #[test]
    fn test_deployment_without_status_keeps_shape() {
        let mut app = App::new("half");
        app.active_deployment = Some(AppDeployment::default());

        let response = AppResponse::from(&app);

        assert_eq!(
            serde_json::to_value(&response).unwrap()["active_deployment"],
            json!({ "status": { "state": null } })
        );
    }
}
