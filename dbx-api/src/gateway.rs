//! Directory calls translated into response shapes
//!
//! Every directory failure is caught here and reported once as an upstream
//! error carrying an operation-specific prefix and the original message.

use crate::{
    error::{ApiError, ApiResult},
    schemas::{
        AppLifecycleResponse, AppResponse, AppStatusResponse, AppsListResponse, StartAppResponse,
    },
};
use dbx_apps::{AppsDirectory, DirectoryError};
use tracing::{error, info};

fn upstream(prefix: &'static str) -> impl FnOnce(DirectoryError) -> ApiError {
    move |err| {
        error!("{}: {}", prefix, err);
        ApiError::Upstream(format!("{prefix}: {err}"))
    }
}

pub async fn list_apps(directory: &dyn AppsDirectory) -> ApiResult<AppsListResponse> {
    let apps = directory
        .list()
        .await
        .map_err(upstream("Failed to list apps"))?;

    Ok(AppsListResponse {
        apps: apps.iter().map(AppResponse::from).collect(),
    })
}

/// Returns as soon as the directory accepts the request; the app may still be off
pub async fn start_app(directory: &dyn AppsDirectory, name: &str) -> ApiResult<StartAppResponse> {
    directory
        .start(name)
        .await
        .map_err(upstream("Failed to start app"))?;

    info!("App {} started successfully", name);
    Ok(StartAppResponse {
        success: true,
        message: format!("App {name} is starting"),
    })
}

pub async fn app_status(directory: &dyn AppsDirectory, name: &str) -> ApiResult<AppStatusResponse> {
    let app = directory
        .get(name)
        .await
        .map_err(upstream("Failed to get app status"))?;

    Ok(AppStatusResponse {
        app: AppResponse::from(&app),
        state: app.lifecycle_state(),
    })
}

pub async fn app_lifecycle(
    directory: &dyn AppsDirectory,
    name: &str,
) -> ApiResult<AppLifecycleResponse> {
    let app = directory
        .get(name)
        .await
        .map_err(upstream("Failed to get app lifecycle"))?;

    Ok(AppLifecycleResponse {
        app: AppResponse::from(&app),
        compute_state: app.compute_state().map(|state| state.to_string()),
        deployment_state: app.deployment_state().map(|state| state.to_string()),
        state: app.compute_aware_lifecycle(),
    })
}
