use crate::{
    error::ApiResult,
    gateway,
    schemas::{
        AppLifecycleResponse, AppStatusResponse, AppsListResponse, ErrorResponse, StartAppResponse,
    },
    state::AppState,
};
use axum::{
    extract::Path,
    routing::{get, post},
    Extension, Json, Router,
};
use dbx_apps::SharedDirectory;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/databricks/apps", get(list_apps))
        .route("/databricks/apps/{app_name}/start", post(start_app))
        .route("/databricks/apps/{app_name}/status", get(get_app_status))
        .route(
            "/databricks/apps/{app_name}/lifecycle",
            get(get_app_lifecycle),
        )
}

/// List all apps visible to the caller
#[utoipa::path(
    get,
    path = "/databricks/apps",
    tag = "apps",
    responses(
        (status = 200, description = "Apps visible to the caller", body = AppsListResponse),
        (status = 401, description = "Missing/invalid Authorization header", body = ErrorResponse),
        (status = 500, description = "Upstream failure", body = ErrorResponse)
    )
)]
pub async fn list_apps(
    Extension(directory): Extension<SharedDirectory>,
) -> ApiResult<Json<AppsListResponse>> {
    let apps = gateway::list_apps(directory.as_ref()).await?;
    Ok(Json(apps))
}

/// Ask the workspace to start an app
#[utoipa::path(
    post,
    path = "/databricks/apps/{app_name}/start",
    tag = "apps",
    params(("app_name" = String, Path, description = "Name of the app to start")),
    responses(
        (status = 200, description = "Start accepted", body = StartAppResponse),
        (status = 401, description = "Missing/invalid Authorization header", body = ErrorResponse),
        (status = 500, description = "Upstream failure", body = ErrorResponse)
    )
)]
pub async fn start_app(
    Path(app_name): Path<String>,
    Extension(directory): Extension<SharedDirectory>,
) -> ApiResult<Json<StartAppResponse>> {
    let response = gateway::start_app(directory.as_ref(), &app_name).await?;
    Ok(Json(response))
}

/// Current app snapshot and its deployment-derived state
#[utoipa::path(
    get,
    path = "/databricks/apps/{app_name}/status",
    tag = "apps",
    params(("app_name" = String, Path, description = "Name of the app to check")),
    responses(
        (status = 200, description = "App status", body = AppStatusResponse),
        (status = 401, description = "Missing/invalid Authorization header", body = ErrorResponse),
        (status = 500, description = "Upstream failure", body = ErrorResponse)
    )
)]
pub async fn get_app_status(
    Path(app_name): Path<String>,
    Extension(directory): Extension<SharedDirectory>,
) -> ApiResult<Json<AppStatusResponse>> {
    let response = gateway::app_status(directory.as_ref(), &app_name).await?;
    Ok(Json(response))
}

/// Current app snapshot with the compute-aware state
#[utoipa::path(
    get,
    path = "/databricks/apps/{app_name}/lifecycle",
    tag = "apps",
    params(("app_name" = String, Path, description = "Name of the app to check")),
    responses(
        (status = 200, description = "Compute and deployment lifecycle", body = AppLifecycleResponse),
        (status = 401, description = "Missing/invalid Authorization header", body = ErrorResponse),
        (status = 500, description = "Upstream failure", body = ErrorResponse)
    )
)]
pub async fn get_app_lifecycle(
    Path(app_name): Path<String>,
    Extension(directory): Extension<SharedDirectory>,
) -> ApiResult<Json<AppLifecycleResponse>> {
    let response = gateway::app_lifecycle(directory.as_ref(), &app_name).await?;
    Ok(Json(response))
}
