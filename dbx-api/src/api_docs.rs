use crate::schemas::{
    AppLifecycleResponse, AppResponse, AppStatusResponse, AppsListResponse, DeploymentStatusSummary,
    DeploymentSummary, ErrorResponse, HealthResponse, StartAppResponse,
};
use dbx_apps::LifecycleState;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Databricks Apps API",
        description = "API for listing, starting and checking Databricks apps"
    ),
    paths(
        crate::routes::health::health_check,
        crate::routes::apps::list_apps,
        crate::routes::apps::start_app,
        crate::routes::apps::get_app_status,
        crate::routes::apps::get_app_lifecycle,
    ),
    components(
        schemas(
            AppResponse,
            AppsListResponse,
            StartAppResponse,
            AppStatusResponse,
            AppLifecycleResponse,
            DeploymentSummary,
            DeploymentStatusSummary,
            HealthResponse,
            ErrorResponse,
            LifecycleState
        )
    ),
    tags(
        (name = "health", description = "Liveness"),
        (name = "apps", description = "Databricks apps")
    )
)]
pub struct ApiDoc;
