pub mod apps;
pub mod health;

use crate::{api_docs::ApiDoc, auth::auth_middleware, state::AppState};
use anyhow::Context;
use axum::{http::HeaderValue, middleware, routing::get, Json, Router};
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;

/// `*` anywhere in the list allows every origin. A literal wildcard header
/// is not allowed together with credentials, so the request origin is echoed.
fn allow_origin(allowed_origins: &[String]) -> anyhow::Result<AllowOrigin> {
    if allowed_origins.iter().any(|origin| origin == "*") {
        return Ok(AllowOrigin::mirror_request());
    }

    let origins = allowed_origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin).with_context(|| format!("Invalid CORS origin: {origin}"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(AllowOrigin::list(origins))
}

fn cors_layer(allowed_origins: &[String]) -> anyhow::Result<CorsLayer> {
    Ok(CorsLayer::new()
        .allow_origin(allow_origin(allowed_origins)?)
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request()))
}

pub fn create_app(state: AppState, allowed_origins: &[String]) -> anyhow::Result<Router> {
    let cors = cors_layer(allowed_origins)?;

    let app = Router::new()
        .merge(health::routes()) // Health and docs don't need auth
        .route("/openapi.json", get(openapi_spec))
        .merge(apps::routes().route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        )))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}

async fn openapi_spec() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
