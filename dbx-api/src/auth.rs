use crate::{error::ApiError, state::AppState};
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use dbx_apps::extract_bearer;
use tracing::debug;

/// Auth middleware - turns the caller's bearer token into a directory handle
///
/// Every request gets its own handle from the factory; nothing is cached
/// between callers. Requests without a usable `Authorization: Bearer`
/// header are rejected here, before any upstream call.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let authorization = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = extract_bearer(authorization).inspect_err(|_| {
        debug!("Rejecting {} {}: no bearer token", req.method(), req.uri().path());
    })?;

    let directory = state.directories.connect(token);
    req.extensions_mut().insert(directory);

    Ok(next.run(req).await)
}
