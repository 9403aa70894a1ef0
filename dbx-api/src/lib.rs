pub mod api_docs;
pub mod auth;
pub mod config;
pub mod error;
pub mod gateway;
pub mod routes;
pub mod schemas;
pub mod state;

pub use config::{Config, ConfigError};
pub use error::{ApiError, ApiResult};
pub use routes::create_app;
pub use state::AppState;
