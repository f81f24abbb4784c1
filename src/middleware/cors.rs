use axum::http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};

use crate::error::{Error, Result};

pub fn cors_layer(allowed_origin: &str) -> Result<CorsLayer> {
    let origin = allowed_origin.parse::<HeaderValue>().map_err(|e| {
        Error::Config(format!("Invalid CORS origin '{}': {}", allowed_origin, e))
    })?;

    Ok(CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
        .allow_origin(origin))
}
