//! CORS layer built from configuration.

use http::HeaderValue;
use tower_http::cors::{Any, CorsLayer};

use crate::config::ConfigError;

/// Build the CORS layer for `allowed_origins` ("*" or a comma-separated list).
pub fn build_cors_layer(allowed_origins: &str) -> Result<CorsLayer, ConfigError> {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if allowed_origins.trim() == "*" {
        return Ok(layer.allow_origin(Any));
    }

    let origins = allowed_origins
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<HeaderValue>()
                .map_err(|e| ConfigError::InvalidValue {
                    name: "CORS_ALLOWED_ORIGINS".to_string(),
                    reason: format!("{s:?}: {e}"),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(layer.allow_origin(origins))
}
